use chrono::{Datelike, NaiveDate};

const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d"];

/// Render an amount: whole numbers without a decimal point, everything else
/// with the shortest representation that round-trips.
pub fn format_value(val: f64) -> String {
    if val.is_finite() && val.fract() == 0.0 && val.abs() < i64::MAX as f64 {
        format!("{}", val as i64)
    } else {
        format!("{val}")
    }
}

/// Parse a displayed statement date, day before month.
pub fn parse_date_dmy(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DAY_FIRST_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
}

pub fn format_date_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Last day of `month`: the day before the first of the following month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|d| d.day())
}

/// Move `date` back by whole calendar months; a negative count moves it
/// forward. The day of month is kept and clamped to the last day of the
/// target month when it does not exist there.
pub fn subtract_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = (date.year() as i64 * 12 + date.month0() as i64).checked_sub(months)?;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}
