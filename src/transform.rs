//! Statement → ledger pipeline. Each step takes the rows by value and hands
//! them to the next one, in a fixed order.

use std::path::Path;

use crate::categorizer::categorize_rows;
use crate::error::{FaturaError, InstallmentError, Result};
use crate::fmt::{format_date_dmy, format_value, parse_date_dmy, subtract_months};
use crate::loader::{parse_amount, RawTable};
use crate::models::{Installment, OutputRecord, Row, Value};
use crate::rules::{Keyword, RuleSet};

/// Source header → canonical field. Columns not listed here are not carried.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Data de Compra", "Date"),
    ("Descrição", "Description"),
    ("Valor (em R$)", "Value"),
    ("Categoria", "Category"),
    ("Parcela", "Installment"),
];

const REQUIRED: &[&str] = &["Date", "Description", "Value", "Category"];

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransformReport {
    pub loaded: usize,
    pub removed: usize,
    pub installments_adjusted: usize,
    pub installment_warnings: usize,
    pub categories_assigned: usize,
}

fn canonical(header: &str) -> &str {
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == header)
        .map_or(header, |(_, to)| *to)
}

// ---------------------------------------------------------------------------
// Step 1: rename
// ---------------------------------------------------------------------------

pub fn rename(table: &RawTable, source: &Path) -> Result<Vec<Row>> {
    let names: Vec<&str> = table.headers.iter().map(|h| canonical(h)).collect();
    let index = |field: &str| names.iter().position(|n| *n == field);

    let required: Vec<Option<usize>> = REQUIRED.iter().map(|f| index(*f)).collect();
    let [Some(date), Some(desc), Some(value), Some(cat)] = required[..] else {
        let wanted: Vec<&str> = REQUIRED
            .iter()
            .zip(&required)
            .filter(|(_, idx)| idx.is_none())
            .map(|(f, _)| {
                COLUMN_RENAMES
                    .iter()
                    .find(|(_, to)| to == f)
                    .map_or(*f, |(from, _)| *from)
            })
            .collect();
        return Err(FaturaError::input(
            source,
            format!("missing column(s): {}", wanted.join(", ")),
        ));
    };
    let installment = index("Installment");

    table
        .records
        .iter()
        .map(|(line, fields)| {
            let raw_value = &fields[value];
            let amount = parse_amount(raw_value).ok_or_else(|| {
                FaturaError::input(source, format!("line {line}: invalid value '{raw_value}'"))
            })?;
            Ok(Row {
                line: *line,
                date: fields[date].clone(),
                description: fields[desc].clone(),
                value: Value::Amount(amount),
                account: String::new(),
                category: fields[cat].clone(),
                installment: installment
                    .map(|i| fields[i].trim().to_string())
                    .filter(|s| !s.is_empty()),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Step 2: inject account
// ---------------------------------------------------------------------------

pub fn inject_account(rows: Vec<Row>, account: &str) -> Vec<Row> {
    rows.into_iter()
        .map(|row| Row {
            account: account.to_string(),
            ..row
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Step 3: filter
// ---------------------------------------------------------------------------

pub fn remove_descriptions(rows: Vec<Row>, keywords: &[Keyword]) -> Vec<Row> {
    rows.into_iter()
        .filter(|row| !keywords.iter().any(|k| k.is_match(&row.description)))
        .collect()
}

// ---------------------------------------------------------------------------
// Step 4: installments
// ---------------------------------------------------------------------------

pub fn parse_installment(raw: &str) -> std::result::Result<Installment, InstallmentError> {
    let parts: Vec<&str> = raw.split('/').map(str::trim).collect();
    let [current, total] = parts.as_slice() else {
        return Err(InstallmentError::Malformed(raw.to_string()));
    };
    let parse = |s: &str| {
        s.parse::<i64>()
            .map_err(|_| InstallmentError::Malformed(raw.to_string()))
    };
    let (current, total) = (parse(*current)?, parse(*total)?);
    if current <= 0 || total <= 0 {
        return Err(InstallmentError::NotPositive(raw.to_string()));
    }
    let narrow = |n: i64| {
        u32::try_from(n).map_err(|_| InstallmentError::Malformed(raw.to_string()))
    };
    Ok(Installment {
        current: narrow(current)?,
        total: narrow(total)?,
    })
}

/// Move the purchase date back to the month the purchase was made and tag
/// the description with the installment fraction.
pub fn adjust_installment(row: &mut Row) -> std::result::Result<bool, InstallmentError> {
    let Some(raw) = row.installment.take() else {
        return Ok(false);
    };
    if !raw.contains('/') {
        return Ok(false);
    }
    let installment = parse_installment(&raw)?;
    let date = parse_date_dmy(&row.date).ok_or_else(|| InstallmentError::BadDate(row.date.clone()))?;
    let months = installment.months_back();
    let adjusted = subtract_months(date, months)
        .ok_or_else(|| InstallmentError::OutOfRange(row.date.clone(), months))?;

    row.date = format_date_dmy(adjusted);
    row.description = format!("{} ({raw})", row.description);
    Ok(true)
}

pub fn adjust_installments(mut rows: Vec<Row>, report: &mut TransformReport) -> Vec<Row> {
    for row in rows.iter_mut() {
        match adjust_installment(row) {
            Ok(true) => report.installments_adjusted += 1,
            Ok(false) => {}
            Err(e) => {
                log::warn!("line {}: skipping installment adjustment: {e}", row.line);
                report.installment_warnings += 1;
            }
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Step 5: values
// ---------------------------------------------------------------------------

pub fn format_values(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .map(|row| {
            let value = match row.value {
                Value::Amount(v) => Value::Rendered(format_value(v)),
                rendered => rendered,
            };
            Row { value, ..row }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Step 7: project
// ---------------------------------------------------------------------------

pub fn project(rows: Vec<Row>) -> Vec<OutputRecord> {
    rows.into_iter().map(OutputRecord::from).collect()
}

/// Run steps 1–7 in order.
pub fn transform(
    table: &RawTable,
    source: &Path,
    rules: &RuleSet,
) -> Result<(Vec<OutputRecord>, TransformReport)> {
    let mut report = TransformReport {
        loaded: table.records.len(),
        ..Default::default()
    };

    let rows = rename(table, source)?;
    let rows = inject_account(rows, &rules.fixed_account);
    let before = rows.len();
    let rows = remove_descriptions(rows, &rules.remove_descriptions);
    report.removed = before - rows.len();
    log::debug!("removed {} rows by description", report.removed);
    let rows = adjust_installments(rows, &mut report);
    let mut rows = format_values(rows);
    let categorized = categorize_rows(&mut rows, &rules.category_rules);
    log::debug!(
        "{} category rules matched, {} assignments",
        categorized.rules_matched,
        categorized.assignments
    );
    report.categories_assigned = categorized.assignments;

    Ok((project(rows), report))
}
