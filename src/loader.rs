use std::path::Path;

use csv::StringRecord;

use crate::error::{FaturaError, Result};

/// Statement rows as read from disk, before column renaming.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// `(line, fields)` pairs; `line` is 1-based in the source file.
    pub records: Vec<(u64, Vec<String>)>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a statement amount. Accepts `150`, `150.5`, `150,50`, `1.234,56`,
/// `1,234.56` and an optional `R$` prefix.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim().trim_start_matches("R$").trim().replace(' ', "");
    if s.is_empty() {
        return None;
    }
    let normalized = match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) => s.replace(',', "."),
        _ => s,
    };
    normalized.parse().ok()
}

fn record_fields(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// load_table
// ---------------------------------------------------------------------------

/// Read a semicolon-delimited statement with a header row.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|e| FaturaError::input(path, e))?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_reader(std::io::BufReader::new(file));

    let headers = rdr
        .headers()
        .map_err(|e| FaturaError::input(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| FaturaError::input(path, e))?;
        let line = record.position().map_or(0, |p| p.line());
        records.push((line, record_fields(&record)));
    }

    log::debug!("loaded {} rows from {}", records.len(), path.display());
    Ok(RawTable { headers, records })
}
