use std::path::Path;

use crate::error::{FaturaError, Result};
use crate::models::OutputRecord;

#[cfg(windows)]
const TERMINATOR: csv::Terminator = csv::Terminator::CRLF;
#[cfg(not(windows))]
const TERMINATOR: csv::Terminator = csv::Terminator::Any(b'\n');

/// Serialise records as semicolon-separated, fully quoted text.
pub fn to_bytes(records: &[OutputRecord]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Always)
        .terminator(TERMINATOR)
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(["Date", "Description", "Value", "Account", "Category"])?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Write the converted statement. The file is only created once the whole
/// table has been serialised.
pub fn save(records: &[OutputRecord], path: &Path) -> Result<()> {
    let bytes = to_bytes(records).map_err(|e| FaturaError::output(path, e))?;
    std::fs::write(path, bytes).map_err(|e| FaturaError::output(path, e))?;
    log::debug!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
