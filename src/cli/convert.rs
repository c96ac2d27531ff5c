use std::path::PathBuf;

use colored::Colorize;

use crate::error::Result;
use crate::loader::load_table;
use crate::rules::load_config;
use crate::transform::{transform, TransformReport};
use crate::writer::save;

pub fn run(input: &str, output: &str, config: &str) -> Result<TransformReport> {
    let input_path = PathBuf::from(input);
    let output_path = PathBuf::from(output);

    let rules = load_config(&PathBuf::from(config))?;
    let table = load_table(&input_path)?;
    let (records, report) = transform(&table, &input_path, &rules)?;
    save(&records, &output_path)?;

    println!(
        "{} rows written to {} ({} removed by description filter)",
        records.len().to_string().green().bold(),
        output_path.display(),
        report.removed
    );
    log::debug!(
        "{} rows loaded, {} installments adjusted, {} categories assigned",
        report.loaded,
        report.installments_adjusted,
        report.categories_assigned
    );
    if report.installment_warnings > 0 {
        println!(
            "{}",
            format!(
                "{} installment marker(s) could not be applied; see warnings above",
                report.installment_warnings
            )
            .yellow()
        );
    }

    Ok(report)
}
