pub mod convert;

use clap::Parser;

use crate::rules::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(
    name = "fatura",
    version,
    about = "Convert a credit-card statement export into a ledger-import CSV."
)]
pub struct Cli {
    /// Semicolon-delimited statement export to read
    pub input: String,
    /// Where to write the converted CSV
    pub output: String,
    /// JSON rule file (account, removals, category mappings)
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}
