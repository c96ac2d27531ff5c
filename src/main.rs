mod categorizer;
mod cli;
mod error;
mod fmt;
mod loader;
mod models;
mod rules;
mod transform;
mod writer;

use clap::Parser;

use cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli::convert::run(&cli.input, &cli.output, &cli.config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
