//! sheetbase - employee directory CLI
//!
//! Reads configuration from the environment (and `.env`), refreshes the
//! directory from the sheet endpoint and runs one command.

use clap::Parser;
use sheetbase::cli::{self, Cli, Command};
use sheetbase::{logger, AppConfig, Directory};
use std::process::ExitCode;

/// Exit code when no endpoint is configured
const EXIT_SETUP_REQUIRED: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    let config = AppConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    if matches!(cli.command, Command::Config) {
        println!("{config}");
        println!(
            "setup required          = {}",
            if config.is_setup_required() { "yes" } else { "no" }
        );
        return Ok(ExitCode::SUCCESS);
    }

    let mut directory = Directory::from_config(&config)?;
    if directory.is_setup_required() {
        eprintln!("{}", cli::setup_instructions());
        return Ok(ExitCode::from(EXIT_SETUP_REQUIRED));
    }

    let mut out = cli::stdout();
    match cli::execute(&mut directory, cli.command, &mut out).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(notice) => {
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
    }
}
