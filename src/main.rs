//! Command-line entry point.
//!
//! A thin wrapper around the `geoip_country6` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - Mapping the run outcome to an exit code

use std::io;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use geoip_country6::cli::{self, EXIT_OK};
use geoip_country6::initialization::init_logger_with;
use geoip_country6::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // GEOIP6_DATABASE may come from a .env file
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let outcome = cli::run(&config, io::stdin().lock(), &mut io::stdout().lock()).await;
    if let Err(e) = &outcome {
        eprintln!("geoip6 error: {:#}", e);
    }
    match cli::exit_code(&outcome) {
        EXIT_OK => Ok(()),
        code => process::exit(code),
    }
}
