//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DATABASE_PATH_ENV, DEFAULT_DATABASE_PATH};
use crate::geoip::CacheMode;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How lookup results are printed by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated line per host
    Plain,
    /// One JSON object per host
    Json,
}

/// CLI configuration.
///
/// # Examples
///
/// ```no_run
/// use geoip_country6::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     database: PathBuf::from("/usr/share/GeoIP/GeoIPv6.dat"),
///     memory_cache: true,
///     hosts: vec!["2001:4860:4860::8888".to_string()],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geoip6",
    version,
    about = "Resolve IPv6 addresses to countries using a local GeoIP database"
)]
pub struct Config {
    /// Path to the country IPv6 database (.dat)
    #[arg(long, short = 'd', env = DATABASE_PATH_ENV, default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    /// Load the whole database into memory instead of reading through the file
    #[arg(long)]
    pub memory_cache: bool,

    /// Dispatch lookups to the worker pool instead of resolving inline
    #[arg(long = "async")]
    pub use_async: bool,

    /// Print database edition and info, then exit
    #[arg(long)]
    pub info: bool,

    /// Output format for lookup results
    #[arg(long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// IPv6 addresses to resolve ("-" reads them from stdin, one per line)
    pub hosts: Vec<String>,
}

impl Config {
    /// Cache mode derived from the `--memory-cache` flag.
    pub fn cache_mode(&self) -> CacheMode {
        CacheMode::from(self.memory_cache)
    }

    /// Whether hosts should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.hosts.len() == 1 && self.hosts[0] == "-"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE_PATH),
            memory_cache: false,
            use_async: false,
            info: false,
            output: OutputFormat::Plain,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            hosts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert!(!config.memory_cache);
        assert!(!config.use_async);
        assert_eq!(config.output, OutputFormat::Plain);
        assert_eq!(config.cache_mode(), CacheMode::Standard);
    }

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "geoip6",
            "--database",
            "/tmp/v6.dat",
            "--memory-cache",
            "--async",
            "--output",
            "json",
            "::1",
            "2001:db8::1",
        ])
        .unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/v6.dat"));
        assert_eq!(config.cache_mode(), CacheMode::MemoryCache);
        assert!(config.use_async);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.hosts, vec!["::1", "2001:db8::1"]);
        assert!(!config.reads_stdin());
    }

    #[test]
    fn test_stdin_marker() {
        let config = Config::try_parse_from(["geoip6", "-d", "x.dat", "-"]).unwrap();
        assert!(config.reads_stdin());
    }

    #[test]
    fn test_rejects_unknown_output() {
        let result = Config::try_parse_from(["geoip6", "--output", "xml"]);
        assert!(result.is_err());
    }
}
