//! The `geoip6` command as a library function.
//!
//! `main.rs` only loads the environment, parses [`Config`], sets up logging
//! and maps the outcome of [`run`] to a process exit code with [`exit_code`].
//! Input and output are passed in so the whole command can run in-process.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;

use crate::config::{Config, OutputFormat};
use crate::error_handling::LookupError;
use crate::geoip::{Country6, CountryRecord, DatabaseHandle};

/// Every host resolved, or `--info` succeeded.
pub const EXIT_OK: i32 = 0;
/// Opening the database, reading input or a lookup failed.
pub const EXIT_ERROR: i32 = 1;
/// At least one host had no record.
pub const EXIT_MISS: i32 = 2;

/// Counts from one run of the command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub resolved: usize,
    pub misses: usize,
}

/// Maps the outcome of [`run`] to the process exit code.
pub fn exit_code(outcome: &Result<RunSummary>) -> i32 {
    match outcome {
        Ok(summary) if summary.misses > 0 => EXIT_MISS,
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_ERROR,
    }
}

/// Reads one host per line, skipping blank lines and `#` comments.
pub fn read_hosts(input: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut hosts = Vec::new();
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            hosts.push(line.to_string());
        }
    }
    Ok(hosts)
}

/// Runs the command, writing one result line per host to `out`.
///
/// Hosts come from `input` when the only positional argument is `-`.
pub async fn run(config: &Config, input: impl BufRead, out: &mut impl Write) -> Result<RunSummary> {
    if config.info {
        let handle = DatabaseHandle::open_any(&config.database, config.cache_mode())
            .with_context(|| format!("Failed to inspect {}", config.database.display()))?;
        writeln!(out, "path:    {}", handle.path().display())?;
        writeln!(out, "edition: {} ({})", handle.edition(), handle.edition().as_byte())?;
        writeln!(out, "size:    {} bytes", handle.size())?;
        writeln!(out, "info:    {}", handle.info().unwrap_or("-"))?;
        return Ok(RunSummary::default());
    }

    let geo = Country6::open(&config.database, config.cache_mode())
        .with_context(|| format!("Failed to open {}", config.database.display()))?;

    let hosts = if config.reads_stdin() {
        read_hosts(input).context("Failed to read hosts from stdin")?
    } else {
        config.hosts.clone()
    };

    let mut summary = RunSummary::default();
    if config.use_async {
        let mut tasks = FuturesUnordered::new();
        for host in &hosts {
            let pending = geo
                .lookup_async(host)
                .with_context(|| format!("Lookup of {} failed", host))?;
            tasks.push(async move { (host, pending.await) });
        }
        while let Some((host, result)) = tasks.next().await {
            let record = match result {
                Ok(record) => Some(record),
                Err(LookupError::NotFound) => None,
                Err(e) => return Err(e).with_context(|| format!("Lookup of {} failed", host)),
            };
            summary.record(record.is_some());
            print_result(out, config.output, host, record.as_ref())?;
        }
    } else {
        for host in &hosts {
            let record = geo
                .lookup_sync(host)
                .with_context(|| format!("Lookup of {} failed", host))?;
            summary.record(record.is_some());
            print_result(out, config.output, host, record.as_ref())?;
        }
    }

    log::info!("Resolved {} of {} hosts", summary.resolved, hosts.len());
    Ok(summary)
}

impl RunSummary {
    fn record(&mut self, hit: bool) {
        if hit {
            self.resolved += 1;
        } else {
            self.misses += 1;
        }
    }
}

/// Writes one result line.
///
/// Plain output is tab separated, with `-` standing in for a miss. JSON output
/// is `{"host": .., "record": ..}` with `record` null on a miss.
pub fn print_result(
    out: &mut impl Write,
    format: OutputFormat,
    host: &str,
    record: Option<&CountryRecord>,
) -> Result<()> {
    match format {
        OutputFormat::Plain => match record {
            Some(r) => writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                host, r.country_code, r.country_code3, r.continent_code, r.country_name
            )?,
            None => writeln!(out, "{}\t-", host)?,
        },
        OutputFormat::Json => {
            let line = serde_json::json!({ "host": host, "record": record });
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
    }
    Ok(())
}
