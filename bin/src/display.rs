//! Display utilities and output formatting for the spotpris CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use spotpris_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Output format for a forecast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Json,
    Ndjson,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Csv => Self::Csv,
        }
    }
}

/// Write a forecast to `output`, or stdout when no path is given.
pub(crate) fn write_output(
    forecast: &Forecast,
    output: Option<&PathBuf>,
    format: Format,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_forecast(format.into(), forecast, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = std::io::stdout();
            write_forecast(format.into(), forecast, &mut stdout)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Print a key record, with today's usage when given.
pub(crate) fn print_key(key: &str, record: &ApiKey, usage: Option<&ZoneUsage>) {
    println!("Key:     {key}");
    if !record.name.is_empty() {
        println!("Name:    {}", record.name);
    }
    println!("Email:   {}", record.email);
    println!("Quota:   {} requests per zone per day", record.quota);
    if record.blocked {
        println!("Blocked: {}", record.reason);
    }

    if let Some(usage) = usage {
        println!("\nUsage today:");
        for zone in Zone::all() {
            println!("  {:<4} {:>6}", zone.as_str(), usage.count(*zone));
        }
        println!("  {:<4} {:>6}", "ALL", usage.total());
    }
}
