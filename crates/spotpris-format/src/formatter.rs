//! Output format abstraction.

use spotpris_types::Forecast;
use std::io::Write;
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON object keyed by hour.
    #[default]
    Json,
    /// Newline-delimited JSON, one hour per line.
    Ndjson,
    /// CSV format.
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Csv => "csv",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Json, Self::Ndjson, Self::Csv]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "csv" => Ok(Self::Csv),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes a forecast to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_forecast<W: Write + Send>(
        &self,
        forecast: &Forecast,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

/// Writes `forecast` with the default formatter of `format`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_forecast<W: Write + Send>(
    format: OutputFormat,
    forecast: &Forecast,
    writer: W,
) -> Result<(), FormatError> {
    match format {
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_forecast(forecast, writer),
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_forecast(forecast, writer),
        OutputFormat::Csv => CsvFormatter::new().write_forecast(forecast, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_display_matches_extension() {
        for format in OutputFormat::all() {
            assert_eq!(format.to_string(), format.extension());
        }
    }

    #[test]
    fn test_write_empty_forecast() {
        let mut output = Vec::new();
        write_forecast(OutputFormat::Json, &Forecast::new(), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().trim(), "{}");
    }
}
