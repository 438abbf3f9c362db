//! JSON output format.

use spotpris_types::Forecast;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// One object keyed by the ISO-8601 start of each hour.
    #[default]
    Object,
    /// Newline-delimited JSON, one hour per line in chronological order.
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for object style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (object style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Object,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (object style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_forecast<W: Write + Send>(
        &self,
        forecast: &Forecast,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Object => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, forecast)?;
                } else {
                    serde_json::to_writer(&mut writer, forecast)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for point in forecast.points() {
                    serde_json::to_writer(&mut writer, point)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Object => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
