//! Payload decoding for market publications and rate series.

use serde::Deserialize;
use serde_json::Value;
use spotpris_types::{
    MarketDocument, MarketPoint, ParseError, RateObservation, SourceError,
    parse_date, parse_market_timestamp,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// Root element ENTSO-E answers with instead of prices when a day is not
/// available yet.
const ACKNOWLEDGEMENT_SENTINEL: &[u8] = b"<Acknowledgement_MarketDocument";

/// Series attribute carrying the power-of-ten scale of observations.
const UNIT_MULT: &str = "UNIT_MULT";

/// Observation dimension carrying the observation date.
const TIME_PERIOD: &str = "TIME_PERIOD";

/// Errors that can occur while decoding upstream payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The XML payload does not have the expected shape.
    #[error("error unmarshaling price xml: {0}")]
    Xml(String),

    /// The JSON payload does not have the expected shape.
    #[error("error unmarshaling exchange rate json: {0}")]
    Json(String),

    /// The publication has no time series.
    #[error("market document has no time series")]
    NoTimeSeries,

    /// A timestamp or date could not be parsed.
    #[error(transparent)]
    Timestamp(#[from] ParseError),

    /// An observation refers to a dimension value that does not exist.
    #[error("observation index {0} is out of range")]
    ObservationIndex(String),

    /// An observation value is not a number.
    #[error("observation value {0} is not a number")]
    ObservationValue(String),
}

impl From<DecodeError> for SourceError {
    fn from(err: DecodeError) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Returns true if `body` is an acknowledgement rather than a publication.
#[must_use]
pub fn is_acknowledgement(body: &[u8]) -> bool {
    body.windows(ACKNOWLEDGEMENT_SENTINEL.len())
        .any(|window| window == ACKNOWLEDGEMENT_SENTINEL)
}

#[derive(Debug, Deserialize)]
struct RawPublication {
    #[serde(rename = "TimeSeries", default)]
    time_series: Vec<RawTimeSeries>,
}

#[derive(Debug, Deserialize)]
struct RawTimeSeries {
    #[serde(rename = "Period", default)]
    periods: Vec<RawPeriod>,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    #[serde(rename = "timeInterval")]
    time_interval: RawInterval,
    resolution: String,
    #[serde(rename = "Point", default)]
    points: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawInterval {
    start: String,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    position: u32,
    #[serde(rename = "price.amount")]
    price_amount: f64,
}

/// Decodes a `Publication_MarketDocument` into a [`MarketDocument`].
///
/// Only the first period of the first time series is used.
///
/// # Errors
///
/// Returns an error if the payload is not a publication, has no time
/// series, or carries an invalid timestamp.
pub fn decode_market_document(body: &[u8]) -> Result<MarketDocument, DecodeError> {
    let raw: RawPublication =
        serde_xml_rs::from_reader(body).map_err(|e| DecodeError::Xml(e.to_string()))?;

    if raw.time_series.len() > 1 {
        warn!(count = raw.time_series.len(), "Publication has several time series, using the first");
    }
    let series = raw.time_series.into_iter().next().ok_or(DecodeError::NoTimeSeries)?;
    if series.periods.len() > 1 {
        warn!(count = series.periods.len(), "Time series has several periods, using the first");
    }
    let period = series.periods.into_iter().next().ok_or(DecodeError::NoTimeSeries)?;

    let period_start = parse_market_timestamp(&period.time_interval.start)?;
    let points = period
        .points
        .into_iter()
        .map(|point| MarketPoint::new(point.position, point.price_amount))
        .collect();

    Ok(MarketDocument::new(period.resolution, period_start, points))
}

#[derive(Debug, Deserialize)]
struct SdmxMessage {
    data: SdmxData,
}

#[derive(Debug, Deserialize)]
struct SdmxData {
    #[serde(rename = "dataSets", default)]
    data_sets: Vec<SdmxDataSet>,
    structure: SdmxStructure,
}

#[derive(Debug, Deserialize)]
struct SdmxDataSet {
    #[serde(default)]
    series: BTreeMap<String, SdmxSeries>,
}

#[derive(Debug, Deserialize)]
struct SdmxSeries {
    #[serde(default)]
    attributes: Vec<Option<usize>>,
    #[serde(default)]
    observations: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SdmxStructure {
    dimensions: SdmxDimensions,
    #[serde(default)]
    attributes: SdmxAttributes,
}

#[derive(Debug, Deserialize)]
struct SdmxDimensions {
    #[serde(default)]
    observation: Vec<SdmxComponent>,
}

#[derive(Debug, Default, Deserialize)]
struct SdmxAttributes {
    #[serde(default)]
    series: Vec<SdmxComponent>,
}

#[derive(Debug, Deserialize)]
struct SdmxComponent {
    id: String,
    #[serde(default)]
    values: Vec<SdmxValue>,
}

#[derive(Debug, Deserialize)]
struct SdmxValue {
    #[serde(default)]
    id: String,
}

impl SdmxStructure {
    fn scale_multiplier(&self, series: &SdmxSeries) -> i32 {
        self.attributes
            .series
            .iter()
            .position(|attribute| attribute.id == UNIT_MULT)
            .and_then(|index| {
                let value = (*series.attributes.get(index)?)?;
                self.attributes.series[index].values.get(value)
            })
            .and_then(|value| value.id.parse().ok())
            .unwrap_or(0)
    }

    fn time_dimension(&self) -> Option<&SdmxComponent> {
        self.dimensions
            .observation
            .iter()
            .find(|dimension| dimension.id == TIME_PERIOD)
            .or_else(|| self.dimensions.observation.first())
    }
}

/// Decodes an SDMX-JSON rate message into observations sorted by date.
///
/// A message without series decodes to an empty vector.
///
/// # Errors
///
/// Returns an error if the payload is not SDMX-JSON or an observation
/// cannot be interpreted.
pub fn decode_rate_series(body: &[u8]) -> Result<Vec<RateObservation>, DecodeError> {
    let message: SdmxMessage =
        serde_json::from_slice(body).map_err(|e| DecodeError::Json(e.to_string()))?;
    let structure = &message.data.structure;

    let Some(series) = message
        .data
        .data_sets
        .first()
        .and_then(|data_set| data_set.series.values().next())
    else {
        return Ok(Vec::new());
    };
    let Some(dates) = structure.time_dimension() else {
        return Ok(Vec::new());
    };
    let scale_multiplier = structure.scale_multiplier(series);

    let mut observations = Vec::with_capacity(series.observations.len());
    for (index, values) in &series.observations {
        let date_id = index
            .parse::<usize>()
            .ok()
            .and_then(|i| dates.values.get(i))
            .ok_or_else(|| DecodeError::ObservationIndex(index.clone()))?;
        let Some(value) = values.first().filter(|value| !value.is_null()) else {
            continue;
        };
        observations.push(RateObservation::new(
            parse_date(&date_id.id)?,
            observation_value(value)?,
            scale_multiplier,
        ));
    }

    observations.sort_by_key(|observation| observation.date);
    Ok(observations)
}

fn observation_value(value: &Value) -> Result<f64, DecodeError> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| DecodeError::ObservationValue(value.to_string()))
}
