//! Forecast command implementation.
//!
//! Runs one request through the full service pipeline: validation, quota,
//! cache, upstream fetch and conversion.

use crate::commands::StoreArgs;
use crate::display::{Format, write_output};
use anyhow::{Context, Result, bail};
use spotpris_lib::DATE_FORMAT;
use spotpris_lib::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Fetch the forecast of `zone` on `date` (today by default) and write it out.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn forecast(
    store: &StoreArgs,
    zone: &str,
    date: Option<&str>,
    api_key: &str,
    security_token: String,
    output: Option<PathBuf>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let config = ServiceConfig::default().with_time_zone(store.time_zone);

    let market = EntsoeClient::new(
        EntsoeConfig::new(security_token).with_time_zone(store.time_zone),
        ClientConfig::default(),
    )
    .context("Failed to create the ENTSO-E client")?;
    let rates = NorgesBankClient::new(NorgesBankConfig::default(), ClientConfig::default())
        .context("Failed to create the Norges Bank client")?;
    let clock = Arc::new(SystemClock);

    let date = date.map_or_else(
        || clock.today(store.time_zone).format(DATE_FORMAT).to_string(),
        str::to_string,
    );
    let request = ForecastRequest::new(zone, date, api_key);

    let service = ForecastService::new(
        config,
        Arc::new(market),
        Arc::new(rates),
        store.open()?,
        clock,
    );

    let result = tokio::select! {
        result = service.handle(&request) => result,
        _ = tokio::signal::ctrl_c() => bail!("Interrupted"),
    };

    let forecast = match result {
        Ok(forecast) => forecast,
        Err(e) => {
            let status = e.status_code();
            return Err(e).with_context(|| {
                format!(
                    "Forecast request for {} on {} failed ({status})",
                    request.zone, request.date
                )
            });
        }
    };

    write_output(&forecast, output.as_ref(), format)?;

    if !quiet {
        eprintln!(
            "{} hourly prices for {} on {}",
            forecast.len(),
            request.zone.to_uppercase(),
            request.date
        );
        if let Some(path) = output {
            eprintln!("Output written to: {}", path.display());
        }
    }

    Ok(())
}
