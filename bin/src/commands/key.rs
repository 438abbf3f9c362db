//! API key administration.

use crate::commands::StoreArgs;
use crate::display::print_key;
use anyhow::{Context, Result};
use spotpris_lib::prelude::*;

/// Register `key` with the given quota.
pub(crate) async fn add_key(
    store: &StoreArgs,
    key: &str,
    email: &str,
    quota: u32,
    name: Option<&str>,
) -> Result<()> {
    let guard = store.quota_guard()?;

    let mut record = ApiKey::new(email, quota);
    if let Some(name) = name {
        record = record.with_name(name);
    }

    guard
        .register_key(key, &record)
        .await
        .with_context(|| format!("Failed to register API key {key}"))?;

    println!("API key registered.");
    print_key(key, &record, None);
    Ok(())
}

/// Block `key`, keeping its record.
pub(crate) async fn block_key(store: &StoreArgs, key: &str, reason: &str) -> Result<()> {
    let guard = store.quota_guard()?;
    let record = guard
        .block_key(key, reason)
        .await
        .with_context(|| format!("Failed to block API key {key}"))?;

    println!("API key blocked.");
    print_key(key, &record, None);
    Ok(())
}

/// Show `key` and its usage today.
pub(crate) async fn show_key(store: &StoreArgs, key: &str) -> Result<()> {
    let guard = store.quota_guard()?;
    let record = guard
        .get_key(key)
        .await
        .with_context(|| format!("Failed to look up API key {key}"))?;
    let usage = guard
        .usage_today(key)
        .await
        .context("Failed to read today's usage")?;

    print_key(key, &record, Some(&usage));
    Ok(())
}
