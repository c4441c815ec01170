//! Writing and reading the per-run artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use playsmart_core::{Deal, RawDealRecord, DEAL_COLUMNS};

use crate::error::StoreError;
use crate::naming::{latest_processed_file, processed_file_name, raw_file_name};

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))
}

/// Writes the untouched API batch to `<dir>/deals_raw_<stamp>.json` as
/// pretty-printed JSON and returns the path.
///
/// # Errors
///
/// [`StoreError::Io`] if the directory or file cannot be written,
/// [`StoreError::Json`] if the batch cannot be serialized.
pub fn save_raw_batch(
    dir: &Path,
    raw: &[RawDealRecord],
    at: DateTime<Utc>,
) -> Result<PathBuf, StoreError> {
    ensure_dir(dir)?;
    let path = dir.join(raw_file_name(at));
    let body = serde_json::to_vec_pretty(raw).map_err(|e| StoreError::json(&path, e))?;
    fs::write(&path, body).map_err(|e| StoreError::io(&path, e))?;

    tracing::info!(path = %path.display(), records = raw.len(), "saved raw batch");
    Ok(path)
}

/// Writes `deals` to `<dir>/deals_processed_<stamp>.csv`, header first, one
/// row per deal in the given order, and returns the path.
///
/// Missing optional values are written as empty fields.
///
/// # Errors
///
/// [`StoreError::Io`] if the directory cannot be created,
/// [`StoreError::Csv`] if the file cannot be written.
pub fn save_processed(
    dir: &Path,
    deals: &[Deal],
    at: DateTime<Utc>,
) -> Result<PathBuf, StoreError> {
    ensure_dir(dir)?;
    let path = dir.join(processed_file_name(at));

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(|e| StoreError::csv(&path, e))?;
    writer
        .write_record(DEAL_COLUMNS)
        .map_err(|e| StoreError::csv(&path, e))?;
    for deal in deals {
        writer
            .serialize(deal)
            .map_err(|e| StoreError::csv(&path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(&path, e))?;

    tracing::info!(path = %path.display(), deals = deals.len(), "saved processed deals");
    Ok(path)
}

/// Reads a processed CSV back into [`Deal`]s, in file order.
///
/// Columns are matched by header name.
///
/// # Errors
///
/// [`StoreError::Csv`] if the file cannot be opened or a row does not
/// deserialize.
pub fn read_deals(path: &Path) -> Result<Vec<Deal>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;

    reader
        .deserialize::<Deal>()
        .map(|row| row.map_err(|e| StoreError::csv(path, e)))
        .collect()
}

/// The most recent processed file in `dir` and its deals, or `None` when no
/// run has been persisted yet.
///
/// # Errors
///
/// Propagates errors from [`latest_processed_file`] and [`read_deals`].
pub fn load_latest(dir: &Path) -> Result<Option<(PathBuf, Vec<Deal>)>, StoreError> {
    let Some(path) = latest_processed_file(dir)? else {
        tracing::debug!(dir = %dir.display(), "no processed file found");
        return Ok(None);
    };
    let deals = read_deals(&path)?;
    tracing::debug!(path = %path.display(), deals = deals.len(), "loaded latest processed file");
    Ok(Some((path, deals)))
}
