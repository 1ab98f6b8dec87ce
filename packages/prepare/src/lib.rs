#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Offline tools that prepare project feature files.
//!
//! These run by hand before the server starts, never during request
//! handling:
//!
//! * [`export`] rewrites a raw OSM-style export into the project property
//!   schema, estimating areas from the boundary rings.
//! * [`repair`] replaces every geometry (usually point-only or empty ones
//!   from an incomplete export) with a square polygon sized from the
//!   project's recorded area.

pub mod export;
pub mod repair;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while preparing feature files.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file has no `features` array.
    #[error("No features array in {}", path.display())]
    MissingFeatures {
        /// Offending file.
        path: PathBuf,
    },
}

/// Reads a feature collection and returns it with its `features` array.
///
/// # Errors
///
/// Returns [`PrepareError`] if the file cannot be read or parsed, or has
/// no `features` array.
pub fn read_collection(
    path: &Path,
) -> Result<(serde_json::Value, Vec<serde_json::Value>), PrepareError> {
    let contents = std::fs::read_to_string(path)?;
    let payload: serde_json::Value = serde_json::from_str(&contents)?;
    let features = payload
        .get("features")
        .and_then(serde_json::Value::as_array)
        .cloned()
        .ok_or_else(|| PrepareError::MissingFeatures {
            path: path.to_path_buf(),
        })?;
    Ok((payload, features))
}

/// Writes `payload` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PrepareError`] if serialization or the write fails.
pub fn write_collection(path: &Path, payload: &serde_json::Value) -> Result<(), PrepareError> {
    let json = serde_json::to_string_pretty(payload)?;
    std::fs::write(path, json)?;
    Ok(())
}
