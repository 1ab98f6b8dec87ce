#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Project repository for the water-risk service.
//!
//! Reads data-center construction projects from a `GeoJSON` feature file,
//! fills in missing attributes, and falls back to a built-in Northern
//! Virginia sample set whenever the file is absent or unusable. The loaded
//! set is wrapped in a read-only [`catalog::ProjectCatalog`] that is built
//! once at startup and passed to whoever needs it.

pub mod catalog;
pub mod loader;
pub mod paths;
pub mod sample;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a project feature file.
///
/// These never reach callers of [`loader::load_projects`]; they only
/// explain why the sample set was used instead.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The feature file does not exist.
    #[error("Feature file not found: {}", path.display())]
    Missing {
        /// Path that was checked.
        path: PathBuf,
    },

    /// Reading the feature file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The feature file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The feature file parsed but contained no usable features.
    #[error("No usable features in {}", path.display())]
    NoFeatures {
        /// Path of the empty feature file.
        path: PathBuf,
    },
}
