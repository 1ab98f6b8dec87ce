#![allow(clippy::module_name_repetitions)]
//! Canonical location of the project feature file.
//!
//! Defaults to `data/projects.geojson` under the workspace root and can be
//! overridden with the `PROJECTS_GEOJSON` environment variable.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the feature file path.
pub const PROJECTS_GEOJSON_ENV: &str = "PROJECTS_GEOJSON";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`. Falls back to the
/// current directory if the manifest is not nested as expected.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the default feature file path, `data/projects.geojson`.
#[must_use]
pub fn default_projects_path() -> PathBuf {
    data_dir().join("projects.geojson")
}

/// Returns the feature file path, honoring [`PROJECTS_GEOJSON_ENV`].
#[must_use]
pub fn projects_path() -> PathBuf {
    std::env::var_os(PROJECTS_GEOJSON_ENV)
        .filter(|v| !v.is_empty())
        .map_or_else(default_projects_path, PathBuf::from)
}
