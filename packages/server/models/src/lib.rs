#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the water-risk server.
//!
//! Project and score payloads reuse the domain types directly since their
//! JSON shape is already the API contract. This crate only holds the
//! request bodies, query parameters, and status envelopes.

use serde::{Deserialize, Serialize};
use terrapulse_project_models::DataSource;
use terrapulse_risk_models::{CoolingType, ScoreConfiguration};

/// Body of `POST /score`.
///
/// `cooling_type` stays a string so unknown values surface as a
/// validation error with a useful message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// Project to score.
    pub project_id: String,
    /// Facility capacity in megawatts.
    pub size_mw: i64,
    /// Cooling technology name.
    pub cooling_type: String,
}

/// Query parameters for `GET /counties/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountySummaryParams {
    /// Facility capacity in megawatts (default 50).
    pub size_mw: Option<i64>,
    /// Cooling technology name (default `hybrid`).
    pub cooling_type: Option<String>,
}

impl CountySummaryParams {
    /// Size to use, falling back to the default configuration.
    #[must_use]
    pub fn size_mw(&self) -> i64 {
        self.size_mw
            .unwrap_or_else(|| ScoreConfiguration::default().size_mw)
    }

    /// Cooling type name to use, falling back to the default configuration.
    #[must_use]
    pub fn cooling_type(&self) -> String {
        self.cooling_type
            .clone()
            .unwrap_or_else(|| CoolingType::Hybrid.to_string())
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Where the project set came from.
    pub data_source: DataSource,
    /// Number of loaded projects.
    pub project_count: usize,
}

/// Data-source metadata response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMeta {
    /// Where the project set came from.
    pub data_source: DataSource,
    /// Number of loaded projects.
    pub project_count: usize,
    /// Path the server reads the feature file from.
    pub expects_geojson_at: String,
}

/// Error body for 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable reason.
    pub detail: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn county_params_default_to_fifty_megawatt_hybrid() {
        let params = CountySummaryParams::default();
        assert_eq!(params.size_mw(), 50);
        assert_eq!(params.cooling_type(), "hybrid");
    }

    #[test]
    fn score_request_reads_snake_case_body() {
        let req: ScoreRequest = serde_json::from_value(serde_json::json!({
            "project_id": "nova-001",
            "size_mw": 50,
            "cooling_type": "hybrid"
        }))
        .unwrap();
        assert_eq!(req.project_id, "nova-001");
        assert_eq!(req.size_mw, 50);
    }
}
