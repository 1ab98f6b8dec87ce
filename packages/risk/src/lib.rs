#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Water-risk scoring engine and county aggregation.
//!
//! Scores are a deliberately simple screening model: a facility's annual
//! water demand is normalized against a 100 MW evaporative reference and
//! multiplied by the site's baseline water stress. Every function here is
//! pure and deterministic; nothing is cached or stored.

pub mod county;
pub mod scoring;

use thiserror::Error;

/// Caller-input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    /// Facility size was zero or negative.
    #[error("size_mw must be greater than 0 (got {size_mw})")]
    InvalidSize {
        /// The rejected size.
        size_mw: i64,
    },

    /// Cooling type string did not name a known technology.
    #[error("Unknown cooling_type '{value}': expected evaporative, hybrid or air")]
    UnknownCoolingType {
        /// The rejected value.
        value: String,
    },
}
