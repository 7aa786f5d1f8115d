//! Typed error hierarchy for the company-intel client.
//!
//! One enum per subsystem:
//! - `ApiError`: HTTP calls against the analysis backend
//! - `SearchError`: analysis submission
//! - `DashboardError`: record resolution for the dashboard phase
//! - `ProgressError`: progress channel setup
//! - `ConfigError`: configuration loading and log file setup
//! - `TransitionError`: illegal phase transitions
//!
//! None of these are fatal to the process: each phase turns them into a
//! renderable error state.

use thiserror::Error;

/// Errors from a single backend HTTP call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Request to backend failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("Invalid backend URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl ApiError {
    /// Whether the backend reported the resource as missing (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from submitting an analysis request.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Company name must not be empty")]
    EmptyName,

    #[error("An analysis request is already in flight")]
    InFlight,

    #[error("Failed to start analysis: {0}")]
    Api(#[from] ApiError),
}

/// Terminal failures when resolving a record for the dashboard.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
    /// The record was still missing after the bounded retry.
    #[error("Company data not found. Please try analyzing again.")]
    NotFound,

    #[error("Failed to load company data: {0}")]
    Failed(String),
}

/// Errors establishing the progress push channel. Failures after the
/// channel is requested are reported as channel events instead.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Invalid progress channel URL: {0}")]
    InvalidUrl(#[source] ApiError),
}

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid API URL '{0}': must start with http:// or https://")]
    InvalidApiUrl(String),

    #[error("Cannot open log file {path}: {message}")]
    LogFile {
        path: std::path::PathBuf,
        message: String,
    },
}

/// A phase transition requested from a phase that does not allow it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot {transition} while in the {from} phase")]
pub struct TransitionError {
    pub from: &'static str,
    pub transition: &'static str,
}
