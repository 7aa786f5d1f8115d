//! Layered configuration for the company-intel client.
//!
//! Values are resolved file → environment → CLI, later layers winning:
//! - `company-intel.toml` in the working directory, else
//!   `<config_dir>/company-intel/config.toml`
//! - `.env` (via dotenvy) and `COMPANY_INTEL_API_URL`
//! - `--api-url` on the command line
//!
//! # Configuration File Format
//!
//! ```toml
//! [backend]
//! api_url = "http://localhost:8000"
//!
//! [timing]
//! not_found_retry_delay_ms = 2000
//! enrichment_poll_interval_secs = 30
//! completion_delay_ms = 1000
//!
//! [analysis]
//! include_news = false
//!
//! [logging]
//! file = "company-intel.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use intel_common::AnalyzeOptions;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "COMPANY_INTEL_API_URL";
pub const CONFIG_FILE_NAME: &str = "company-intel.toml";

/// Fixed timings of the client flow.
///
/// The defaults are the production values; they are only overridden by
/// tests and by deployments with unusually slow backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Wait before the single retry of a not-found record fetch.
    pub not_found_retry_delay: Duration,
    /// Period of the enrichment poll while a record is `pending`.
    pub enrichment_poll_interval: Duration,
    /// Pause between a `completed` progress event and leaving the progress view.
    pub completion_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        TimingSection::default().into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSection {
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSection {
    pub not_found_retry_delay_ms: u64,
    pub enrichment_poll_interval_secs: u64,
    pub completion_delay_ms: u64,
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            not_found_retry_delay_ms: 2000,
            enrichment_poll_interval_secs: 30,
            completion_delay_ms: 1000,
        }
    }
}

impl From<TimingSection> for Timings {
    fn from(section: TimingSection) -> Self {
        Self {
            not_found_retry_delay: Duration::from_millis(section.not_found_retry_delay_ms),
            enrichment_poll_interval: Duration::from_secs(section.enrichment_poll_interval_secs),
            completion_delay: Duration::from_millis(section.completion_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Append logs to this file in addition to stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// The complete `company-intel.toml` structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelToml {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub timing: TimingSection,
    /// Default include flags for `analyze`.
    #[serde(default)]
    pub analysis: AnalyzeOptions,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl IntelToml {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Locate the config file for `cwd`: the project-local file wins over the
    /// per-user one.
    pub fn find(cwd: &Path) -> Option<PathBuf> {
        let local = cwd.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("company-intel").join("config.toml"))
            .filter(|path| path.exists())
    }
}

/// Effective runtime configuration after all layers are applied.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    pub timings: Timings,
    pub analysis: AnalyzeOptions,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
    /// Config file the values were read from, if any.
    pub source: Option<PathBuf>,
}

impl ClientConfig {
    /// Resolve the configuration for this process.
    pub fn load(cli_api_url: Option<String>, verbose: bool) -> Result<Self, ConfigError> {
        // A missing .env is the common case.
        let _ = dotenvy::dotenv();

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let source = IntelToml::find(&cwd);
        let file = match &source {
            Some(path) => IntelToml::load(path)?,
            None => IntelToml::default(),
        };

        let mut config = Self::from_layers(file, std::env::var(API_URL_ENV).ok(), cli_api_url)?;
        config.verbose = verbose;
        config.source = source;
        Ok(config)
    }

    /// Merge a parsed file with the environment and CLI values.
    pub fn from_layers(
        file: IntelToml,
        env_api_url: Option<String>,
        cli_api_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw = cli_api_url
            .or(env_api_url)
            .or(file.backend.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&raw)?;

        Ok(Self {
            api_url,
            timings: file.timing.into(),
            analysis: file.analysis,
            log_file: file.logging.file,
            verbose: false,
            source: None,
        })
    }

    /// Render the effective values back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let effective = IntelToml {
            backend: BackendSection {
                api_url: Some(self.api_url.clone()),
            },
            timing: TimingSection {
                not_found_retry_delay_ms: self.timings.not_found_retry_delay.as_millis() as u64,
                enrichment_poll_interval_secs: self.timings.enrichment_poll_interval.as_secs(),
                completion_delay_ms: self.timings.completion_delay.as_millis() as u64,
            },
            analysis: self.analysis,
            logging: LoggingSection {
                file: self.log_file.clone(),
            },
        };
        toml::to_string_pretty(&effective)
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
