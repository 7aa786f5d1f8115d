//! Tracing setup.
//!
//! Logs go to stderr so rendered views and `--json` output on stdout stay
//! clean. `RUST_LOG` wins over the built-in filter; `--verbose` raises the
//! default to debug. An optional `[logging] file` adds a plain-text file
//! layer written through `tracing-appender`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ClientConfig;
use crate::errors::ConfigError;

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "company_intel=debug,intel_common=debug,warn"
    } else {
        "company_intel=info,warn"
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// process lifetime, otherwise buffered file output is lost.
///
/// Fails only when the configured log file cannot be opened.
pub fn init_tracing(config: &ClientConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.verbose);

    let (file_layer, guard) = match config.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // A subscriber may already be installed (tests, embedding).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, ConfigError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "company-intel.log".to_string());
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| ConfigError::LogFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_default_filter() {
        assert!(default_filter(false).contains("company_intel=info"));
        assert!(default_filter(true).contains("company_intel=debug"));
    }

    #[test]
    fn test_log_file_in_uncreatable_directory_is_an_error() {
        let path = Path::new("/proc/company-intel-missing/company-intel.log");
        match file_appender(path) {
            Err(ConfigError::LogFile { path: p, .. }) => assert_eq!(p, path),
            Err(other) => panic!("Expected LogFile error, got {other:?}"),
            Ok(_) => panic!("Expected LogFile error, got an appender"),
        }
    }

    #[test]
    fn test_log_file_is_created_in_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("intel.log");
        assert!(file_appender(&path).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_filters_parse() {
        for verbose in [false, true] {
            assert!(default_filter(verbose).parse::<EnvFilter>().is_ok());
        }
    }
}
