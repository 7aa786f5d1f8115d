//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module     | Commands handled                     |
//! |------------|--------------------------------------|
//! | `analyze`  | `Analyze`                            |
//! | `show`     | `Show`                               |
//! | `watch`    | `Watch`                              |
//! | `backend`  | `Graph`, `Companies`, `Health`       |
//! | `config`   | `Config`                             |

pub mod analyze;
pub mod backend;
pub mod config;
pub mod show;
pub mod watch;

pub use analyze::cmd_analyze;
pub use backend::{cmd_companies, cmd_graph, cmd_health};
pub use config::cmd_config;
pub use show::cmd_show;
pub use watch::cmd_watch;

use std::sync::Arc;

use anyhow::{Context, Result};
use company_intel::api::{CompanyApi, HttpApi};
use company_intel::config::ClientConfig;

/// Backend client for the configured base URL.
fn connect_api(config: &ClientConfig) -> Result<Arc<dyn CompanyApi>> {
    let api = HttpApi::new(&config.api_url)
        .with_context(|| format!("Failed to create client for {}", config.api_url))?;
    Ok(Arc::new(api))
}
