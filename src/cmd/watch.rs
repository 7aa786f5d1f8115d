//! Progress phase on its own: `company-intel watch`.

use anyhow::{Context, Result};
use company_intel::config::ClientConfig;
use company_intel::progress::{ProgressSubscription, run_progress};
use company_intel::ui::ProgressUI;
use console::style;

pub async fn cmd_watch(config: &ClientConfig, session_id: &str, json: bool) -> Result<()> {
    let subscription = ProgressSubscription::connect(&config.api_url, session_id)
        .context("Failed to open the progress channel")?;
    let mut view = if json {
        ProgressUI::hidden()
    } else {
        ProgressUI::new("")
    };

    let finished = tokio::select! {
        id = run_progress(subscription, &mut view, config.timings.completion_delay) => id,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("Stopped watching session {}", session_id),
    };

    if json {
        println!("{}", serde_json::json!({ "session_id": finished, "status": "completed" }));
    } else {
        println!(
            "Run {} to view the results.",
            style(format!("company-intel show {}", finished)).cyan()
        );
    }
    Ok(())
}
