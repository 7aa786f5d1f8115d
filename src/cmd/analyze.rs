//! Full analysis flow: `company-intel analyze`.
//!
//! Drives the [`PhaseController`]: search → progress → dashboard, then back
//! to search on request. Ctrl-C abandons the progress phase and returns to
//! search; a failed dashboard offers "Try another company".

use std::sync::Arc;

use anyhow::{Context, Result};
use company_intel::app::{Phase, PhaseController};
use company_intel::config::ClientConfig;
use company_intel::dashboard::Dashboard;
use company_intel::errors::SearchError;
use company_intel::progress::{ProgressSubscription, run_progress};
use company_intel::search::{DEMO_COMPANIES, SearchForm};
use company_intel::ui::ProgressUI;
use company_intel::ui::icons::{CROSS, SEARCH, WARNING};
use console::{Term, style};
use dialoguer::{Confirm, Input};
use intel_common::AnalyzeOptions;

use crate::SkipSections;

use super::connect_api;
use super::show::{DashboardOutcome, TabSelection, present_dashboard};

pub async fn cmd_analyze(
    config: &ClientConfig,
    name: Option<String>,
    skip: SkipSections,
    no_wait: bool,
) -> Result<()> {
    let api = connect_api(config)?;
    let form = SearchForm::new(Arc::clone(&api), analysis_options(config.analysis, skip));
    let mut dashboard = Dashboard::new(api, config.timings);
    let mut phases = PhaseController::new();
    let interactive = Term::stdout().is_term();

    let mut queued_name = name;
    let mut company = String::new();

    loop {
        match phases.phase().clone() {
            Phase::Search => {
                company = match queued_name.take() {
                    Some(name) => name,
                    None if interactive => prompt_company().await?,
                    None => anyhow::bail!("No company name given and no terminal to prompt on"),
                };
                match form.submit(&company).await {
                    Ok(response) => {
                        println!(
                            "{}Analysis started for {} (session {}, ~{}s)",
                            SEARCH,
                            style(company.trim()).bold(),
                            style(&response.session_id).cyan(),
                            response.estimated_time_seconds
                        );
                        phases.start_analysis(&response.session_id)?;
                    }
                    Err(SearchError::EmptyName) if interactive => {
                        println!("{}{}", WARNING, style("Please enter a company name").yellow());
                    }
                    Err(e) => {
                        eprintln!("{}{}", CROSS, style(&e).red());
                        if !interactive || !confirm_retry().await? {
                            return Err(e.into());
                        }
                    }
                }
            }
            Phase::Progress { session_id } => {
                let subscription = ProgressSubscription::connect(&config.api_url, &session_id)
                    .context("Failed to open the progress channel")?;
                let mut view = ProgressUI::new(company.trim());

                let finished = tokio::select! {
                    id = run_progress(subscription, &mut view, config.timings.completion_delay) => Some(id),
                    _ = tokio::signal::ctrl_c() => None,
                };
                match finished {
                    Some(id) => {
                        phases.analysis_complete(&id)?;
                    }
                    None => {
                        tracing::info!(session = %session_id, "progress abandoned by user");
                        println!();
                        println!("{}", style("Analysis watch cancelled").yellow());
                        if !interactive {
                            return Ok(());
                        }
                        phases.new_search();
                    }
                }
            }
            Phase::Dashboard { company_id } => {
                let outcome =
                    present_dashboard(&mut dashboard, &company_id, TabSelection::All, !no_wait, false)
                        .await?;
                dashboard.close();

                let again = match outcome {
                    DashboardOutcome::Shown => interactive && next_step("New search").await?,
                    DashboardOutcome::Failed(message) if !interactive => {
                        anyhow::bail!("Could not show '{}': {}", company_id, message)
                    }
                    DashboardOutcome::Failed(_) => next_step("Try another company").await?,
                };
                if !again {
                    break;
                }
                phases.new_search();
            }
        }
    }

    Ok(())
}

/// Apply `--skip-*` flags on top of the configured include options.
fn analysis_options(base: AnalyzeOptions, skip: SkipSections) -> AnalyzeOptions {
    AnalyzeOptions {
        include_apis: base.include_apis && !skip.skip_apis,
        include_financials: base.include_financials && !skip.skip_financials,
        include_competitors: base.include_competitors && !skip.skip_competitors,
        include_team: base.include_team && !skip.skip_team,
        include_news: base.include_news && !skip.skip_news,
        include_graph: base.include_graph && !skip.skip_graph,
    }
}

async fn prompt_company() -> Result<String> {
    tokio::task::spawn_blocking(|| {
        println!(
            "{} {}",
            style("Try:").dim(),
            style(DEMO_COMPANIES.join(", ")).dim()
        );
        Input::<String>::new()
            .with_prompt("Company name")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read company name")
    })
    .await
    .context("Prompt task failed")?
}

async fn confirm_retry() -> Result<bool> {
    next_step("Try again").await
}

/// Ask whether to `again_label`. Any prompt failure counts as quit.
async fn next_step(again_label: &'static str) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        Confirm::new()
            .with_prompt(format!("{}?", again_label))
            .default(true)
            .interact()
            .unwrap_or(false)
    })
    .await
    .context("Prompt task failed")
}
