//! Dashboard rendering for `company-intel show`, also the last phase of `analyze`.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use company_intel::config::ClientConfig;
use company_intel::dashboard::{Dashboard, DashboardState, Tab};
use company_intel::ui::dashboard::{render_error, render_header, render_tab, render_tab_bar};
use company_intel::ui::icons::HOURGLASS;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use intel_common::CompanyResponse;

use super::connect_api;

/// Which dashboard tabs to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSelection {
    All,
    One(Tab),
}

impl TabSelection {
    fn tabs(self) -> Vec<Tab> {
        match self {
            Self::All => Tab::ALL.to_vec(),
            Self::One(tab) => vec![tab],
        }
    }
}

impl FromStr for TabSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Tab>()
            .map(Self::One)
            .map_err(|e| format!("{} (or 'all')", e))
    }
}

pub async fn cmd_show(
    config: &ClientConfig,
    id: &str,
    tabs: TabSelection,
    wait_for_enrichment: bool,
    json: bool,
) -> Result<()> {
    let api = connect_api(config)?;
    let mut dashboard = Dashboard::new(api, config.timings);
    let outcome = present_dashboard(&mut dashboard, id, tabs, wait_for_enrichment, json).await;
    dashboard.close();

    match outcome? {
        DashboardOutcome::Shown => Ok(()),
        DashboardOutcome::Failed(message) => {
            anyhow::bail!("Could not show '{}': {}", id, message)
        }
    }
}

pub enum DashboardOutcome {
    Shown,
    /// The error view was printed; carries its message.
    Failed(String),
}

/// Load `id` into `dashboard` and print it. While enrichment is pending and
/// `wait_for_enrichment` is set, blocks until the poller delivers the
/// completed record or the user presses Ctrl-C.
pub async fn present_dashboard(
    dashboard: &mut Dashboard,
    id: &str,
    tabs: TabSelection,
    wait_for_enrichment: bool,
    json: bool,
) -> Result<DashboardOutcome> {
    let spinner = loading_spinner(json);
    spinner.set_message(format!("Loading company data for {}...", id));
    let state = dashboard.open(id).await;
    spinner.finish_and_clear();

    let record = match state {
        DashboardState::Ready(record) => record,
        DashboardState::Failed(error) => {
            eprintln!("{}", render_error(error));
            return Ok(DashboardOutcome::Failed(error.to_string()));
        }
        DashboardState::Loading => {
            anyhow::bail!("Dashboard for '{}' did not finish loading", id)
        }
    };
    print_record(record, tabs, json)?;

    if !(wait_for_enrichment && dashboard.is_polling()) {
        return Ok(DashboardOutcome::Shown);
    }

    if !json {
        println!(
            "{}{}",
            HOURGLASS,
            style("Waiting for API enrichment (Ctrl-C to stop waiting)...").dim()
        );
    }
    let updated = tokio::select! {
        update = dashboard.next_update() => update.is_some(),
        _ = tokio::signal::ctrl_c() => false,
    };
    if updated && let Some(record) = dashboard.record() {
        if json {
            print_record(record, tabs, true)?;
        } else {
            println!();
            println!("{}", style("API enrichment completed").green().bold());
            print_record(record, TabSelection::One(Tab::ProductsApis), false)?;
        }
    }
    Ok(DashboardOutcome::Shown)
}

fn print_record(record: &CompanyResponse, tabs: TabSelection, json: bool) -> Result<()> {
    if json {
        let body = serde_json::to_string_pretty(record).context("Failed to serialize record")?;
        println!("{}", body);
        return Ok(());
    }

    println!("{}", render_header(record));
    for tab in tabs.tabs() {
        println!("{}", render_tab_bar(tab));
        println!("{}", render_tab(record, tab));
    }
    Ok(())
}

fn loading_spinner(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string"),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_selection_parses_all_and_single_tabs() {
        assert_eq!("all".parse::<TabSelection>().unwrap(), TabSelection::All);
        assert_eq!(
            "market".parse::<TabSelection>().unwrap(),
            TabSelection::One(Tab::Market)
        );
        let err = "graph".parse::<TabSelection>().unwrap_err();
        assert!(err.contains("or 'all'"));
    }

    #[test]
    fn test_all_selection_keeps_tab_order() {
        assert_eq!(
            TabSelection::All.tabs(),
            vec![Tab::Overview, Tab::ProductsApis, Tab::Market]
        );
    }
}
