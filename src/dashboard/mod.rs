//! Dashboard phase: resolve the finished record, keep it fresh while
//! enrichment is pending, and expose it to the tab views.

pub mod loader;
pub mod poller;

pub use loader::{MAX_NOT_FOUND_RETRIES, resolve_record};
pub use poller::{EnrichmentPoller, EnrichmentUpdate};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use intel_common::CompanyResponse;
use tokio::sync::mpsc;

use crate::api::CompanyApi;
use crate::config::Timings;
use crate::errors::DashboardError;

/// Static dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    ProductsApis,
    Market,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::ProductsApis, Tab::Market];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::ProductsApis => "Products & APIs",
            Self::Market => "Market Intelligence",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::ProductsApis => "apis",
            Self::Market => "market",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "apis" | "products" => Ok(Self::ProductsApis),
            "market" => Ok(Self::Market),
            _ => Err(format!(
                "Invalid tab '{}'. Valid values: overview, apis, market",
                s
            )),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum DashboardState {
    Loading,
    Ready(Box<CompanyResponse>),
    Failed(DashboardError),
}

/// Owns the record for one company identifier at a time.
///
/// Switching identifiers stops the previous poll task before the new fetch
/// starts, and updates tagged with a stale identifier are discarded.
pub struct Dashboard {
    api: Arc<dyn CompanyApi>,
    timings: Timings,
    company_id: Option<String>,
    state: DashboardState,
    poller: Option<EnrichmentPoller>,
    updates: Option<mpsc::Receiver<EnrichmentUpdate>>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn CompanyApi>, timings: Timings) -> Self {
        Self {
            api,
            timings,
            company_id: None,
            state: DashboardState::Loading,
            poller: None,
            updates: None,
        }
    }

    pub fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn record(&self) -> Option<&CompanyResponse> {
        match &self.state {
            DashboardState::Ready(record) => Some(&**record),
            _ => None,
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Load `company_id`, replacing whatever was shown before.
    pub async fn open(&mut self, company_id: &str) -> &DashboardState {
        self.stop_polling();
        self.company_id = Some(company_id.to_string());
        self.state = DashboardState::Loading;

        let result = resolve_record(
            self.api.as_ref(),
            company_id,
            self.timings.not_found_retry_delay,
        )
        .await;

        self.state = match result {
            Ok(record) => {
                if record.is_enrichment_pending() {
                    self.start_polling(company_id);
                }
                DashboardState::Ready(Box::new(record))
            }
            Err(e) => DashboardState::Failed(e),
        };
        &self.state
    }

    /// Wait for the poller's completed record and apply it.
    ///
    /// Returns `None` immediately when nothing is being polled.
    pub async fn next_update(&mut self) -> Option<&CompanyResponse> {
        loop {
            let update = self.updates.as_mut()?.recv().await;
            match update {
                Some(update) => {
                    if self.apply_update(update) {
                        return self.record();
                    }
                }
                None => {
                    self.updates = None;
                    return None;
                }
            }
        }
    }

    /// Replace the record with a completed poll result. Returns `false` when
    /// the update belongs to an identifier that is no longer current.
    pub fn apply_update(&mut self, update: EnrichmentUpdate) -> bool {
        if self.company_id.as_deref() != Some(update.company_id.as_str()) {
            tracing::debug!(stale = %update.company_id, "discarding enrichment update");
            return false;
        }
        self.stop_polling();
        self.state = DashboardState::Ready(Box::new(update.record));
        true
    }

    /// Tear down: stop polling and forget the identifier.
    pub fn close(&mut self) {
        self.stop_polling();
        self.company_id = None;
        self.state = DashboardState::Loading;
    }

    fn start_polling(&mut self, company_id: &str) {
        let (tx, rx) = mpsc::channel(1);
        tracing::info!(
            company = %company_id,
            interval_secs = self.timings.enrichment_poll_interval.as_secs(),
            "enrichment pending; polling"
        );
        self.poller = Some(EnrichmentPoller::spawn(
            Arc::clone(&self.api),
            company_id,
            self.timings.enrichment_poll_interval,
            tx,
        ));
        self.updates = Some(rx);
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            tracing::debug!(company = %poller.company_id(), "stopping enrichment poll");
            poller.stop();
        }
        self.updates = None;
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
