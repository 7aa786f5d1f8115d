//! Background polling while a record's enrichment is `pending`.

use std::sync::Arc;
use std::time::Duration;

use intel_common::{CompanyResponse, EnrichmentStatus};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::api::CompanyApi;

/// A completed record delivered by the poller, tagged with the identifier
/// it was fetched for.
#[derive(Debug, Clone)]
pub struct EnrichmentUpdate {
    pub company_id: String,
    pub record: CompanyResponse,
}

/// Handle to a running poll task. Dropping it stops the timer.
#[derive(Debug)]
pub struct EnrichmentPoller {
    company_id: String,
    task: JoinHandle<()>,
}

impl EnrichmentPoller {
    /// Start polling `company_id` every `interval`. The first fetch happens
    /// one full interval from now.
    pub fn spawn(
        api: Arc<dyn CompanyApi>,
        company_id: &str,
        interval: Duration,
        updates: mpsc::Sender<EnrichmentUpdate>,
    ) -> Self {
        let id = company_id.to_string();
        let task = tokio::spawn(poll_until_enriched(api, id.clone(), interval, updates));
        Self {
            company_id: id,
            task,
        }
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn stop(self) {
        // Drop aborts the task.
    }
}

impl Drop for EnrichmentPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_until_enriched(
    api: Arc<dyn CompanyApi>,
    company_id: String,
    interval: Duration,
    updates: mpsc::Sender<EnrichmentUpdate>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match api.get_company(&company_id).await {
            Ok(record) if record.enrichment() == EnrichmentStatus::Completed => {
                tracing::info!(company = %company_id, "enrichment completed");
                let _ = updates.send(EnrichmentUpdate { company_id, record }).await;
                return;
            }
            Ok(record) => {
                tracing::debug!(
                    company = %company_id,
                    status = %record.enrichment(),
                    "enrichment still running"
                );
            }
            Err(e) => {
                tracing::warn!(company = %company_id, error = %e, "enrichment poll failed; will retry");
            }
        }
    }
}
