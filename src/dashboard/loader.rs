//! Record resolution with a bounded not-found retry.

use std::time::Duration;

use intel_common::CompanyResponse;

use crate::api::CompanyApi;
use crate::errors::DashboardError;

/// Retries allowed after a not-found response. The record may not be
/// committed yet when the progress channel reports completion.
pub const MAX_NOT_FOUND_RETRIES: u32 = 1;

/// Fetch the record for `company_id`.
///
/// - success → the record
/// - not found → wait `retry_delay`, fetch again; a second failure of any
///   kind is [`DashboardError::NotFound`]
/// - any other failure → [`DashboardError::Failed`] immediately
pub async fn resolve_record(
    api: &dyn CompanyApi,
    company_id: &str,
    retry_delay: Duration,
) -> Result<CompanyResponse, DashboardError> {
    let mut retries = 0u32;
    loop {
        match api.get_company(company_id).await {
            Ok(record) => return Ok(record),
            Err(e) if retries >= MAX_NOT_FOUND_RETRIES => {
                tracing::warn!(company = %company_id, error = %e, "record still unavailable after retry");
                return Err(DashboardError::NotFound);
            }
            Err(e) if e.is_not_found() => {
                retries += 1;
                tracing::info!(
                    company = %company_id,
                    delay_ms = retry_delay.as_millis() as u64,
                    "record not found yet; retrying"
                );
                tokio::time::sleep(retry_delay).await;
            }
            Err(e) => {
                tracing::warn!(company = %company_id, error = %e, "failed to load record");
                return Err(DashboardError::Failed(e.to_string()));
            }
        }
    }
}
