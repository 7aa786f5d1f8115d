//! Search phase: submit a company for analysis.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use intel_common::{AnalyzeOptions, AnalyzeRequest, AnalyzeResponse};

use crate::api::CompanyApi;
use crate::errors::SearchError;

/// Suggestions offered by the interactive prompt.
pub const DEMO_COMPANIES: [&str; 10] = [
    "Stripe", "OpenAI", "Anthropic", "Yutori", "Neo4j", "Render", "Shopify", "Twilio", "Vercel",
    "Supabase",
];

/// Issues analysis requests, one at a time. No retry: a failed submission
/// needs an explicit resubmit.
pub struct SearchForm {
    api: Arc<dyn CompanyApi>,
    options: AnalyzeOptions,
    in_flight: AtomicBool,
}

impl SearchForm {
    pub fn new(api: Arc<dyn CompanyApi>, options: AnalyzeOptions) -> Self {
        Self {
            api,
            options,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is awaiting the backend; input is disabled meanwhile.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submit `company_name` and return the backend's session on success.
    pub async fn submit(&self, company_name: &str) -> Result<AnalyzeResponse, SearchError> {
        let name = company_name.trim();
        if name.is_empty() {
            return Err(SearchError::EmptyName);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SearchError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let request = AnalyzeRequest {
            company_name: name.to_string(),
            options: self.options,
        };
        tracing::info!(company = %name, "submitting analysis");
        let response = self.api.analyze(&request).await?;
        tracing::info!(company = %name, session = %response.session_id, "analysis started");
        Ok(response)
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::testing::{FakeApi, Reply};

    #[tokio::test]
    async fn test_submit_returns_session() {
        let api = Arc::new(FakeApi::new(vec![Reply::Session("s1".into())]));
        let form = SearchForm::new(api.clone(), AnalyzeOptions::default());
        let resp = form.submit("  Stripe ").await.unwrap();
        assert_eq!(resp.session_id, "s1");
        assert_eq!(api.called_ids(), vec!["Stripe".to_string()]);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_without_request() {
        let api = Arc::new(FakeApi::new(vec![Reply::Session("s1".into())]));
        let form = SearchForm::new(api.clone(), AnalyzeOptions::default());
        assert!(matches!(form.submit("   ").await, Err(SearchError::EmptyName)));
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_surfaces_and_allows_resubmit() {
        let api = Arc::new(FakeApi::new(vec![
            Reply::ServerError,
            Reply::Session("s2".into()),
        ]));
        let form = SearchForm::new(api.clone(), AnalyzeOptions::default());
        let err = form.submit("Stripe").await.unwrap_err();
        assert!(matches!(err, SearchError::Api(ApiError::Status { status: 500, .. })));
        assert!(!form.is_submitting());

        let resp = form.submit("Stripe").await.unwrap();
        assert_eq!(resp.session_id, "s2");
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_rejected() {
        let api = Arc::new(FakeApi::new(vec![Reply::Session("s1".into())]));
        let form = SearchForm::new(api.clone(), AnalyzeOptions::default());
        form.in_flight.store(true, Ordering::SeqCst);
        assert!(matches!(form.submit("Stripe").await, Err(SearchError::InFlight)));
        assert_eq!(api.calls(), 0);
    }
}
