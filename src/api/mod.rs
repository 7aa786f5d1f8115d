//! Access to the analysis backend.
//!
//! [`CompanyApi`] is the seam every phase fetches through; [`HttpApi`] is the
//! reqwest implementation used by the binary.

mod http;

pub use http::{HttpApi, progress_url};

use async_trait::async_trait;
use intel_common::{
    AnalyzeRequest, AnalyzeResponse, CompanyList, CompanyResponse, GraphData, HealthResponse,
};

use crate::errors::ApiError;

/// Default graph traversal depth for `GET /graph/{id}`.
pub const DEFAULT_GRAPH_DEPTH: u32 = 2;

#[async_trait]
pub trait CompanyApi: Send + Sync {
    /// `POST /analyze`
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError>;

    /// `GET /company/{id}`; `id` may be a session id or a company slug.
    async fn get_company(&self, id: &str) -> Result<CompanyResponse, ApiError>;

    /// `GET /graph/{id}?depth=N`
    async fn get_graph(&self, id: &str, depth: u32) -> Result<GraphData, ApiError>;

    /// `GET /companies?limit=N&offset=M`
    async fn list_companies(&self, limit: u32, offset: u32) -> Result<CompanyList, ApiError>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse, ApiError>;
}
