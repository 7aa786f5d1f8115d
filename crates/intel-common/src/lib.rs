//! Shared wire types for the company-intel client.
//!
//! Every type here mirrors a JSON payload exchanged with the analysis
//! backend, either over HTTP or on the progress WebSocket. The crate holds
//! no I/O; the client crate owns transport and presentation.

pub mod analysis;
pub mod company;
pub mod graph;
pub mod progress;
pub mod system;

pub use analysis::{AnalyzeOptions, AnalyzeRequest, AnalyzeResponse};
pub use company::{
    ApiEndpoint, CompanyData, CompanyMetadata, CompanyOverview, CompanyResponse, Competitor,
    EnrichmentStatus, Financials, MarketIntelligence, NewsSentiment, PricingTier, Product,
    ProductsApis, TeamCulture,
};
pub use graph::{GraphData, GraphEdge, GraphMetadata, GraphNode};
pub use progress::{ProgressEvent, ProgressKind, STAGES, Stage};
pub use system::{CompanyList, CompanyListItem, HealthResponse};
