use serde::{Deserialize, Serialize};

/// Sections the backend should gather for an analysis run.
///
/// Every flag defaults to `true`; the backend applies the same defaults when
/// a flag is missing from the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    #[serde(default = "enabled")]
    pub include_apis: bool,
    #[serde(default = "enabled")]
    pub include_financials: bool,
    #[serde(default = "enabled")]
    pub include_competitors: bool,
    #[serde(default = "enabled")]
    pub include_team: bool,
    #[serde(default = "enabled")]
    pub include_news: bool,
    #[serde(default = "enabled")]
    pub include_graph: bool,
}

fn enabled() -> bool {
    true
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            include_apis: true,
            include_financials: true,
            include_competitors: true,
            include_team: true,
            include_news: true,
            include_graph: true,
        }
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub company_name: String,
    #[serde(default)]
    pub options: AnalyzeOptions,
}

/// Response of `POST /analyze` (HTTP 202).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub session_id: String,
    #[serde(default = "processing")]
    pub status: String,
    #[serde(default = "default_estimate")]
    pub estimated_time_seconds: u32,
    #[serde(default)]
    pub websocket_url: String,
}

fn processing() -> String {
    "processing".to_string()
}

fn default_estimate() -> u32 {
    30
}
