use async_trait::async_trait;
use intel_common::{
    AnalyzeRequest, AnalyzeResponse, CompanyList, CompanyResponse, GraphData, HealthResponse,
};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::CompanyApi;
use crate::errors::ApiError;

/// reqwest-backed [`CompanyApi`] bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = parse_base(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("company-intel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        join_segments(&self.base_url, segments)
    }

    async fn send_get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        resource: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode(resp, resource).await
    }
}

#[async_trait]
impl CompanyApi for HttpApi {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        let url = self.endpoint(&["analyze"])?;
        tracing::debug!(%url, company = %request.company_name, "POST");
        let resp = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode(resp, "analysis endpoint").await
    }

    async fn get_company(&self, id: &str) -> Result<CompanyResponse, ApiError> {
        let url = self.endpoint(&["company", id])?;
        self.send_get(url, &[], &format!("Company {}", id)).await
    }

    async fn get_graph(&self, id: &str, depth: u32) -> Result<GraphData, ApiError> {
        let url = self.endpoint(&["graph", id])?;
        self.send_get(url, &[("depth", depth.to_string())], &format!("Graph for {}", id))
            .await
    }

    async fn list_companies(&self, limit: u32, offset: u32) -> Result<CompanyList, ApiError> {
        let url = self.endpoint(&["companies"])?;
        self.send_get(
            url,
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
            "Company list",
        )
        .await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.endpoint(&["health"])?;
        self.send_get(url, &[], "Health endpoint").await
    }
}

/// Progress channel address for a session: the backend base URL with its
/// scheme swapped (http→ws, https→wss) and `/ws/progress/{session_id}` appended.
pub fn progress_url(base_url: &str, session_id: &str) -> Result<Url, ApiError> {
    let mut url = parse_base(base_url)?;
    let ws_scheme = match url.scheme() {
        "https" => "wss",
        _ => "ws",
    };
    url.set_scheme(ws_scheme).map_err(|_| ApiError::InvalidUrl {
        url: base_url.to_string(),
        message: format!("cannot switch scheme to {}", ws_scheme),
    })?;
    join_segments(&url, &["ws", "progress", session_id])
}

fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl {
            url: base.to_string(),
            message: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn decode<T: DeserializeOwned>(resp: Response, resource: &str) -> Result<T, ApiError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound {
            resource: resource.to_string(),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail: extract_detail(&body),
        });
    }
    let bytes = resp.bytes().await.map_err(ApiError::Transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the human-readable message out of an error body.
///
/// The backend reports errors as `{"detail": "..."}`; anything else is
/// passed through verbatim.
fn extract_detail(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .map(|d| match d {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
    match detail {
        Some(d) => d,
        None if body.trim().is_empty() => "no details".to_string(),
        None => body.trim().to_string(),
    }
}
