//! Scripted [`CompanyApi`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use intel_common::{
    AnalyzeRequest, AnalyzeResponse, CompanyData, CompanyList, CompanyMetadata, CompanyResponse,
    EnrichmentStatus, GraphData, HealthResponse,
};

use crate::api::CompanyApi;
use crate::errors::ApiError;

#[derive(Debug, Clone)]
pub enum Reply {
    Record(CompanyResponse),
    Session(String),
    NotFound,
    ServerError,
}

/// Replies are consumed in order; once exhausted every call is not-found.
#[derive(Default)]
pub struct FakeApi {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn called_ids(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self, id: &str) -> Reply {
        self.calls.lock().unwrap().push(id.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::NotFound)
    }

    fn error(reply: &Reply, id: &str) -> ApiError {
        match reply {
            Reply::ServerError => ApiError::Status {
                status: 500,
                detail: "internal error".to_string(),
            },
            _ => ApiError::NotFound {
                resource: format!("Company {}", id),
            },
        }
    }
}

#[async_trait]
impl CompanyApi for FakeApi {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        match self.next_reply(&request.company_name) {
            Reply::Session(session_id) => Ok(AnalyzeResponse {
                session_id,
                status: "processing".to_string(),
                estimated_time_seconds: 30,
                websocket_url: String::new(),
            }),
            other => Err(Self::error(&other, &request.company_name)),
        }
    }

    async fn get_company(&self, id: &str) -> Result<CompanyResponse, ApiError> {
        match self.next_reply(id) {
            Reply::Record(record) => Ok(record),
            other => Err(Self::error(&other, id)),
        }
    }

    async fn get_graph(&self, _id: &str, _depth: u32) -> Result<GraphData, ApiError> {
        Ok(GraphData::default())
    }

    async fn list_companies(&self, _limit: u32, _offset: u32) -> Result<CompanyList, ApiError> {
        Ok(CompanyList::default())
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            services: Default::default(),
            version: "test".to_string(),
            timestamp: String::new(),
        })
    }
}

pub fn record(id: &str, enrichment: Option<EnrichmentStatus>) -> CompanyResponse {
    let mut data = CompanyData::default();
    data.overview.name = format!("Company {}", id);
    CompanyResponse {
        id: id.to_string(),
        company_name: format!("Company {}", id),
        slug: id.to_string(),
        analyzed_at: "2025-01-01T00:00:00".to_string(),
        status: "completed".to_string(),
        enrichment_status: enrichment,
        data,
        metadata: CompanyMetadata {
            sources_count: 3,
            confidence_score: 0.87,
            last_updated: String::new(),
        },
    }
}
