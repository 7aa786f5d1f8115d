//! In-process fake of the analysis backend, served with axum on an
//! ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

pub const SESSION_ID: &str = "s1";

/// Knobs and call counters shared with the handlers.
#[derive(Default)]
pub struct BackendState {
    /// Number of 404s `GET /company/{id}` answers before serving the record.
    pub company_misses: usize,
    /// Polls answered with `enrichment_status: pending` after the record
    /// first appears.
    pub pending_polls: usize,
    /// Extra frames pushed before the scripted progress events.
    pub preamble: Vec<String>,
    /// Stop after the first progress frame and never report completion.
    pub stall_progress: bool,
    /// Set once the client closed its progress socket or dropped the stream.
    pub progress_closed: AtomicBool,
    pub company_calls: AtomicUsize,
    pub analyze_bodies: Mutex<Vec<Value>>,
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        Self::with_state(BackendState::default()).await
    }

    pub async fn with_state(state: BackendState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/analyze", post(analyze))
            .route("/company/{id}", get(company))
            .route("/graph/{id}", get(graph))
            .route("/companies", get(companies))
            .route("/health", get(health))
            .route("/ws/progress/{session_id}", get(progress_ws))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn company_calls(&self) -> usize {
        self.state.company_calls.load(Ordering::SeqCst)
    }

    pub fn progress_closed(&self) -> bool {
        self.state.progress_closed.load(Ordering::SeqCst)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn company_record(id: &str, enrichment: &str) -> Value {
    json!({
        "id": id,
        "company_name": "Stripe",
        "slug": "stripe",
        "analyzed_at": "2025-03-04T10:00:00",
        "status": "completed",
        "enrichment_status": enrichment,
        "data": {
            "overview": {
                "name": "Stripe",
                "description": "Financial infrastructure for the internet",
                "founded_year": 2010,
                "headquarters": "San Francisco, CA",
                "employee_count": "8000+",
                "industry": ["Fintech", "Payments"],
                "status": "private"
            },
            "products_apis": {
                "documentation_quality": 4.5,
                "sdk_languages": ["Python", "Ruby"],
                "apis": [{"path": "/v1/charges", "method": "POST", "description": "Create a charge"}]
            },
            "market_intelligence": {
                "market_position": "Leader",
                "niche": "Online payments",
                "competitors": [{"name": "Adyen", "market_overlap_percent": 60.0, "strengths": ["Enterprise"]}]
            }
        },
        "metadata": {"sources_count": 12, "confidence_score": 0.92}
    })
}

pub fn progress_frame(session_id: &str, kind: &str, stage: &str, progress: f64) -> String {
    json!({
        "type": kind,
        "session_id": session_id,
        "stage": stage,
        "progress": progress,
        "message": format!("{} at {}", stage, progress),
        "timestamp": "2025-03-04T10:00:00"
    })
    .to_string()
}

async fn analyze(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let name = body["company_name"].as_str().unwrap_or_default().to_string();
    state.analyze_bodies.lock().unwrap().push(body);
    if name == "Broken" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "analysis backend down"})),
        )
            .into_response();
    }
    (
        StatusCode::ACCEPTED,
        Json(json!({
            "session_id": SESSION_ID,
            "status": "processing",
            "estimated_time_seconds": 45,
            "websocket_url": format!("/ws/progress/{}", SESSION_ID)
        })),
    )
        .into_response()
}

async fn company(State(state): State<Arc<BackendState>>, Path(id): Path<String>) -> Response {
    let call = state.company_calls.fetch_add(1, Ordering::SeqCst);
    if id == "missing" || call < state.company_misses {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Company not found"})),
        )
            .into_response();
    }
    let served = call - state.company_misses;
    let enrichment = if served <= state.pending_polls && state.pending_polls > 0 {
        "pending"
    } else {
        "completed"
    };
    Json(company_record(&id, enrichment)).into_response()
}

async fn graph(Path(id): Path<String>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let depth = query.get("depth").cloned().unwrap_or_default();
    Json(json!({
        "nodes": [
            {"id": id, "label": "Company", "properties": {"name": "Stripe"}},
            {"id": "adyen", "label": "Company", "properties": {}},
            {"id": "collison", "label": "Person", "properties": {}, "x": 1.0, "y": 2.0}
        ],
        "edges": [
            {"id": "e1", "source": id, "target": "adyen", "label": "COMPETES_WITH", "properties": {}}
        ],
        "metadata": {"node_count": 3, "edge_count": 1, "generated_at": format!("depth={}", depth)}
    }))
}

async fn companies(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: u32 = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let offset: u32 = query.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    Json(json!({
        "companies": [
            {"id": "stripe", "name": "Stripe", "status": "completed", "analyzed_at": "2025-03-04"}
        ],
        "total": 1,
        "limit": limit,
        "offset": offset
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "services": {"neo4j": "connected", "redis": "connected"},
        "version": "1.0.0",
        "timestamp": "2025-03-04T10:00:00"
    }))
}

async fn progress_ws(
    ws: WebSocketUpgrade,
    State(state): State<Arc<BackendState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| push_progress(socket, state, session_id))
}

async fn push_progress(mut socket: WebSocket, state: Arc<BackendState>, session_id: String) {
    let mut frames = state.preamble.clone();
    frames.push(progress_frame(&session_id, "progress", "researching_company", 0.1));
    if !state.stall_progress {
        frames.push(progress_frame(&session_id, "progress", "finalizing", 0.95));
        frames.push(progress_frame(&session_id, "completed", "finalizing", 1.0));
    }

    for frame in frames {
        if socket.send(Message::Text(frame.into())).await.is_err() {
            state.progress_closed.store(true, Ordering::SeqCst);
            return;
        }
    }
    // Hold the socket open until the client closes it.
    while let Some(Ok(msg)) = socket.recv().await {
        if matches!(msg, Message::Close(_)) {
            break;
        }
    }
    state.progress_closed.store(true, Ordering::SeqCst);
}
