//! WebSocket subscription to `/ws/progress/{session_id}`.
//!
//! The socket lives in a spawned task that forwards lifecycle events over an
//! mpsc channel. The task ends on close, error, or cancellation; dropping the
//! [`ProgressSubscription`] cancels it, so the socket is released whichever
//! state the phase was in.

use futures_util::{SinkExt, StreamExt};
use intel_common::ProgressEvent;
use reqwest::Url;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use super::state::ChannelEvent;
use crate::api::progress_url;
use crate::errors::ProgressError;

const EVENT_BUFFER: usize = 64;

pub struct ProgressSubscription {
    session_id: String,
    events: mpsc::Receiver<ChannelEvent>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProgressSubscription {
    /// Open the channel for `session_id` on the backend at `api_url`.
    pub fn connect(api_url: &str, session_id: &str) -> Result<Self, ProgressError> {
        let url = progress_url(api_url, session_id).map_err(ProgressError::InvalidUrl)?;
        Ok(Self::open(url, session_id))
    }

    /// Open the channel for `session_id` at `url`. The client sends nothing
    /// after the handshake.
    pub fn open(url: Url, session_id: &str) -> Self {
        let (tx, events) = mpsc::channel(EVENT_BUFFER);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_channel(url, session_id.to_string(), tx, cancel.clone()));
        Self {
            session_id: session_id.to_string(),
            events,
            cancel,
            task: Some(task),
        }
    }

    /// Build a subscription over an existing event stream. Used by tests and
    /// by callers that bridge another transport.
    pub fn from_receiver(session_id: &str, events: mpsc::Receiver<ChannelEvent>) -> Self {
        Self {
            session_id: session_id.to_string(),
            events,
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Next lifecycle event, or `None` once the channel task has ended.
    pub async fn next(&mut self) -> Option<ChannelEvent> {
        self.events.recv().await
    }

    /// Close the socket and wait for the channel task to finish.
    pub async fn close(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_channel(
    url: Url,
    session_id: String,
    tx: mpsc::Sender<ChannelEvent>,
    cancel: CancellationToken,
) {
    let connected = tokio::select! {
        _ = cancel.cancelled() => return,
        result = connect_async(url.as_str()) => result,
    };

    let ws = match connected {
        Ok((ws, _response)) => ws,
        Err(e) => {
            tracing::warn!(session = %session_id, error = %e, "progress channel failed to connect");
            let _ = tx.send(ChannelEvent::Error(e.to_string())).await;
            return;
        }
    };
    tracing::info!(session = %session_id, "progress channel open");
    if tx.send(ChannelEvent::Opened).await.is_err() {
        return;
    }

    let (mut sink, mut stream) = ws.split();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(session = %session_id, "progress channel cancelled");
                break;
            }
            msg = stream.next() => {
                let event = match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ProgressEvent>(&text) {
                            Ok(progress) => ChannelEvent::Message(progress),
                            Err(e) => {
                                tracing::warn!(session = %session_id, error = %e, "dropping malformed progress message");
                                continue;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(session = %session_id, "progress channel closed by server");
                        let _ = tx.send(ChannelEvent::Closed).await;
                        break;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::warn!(session = %session_id, error = %e, "progress channel error");
                        let _ = tx.send(ChannelEvent::Error(e.to_string())).await;
                        break;
                    }
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        }
    }

    // Best-effort close frame
    let _ = sink.send(Message::Close(None)).await;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_close_without_socket_task_returns_promptly() {
        let (tx, rx) = mpsc::channel(4);
        let subscription = ProgressSubscription::from_receiver("s1", rx);

        tokio::time::timeout(Duration::from_secs(1), subscription.close())
            .await
            .expect("close should not block");
        assert!(tx.is_closed());
    }

    #[tokio::test]
    async fn test_drop_releases_the_event_stream() {
        let (tx, rx) = mpsc::channel(4);
        let mut subscription = ProgressSubscription::from_receiver("s1", rx);
        tx.send(ChannelEvent::Opened).await.unwrap();
        assert_eq!(subscription.next().await, Some(ChannelEvent::Opened));

        drop(subscription);
        assert!(tx.send(ChannelEvent::Closed).await.is_err());
    }

    #[tokio::test]
    async fn test_refused_connection_reports_error_then_ends() {
        let mut subscription = ProgressSubscription::connect("http://127.0.0.1:1", "s1").unwrap();
        let first = tokio::time::timeout(Duration::from_secs(5), subscription.next())
            .await
            .expect("connect attempt should finish");
        assert!(matches!(first, Some(ChannelEvent::Error(_))));
        assert_eq!(subscription.next().await, None);
    }
}
