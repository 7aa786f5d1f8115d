//! Pure state machine for the progress phase.
//!
//! The channel lifecycle is a single [`ConnectionState`] value, so states
//! like "completed but disconnected" cannot be expressed. Inbound events are
//! folded in arrival order; only the latest [`ProgressEvent`] is kept.

use intel_common::{ProgressEvent, STAGES, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    /// Terminal: a `completed` event was received.
    Completed,
    /// Transport error or close before completion. No reconnect is attempted.
    Disconnected,
}

/// Lifecycle events produced by the progress channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Opened,
    Message(ProgressEvent),
    Error(String),
    Closed,
}

/// What the caller must do after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Leave the progress phase after the completion delay. Emitted at most
    /// once per tracker.
    ScheduleCompletion,
}

/// One row of the stage checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRow {
    pub stage: Stage,
    /// Current progress strictly exceeds the stage's threshold.
    pub complete: bool,
    /// The latest event names this stage.
    pub current: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    session_id: String,
    state: ConnectionState,
    latest: Option<ProgressEvent>,
}

impl ProgressTracker {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: ConnectionState::Connecting,
            latest: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn latest(&self) -> Option<&ProgressEvent> {
        self.latest.as_ref()
    }

    /// Fold one channel event into the tracker.
    pub fn apply(&mut self, event: ChannelEvent) -> Transition {
        if self.state == ConnectionState::Completed {
            return Transition::Stay;
        }

        match event {
            ChannelEvent::Opened => {
                if self.state == ConnectionState::Connecting {
                    self.state = ConnectionState::Connected;
                }
                Transition::Stay
            }
            ChannelEvent::Message(msg) => {
                if msg.session_id != self.session_id {
                    tracing::debug!(
                        expected = %self.session_id,
                        got = %msg.session_id,
                        "ignoring progress event for another session"
                    );
                    return Transition::Stay;
                }
                if self.state == ConnectionState::Connecting {
                    self.state = ConnectionState::Connected;
                }
                let completed = msg.is_completed();
                self.latest = Some(msg);
                if completed {
                    self.state = ConnectionState::Completed;
                    Transition::ScheduleCompletion
                } else {
                    Transition::Stay
                }
            }
            ChannelEvent::Error(_) | ChannelEvent::Closed => {
                self.state = ConnectionState::Disconnected;
                Transition::Stay
            }
        }
    }

    /// Latest server-reported fraction, `0.0` before any event.
    pub fn fraction(&self) -> f64 {
        self.latest.as_ref().map_or(0.0, |e| e.progress)
    }

    /// Displayed percentage: `progress × 100`, rounded.
    pub fn percent(&self) -> u8 {
        display_percent(self.fraction())
    }

    /// Whether the "connecting to server" warning should be shown.
    pub fn is_connecting(&self) -> bool {
        matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Disconnected
        )
    }

    pub fn checklist(&self) -> Vec<StageRow> {
        let current = self.latest.as_ref().and_then(ProgressEvent::known_stage);
        stage_checklist(self.fraction(), current)
    }
}

pub fn display_percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Checklist for a progress fraction and current stage. An unknown stage tag
/// marks no row as current.
///
/// Completion depends only on the fraction, so for a fixed or growing
/// fraction the set of completed rows never shrinks.
pub fn stage_checklist(fraction: f64, current_stage: Option<Stage>) -> Vec<StageRow> {
    STAGES
        .iter()
        .map(|&stage| StageRow {
            stage,
            complete: fraction > stage.threshold(),
            current: current_stage == Some(stage),
        })
        .collect()
}
