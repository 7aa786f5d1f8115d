//! Top-level phase controller.
//!
//! Control flows search → progress → dashboard, with one reset back to
//! search. Each phase carries the identifier it needs, so a progress phase
//! without a session id or a dashboard without a company id cannot be built.

use std::fmt;

use crate::errors::TransitionError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Search,
    Progress { session_id: String },
    Dashboard { company_id: String },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Progress { .. } => "progress",
            Self::Dashboard { .. } => "dashboard",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
pub struct PhaseController {
    phase: Phase,
}

impl PhaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session_id(&self) -> Option<&str> {
        match &self.phase {
            Phase::Progress { session_id } => Some(session_id),
            _ => None,
        }
    }

    pub fn company_id(&self) -> Option<&str> {
        match &self.phase {
            Phase::Dashboard { company_id } => Some(company_id),
            _ => None,
        }
    }

    /// search → progress
    pub fn start_analysis(&mut self, session_id: &str) -> Result<&Phase, TransitionError> {
        match self.phase {
            Phase::Search => {
                self.phase = Phase::Progress {
                    session_id: session_id.to_string(),
                };
                Ok(&self.phase)
            }
            _ => Err(self.rejected("start an analysis")),
        }
    }

    /// progress → dashboard. The id handed over is the session id: the
    /// backend resolves it to the finished record.
    pub fn analysis_complete(&mut self, company_id: &str) -> Result<&Phase, TransitionError> {
        match self.phase {
            Phase::Progress { .. } => {
                self.phase = Phase::Dashboard {
                    company_id: company_id.to_string(),
                };
                Ok(&self.phase)
            }
            _ => Err(self.rejected("complete an analysis")),
        }
    }

    /// any → search, clearing both identifiers.
    pub fn new_search(&mut self) -> &Phase {
        self.phase = Phase::Search;
        &self.phase
    }

    fn rejected(&self, transition: &'static str) -> TransitionError {
        TransitionError {
            from: self.phase.name(),
            transition,
        }
    }
}
