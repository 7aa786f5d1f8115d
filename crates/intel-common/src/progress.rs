//! Messages pushed on `/ws/progress/{session_id}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    Progress,
    Completed,
    Error,
}

/// One progress push from the backend.
///
/// Events are not guaranteed to arrive in monotonic order; consumers keep
/// only the latest one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub kind: ProgressKind,
    pub session_id: String,
    #[serde(default)]
    pub stage: String,
    /// Fraction of the run completed, in `[0, 1]`.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

impl ProgressEvent {
    pub fn is_completed(&self) -> bool {
        self.kind == ProgressKind::Completed
    }

    /// The stage tag as a known [`Stage`], if it is one.
    pub fn known_stage(&self) -> Option<Stage> {
        self.stage.parse().ok()
    }
}

/// Coarse named phase of backend analysis work, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ResearchingCompany,
    AnalyzingCompetitors,
    GatheringFinancials,
    AnalyzingTeam,
    ProcessingNews,
    Finalizing,
}

pub const STAGES: [Stage; 6] = [
    Stage::ResearchingCompany,
    Stage::AnalyzingCompetitors,
    Stage::GatheringFinancials,
    Stage::AnalyzingTeam,
    Stage::ProcessingNews,
    Stage::Finalizing,
];

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResearchingCompany => "researching_company",
            Self::AnalyzingCompetitors => "analyzing_competitors",
            Self::GatheringFinancials => "gathering_financials",
            Self::AnalyzingTeam => "analyzing_team",
            Self::ProcessingNews => "processing_news",
            Self::Finalizing => "finalizing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ResearchingCompany => "Searching company info",
            Self::AnalyzingCompetitors => "Analyzing competitors",
            Self::GatheringFinancials => "Gathering financial data",
            Self::AnalyzingTeam => "Analyzing team & culture",
            Self::ProcessingNews => "Processing news & sentiment",
            Self::Finalizing => "Finalizing results",
        }
    }

    /// Zero-based position in [`STAGES`].
    pub fn ordinal(&self) -> usize {
        STAGES
            .iter()
            .position(|s| s == self)
            .unwrap_or(STAGES.len())
    }

    /// Progress fraction past which this stage counts as done.
    pub fn threshold(&self) -> f64 {
        self.ordinal() as f64 / STAGES.len() as f64
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("Unknown stage: {}", s))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
