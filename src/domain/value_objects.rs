//! Scan job value objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job has been created but execution has not started
    Pending,
    /// Job is currently executing; progress and partial results are visible
    Running,
    /// Job finished; full result is available
    Completed,
    /// Orchestration failed; prior completed-target results are preserved
    Error,
}

impl JobStatus {
    /// Returns the set of valid target states from the current state.
    ///
    /// ```text
    /// Pending ──► Running ──► Completed
    ///   │            │
    ///   └────────────┴──────► Error
    /// ```
    ///
    /// Pending → Completed is reachable directly by the single-stage
    /// discovery pipeline. Progress updates while running re-write the
    /// snapshot without a state change and are not transitions.
    pub fn valid_transitions(&self) -> &[JobStatus] {
        match self {
            Self::Pending => &[Self::Running, Self::Completed, Self::Error],
            Self::Running => &[Self::Completed, Self::Error],
            Self::Completed | Self::Error => &[],
        }
    }

    /// Check whether transitioning to `target` is allowed from the current state.
    pub fn can_transition_to(&self, target: &JobStatus) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Whether this status represents a terminal (final) state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Error returned when an invalid status transition is attempted.
#[derive(Debug, thiserror::Error)]
#[error("Invalid job transition from {from} to {to}")]
pub struct JobTransitionError {
    pub from: JobStatus,
    pub to: JobStatus,
}

/// One external-tool invocation within a full-scan pipeline.
///
/// Stage order is fixed; [`ScanStage::SEQUENCE`] is the only iteration
/// order the pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    PortScan,
    VulnScan,
    WebScan,
}

impl ScanStage {
    /// Fixed execution order for the full-scan pipeline.
    pub const SEQUENCE: [ScanStage; 3] = [Self::PortScan, Self::VulnScan, Self::WebScan];

    /// Stage key used in result mappings and progress messages.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PortScan => "portscan",
            Self::VulnScan => "vulnscan",
            Self::WebScan => "webscan",
        }
    }

    /// One-based position in [`ScanStage::SEQUENCE`].
    pub fn position(&self) -> usize {
        match self {
            Self::PortScan => 1,
            Self::VulnScan => 2,
            Self::WebScan => 3,
        }
    }
}
