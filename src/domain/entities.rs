//! Scan job entities
//!
//! A [`JobSnapshot`] is the unit of state the registry stores and the
//! pipeline writes. The executing pipeline owns its snapshot exclusively
//! and publishes whole-snapshot replacements after every stage transition,
//! so pollers never observe a half-updated job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

use super::value_objects::{JobStatus, JobTransitionError};

/// Complete state of one scan job at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobSnapshot {
    pub job_id: Uuid,
    pub status: JobStatus,
    /// Human-readable description of the stage currently executing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Aggregated results. While running this reflects only fully
    /// finished work; `None` until the first write that carries results.
    pub result: Option<JobResult>,
    /// Diagnostic captured when orchestration itself fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobSnapshot {
    /// Create a new pending job with a fresh identity.
    pub fn new() -> Self {
        Self {
            job_id: Uuid::new_v4(),
            status: JobStatus::Pending,
            progress: None,
            result: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Move the job to a new status, validating against the state machine.
    /// Terminal transitions stamp `completed_at`.
    pub fn transition(&mut self, to: JobStatus) -> Result<(), JobTransitionError> {
        if !self.status.can_transition_to(&to) {
            return Err(JobTransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        if to.is_terminal() {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }
}

impl Default for JobSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregated job output. The wire shape depends on the pipeline that
/// produced it: a per-target mapping for multi-target jobs, a flat
/// stage report for the single-target flow, and a host list wrapper for
/// subdomain discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum JobResult {
    /// Full scan: one complete stage report per finished target.
    Full(HashMap<String, StageReport>),
    /// Discovered hosts from subdomain enumeration.
    Subdomains(SubdomainReport),
    /// Legacy single-target scan: stage outputs filled in as they finish.
    Single(StageReport),
}

/// Outputs of the three scan stages for one target.
///
/// Stage outputs are strings in both the success and failure case: the
/// adapters encode their own failures in-band, so a populated field never
/// distinguishes "tool findings" from "tool failure text" structurally.
/// Multi-target jobs only ever record fully populated reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StageReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portscan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnscan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webscan: Option<String>,
}

impl StageReport {
    /// A report with every stage output present, as recorded for a
    /// finished target in a multi-target job.
    pub fn complete(portscan: String, vulnscan: String, webscan: String) -> Self {
        Self {
            portscan: Some(portscan),
            vulnscan: Some(vulnscan),
            webscan: Some(webscan),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.portscan.is_some() && self.vulnscan.is_some() && self.webscan.is_some()
    }
}

/// Host list produced by subdomain enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubdomainReport {
    pub subdomains: Vec<String>,
}
