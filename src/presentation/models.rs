//! API request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::entities::{JobResult, JobSnapshot};
use crate::domain::value_objects::JobStatus;

/// Request model for the legacy single-target scan
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ScanRequest {
    /// Target host or URL
    #[schema(example = "https://example.com")]
    pub target: String,
}

/// Request model for subdomain discovery
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SubdomainScanRequest {
    /// Target host or URL; enumeration runs against its bare domain
    #[schema(example = "example.com")]
    pub target: String,
}

/// Request model for a full scan across selected subdomains
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FullScanRequest {
    /// Targets to scan, in execution order. Bounded by `scan.max_targets`.
    #[schema(example = json!(["a.example.com", "b.example.com"]))]
    pub subdomains: Vec<String>,
}

/// Response returned when a job is accepted for asynchronous processing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobAcceptedResponse {
    /// Job identity to poll `/results/{task_id}` with
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub task_id: Uuid,
    #[schema(example = "started")]
    pub status: String,
}

/// Current job snapshot returned by the query endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobStatusResponse {
    pub task_id: Uuid,
    pub status: JobStatus,
    /// Human-readable description of the stage currently executing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Aggregated results; partial while the job is running
    pub result: Option<JobResult>,
    /// Orchestration diagnostic, present only in the `error` status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<JobSnapshot> for JobStatusResponse {
    fn from(snapshot: JobSnapshot) -> Self {
        Self {
            task_id: snapshot.job_id,
            status: snapshot.status,
            progress: snapshot.progress,
            result: snapshot.result,
            error: snapshot.error,
            created_at: snapshot.created_at,
            completed_at: snapshot.completed_at,
        }
    }
}

/// Descriptive client-error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Maximum 3 subdomains allowed")]
    pub error: String,
}

/// Fixed liveness acknowledgment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Sentinelle scan API is running")]
    pub message: String,
}
