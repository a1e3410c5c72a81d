//! Scan API controllers
//!
//! Submission handlers are thin: validate the request, create the pending
//! registry entry, hand the job to a spawned pipeline run, and acknowledge
//! immediately. The spawned task owns the job's registry entry from that
//! point on; handlers never touch it again.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::application::ScanPipeline;
use crate::config::Config;
use crate::domain::entities::JobSnapshot;
use crate::infrastructure::job_store::JobStore;
use crate::presentation::models::{
    ErrorResponse, FullScanRequest, JobAcceptedResponse, JobStatusResponse, MessageResponse,
    ScanRequest, SubdomainScanRequest,
};

/// Shared application state for the scan API
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ScanPipeline>,
    pub job_store: Arc<dyn JobStore>,
    pub config: Arc<Config>,
}

type ClientError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ClientError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// POST /scan/subdomains/ - Start a subdomain discovery scan
#[utoipa::path(
    post,
    path = "/scan/subdomains/",
    request_body = SubdomainScanRequest,
    responses(
        (status = 200, description = "Discovery job started", body = JobAcceptedResponse)
    ),
    tag = "scans"
)]
pub async fn start_subdomain_scan(
    State(state): State<AppState>,
    Json(request): Json<SubdomainScanRequest>,
) -> Json<JobAcceptedResponse> {
    let job = JobSnapshot::new();
    let task_id = job.job_id;
    state.job_store.create(job.clone()).await;

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run_discovery(job, request.target).await;
    });

    Json(JobAcceptedResponse {
        task_id,
        status: "started".to_string(),
    })
}

/// POST /scan/full/ - Start a full scan across selected subdomains
#[utoipa::path(
    post,
    path = "/scan/full/",
    request_body = FullScanRequest,
    responses(
        (status = 200, description = "Full scan job started", body = JobAcceptedResponse),
        (status = 400, description = "Target bound exceeded", body = ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn start_full_scan(
    State(state): State<AppState>,
    Json(request): Json<FullScanRequest>,
) -> Result<Json<JobAcceptedResponse>, ClientError> {
    if request.subdomains.is_empty() {
        return Err(bad_request("At least one subdomain is required"));
    }
    let max_targets = state.config.scan.max_targets;
    if request.subdomains.len() > max_targets {
        // Rejected before any registry entry exists.
        return Err(bad_request(format!(
            "Maximum {} subdomains allowed",
            max_targets
        )));
    }

    let job = JobSnapshot::new();
    let task_id = job.job_id;
    state.job_store.create(job.clone()).await;

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run_full(job, request.subdomains).await;
    });

    Ok(Json(JobAcceptedResponse {
        task_id,
        status: "started".to_string(),
    }))
}

/// POST /scan/ - Start a single-target scan (legacy endpoint)
#[utoipa::path(
    post,
    path = "/scan/",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan job started", body = JobAcceptedResponse)
    ),
    tag = "scans"
)]
pub async fn start_scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Json<JobAcceptedResponse> {
    let job = JobSnapshot::new();
    let task_id = job.job_id;
    state.job_store.create(job.clone()).await;

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run_single(job, request.target).await;
    });

    Json(JobAcceptedResponse {
        task_id,
        status: "started".to_string(),
    })
}

/// GET /results/{task_id} - Fetch the current snapshot of a scan job
#[utoipa::path(
    get,
    path = "/results/{task_id}",
    params(
        ("task_id" = Uuid, Path, description = "Job identity returned at submission")
    ),
    responses(
        (status = 200, description = "Current job snapshot", body = JobStatusResponse),
        (status = 404, description = "Unknown job identity", body = ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn get_results(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<JobStatusResponse>, ClientError> {
    match state.job_store.get(task_id).await {
        Some(snapshot) => Ok(Json(snapshot.into())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Task not found".to_string(),
            }),
        )),
    }
}

/// GET / - Liveness acknowledgment
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is reachable", body = MessageResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Sentinelle scan API is running".to_string(),
    })
}
