//! Application setup and wiring

use std::sync::Arc;

use axum::Router;

use crate::application::ScanPipeline;
use crate::config::Config;
use crate::infrastructure::job_store::{InMemoryJobStore, JobStore};
use crate::infrastructure::scanners::{CommandRunner, TokioCommandRunner};
use crate::presentation::{AppState, create_router};

/// Build the application router with a fresh job registry and the real
/// command runner. One registry per process; jobs live as long as it does.
pub fn create_app(config: Config) -> Router {
    let config = Arc::new(config);

    let job_store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let runner: Arc<dyn CommandRunner> = Arc::new(TokioCommandRunner::new());
    let pipeline = Arc::new(ScanPipeline::new(
        job_store.clone(),
        &config.scanners,
        runner,
    ));

    let state = AppState {
        pipeline,
        job_store,
        config: config.clone(),
    };

    create_router(state, config)
}
