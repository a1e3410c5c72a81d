//! Shared test support
#![allow(dead_code)]

pub mod mocks;

use std::sync::Arc;

use axum::Router;
use sentinelle::application::ScanPipeline;
use sentinelle::config::Config;
use sentinelle::infrastructure::job_store::InMemoryJobStore;
use sentinelle::presentation::{AppState, create_router};

use self::mocks::ToolRunner;

/// Build a pipeline over a fresh in-memory registry and the given runner.
pub fn build_pipeline(runner: Arc<ToolRunner>) -> (Arc<InMemoryJobStore>, ScanPipeline) {
    let store = Arc::new(InMemoryJobStore::new());
    let config = Config::default();
    let pipeline = ScanPipeline::new(store.clone(), &config.scanners, runner);
    (store, pipeline)
}

/// Build a full application router over the given runner, returning the
/// registry for direct assertions.
pub fn build_app(runner: Arc<ToolRunner>) -> (Router, Arc<InMemoryJobStore>) {
    let config = Arc::new(Config::default());
    let store = Arc::new(InMemoryJobStore::new());
    let pipeline = Arc::new(ScanPipeline::new(store.clone(), &config.scanners, runner));

    let state = AppState {
        pipeline,
        job_store: store.clone(),
        config: config.clone(),
    };

    (create_router(state, config), store)
}
