//! Sentinelle - asynchronous security-scan orchestration API
//!
//! A client submits a target host or domain and polls for the combined
//! output of several independent external scanning tools. The crate is
//! organized in layers:
//!
//! - [`domain`] - job snapshots, statuses, stages, target normalization
//! - [`application`] - the scan pipeline, one spawned run per job
//! - [`infrastructure`] - the job registry and the external tool adapters
//! - [`presentation`] - axum routes, controllers, and API models
//! - [`config`] / [`logging`] - layered configuration and tracing setup

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::create_app;
pub use config::Config;
pub use logging::init_tracing;
