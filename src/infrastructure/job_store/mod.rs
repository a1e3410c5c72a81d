//! Job registry: shared storage for job snapshots

mod store;

pub use store::{InMemoryJobStore, JobStore};
