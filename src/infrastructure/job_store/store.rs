use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::entities::JobSnapshot;

/// Job storage interface.
///
/// The registry is shared between the submission/query handlers and every
/// running pipeline. Writes are whole-snapshot replacements: the executing
/// pipeline is the single writer for its entry, and readers always observe
/// a coherent snapshot. A missing entry on `get` is a normal outcome
/// (unknown identity), not a fault.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert the initial snapshot for a newly submitted job.
    async fn create(&self, snapshot: JobSnapshot);
    /// Current snapshot for a job, or `None` for an unknown identity.
    async fn get(&self, job_id: Uuid) -> Option<JobSnapshot>;
    /// Replace a job's entire state with a new snapshot.
    async fn replace(&self, snapshot: JobSnapshot);
    /// Number of jobs tracked by the registry.
    async fn len(&self) -> usize;
}

/// In-memory job store.
///
/// Entries are retained for the lifetime of the process; there is no
/// eviction. Entry-level insertion into the map makes snapshot replacement
/// atomic with respect to concurrent poll-reads.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: DashMap<Uuid, JobSnapshot>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, snapshot: JobSnapshot) {
        tracing::debug!(job_id = %snapshot.job_id, "Job created in registry");
        self.jobs.insert(snapshot.job_id, snapshot);
    }

    async fn get(&self, job_id: Uuid) -> Option<JobSnapshot> {
        self.jobs.get(&job_id).map(|entry| entry.value().clone())
    }

    async fn replace(&self, snapshot: JobSnapshot) {
        tracing::debug!(
            job_id = %snapshot.job_id,
            status = %snapshot.status,
            "Job snapshot replaced"
        );
        self.jobs.insert(snapshot.job_id, snapshot);
    }

    async fn len(&self) -> usize {
        self.jobs.len()
    }
}
