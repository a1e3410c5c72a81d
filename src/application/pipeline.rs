//! Scan pipeline - the per-job unit of work.
//!
//! One pipeline run owns exclusive write access to its job's registry
//! entry for the job's entire lifetime. Every stage transition publishes a
//! whole-snapshot replacement, so concurrent pollers observe a coherent
//! job at any moment. Stages execute strictly sequentially within a job;
//! concurrency exists only between jobs.
//!
//! Adapter calls are total (failures come back as strings), so the only
//! faults handled here are faults in the sequencing logic itself. Those
//! terminate the job in the `error` state while preserving every
//! completed-target result already recorded.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::config::ScannersConfig;
use crate::domain::entities::{JobResult, JobSnapshot, StageReport, SubdomainReport};
use crate::domain::value_objects::{JobStatus, JobTransitionError, ScanStage};
use crate::infrastructure::job_store::JobStore;
use crate::infrastructure::scanners::{
    CommandRunner, PortScanner, SubdomainScanner, VulnScanner, WebScanner,
};

/// Sequences scanner invocations for one job and keeps the registry
/// entry current after every transition.
pub struct ScanPipeline {
    job_store: Arc<dyn JobStore>,
    port_scanner: PortScanner,
    vuln_scanner: VulnScanner,
    web_scanner: WebScanner,
    subdomain_scanner: SubdomainScanner,
}

impl ScanPipeline {
    pub fn new(
        job_store: Arc<dyn JobStore>,
        scanners: &ScannersConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            job_store,
            port_scanner: PortScanner::new(scanners.port_scan.clone(), runner.clone()),
            vuln_scanner: VulnScanner::new(scanners.vuln_scan.clone(), runner.clone()),
            web_scanner: WebScanner::new(scanners.web_scan.clone(), runner.clone()),
            subdomain_scanner: SubdomainScanner::new(scanners.subdomain_scan.clone(), runner),
        }
    }

    /// Run the three scan stages against each target in order, recording
    /// one complete stage report per finished target.
    pub async fn run_full(&self, mut job: JobSnapshot, targets: Vec<String>) {
        info!(job_id = %job.job_id, targets = targets.len(), "Starting full scan job");
        if let Err(fault) = self.execute_full(&mut job, &targets).await {
            self.fail(job, &fault).await;
        }
    }

    /// Run the three scan stages against a single target, publishing each
    /// stage's output as soon as it finishes.
    pub async fn run_single(&self, mut job: JobSnapshot, target: String) {
        info!(job_id = %job.job_id, target = %target, "Starting single-target scan job");
        if let Err(fault) = self.execute_single(&mut job, &target).await {
            self.fail(job, &fault).await;
        }
    }

    /// Run subdomain discovery. A single enumeration stage; tool failures
    /// are string-encoded by the adapter and still complete the job.
    pub async fn run_discovery(&self, mut job: JobSnapshot, target: String) {
        info!(job_id = %job.job_id, target = %target, "Starting subdomain discovery job");
        if let Err(fault) = self.execute_discovery(&mut job, &target).await {
            self.fail(job, &fault).await;
        }
    }

    async fn execute_full(
        &self,
        job: &mut JobSnapshot,
        targets: &[String],
    ) -> Result<(), JobTransitionError> {
        job.transition(JobStatus::Running)?;

        let total = targets.len();
        let mut results: HashMap<String, StageReport> = HashMap::new();

        for (index, target) in targets.iter().enumerate() {
            let position = index + 1;
            job.progress = Some(format!(
                "processing target {}/{}: {}",
                position, total, target
            ));
            job.result = Some(JobResult::Full(results.clone()));
            self.job_store.replace(job.clone()).await;

            let prefix = format!("target {}/{}: {} - ", position, total, target);
            let report = self.run_stages(job, target, &prefix, false).await;

            // The mapping only ever carries fully finished targets.
            results.insert(target.clone(), report);
            job.result = Some(JobResult::Full(results.clone()));
        }

        job.progress = Some("Scan finished".to_string());
        job.transition(JobStatus::Completed)?;
        self.job_store.replace(job.clone()).await;

        info!(job_id = %job.job_id, "Full scan job completed");
        Ok(())
    }

    async fn execute_single(
        &self,
        job: &mut JobSnapshot,
        target: &str,
    ) -> Result<(), JobTransitionError> {
        job.transition(JobStatus::Running)?;

        let report = self.run_stages(job, target, "", true).await;

        job.result = Some(JobResult::Single(report));
        job.progress = Some("Scan finished".to_string());
        job.transition(JobStatus::Completed)?;
        self.job_store.replace(job.clone()).await;

        info!(job_id = %job.job_id, "Single-target scan job completed");
        Ok(())
    }

    async fn execute_discovery(
        &self,
        job: &mut JobSnapshot,
        target: &str,
    ) -> Result<(), JobTransitionError> {
        let subdomains = self.subdomain_scanner.enumerate(target).await;

        job.result = Some(JobResult::Subdomains(SubdomainReport { subdomains }));
        job.transition(JobStatus::Completed)?;
        self.job_store.replace(job.clone()).await;

        info!(job_id = %job.job_id, "Subdomain discovery job completed");
        Ok(())
    }

    /// Run the fixed stage sequence for one target. A progress snapshot is
    /// published before each stage starts; with `publish_partial` the
    /// per-stage outputs recorded so far ride along on those writes (the
    /// single-target flow), otherwise partial per-target output stays
    /// private until the whole target finishes (the multi-target flow).
    async fn run_stages(
        &self,
        job: &mut JobSnapshot,
        target: &str,
        progress_prefix: &str,
        publish_partial: bool,
    ) -> StageReport {
        let mut report = StageReport::default();

        for stage in ScanStage::SEQUENCE {
            job.progress = Some(format!(
                "{}running {} ({}/{})",
                progress_prefix,
                stage.key(),
                stage.position(),
                ScanStage::SEQUENCE.len()
            ));
            if publish_partial && report != StageReport::default() {
                job.result = Some(JobResult::Single(report.clone()));
            }
            self.job_store.replace(job.clone()).await;

            let output = match stage {
                ScanStage::PortScan => self.port_scanner.scan(target).await,
                ScanStage::VulnScan => self.vuln_scanner.scan(target).await,
                ScanStage::WebScan => self.web_scanner.scan(target).await,
            };
            match stage {
                ScanStage::PortScan => report.portscan = Some(output),
                ScanStage::VulnScan => report.vulnscan = Some(output),
                ScanStage::WebScan => report.webscan = Some(output),
            }
        }

        report
    }

    /// Record an orchestration fault as the terminal `error` state.
    /// Results accumulated before the fault stay on the snapshot.
    async fn fail(&self, mut job: JobSnapshot, fault: &JobTransitionError) {
        error!(job_id = %job.job_id, error = %fault, "Scan orchestration failed");

        job.error = Some(fault.to_string());
        if job.transition(JobStatus::Error).is_err() {
            // The state machine itself is what faulted; force the terminal
            // state so the job stops advancing either way.
            job.status = JobStatus::Error;
            if job.completed_at.is_none() {
                job.completed_at = Some(Utc::now());
            }
        }
        self.job_store.replace(job).await;
    }
}
