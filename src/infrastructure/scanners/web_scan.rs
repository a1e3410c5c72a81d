//! Web-server misconfiguration scan adapter

use std::sync::Arc;

use crate::config::WebScanConfig;
use crate::domain::target::ScanTarget;

use super::command::CommandRunner;

const TOOL: &str = "Nikto";

/// Wraps the external web-server scanner, limited to the most important
/// test categories to keep per-target latency bounded.
pub struct WebScanner {
    config: WebScanConfig,
    runner: Arc<dyn CommandRunner>,
}

impl WebScanner {
    pub fn new(config: WebScanConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Scan one target. Total: tool failures, timeouts, and spawn faults
    /// all come back as descriptive strings.
    pub async fn scan(&self, target: &str) -> String {
        let host = ScanTarget::new(target);
        let args = vec![
            "-host".to_string(),
            host.host().to_string(),
            "-Tuning".to_string(),
            self.config.tuning.clone(),
            "-timeout".to_string(),
            self.config.request_timeout_seconds.to_string(),
            "-maxtime".to_string(),
            format!("{}s", self.config.max_time_seconds),
        ];

        match self
            .runner
            .run(&self.config.executable, &args, self.config.timeout())
            .await
        {
            Ok(out) if out.success => out.stdout,
            Ok(out) => format!("{} scan failed: {}", TOOL, out.stderr.trim()),
            Err(err) => err.to_failure_text(TOOL),
        }
    }
}
