//! Port/service scan adapter

use std::sync::Arc;

use crate::config::PortScanConfig;
use crate::domain::target::ScanTarget;

use super::command::CommandRunner;

const TOOL: &str = "Nmap";

/// Wraps the external port/service scanner with a fixed, latency-bounded
/// argument set.
pub struct PortScanner {
    config: PortScanConfig,
    runner: Arc<dyn CommandRunner>,
}

impl PortScanner {
    pub fn new(config: PortScanConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Scan one target. Total: tool failures, timeouts, and spawn faults
    /// all come back as descriptive strings.
    pub async fn scan(&self, target: &str) -> String {
        let host = ScanTarget::new(target);
        let args = self.args(host.host());

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

    fn args(&self, host: &str) -> Vec<String> {
        let mut args = vec![format!("-T{}", self.config.timing_template)];
        if self.config.fast_scan {
            args.push("-F".to_string());
        }
        args.extend([
            "--max-retries".to_string(),
            self.config.max_retries.to_string(),
            "--host-timeout".to_string(),
            format!("{}s", self.config.host_timeout_seconds),
            "-sV".to_string(),
            host.to_string(),
        ]);
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scanners::test_support::ScriptedRunner;

    #[tokio::test]
    async fn success_returns_raw_stdout() {
        let runner = Arc::new(ScriptedRunner::success("PORT STATE SERVICE\n80/tcp open http\n"));
        let scanner = PortScanner::new(PortScanConfig::default(), runner.clone());

        let result = scanner.scan("https://example.com/").await;

        assert!(result.contains("80/tcp open"));
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "nmap");
        // Scheme and trailing slash are stripped before invocation.
        assert_eq!(calls[0].1.last().unwrap(), "example.com");
    }

    #[tokio::test]
    async fn fixed_argument_set_bounds_latency() {
        let runner = Arc::new(ScriptedRunner::success(""));
        let scanner = PortScanner::new(PortScanConfig::default(), runner.clone());

        scanner.scan("example.com").await;

        let args = runner.calls()[0].1.clone();
        assert_eq!(
            args,
            vec![
                "-T4",
                "-F",
                "--max-retries",
                "1",
                "--host-timeout",
                "30s",
                "-sV",
                "example.com"
            ]
        );
    }

    #[tokio::test]
    async fn nonzero_exit_becomes_failure_string() {
        let runner = Arc::new(ScriptedRunner::failed_exit("Failed to resolve host\n"));
        let scanner = PortScanner::new(PortScanConfig::default(), runner);

        let result = scanner.scan("nonexistent.invalid").await;

        assert_eq!(result, "Nmap scan failed: Failed to resolve host");
    }

    #[tokio::test]
    async fn timeout_becomes_failure_string() {
        let runner = Arc::new(ScriptedRunner::timeout(60));
        let scanner = PortScanner::new(PortScanConfig::default(), runner);

        let result = scanner.scan("example.com").await;

        assert_eq!(result, "Nmap scan timed out after 60 seconds.");
    }

    #[tokio::test]
    async fn spawn_fault_becomes_failure_string() {
        let runner = Arc::new(ScriptedRunner::spawn_error("No such file or directory"));
        let scanner = PortScanner::new(PortScanConfig::default(), runner);

        let result = scanner.scan("example.com").await;

        assert!(result.starts_with("Unexpected error during Nmap scan:"));
        assert!(result.contains("No such file or directory"));
    }
}
