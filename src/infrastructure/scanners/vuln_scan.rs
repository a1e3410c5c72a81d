//! Vulnerability scan adapter

use std::sync::Arc;

use tracing::debug;

use crate::config::VulnScanConfig;
use crate::domain::target::ScanTarget;

use super::command::CommandRunner;

const TOOL: &str = "Nuclei";

/// Sentinel returned when the tool produced no actionable findings.
const NO_FINDINGS: &str = "No vulnerabilities detected.";

/// Wraps the external vulnerability scanner. Output is line-filtered so
/// the result highlights actionable findings rather than the tool's own
/// informational chatter.
pub struct VulnScanner {
    config: VulnScanConfig,
    runner: Arc<dyn CommandRunner>,
}

impl VulnScanner {
    pub fn new(config: VulnScanConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Scan one target. Total: tool failures, timeouts, and spawn faults
    /// all come back as descriptive strings.
    pub async fn scan(&self, target: &str) -> String {
        // The scanner wants a URL; bare hosts get the secure scheme.
        let url = ScanTarget::new(target).web_url();
        let args = vec!["-u".to_string(), url.clone(), "-no-color".to_string()];

        debug!(url = %url, "Starting vulnerability scan");

        match self
            .runner
            .run(&self.config.executable, &args, self.config.timeout())
            .await
        {
            Ok(out) if out.success => {
                let stdout = out.stdout.trim();
                if stdout.is_empty() {
                    return NO_FINDINGS.to_string();
                }
                filter_findings(stdout).unwrap_or_else(|| NO_FINDINGS.to_string())
            }
            Ok(out) => format!("{} scan failed: {}", TOOL, out.stderr.trim()),
            Err(err) => err.to_failure_text(TOOL),
        }
    }
}

/// Drop blank and purely informational/warning lines. `None` when nothing
/// actionable remains.
fn filter_findings(stdout: &str) -> Option<String> {
    let findings: Vec<&str> = stdout
        .lines()
        .filter(|line| {
            !line.trim().is_empty() && !line.starts_with("[INF]") && !line.starts_with("[WRN]")
        })
        .collect();

    if findings.is_empty() {
        None
    } else {
        Some(findings.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scanners::test_support::ScriptedRunner;

    #[tokio::test]
    async fn bare_host_is_scanned_over_https() {
        let runner = Arc::new(ScriptedRunner::success("[CVE-2021-0001] [high] found\n"));
        let scanner = VulnScanner::new(VulnScanConfig::default(), runner.clone());

        scanner.scan("example.com").await;

        let args = runner.calls()[0].1.clone();
        assert_eq!(args[0], "-u");
        assert_eq!(args[1], "https://example.com");
        assert_eq!(args[2], "-no-color");
    }

    #[tokio::test]
    async fn informational_lines_are_filtered_out() {
        let stdout = "[INF] Using nuclei templates v9\n[WRN] deprecated flag\n[CVE-2021-0001] [high] found\n";
        let runner = Arc::new(ScriptedRunner::success(stdout));
        let scanner = VulnScanner::new(VulnScanConfig::default(), runner);

        let result = scanner.scan("example.com").await;

        assert_eq!(result, "[CVE-2021-0001] [high] found");
    }

    #[tokio::test]
    async fn only_informational_output_yields_sentinel() {
        let runner = Arc::new(ScriptedRunner::success("[INF] templates loaded\n[WRN] old version\n"));
        let scanner = VulnScanner::new(VulnScanConfig::default(), runner);

        assert_eq!(scanner.scan("example.com").await, NO_FINDINGS);
    }

    #[tokio::test]
    async fn empty_output_yields_sentinel() {
        let runner = Arc::new(ScriptedRunner::success(""));
        let scanner = VulnScanner::new(VulnScanConfig::default(), runner);

        assert_eq!(scanner.scan("example.com").await, NO_FINDINGS);
    }

    #[tokio::test]
    async fn timeout_reports_the_configured_bound() {
        let runner = Arc::new(ScriptedRunner::timeout(180));
        let scanner = VulnScanner::new(VulnScanConfig::default(), runner);

        assert_eq!(
            scanner.scan("example.com").await,
            "Nuclei scan timed out after 180 seconds."
        );
    }

    #[test]
    fn filter_keeps_multiline_findings_in_order() {
        let filtered = filter_findings("first\n[INF] skip\nsecond").unwrap();
        assert_eq!(filtered, "first\nsecond");
    }
}
