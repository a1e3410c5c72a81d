//! Subdomain enumeration adapter

use std::sync::Arc;

use tracing::debug;

use crate::config::SubdomainScanConfig;
use crate::domain::target::ScanTarget;

use super::command::CommandRunner;

const TOOL: &str = "Subfinder";

/// Wraps the external subdomain enumeration tool. Unlike the other
/// adapters this one returns a host list: the tool emits one JSON record
/// per discovered host.
pub struct SubdomainScanner {
    config: SubdomainScanConfig,
    runner: Arc<dyn CommandRunner>,
}

impl SubdomainScanner {
    pub fn new(config: SubdomainScanConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Enumerate subdomains of one target's bare domain. Total: failures
    /// come back as a one-element list carrying the descriptive string.
    pub async fn enumerate(&self, target: &str) -> Vec<String> {
        let domain = ScanTarget::new(target).domain().to_string();
        let args = vec![
            "-d".to_string(),
            domain.clone(),
            "-silent".to_string(),
            "-json".to_string(),
        ];

        debug!(domain = %domain, "Starting subdomain enumeration");

        match self
            .runner
            .run(&self.config.executable, &args, self.config.timeout())
            .await
        {
            Ok(out) if out.success => parse_hosts(&out.stdout),
            Ok(out) => vec![format!("{} scan failed: {}", TOOL, out.stderr.trim())],
            Err(err) => vec![err.to_failure_text(TOOL)],
        }
    }
}

/// One record per line; the `host` field carries the discovered name.
/// Lines that are not valid JSON are kept verbatim as fallback entries.
fn parse_hosts(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match serde_json::from_str::<serde_json::Value>(line) {
            Ok(serde_json::Value::Object(record)) => record
                .get("host")
                .and_then(|host| host.as_str())
                .unwrap_or_default()
                .to_string(),
            _ => line.trim().to_string(),
        })
        .collect()
}
