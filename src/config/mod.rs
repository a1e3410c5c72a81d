//! Configuration management
//!
//! Strongly-typed configuration loaded from layered TOML files and
//! environment variables. Environment variables use the `SENTINELLE__`
//! prefix with double underscore separators:
//!
//! ```bash
//! SENTINELLE__SERVER__PORT=8080
//! SENTINELLE__SCANNERS__VULN_SCAN__TIMEOUT_SECONDS=300
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub scan: ScanConfig,
    pub scanners: ScannersConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI). Should be false in hardened production.
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any (development only).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_docs: true,
            request_timeout_seconds: 30,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Scan submission configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum number of targets accepted in a single full-scan job.
    /// Stages run sequentially per target, so this bounds total job latency.
    pub max_targets: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { max_targets: 3 }
    }
}

/// Per-tool scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScannersConfig {
    pub port_scan: PortScanConfig,
    pub vuln_scan: VulnScanConfig,
    pub web_scan: WebScanConfig,
    pub subdomain_scan: SubdomainScanConfig,
}

/// Port/service scan (nmap) configuration
///
/// The argument set is fixed per invocation and tuned for speed over
/// exhaustiveness: a job may run up to `scan.max_targets` targets
/// sequentially, so per-target latency must stay bounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortScanConfig {
    /// Tool binary (or wrapper script) to invoke.
    pub executable: String,
    /// Timing template (nmap -T level, 0-5).
    pub timing_template: u8,
    /// Scan only the top 100 ports (-F).
    pub fast_scan: bool,
    /// Connection retry limit (--max-retries).
    pub max_retries: u32,
    /// Per-host timeout in seconds (--host-timeout).
    pub host_timeout_seconds: u64,
    /// Total execution timeout for the whole invocation.
    pub timeout_seconds: u64,
}

impl Default for PortScanConfig {
    fn default() -> Self {
        Self {
            executable: "nmap".to_string(),
            timing_template: 4,
            fast_scan: true,
            max_retries: 1,
            host_timeout_seconds: 30,
            timeout_seconds: 60,
        }
    }
}

/// Vulnerability scan (nuclei) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnScanConfig {
    pub executable: String,
    /// Total execution timeout for the whole invocation.
    pub timeout_seconds: u64,
}

impl Default for VulnScanConfig {
    fn default() -> Self {
        Self {
            executable: "nuclei".to_string(),
            timeout_seconds: 180,
        }
    }
}

/// Web-server misconfiguration scan (nikto) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebScanConfig {
    pub executable: String,
    /// Test categories to run (-Tuning).
    pub tuning: String,
    /// Per-request timeout in seconds (-timeout).
    pub request_timeout_seconds: u64,
    /// Tool-side maximum run time in seconds (-maxtime).
    pub max_time_seconds: u64,
    /// Total execution timeout for the whole invocation.
    pub timeout_seconds: u64,
}

impl Default for WebScanConfig {
    fn default() -> Self {
        Self {
            executable: "nikto".to_string(),
            tuning: "123".to_string(),
            request_timeout_seconds: 10,
            max_time_seconds: 120,
            timeout_seconds: 150,
        }
    }
}

/// Subdomain enumeration (subfinder) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdomainScanConfig {
    pub executable: String,
    /// Total execution timeout for the whole invocation.
    pub timeout_seconds: u64,
}

impl Default for SubdomainScanConfig {
    fn default() -> Self {
        Self {
            executable: "subfinder".to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level filter (overridden by RUST_LOG).
    pub level: String,
    /// Output format: "pretty", "compact", or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl PortScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl VulnScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl WebScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl SubdomainScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SENTINELLE").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scan.max_targets == 0 {
            return Err(ValidationError::new("scan.max_targets must be > 0"));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ValidationError::new(
                "server.request_timeout_seconds must be > 0",
            ));
        }
        if self.scanners.port_scan.timing_template > 5 {
            return Err(ValidationError::new(
                "scanners.port_scan.timing_template must be 0-5",
            ));
        }
        for (name, timeout) in [
            ("port_scan", self.scanners.port_scan.timeout_seconds),
            ("vuln_scan", self.scanners.vuln_scan.timeout_seconds),
            ("web_scan", self.scanners.web_scan.timeout_seconds),
            ("subdomain_scan", self.scanners.subdomain_scan.timeout_seconds),
        ] {
            if timeout == 0 {
                return Err(ValidationError::new(format!(
                    "scanners.{}.timeout_seconds must be > 0",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Error raised when configuration values are inconsistent
#[derive(Debug, thiserror::Error)]
#[error("Configuration validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
