//! External scanner adapters
//!
//! One adapter per external tool, all sharing the [`CommandRunner`] seam
//! for process invocation. Adapters are total: every outcome, including a
//! tool failure, a timeout, or a spawn fault, is returned as a descriptive
//! string so the pipeline never has to handle a stage error.

mod command;
mod port_scan;
mod subdomains;
mod vuln_scan;
mod web_scan;

pub use command::{CommandError, CommandOutput, CommandRunner, TokioCommandRunner};
pub use port_scan::PortScanner;
pub use subdomains::SubdomainScanner;
pub use vuln_scan::VulnScanner;
pub use web_scan::WebScanner;
