//! Scan target normalization
//!
//! External tools disagree about what a "target" looks like: the port and
//! web scanners want a bare host, the vulnerability scanner wants a URL,
//! and enumeration wants the registrable domain. [`ScanTarget`] captures
//! the normalized form once so every adapter derives its own shape from it.

/// A normalized scan target: scheme prefix and trailing slashes stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget(String);

impl ScanTarget {
    /// Normalize a raw client-supplied target string.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .unwrap_or(trimmed);
        Self(host.to_string())
    }

    /// The normalized target, possibly including a path component.
    pub fn host(&self) -> &str {
        &self.0
    }

    /// The bare domain: everything before the first path separator.
    pub fn domain(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }

    /// The target as a URL, defaulting to the secure scheme.
    pub fn web_url(&self) -> String {
        format!("https://{}", self.0)
    }
}

impl std::fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_trailing_slash() {
        assert_eq!(ScanTarget::new("https://example.com/").host(), "example.com");
        assert_eq!(ScanTarget::new("http://example.com").host(), "example.com");
        assert_eq!(ScanTarget::new("  example.com  ").host(), "example.com");
    }

    #[test]
    fn keeps_path_in_host_but_not_in_domain() {
        let target = ScanTarget::new("https://example.com/app/login");
        assert_eq!(target.host(), "example.com/app/login");
        assert_eq!(target.domain(), "example.com");
    }

    #[test]
    fn web_url_prefers_https() {
        assert_eq!(
            ScanTarget::new("example.com").web_url(),
            "https://example.com"
        );
        assert_eq!(
            ScanTarget::new("http://example.com/").web_url(),
            "https://example.com"
        );
    }
}
