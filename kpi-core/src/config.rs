//! Loader configuration: where the portal API lives and how to call it.

use std::time::Duration;

use crate::error::{PortalError, Result};

/// Default endpoint for detailed result records.
pub const DEFAULT_RESULTS_PATH: &str = "results/detailed";
/// Default endpoint for indicator definitions.
pub const DEFAULT_INDICATORS_PATH: &str = "indicators";
/// Default endpoint for headquarters.
pub const DEFAULT_HEADQUARTERS_PATH: &str = "headquarters";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    /// API root, e.g. `https://portal.example.org/api`
    pub base_url: String,
    pub results_path: String,
    pub indicators_path: String,
    pub headquarters_path: String,
    /// Bearer token sent with every request when present
    pub token: Option<String>,
    pub timeout: Duration,
}

impl PortalConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            results_path: DEFAULT_RESULTS_PATH.to_string(),
            indicators_path: DEFAULT_INDICATORS_PATH.to_string(),
            headquarters_path: DEFAULT_HEADQUARTERS_PATH.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the base URL scheme and the timeout.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(PortalError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(PortalError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Join an endpoint path onto the base URL with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim().trim_start_matches('/')
        )
    }
}
