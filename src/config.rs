//! Fetch configuration.
//!
//! `FetchConfig` controls how [`fetch_with`](crate::net::fetch_with) talks to
//! the network: the user agent sent with each request, how many redirects are
//! followed before giving up, an optional overall request timeout and whether
//! proxies from the environment are used.
//!
//! `FetchConfig` provides sensible defaults via [`Default`] and a fluent
//! [`FetchConfig::builder()`] for customization with validation.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use gosub_fetch::config::FetchConfig;
//! let cfg = FetchConfig::default();
//! assert_eq!(cfg.max_redirects, 20);
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use gosub_fetch::config::FetchConfig;
//! use std::time::Duration;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = FetchConfig::builder()
//!     .user_agent("Gosub/0.1")
//!     .max_redirects(5)
//!     .timeout(Duration::from_secs(10))
//!     .build()?; // returns Result<FetchConfig, FetchConfigError>
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Builder validation returns [`FetchConfigError`] for an empty user agent or
//! a zero timeout.

use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Gosub/1.0 (X11; Linux x86_64) Gecko/20250802 GosubBrowser/1.0";

/// Browsers stop following after 20 hops, so do we.
pub const DEFAULT_MAX_REDIRECTS: usize = 20;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Maximum number of redirects to follow. `0` disables following.
    pub max_redirects: usize,
    /// Overall request timeout, `None` waits forever
    pub timeout: Option<Duration>,
    /// Honor `HTTP_PROXY` / `HTTPS_PROXY` from the environment
    pub use_system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: None,
            use_system_proxy: true,
        }
    }
}

impl FetchConfig {
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }
}

/// Builder for [`FetchConfig`].
#[derive(Debug, Clone, Default)]
pub struct FetchConfigBuilder {
    inner: FetchConfig,
}

impl FetchConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut FetchConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|c| c.user_agent = ua.into()) }
    pub fn max_redirects(self, n: usize) -> Self { self.map(|c| c.max_redirects = n) }
    pub fn timeout(self, timeout: Duration) -> Self { self.map(|c| c.timeout = Some(timeout)) }
    pub fn use_system_proxy(self, on: bool) -> Self { self.map(|c| c.use_system_proxy = on) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut FetchConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<FetchConfig, FetchConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchConfigError {
    #[error("user_agent must not be empty")]
    EmptyUserAgent,
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

fn validate(c: &FetchConfig) -> Result<(), FetchConfigError> {
    if c.user_agent.trim().is_empty() {
        return Err(FetchConfigError::EmptyUserAgent);
    }
    if c.timeout == Some(Duration::ZERO) {
        return Err(FetchConfigError::ZeroTimeout);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = FetchConfig::builder().build().unwrap();
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert!(cfg.timeout.is_none());
        assert!(cfg.use_system_proxy);
    }

    #[test]
    fn builder_applies_changes() {
        let cfg = FetchConfig::builder()
            .user_agent("test-agent")
            .max_redirects(0)
            .use_system_proxy(false)
            .with(|c| c.timeout = Some(Duration::from_millis(250)))
            .build()
            .unwrap();

        assert_eq!(cfg.user_agent, "test-agent");
        assert_eq!(cfg.max_redirects, 0);
        assert!(!cfg.use_system_proxy);
        assert_eq!(cfg.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn builder_rejects_invalid_values() {
        let err = FetchConfig::builder().user_agent("  ").build().unwrap_err();
        assert_eq!(err, FetchConfigError::EmptyUserAgent);

        let err = FetchConfig::builder().timeout(Duration::ZERO).build().unwrap_err();
        assert_eq!(err, FetchConfigError::ZeroTimeout);
    }
}
