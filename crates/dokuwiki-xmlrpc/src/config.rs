//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::auth::{AuthMode, Credentials};

/// Timeout applied to the reachability probe when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to open a [`Session`](crate::Session).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dokuwiki_xmlrpc::{AuthMode, ClientConfig, Credentials};
///
/// let config = ClientConfig::new("https://wiki.example.org", Credentials::new("alice", "secret"))
///     .auth_mode(AuthMode::Basic)
///     .timeout(Duration::from_secs(5));
/// assert_eq!(config.url(), "https://wiki.example.org");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    url: String,
    credentials: Credentials,
    auth_mode: AuthMode,
    timeout: Duration,
    tls: Option<TlsOptions>,
}

impl ClientConfig {
    /// Configuration for the wiki at `url` with query-parameter authentication
    /// and the default probe timeout.
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
            auth_mode: AuthMode::default(),
            timeout: DEFAULT_TIMEOUT,
            tls: None,
        }
    }

    /// Select how credentials are sent.
    pub fn auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth_mode = mode;
        self
    }

    /// Shorthand for choosing [`AuthMode::Basic`] from a flag.
    pub fn http_basic_auth(self, enabled: bool) -> Self {
        self.auth_mode(if enabled { AuthMode::Basic } else { AuthMode::Query })
    }

    /// Timeout for the reachability probe.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Transport-security settings for HTTPS wikis.
    pub fn tls(mut self, tls: TlsOptions) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn selected_auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn probe_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn tls_options(&self) -> Option<&TlsOptions> {
        self.tls.as_ref()
    }
}

/// Transport-security context for the HTTP connection.
#[derive(Clone, Default)]
pub struct TlsOptions {
    root_certificates: Vec<Vec<u8>>,
    accept_invalid_certs: bool,
}

impl TlsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust an additional root certificate, PEM encoded.
    pub fn add_root_certificate_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.root_certificates.push(pem.into());
        self
    }

    /// Skip certificate verification entirely.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub(crate) fn root_certificates(&self) -> &[Vec<u8>] {
        &self.root_certificates
    }

    pub(crate) fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

impl fmt::Debug for TlsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsOptions")
            .field("root_certificates", &self.root_certificates.len())
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("https://wiki.example.org", Credentials::new("a", "b"));
        assert_eq!(config.selected_auth_mode(), AuthMode::Query);
        assert_eq!(config.probe_timeout(), Duration::from_secs(10));
        assert!(config.tls_options().is_none());
    }

    #[test]
    fn basic_auth_flag() {
        let config = ClientConfig::new("https://wiki.example.org", Credentials::new("a", "b"))
            .http_basic_auth(true);
        assert_eq!(config.selected_auth_mode(), AuthMode::Basic);
        assert_eq!(config.http_basic_auth(false).selected_auth_mode(), AuthMode::Query);
    }
}
