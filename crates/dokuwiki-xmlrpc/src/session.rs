//! Session initialisation and the shared call dispatch.

use std::error::Error as _;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument, trace};

use crate::auth::{AuthMode, Endpoint};
use crate::config::{ClientConfig, TlsOptions};
use crate::error::{Error, ProtocolError};
use crate::types::WikiUrl;
use crate::xmlrpc::{self, Response, Value};
use crate::Result;

/// User-Agent sent with every request of every session.
pub const USER_AGENT: &str = concat!(
    "dokuwiki-xmlrpc/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// An established connection to one wiki's XML-RPC endpoint.
///
/// A session is created once by [`Session::connect`] and is immutable
/// afterwards. It is meant for sequential use by a single caller: every
/// [`Session::call`] is one blocking HTTP round trip.
#[derive(Debug)]
pub struct Session {
    wiki: WikiUrl,
    endpoint: Endpoint,
    username: String,
    timeout: Duration,
    tls: Option<TlsOptions>,
    http: Client,
}

impl Session {
    /// Probe the wiki and build the authenticated connection handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`] if the URL is invalid, the HTTP client
    /// cannot be configured, or the RPC entry path is unreachable within the
    /// configured timeout.
    #[instrument(skip(config), fields(url = %config.url(), mode = ?config.selected_auth_mode()))]
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let wiki = WikiUrl::new(config.url())?;
        let http = build_http_client(config.tls_options())
            .map_err(|e| Error::connectivity(wiki.base(), describe(&e)))?;

        probe(&http, &wiki, config.probe_timeout())?;

        let endpoint = Endpoint::new(
            &wiki,
            config.credentials(),
            config.selected_auth_mode(),
        )?;

        info!(endpoint = %endpoint, "Session established");

        Ok(Self {
            wiki,
            endpoint,
            username: config.credentials().username().to_string(),
            timeout: config.probe_timeout(),
            tls: config.tls_options().cloned(),
            http,
        })
    }

    /// Invoke `procedure` with positional `params` and return the decoded result.
    ///
    /// This is the only place responses are classified: transport failures
    /// while sending or reading the body become [`Error::Connectivity`],
    /// non-2xx statuses (redirects included) [`Error::Protocol`],
    /// undecodable bodies [`Error::Decode`] and remote faults
    /// [`Error::Application`]. Parameters with no XML-RPC form fail with
    /// [`Error::Encode`] before any request is made.
    #[instrument(skip(self, params), fields(endpoint = %self.endpoint))]
    pub fn call(&self, procedure: &str, params: &[Value]) -> Result<Value> {
        debug!(procedure, params = params.len(), "XML-RPC call");

        let body = xmlrpc::method_call(procedure, params)?;
        let mut request = self
            .http
            .post(self.endpoint.request_url())
            .header(CONTENT_TYPE, "text/xml")
            .body(body);
        if let Some(credentials) = self.endpoint.basic_auth() {
            request = request.basic_auth(credentials.username(), Some(credentials.password()));
        }

        let response = request
            .send()
            .map_err(|e| Error::connectivity(self.endpoint.redacted(), describe(&e)))?;

        let status = response.status();
        trace!(status = %status, "XML-RPC response");

        if !status.is_success() {
            return Err(ProtocolError::new(
                self.endpoint.redacted(),
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            )
            .into());
        }

        let text = response
            .text()
            .map_err(|e| Error::connectivity(self.endpoint.redacted(), describe(&e)))?;

        match xmlrpc::parse_response(&text)? {
            Response::Success(value) => Ok(value),
            Response::Fault(fault) => Err(fault.into()),
        }
    }

    /// Returns the wiki base URL.
    pub fn wiki(&self) -> &WikiUrl {
        &self.wiki
    }

    /// Returns the authenticated endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.endpoint.mode()
    }

    /// Returns the probe timeout the session was opened with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn tls(&self) -> Option<&TlsOptions> {
        self.tls.as_ref()
    }
}

fn build_http_client(tls: Option<&TlsOptions>) -> reqwest::Result<Client> {
    // A redirected POST comes back as a GET without the call body
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::none());

    if let Some(tls) = tls {
        for pem in tls.root_certificates() {
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(pem)?);
        }
        builder = builder.danger_accept_invalid_certs(tls.accepts_invalid_certs());
    }

    builder.build()
}

/// Fail fast if the RPC entry path cannot be reached at all.
///
/// The status code is not inspected: DokuWiki answers GET requests on the
/// entry path with a plain-text notice.
fn probe(http: &Client, wiki: &WikiUrl, timeout: Duration) -> Result<()> {
    let url = wiki.rpc_url();
    debug!(%url, ?timeout, "Probing wiki");

    let response = http
        .get(&url)
        .timeout(timeout)
        .send()
        .map_err(|e| Error::connectivity(wiki.base(), describe(&e)))?;

    trace!(status = %response.status(), "Probe response");
    Ok(())
}

/// Render a reqwest error and its causes without the request URL, which may
/// carry credentials.
fn describe(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else if err.is_builder() {
        "invalid client configuration".to_string()
    } else {
        "request failed".to_string()
    };

    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_product_version_and_project() {
        assert!(USER_AGENT.starts_with("dokuwiki-xmlrpc/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
        assert!(USER_AGENT.ends_with(concat!("(", env!("CARGO_PKG_REPOSITORY"), ")")));
    }
}
