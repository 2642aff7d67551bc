//! CLI argument definitions.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing::debug;

use dokuwiki_xmlrpc::{ClientConfig, Credentials, TlsOptions, WikiClient};

use crate::commands::Commands;

/// Command-line client for the DokuWiki XML-RPC interface.
#[derive(Parser, Debug)]
#[command(name = "dokuwiki")]
#[command(author, version = env!("DOKUWIKI_CLI_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub wiki: WikiArgs,

    /// Print results as JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings for the remote wiki.
#[derive(Args, Debug)]
pub struct WikiArgs {
    /// Base URL of the remote wiki
    #[arg(short, long, env = "DOKUWIKI_URL")]
    pub wiki: String,

    /// Username to authenticate with
    #[arg(short, long, env = "DOKUWIKI_USER")]
    pub user: String,

    /// Password to authenticate with
    #[arg(short, long, env = "DOKUWIKI_PASSWD", hide_env_values = true)]
    pub passwd: String,

    /// Use HTTP basic authentication instead of query parameters
    #[arg(long)]
    pub http_basic_auth: bool,

    /// Seconds to wait for the wiki to answer the initial probe
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub timeout: u64,

    /// Additional trusted root certificate (PEM)
    #[arg(long, value_name = "FILE")]
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,
}

impl WikiArgs {
    /// Build the client configuration from the command line.
    pub fn config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::new(&self.wiki, Credentials::new(&self.user, &self.passwd))
            .http_basic_auth(self.http_basic_auth)
            .timeout(Duration::from_secs(self.timeout));

        if self.ca_cert.is_some() || self.insecure {
            let mut tls = TlsOptions::new().accept_invalid_certs(self.insecure);
            if let Some(path) = &self.ca_cert {
                let pem = fs::read(path)
                    .with_context(|| format!("Failed to read certificate {}", path.display()))?;
                tls = tls.add_root_certificate_pem(pem);
            }
            config = config.tls(tls);
        }

        Ok(config)
    }

    /// Open a session to the wiki.
    pub fn connect(&self) -> Result<WikiClient> {
        let config = self.config()?;
        debug!(?config, "Connecting");
        Ok(WikiClient::connect(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dokuwiki_xmlrpc::AuthMode;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_connection_flags() {
        let cli = Cli::try_parse_from([
            "dokuwiki",
            "-w",
            "https://wiki.example.org",
            "-u",
            "alice",
            "-p",
            "secret",
            "--http-basic-auth",
            "--timeout",
            "3",
            "raw",
            "start",
        ])
        .unwrap();

        let config = cli.wiki.config().unwrap();
        assert_eq!(config.url(), "https://wiki.example.org");
        assert_eq!(config.credentials().username(), "alice");
        assert_eq!(config.selected_auth_mode(), AuthMode::Basic);
        assert_eq!(config.probe_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn missing_certificate_file_is_reported() {
        let args = WikiArgs {
            wiki: "https://wiki.example.org".into(),
            user: "alice".into(),
            passwd: "secret".into(),
            http_basic_auth: false,
            timeout: 10,
            ca_cert: Some(PathBuf::from("/nonexistent/ca.pem")),
            insecure: false,
        };
        let err = args.config().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ca.pem"));
    }
}
