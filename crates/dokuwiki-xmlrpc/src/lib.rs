//! dokuwiki-xmlrpc - DokuWiki XML-RPC client
//!
//! This library talks to the XML-RPC interface of a DokuWiki instance. A
//! [`WikiClient`] is constructed once per wiki; construction probes the wiki,
//! builds the authenticated RPC endpoint and keeps the connection handle for
//! every following call. Each method maps to exactly one remote procedure and
//! returns the decoded result as-is.
//!
//! # Example
//!
//! ```no_run
//! use dokuwiki_xmlrpc::{AuthMode, ClientConfig, Credentials, WikiClient};
//!
//! # fn example() -> Result<(), dokuwiki_xmlrpc::Error> {
//! let config = ClientConfig::new("https://wiki.example.org", Credentials::new("alice", "secret"))
//!     .auth_mode(AuthMode::Basic);
//! let wiki = WikiClient::connect(config)?;
//!
//! let text = wiki.page("start", None)?;
//! println!("{}", text.as_str().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod procedures;
pub mod session;
pub mod types;
pub mod xmlrpc;

// Re-export primary types at crate root for convenience
pub use auth::{AuthMode, Credentials, Endpoint};
pub use client::WikiClient;
pub use config::{ClientConfig, TlsOptions};
pub use error::{DecodeError, EncodeError, Error, Fault, ProtocolError};
pub use procedures::{EditOptions, ListFilesOptions, Locks, PagelistOptions};
pub use session::Session;
pub use types::WikiUrl;
pub use xmlrpc::Value;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
