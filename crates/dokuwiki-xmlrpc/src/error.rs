//! Error types for the dokuwiki-xmlrpc library.
//!
//! Failures of a call are one of four flat variants: the wiki could not be
//! reached, the wiki answered with an XML-RPC fault, the HTTP exchange failed
//! at the protocol level, or the response body was not a well-formed
//! XML-RPC reply. A fifth variant rejects parameters before anything is sent.

use std::fmt;
use thiserror::Error;

/// The unified error type for dokuwiki-xmlrpc operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The wiki URL is invalid or the host could not be reached.
    #[error("could not connect to <{url}>: {reason}")]
    Connectivity { url: String, reason: String },

    /// The wiki processed the call and reported a fault.
    #[error("remote fault {0}")]
    Application(#[from] Fault),

    /// The HTTP exchange failed (unexpected status code).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The response could not be decoded as an XML-RPC reply.
    #[error(
        "failed to parse response, is the DokuWiki XML-RPC interface enabled? ({0})"
    )]
    Decode(#[from] DecodeError),

    /// A parameter has no XML-RPC representation; nothing was sent.
    #[error("invalid parameter: {0}")]
    Encode(#[from] EncodeError),
}

impl Error {
    pub(crate) fn connectivity(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Error::Connectivity {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the remote fault, if this is an application error.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Error::Application(fault) => Some(fault),
            _ => None,
        }
    }
}

/// A fault reported by the remote wiki inside a well-formed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Remote fault code.
    pub code: i64,
    /// Remote fault message.
    pub message: String,
}

impl Fault {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.code, self.message)
    }
}

impl std::error::Error for Fault {}

/// HTTP-level failure of an XML-RPC exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    /// Endpoint URL with credentials removed.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase.
    pub reason: String,
}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.reason.is_empty() {
            write!(f, " '{}'", self.reason)?;
        }
        write!(f, " at {}", self.url)
    }
}

impl std::error::Error for ProtocolError {}

/// The response body was not a well-formed XML-RPC reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the decoder's description of what went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A request parameter cannot be written as XML-RPC.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_display_carries_code_and_message() {
        let err = Error::from(Fault::new(121, "Unknown page"));
        assert_eq!(err.to_string(), "remote fault 121: 'Unknown page'");
        assert_eq!(err.fault().map(|f| f.code), Some(121));
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::new("https://wiki.example.org/lib/exe/xmlrpc.php", 500, "Internal Server Error");
        assert_eq!(
            err.to_string(),
            "HTTP 500 'Internal Server Error' at https://wiki.example.org/lib/exe/xmlrpc.php"
        );
    }

    #[test]
    fn decode_error_mentions_disabled_interface() {
        let err = Error::from(DecodeError::new("expected <methodResponse>"));
        assert!(err.to_string().contains("XML-RPC interface enabled"));
    }
}
