//! Wiki base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// Path, relative to the wiki base URL, where DokuWiki serves XML-RPC.
pub const RPC_ENTRY_PATH: &str = "/lib/exe/xmlrpc.php";

/// A validated wiki base URL.
///
/// The URL must be absolute, use `http` or `https` and carry a host. A
/// trailing slash is removed so the RPC entry path can be appended directly.
/// Wikis installed below a path (`https://example.org/wiki`) keep that path.
///
/// # Example
///
/// ```
/// use dokuwiki_xmlrpc::WikiUrl;
///
/// let wiki = WikiUrl::new("https://wiki.example.org/").unwrap();
/// assert_eq!(wiki.rpc_url(), "https://wiki.example.org/lib/exe/xmlrpc.php");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WikiUrl(Url);

impl WikiUrl {
    /// Create a new wiki URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`] naming the input if it is not a usable
    /// wiki URL.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| Error::connectivity(s, e))?;

        Self::validate(&url, s)?;

        url.set_query(None);
        url.set_fragment(None);
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self(url))
    }

    /// Returns the unauthenticated XML-RPC entry URL.
    pub fn rpc_url(&self) -> String {
        format!("{}{}", self.base(), RPC_ENTRY_PATH)
    }

    /// Returns the base URL without a trailing slash.
    pub fn base(&self) -> &str {
        // The URL crate always renders a root path as "/"
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(Error::connectivity(original, "must be an absolute URL"));
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::connectivity(original, "scheme must be http or https"));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(Error::connectivity(original, "must have a host"));
        }

        if !url.username().is_empty() || url.password().is_some() {
            return Err(Error::connectivity(
                original,
                "credentials belong in the client configuration, not the URL",
            ));
        }

        Ok(())
    }
}

impl fmt::Display for WikiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base())
    }
}

impl FromStr for WikiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for WikiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.base())
    }
}

impl<'de> Deserialize<'de> for WikiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WikiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for WikiUrl {
    fn as_ref(&self) -> &str {
        self.base()
    }
}
