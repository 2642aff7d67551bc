//! Authentication types.
//!
//! DokuWiki accepts credentials either as `u`/`p` query parameters on the
//! RPC entry URL or as HTTP basic authentication. [`Endpoint`] turns a
//! [`WikiUrl`](crate::WikiUrl) and [`Credentials`] into the address every
//! call of a session is sent to.

mod credentials;
mod endpoint;

pub use credentials::Credentials;
pub use endpoint::{AuthMode, Endpoint};
