//! XML-RPC wire format.
//!
//! This module provides the value model and the request/response codec.
//! HTTP transport lives in [`crate::session`].

mod decode;
mod encode;
mod value;

pub use decode::{Response, parse_response};
pub use encode::method_call;
pub use value::Value;
