//! Core wiki addressing types.

mod wiki_url;

pub use wiki_url::{RPC_ENTRY_PATH, WikiUrl};
