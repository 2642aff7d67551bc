//! Wiki-wide commands.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Args;

use dokuwiki_xmlrpc::{PagelistOptions, Value, WikiClient};

use crate::output::{self, Shape};

#[derive(Args, Debug)]
pub struct PagelistArgs {
    /// Namespace to list (e.g. wiki)
    pub namespace: String,

    /// Recursion depth; 0 lists everything
    #[arg(long, default_value_t = 0)]
    pub depth: i64,

    /// Include an MD5 hash of each page's content
    #[arg(long)]
    pub hash: bool,

    /// List pages regardless of ACLs (requires admin rights)
    #[arg(long)]
    pub skip_acl: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,
}

#[derive(Args, Debug)]
pub struct ChangesArgs {
    /// UNIX timestamp to list changes from; defaults to 24 hours ago
    #[arg(long)]
    pub time: Option<i64>,

    /// List media file changes instead of page changes
    #[arg(long)]
    pub media: bool,
}

pub fn all_pages(wiki: &WikiClient, json: bool) -> Result<()> {
    let pages = wiki.all_pages().context("Failed to list pages")?;
    output::render(&pages, Shape::List, json)
}

pub fn pagelist(wiki: &WikiClient, args: PagelistArgs, json: bool) -> Result<()> {
    let options = PagelistOptions {
        depth: args.depth,
        hash: args.hash,
        skip_acl: args.skip_acl,
    };
    let pages = wiki
        .pagelist(&args.namespace, options)
        .context("Failed to list namespace")?;
    output::render(&pages, Shape::Dict, json)
}

pub fn search(wiki: &WikiClient, args: SearchArgs, json: bool) -> Result<()> {
    let hits = wiki.search(&args.query).context("Search failed")?;
    output::render(&hits, Shape::Dict, json)
}

pub fn changes(wiki: &WikiClient, args: ChangesArgs, json: bool) -> Result<()> {
    let since = args
        .time
        .unwrap_or_else(|| (Utc::now() - Duration::days(1)).timestamp());

    let changes = if args.media {
        wiki.recent_media_changes(since)
    } else {
        wiki.recent_changes(since)
    }
    .context("Failed to list recent changes")?;

    output::render(&changes, Shape::Dict, json)
}

pub fn version(wiki: &WikiClient, json: bool) -> Result<()> {
    let dokuwiki = wiki
        .dokuwiki_version()
        .context("Failed to get DokuWiki version")?;
    let api = wiki
        .rpc_version_supported()
        .context("Failed to get XML-RPC API version")?;

    if json {
        let summary = Value::structure([("dokuwiki", dokuwiki), ("xmlrpc", api)]);
        return output::json_pretty(&summary);
    }

    output::field("DokuWiki", &output::scalar(&dokuwiki));
    output::field("XML-RPC API", &output::scalar(&api));
    output::field("Wiki", &wiki.session().wiki().to_string());
    Ok(())
}
