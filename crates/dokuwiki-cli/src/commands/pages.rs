//! Page commands.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dokuwiki_xmlrpc::{EditOptions, WikiClient};

use crate::output::{self, Shape};

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page id (e.g. wiki:syntax)
    pub page: String,

    /// Revision timestamp; defaults to the current version
    #[arg(long)]
    pub time: Option<i64>,
}

#[derive(Args, Debug)]
pub struct PageIdArgs {
    /// Page id (e.g. wiki:syntax)
    pub page: String,
}

#[derive(Args, Debug)]
pub struct RevisionsArgs {
    /// Page id (e.g. wiki:syntax)
    pub page: String,

    /// Skip this many of the newest revisions
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
}

#[derive(Args, Debug)]
pub struct AppendArgs {
    /// Page id (e.g. wiki:syntax)
    pub page: String,

    /// Text to append
    pub text: String,

    #[command(flatten)]
    pub edit: EditArgs,
}

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Page id (e.g. wiki:syntax)
    pub page: String,

    /// Read the new page text from this file instead of stdin
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub edit: EditArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Edit summary
    #[arg(long, default_value = "")]
    pub summary: String,

    /// Mark as a minor edit
    #[arg(long)]
    pub minor: bool,
}

impl From<EditArgs> for EditOptions {
    fn from(args: EditArgs) -> Self {
        EditOptions::new(args.summary).minor(args.minor)
    }
}

pub fn raw(wiki: &WikiClient, args: PageArgs, json: bool) -> Result<()> {
    let text = wiki
        .page(&args.page, args.time)
        .context("Failed to get page")?;
    output::render(&text, Shape::Plain, json)
}

pub fn html(wiki: &WikiClient, args: PageArgs, json: bool) -> Result<()> {
    let html = wiki
        .page_html(&args.page, args.time)
        .context("Failed to get page HTML")?;
    output::render(&html, Shape::Plain, json)
}

pub fn info(wiki: &WikiClient, args: PageArgs, json: bool) -> Result<()> {
    let info = wiki
        .page_info(&args.page, args.time)
        .context("Failed to get page info")?;
    output::render(&info, Shape::Dict, json)
}

pub fn revisions(wiki: &WikiClient, args: RevisionsArgs, json: bool) -> Result<()> {
    let versions = wiki
        .page_versions(&args.page, args.offset)
        .context("Failed to list revisions")?;
    output::render(&versions, Shape::Dict, json)
}

pub fn backlinks(wiki: &WikiClient, args: PageIdArgs, json: bool) -> Result<()> {
    let pages = wiki
        .backlinks(&args.page)
        .context("Failed to list backlinks")?;
    output::render(&pages, Shape::List, json)
}

pub fn links(wiki: &WikiClient, args: PageIdArgs, json: bool) -> Result<()> {
    let links = wiki.links(&args.page).context("Failed to list links")?;
    output::render(&links, Shape::Dict, json)
}

pub fn acl(wiki: &WikiClient, args: PageIdArgs, json: bool) -> Result<()> {
    let level = wiki
        .acl_check(&args.page)
        .context("Failed to check permissions")?;
    output::render(&level, Shape::Plain, json)
}

pub fn append(wiki: &WikiClient, args: AppendArgs) -> Result<()> {
    wiki.append_page(&args.page, &args.text, args.edit.into())
        .context("Failed to append to page")?;
    output::success(&format!("Appended to {}", args.page));
    Ok(())
}

pub fn put(wiki: &WikiClient, args: PutArgs) -> Result<()> {
    let text = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read page text from stdin")?;
            text
        }
    };

    wiki.put_page(&args.page, &text, args.edit.into())
        .context("Failed to save page")?;
    output::success(&format!("Saved {}", args.page));
    Ok(())
}
