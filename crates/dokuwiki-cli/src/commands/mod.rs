//! Subcommand implementations.
//!
//! Every subcommand makes exactly one or two facade calls on an already
//! connected [`WikiClient`] and renders the result.

mod files;
mod locks;
mod pages;
mod site;

use anyhow::Result;
use clap::Subcommand;

use dokuwiki_xmlrpc::WikiClient;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the raw wiki text of a page
    Raw(pages::PageArgs),

    /// Print the rendered HTML body of a page
    Html(pages::PageArgs),

    /// Show information about a page
    Info(pages::PageArgs),

    /// List the revisions of a page
    Revisions(pages::RevisionsArgs),

    /// List pages that link back to a page
    Backlinks(pages::PageIdArgs),

    /// List the links contained in a page
    Links(pages::PageIdArgs),

    /// Show your permission level on a page
    Acl(pages::PageIdArgs),

    /// Append text to a page
    Append(pages::AppendArgs),

    /// Replace the text of a page
    Put(pages::PutArgs),

    /// List all pages of the wiki
    Allpages,

    /// List the pages of a namespace
    Pagelist(site::PagelistArgs),

    /// Full-text search
    Search(site::SearchArgs),

    /// List recent changes
    Changes(site::ChangesArgs),

    /// Show the wiki's DokuWiki and XML-RPC API versions
    Version,

    /// Media file operations
    #[command(subcommand)]
    File(files::FileCommand),

    /// Lock and unlock pages
    Lock(locks::LockArgs),
}

/// Dispatch one subcommand against `wiki`.
pub fn run(wiki: &WikiClient, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Raw(args) => pages::raw(wiki, args, json),
        Commands::Html(args) => pages::html(wiki, args, json),
        Commands::Info(args) => pages::info(wiki, args, json),
        Commands::Revisions(args) => pages::revisions(wiki, args, json),
        Commands::Backlinks(args) => pages::backlinks(wiki, args, json),
        Commands::Links(args) => pages::links(wiki, args, json),
        Commands::Acl(args) => pages::acl(wiki, args, json),
        Commands::Append(args) => pages::append(wiki, args),
        Commands::Put(args) => pages::put(wiki, args),
        Commands::Allpages => site::all_pages(wiki, json),
        Commands::Pagelist(args) => site::pagelist(wiki, args, json),
        Commands::Search(args) => site::search(wiki, args, json),
        Commands::Changes(args) => site::changes(wiki, args, json),
        Commands::Version => site::version(wiki, json),
        Commands::File(cmd) => files::run(wiki, cmd, json),
        Commands::Lock(args) => locks::run(wiki, args, json),
    }
}
