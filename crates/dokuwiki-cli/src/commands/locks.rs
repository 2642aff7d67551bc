//! Page lock commands.

use anyhow::{Context, Result, bail};
use clap::Args;

use dokuwiki_xmlrpc::{Locks, WikiClient};

use crate::output::{self, Shape};

#[derive(Args, Debug)]
pub struct LockArgs {
    /// Page to lock (repeatable)
    #[arg(long, value_name = "PAGE")]
    pub lock: Vec<String>,

    /// Page to unlock (repeatable)
    #[arg(long, value_name = "PAGE")]
    pub unlock: Vec<String>,
}

pub fn run(wiki: &WikiClient, args: LockArgs, json: bool) -> Result<()> {
    if args.lock.is_empty() && args.unlock.is_empty() {
        bail!("Nothing to do: pass --lock or --unlock");
    }

    let locks = Locks {
        lock: args.lock,
        unlock: args.unlock,
    };
    let outcome = wiki.set_locks(locks).context("Failed to set locks")?;
    output::render(&outcome, Shape::Dict, json)
}
