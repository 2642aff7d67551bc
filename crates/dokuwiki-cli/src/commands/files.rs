//! Media file commands.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use dokuwiki_xmlrpc::{ListFilesOptions, WikiClient};

use crate::output::{self, Shape};

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// Download a media file
    Get {
        /// Media id (e.g. wiki:logo.png)
        id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a media file
    Put {
        /// Media id (e.g. wiki:logo.png)
        id: String,

        /// Local file to upload
        path: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,
    },

    /// Delete a media file
    Delete {
        /// Media id (e.g. wiki:logo.png)
        id: String,
    },

    /// Show size and modification time of a media file
    Info {
        /// Media id (e.g. wiki:logo.png)
        id: String,
    },

    /// List the media files of a namespace
    List {
        /// Namespace to list (e.g. wiki)
        namespace: String,

        /// Include sub-namespaces
        #[arg(long)]
        recursive: bool,

        /// Only list files matching this regular expression
        #[arg(long)]
        pattern: Option<String>,
    },
}

pub fn run(wiki: &WikiClient, cmd: FileCommand, json: bool) -> Result<()> {
    match cmd {
        FileCommand::Get { id, output } => get(wiki, &id, output),
        FileCommand::Put {
            id,
            path,
            overwrite,
        } => put(wiki, &id, &path, overwrite, json),
        FileCommand::Delete { id } => {
            wiki.delete_file(&id).context("Failed to delete file")?;
            output::success(&format!("Deleted {id}"));
            Ok(())
        }
        FileCommand::Info { id } => {
            let info = wiki.file_info(&id).context("Failed to get file info")?;
            output::render(&info, Shape::Dict, json)
        }
        FileCommand::List {
            namespace,
            recursive,
            pattern,
        } => {
            let options = ListFilesOptions { recursive, pattern };
            let files = wiki
                .list_files(&namespace, options)
                .context("Failed to list files")?;
            output::render(&files, Shape::Dict, json)
        }
    }
}

fn get(wiki: &WikiClient, id: &str, dest: Option<PathBuf>) -> Result<()> {
    let data = wiki.get_file(id).context("Failed to download file")?;

    match dest {
        Some(path) => {
            fs::write(&path, &data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!("Saved {} bytes to {}", data.len(), path.display()));
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&data)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn put(wiki: &WikiClient, id: &str, path: &Path, overwrite: bool, json: bool) -> Result<()> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let stored = wiki
        .put_file(id, &data, overwrite)
        .context("Failed to upload file")?;

    if json {
        return output::json_pretty(&stored);
    }
    output::success(&format!("Uploaded {} bytes as {}", data.len(), output::scalar(&stored)));
    Ok(())
}
