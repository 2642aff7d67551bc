//! Remote procedure names and option structures.
//!
//! Procedure names are part of DokuWiki's public API and must match the
//! server verbatim.

use crate::xmlrpc::Value;

// ============================================================================
// Procedure Names
// ============================================================================

pub const GET_VERSION: &str = "dokuwiki.getVersion";
pub const GET_RPC_VERSION_SUPPORTED: &str = "wiki.getRPCVersionSupported";
pub const GET_TITLE: &str = "dokuwiki.getTitle";
pub const GET_TIME: &str = "dokuwiki.getTime";

pub const GET_PAGE: &str = "wiki.getPage";
pub const GET_PAGE_VERSION: &str = "wiki.getPageVersion";
pub const GET_PAGE_VERSIONS: &str = "wiki.getPageVersions";
pub const GET_PAGE_INFO: &str = "wiki.getPageInfo";
pub const GET_PAGE_INFO_VERSION: &str = "wiki.getPageInfoVersion";
pub const GET_PAGE_HTML: &str = "wiki.getPageHTML";
pub const GET_PAGE_HTML_VERSION: &str = "wiki.getPageHTMLVersion";
pub const PUT_PAGE: &str = "wiki.putPage";
pub const APPEND_PAGE: &str = "dokuwiki.appendPage";

pub const GET_PAGELIST: &str = "dokuwiki.getPagelist";
pub const GET_ALL_PAGES: &str = "wiki.getAllPages";
pub const SEARCH: &str = "dokuwiki.search";
pub const GET_BACK_LINKS: &str = "wiki.getBackLinks";
pub const LIST_LINKS: &str = "wiki.listLinks";
pub const GET_RECENT_CHANGES: &str = "wiki.getRecentChanges";
pub const GET_RECENT_MEDIA_CHANGES: &str = "wiki.getRecentMediaChanges";
pub const ACL_CHECK: &str = "wiki.aclCheck";

pub const GET_ATTACHMENT: &str = "wiki.getAttachment";
pub const PUT_ATTACHMENT: &str = "wiki.putAttachment";
pub const DELETE_ATTACHMENT: &str = "wiki.deleteAttachment";
pub const GET_ATTACHMENT_INFO: &str = "wiki.getAttachmentInfo";
pub const GET_ATTACHMENTS: &str = "wiki.getAttachments";

pub const SET_LOCKS: &str = "dokuwiki.setLocks";

pub const STRUCT_GET_DATA: &str = "plugin.struct.getData";
pub const STRUCT_SAVE_DATA: &str = "plugin.struct.saveData";
pub const STRUCT_GET_SCHEMA: &str = "plugin.struct.getSchema";
pub const STRUCT_GET_AGGREGATION_DATA: &str = "plugin.struct.getAggregationData";

// ============================================================================
// Option Structures
// ============================================================================

/// Edit summary and minor flag for page writes. Sent as `{sum, minor}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditOptions {
    pub summary: String,
    pub minor: bool,
}

impl EditOptions {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            minor: false,
        }
    }

    pub fn minor(mut self, minor: bool) -> Self {
        self.minor = minor;
        self
    }
}

impl From<EditOptions> for Value {
    fn from(opts: EditOptions) -> Self {
        Value::structure([
            ("sum", Value::from(opts.summary)),
            ("minor", Value::from(opts.minor)),
        ])
    }
}

/// Options for `dokuwiki.getPagelist`. Sent as `{depth, hash, skipacl}`.
///
/// The default lists every depth, skips content hashing and enforces ACLs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PagelistOptions {
    /// Recursion depth; 0 means unlimited.
    pub depth: i64,
    /// Include an MD5 hash of each page's content.
    pub hash: bool,
    /// List pages regardless of ACL restrictions.
    pub skip_acl: bool,
}

impl From<PagelistOptions> for Value {
    fn from(opts: PagelistOptions) -> Self {
        Value::structure([
            ("depth", Value::from(opts.depth)),
            ("hash", Value::from(opts.hash)),
            ("skipacl", Value::from(opts.skip_acl)),
        ])
    }
}

/// Options for `wiki.getAttachments`. Only set fields are sent; an empty
/// pattern counts as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilesOptions {
    pub recursive: bool,
    /// Regular expression the file names must match.
    pub pattern: Option<String>,
}

impl From<ListFilesOptions> for Value {
    fn from(opts: ListFilesOptions) -> Self {
        let mut members = Vec::new();
        if opts.recursive {
            members.push(("recursive", Value::from(true)));
        }
        if let Some(pattern) = opts.pattern.filter(|p| !p.is_empty()) {
            members.push(("pattern", Value::from(pattern)));
        }
        Value::structure(members)
    }
}

/// Page ids to lock and unlock in one `dokuwiki.setLocks` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Locks {
    pub lock: Vec<String>,
    pub unlock: Vec<String>,
}

impl Locks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(mut self, id: impl Into<String>) -> Self {
        self.lock.push(id.into());
        self
    }

    pub fn unlock(mut self, id: impl Into<String>) -> Self {
        self.unlock.push(id.into());
        self
    }
}

impl From<Locks> for Value {
    fn from(locks: Locks) -> Self {
        Value::structure([
            ("lock", Value::from(locks.lock)),
            ("unlock", Value::from(locks.unlock)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_options_shape() {
        let value = Value::from(EditOptions::new("typo").minor(true));
        assert_eq!(value.get("sum"), Some(&Value::from("typo")));
        assert_eq!(value.get("minor"), Some(&Value::Boolean(true)));
        assert_eq!(value.as_struct().map(|m| m.len()), Some(2));
    }

    #[test]
    fn pagelist_defaults() {
        let value = Value::from(PagelistOptions::default());
        assert_eq!(value.get("depth"), Some(&Value::Int(0)));
        assert_eq!(value.get("hash"), Some(&Value::Boolean(false)));
        assert_eq!(value.get("skipacl"), Some(&Value::Boolean(false)));
    }

    #[test]
    fn list_files_only_sends_set_options() {
        assert_eq!(
            Value::from(ListFilesOptions::default()).as_struct().map(|m| m.len()),
            Some(0)
        );
        let value = Value::from(ListFilesOptions {
            recursive: true,
            pattern: Some(r"\.png$".into()),
        });
        assert_eq!(value.get("recursive"), Some(&Value::Boolean(true)));
        assert_eq!(value.get("pattern"), Some(&Value::from(r"\.png$")));
    }

    #[test]
    fn list_files_skips_empty_pattern() {
        let value = Value::from(ListFilesOptions {
            recursive: false,
            pattern: Some(String::new()),
        });
        assert_eq!(value.get("pattern"), None);
        assert_eq!(value.as_struct().map(|m| m.len()), Some(0));
    }

    #[test]
    fn locks_keep_order() {
        let value = Value::from(Locks::new().lock("b").lock("a").unlock("c"));
        assert_eq!(value.get("lock"), Some(&Value::from(vec!["b", "a"])));
        assert_eq!(value.get("unlock"), Some(&Value::from(vec!["c"])));
    }
}
