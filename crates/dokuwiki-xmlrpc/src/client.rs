//! The wiki RPC facade.

use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::DecodeError;
use crate::procedures::*;
use crate::session::Session;
use crate::xmlrpc::Value;
use crate::Result;

/// Client for one DokuWiki instance.
///
/// Every method performs exactly one remote call through the session opened
/// by [`WikiClient::connect`] and returns what the wiki sent back, decoded
/// but otherwise unmodified. Failures are always one of the
/// [`Error`](crate::Error) variants.
///
/// Page and file ids are passed through unchanged; DokuWiki resolves them.
#[derive(Debug)]
pub struct WikiClient {
    session: Session,
}

impl WikiClient {
    /// Open a session to the configured wiki.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the wiki
    /// URL is invalid or unreachable.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            session: Session::connect(config)?,
        })
    }

    /// Wrap an already established session.
    pub fn from_session(session: Session) -> Self {
        Self { session }
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn call(&self, procedure: &str, params: Vec<Value>) -> Result<Value> {
        self.session.call(procedure, &params)
    }

    // ------------------------------------------------------------------
    // Wiki
    // ------------------------------------------------------------------

    /// DokuWiki version reported by the remote wiki.
    pub fn dokuwiki_version(&self) -> Result<Value> {
        self.call(GET_VERSION, vec![])
    }

    /// XML-RPC API version supported by the remote wiki.
    pub fn rpc_version_supported(&self) -> Result<Value> {
        self.call(GET_RPC_VERSION_SUPPORTED, vec![])
    }

    pub fn wiki_title(&self) -> Result<Value> {
        self.call(GET_TITLE, vec![])
    }

    /// Current UNIX time on the wiki server.
    pub fn server_time(&self) -> Result<Value> {
        self.call(GET_TIME, vec![])
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    /// Raw wiki text of a page.
    ///
    /// With `revision` set to a non-zero timestamp the text of that version is
    /// returned; `None` or `Some(0)` returns the current version.
    #[instrument(skip(self))]
    pub fn page(&self, page_id: &str, revision: Option<i64>) -> Result<Value> {
        match latest_or(revision) {
            None => self.call(GET_PAGE, vec![page_id.into()]),
            Some(rev) => self.call(GET_PAGE_VERSION, vec![page_id.into(), rev.into()]),
        }
    }

    /// Available versions of a page, newest first, starting at `offset`.
    pub fn page_versions(&self, page_id: &str, offset: i64) -> Result<Value> {
        self.call(GET_PAGE_VERSIONS, vec![page_id.into(), offset.into()])
    }

    /// Metadata of a page or of one of its versions.
    pub fn page_info(&self, page_id: &str, revision: Option<i64>) -> Result<Value> {
        match latest_or(revision) {
            None => self.call(GET_PAGE_INFO, vec![page_id.into()]),
            Some(rev) => self.call(GET_PAGE_INFO_VERSION, vec![page_id.into(), rev.into()]),
        }
    }

    /// Rendered (X)HTML body of a page or of one of its versions.
    pub fn page_html(&self, page_id: &str, revision: Option<i64>) -> Result<Value> {
        match latest_or(revision) {
            None => self.call(GET_PAGE_HTML, vec![page_id.into()]),
            Some(rev) => self.call(GET_PAGE_HTML_VERSION, vec![page_id.into(), rev.into()]),
        }
    }

    /// Replace the text of a page. Empty text deletes the page.
    #[instrument(skip(self, text))]
    pub fn put_page(&self, page_id: &str, text: &str, options: EditOptions) -> Result<()> {
        self.call(PUT_PAGE, vec![page_id.into(), text.into(), options.into()])?;
        Ok(())
    }

    /// Append text to a page.
    #[instrument(skip(self, text))]
    pub fn append_page(&self, page_id: &str, text: &str, options: EditOptions) -> Result<()> {
        self.call(APPEND_PAGE, vec![page_id.into(), text.into(), options.into()])?;
        Ok(())
    }

    /// Pages in a namespace.
    pub fn pagelist(&self, namespace: &str, options: PagelistOptions) -> Result<Value> {
        self.call(GET_PAGELIST, vec![namespace.into(), options.into()])
    }

    /// Every page of the wiki.
    pub fn all_pages(&self) -> Result<Value> {
        self.call(GET_ALL_PAGES, vec![])
    }

    /// Full-text search.
    pub fn search(&self, query: &str) -> Result<Value> {
        self.call(SEARCH, vec![query.into()])
    }

    /// Pages linking to `page_id`.
    pub fn backlinks(&self, page_id: &str) -> Result<Value> {
        self.call(GET_BACK_LINKS, vec![page_id.into()])
    }

    /// Links contained in a page.
    pub fn links(&self, page_id: &str) -> Result<Value> {
        self.call(LIST_LINKS, vec![page_id.into()])
    }

    /// Page changes since `timestamp` (UNIX seconds, UTC).
    pub fn recent_changes(&self, timestamp: i64) -> Result<Value> {
        self.call(GET_RECENT_CHANGES, vec![timestamp.into()])
    }

    /// Media file changes since `timestamp` (UNIX seconds, UTC).
    pub fn recent_media_changes(&self, timestamp: i64) -> Result<Value> {
        self.call(GET_RECENT_MEDIA_CHANGES, vec![timestamp.into()])
    }

    /// Permission level of the current user on a page.
    pub fn acl_check(&self, page_id: &str) -> Result<Value> {
        self.call(ACL_CHECK, vec![page_id.into()])
    }

    // ------------------------------------------------------------------
    // Media files
    // ------------------------------------------------------------------

    /// Download a media file.
    ///
    /// # Errors
    ///
    /// Besides the usual call errors, returns [`Error::Decode`](crate::Error::Decode)
    /// if the wiki answers with anything but a `<base64>` value.
    #[instrument(skip(self))]
    pub fn get_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let value = self.call(GET_ATTACHMENT, vec![file_id.into()])?;
        value.into_bytes().map_err(|other| {
            DecodeError::new(format!(
                "expected a base64 payload for '{file_id}', got {}",
                other.type_name()
            ))
            .into()
        })
    }

    /// Upload a media file. The payload is always sent as a `<base64>` value.
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub fn put_file(&self, file_id: &str, data: &[u8], overwrite: bool) -> Result<Value> {
        let options = Value::structure([("ow", overwrite)]);
        self.call(
            PUT_ATTACHMENT,
            vec![file_id.into(), Value::binary(data), options],
        )
    }

    pub fn delete_file(&self, file_id: &str) -> Result<Value> {
        self.call(DELETE_ATTACHMENT, vec![file_id.into()])
    }

    /// Size and modification time of a media file.
    pub fn file_info(&self, file_id: &str) -> Result<Value> {
        self.call(GET_ATTACHMENT_INFO, vec![file_id.into()])
    }

    /// Media files in a namespace.
    pub fn list_files(&self, namespace: &str, options: ListFilesOptions) -> Result<Value> {
        self.call(GET_ATTACHMENTS, vec![namespace.into(), options.into()])
    }

    // ------------------------------------------------------------------
    // Locks
    // ------------------------------------------------------------------

    /// Lock and unlock pages in one call.
    pub fn set_locks(&self, locks: Locks) -> Result<Value> {
        self.call(SET_LOCKS, vec![locks.into()])
    }

    // ------------------------------------------------------------------
    // Struct plugin
    // ------------------------------------------------------------------

    /// Structured data of a page. An empty `schema` returns all schemas;
    /// a `timestamp` of 0 reads the current revision.
    pub fn struct_get_data(&self, page_id: &str, schema: &str, timestamp: i64) -> Result<Value> {
        self.call(
            STRUCT_GET_DATA,
            vec![page_id.into(), schema.into(), timestamp.into()],
        )
    }

    /// Save structured data for a page, creating a new revision.
    pub fn struct_save_data(&self, page_id: &str, data: Value, summary: &str) -> Result<Value> {
        self.call(
            STRUCT_SAVE_DATA,
            vec![page_id.into(), data, summary.into()],
        )
    }

    /// Schema definition. An empty name returns all schemas.
    pub fn struct_get_schema(&self, schema: &str) -> Result<Value> {
        self.call(STRUCT_GET_SCHEMA, vec![schema.into()])
    }

    /// Rows an aggregation over `schemas` would display.
    pub fn struct_get_aggregation_data(
        &self,
        schemas: Value,
        columns: Value,
        filter: Value,
        sort: &str,
    ) -> Result<Value> {
        self.call(
            STRUCT_GET_AGGREGATION_DATA,
            vec![schemas, columns, filter, sort.into()],
        )
    }
}

fn latest_or(revision: Option<i64>) -> Option<i64> {
    revision.filter(|rev| *rev != 0)
}
