//! One page of a collection response.
//!
//! Collection endpoints answer with
//!
//! ```json
//! { "value": [ ... ], "@odata.nextLink": "...", "@odata.deltaLink": "..." }
//! ```
//!
//! where `@odata.nextLink` points at the next page of the same pass and
//! `@odata.deltaLink` (delta queries only, last page only) is the sync token
//! for a later pass. Both links are opaque and used verbatim.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::connection::Connection;
use crate::error::{OneDriveError, Result};
use crate::metadata::{value, JsonObject};
use crate::request::{decode_object, ApiRequest};

pub(crate) const VALUE: &str = "value";
pub(crate) const NEXT_LINK: &str = "@odata.nextLink";
pub(crate) const DELTA_LINK: &str = "@odata.deltaLink";

/// Which links a page may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFlavor {
    /// Plain listing: next links only
    Collection,
    /// Delta query: next links, then a delta link on the last page
    Delta,
}

/// What follows a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContinuation {
    /// More pages in this pass, starting at the URL
    NextPage(String),
    /// Last page of a delta pass; the URL resumes from this point later
    ResumeToken(String),
    /// Last page
    End,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<JsonObject>,
    pub continuation: PageContinuation,
}

impl Page {
    /// Decodes a page body.
    ///
    /// A missing `value` reads as an empty page. When both links are present
    /// the next link wins, since the pass is not over yet.
    pub fn from_json(json: &JsonObject, flavor: PageFlavor) -> Result<Self> {
        let items = match json.get(VALUE) {
            Some(items) => match value::array(VALUE, items)? {
                Some(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::Object(object) => Ok(object.clone()),
                        other => Err(OneDriveError::parse(
                            VALUE,
                            format!("expected object element, found {}", value::type_name(other)),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
            },
            None => Vec::new(),
        };

        let next_link = link(json, NEXT_LINK)?;
        let delta_link = match flavor {
            PageFlavor::Delta => link(json, DELTA_LINK)?,
            PageFlavor::Collection => None,
        };

        let continuation = match (next_link, delta_link) {
            (Some(next), _) => PageContinuation::NextPage(next),
            (None, Some(delta)) => PageContinuation::ResumeToken(delta),
            (None, None) => PageContinuation::End,
        };

        Ok(Self {
            items,
            continuation,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn link(json: &JsonObject, field: &str) -> Result<Option<String>> {
    match json.get(field) {
        Some(link) => value::string(field, link),
        None => Ok(None),
    }
}

/// Checks that a caller-supplied continuation or delta link is an absolute URL
pub(crate) fn validate_link(link: &str) -> Result<()> {
    match reqwest::Url::parse(link) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => Ok(()),
        Ok(_) => Err(OneDriveError::InvalidLink(link.to_string())),
        Err(_) => Err(OneDriveError::InvalidLink(link.to_string())),
    }
}

/// Fetches collection pages from a connection
#[derive(Debug, Clone)]
pub struct PageFetcher {
    connection: Arc<Connection>,
    flavor: PageFlavor,
}

impl PageFetcher {
    pub fn new(connection: Arc<Connection>, flavor: PageFlavor) -> Self {
        Self { connection, flavor }
    }

    pub fn flavor(&self) -> PageFlavor {
        self.flavor
    }

    /// GETs `url` and decodes the page. Nothing is buffered on failure.
    #[instrument(skip(self), fields(flavor = ?self.flavor))]
    pub async fn fetch(&self, url: &str) -> Result<Page> {
        let response = ApiRequest::get(&self.connection, url).send().await?;
        let json = decode_object(&response.body)?;
        let page = Page::from_json(&json, self.flavor)?;

        debug!(
            items = page.items.len(),
            more = !matches!(page.continuation, PageContinuation::End),
            "Fetched page"
        );
        Ok(page)
    }
}
