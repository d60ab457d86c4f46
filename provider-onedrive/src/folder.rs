//! Folder handles.

use async_trait::async_trait;
use bridge_traits::http::HttpMethod;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::connection::Connection;
use crate::delta::DeltaIterator;
use crate::error::Result;
use crate::item::DriveItem;
use crate::iterator::CollectionIterator;
use crate::metadata::{Hydrate, ItemMetadata};
use crate::page::PageFlavor;
use crate::reference::ResourceRef;
use crate::request::ApiRequest;
use crate::url::{odata_string, Expand, QueryString};

/// A folder on a drive
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    resource: ResourceRef,
}

impl Folder {
    pub fn new(resource: ResourceRef) -> Self {
        Self { resource }
    }

    /// The drive's root folder
    pub fn root(connection: Arc<Connection>) -> Self {
        Self::new(ResourceRef::root(connection))
    }

    pub fn by_id(connection: Arc<Connection>, id: impl Into<String>) -> Self {
        Self::new(ResourceRef::with_id(connection, id))
    }

    /// Folder at `path` below the root, e.g. `Documents/Reports`
    pub fn by_path(connection: Arc<Connection>, path: impl Into<String>) -> Self {
        Self::new(ResourceRef::with_path(connection, path))
    }

    fn page_query(&self) -> QueryString {
        QueryString::new().set("$top", self.resource.connection().page_size())
    }

    /// Lists the direct children, one page at a time
    pub fn children(&self) -> CollectionIterator<ItemMetadata> {
        self.children_with(&[])
    }

    pub fn children_with(&self, expands: &[Expand]) -> CollectionIterator<ItemMetadata> {
        let url = self.resource.url("/children", &self.page_query().expand(expands));
        CollectionIterator::new(url, PageFlavor::Collection, self.context())
    }

    /// Items below this folder matching `query` in name, metadata or content
    pub fn search(&self, query: &str, expands: &[Expand]) -> CollectionIterator<ItemMetadata> {
        let suffix = format!("/search(q='{}')", odata_string(query));
        let url = self.resource.url(&suffix, &self.page_query().expand(expands));
        CollectionIterator::new(url, PageFlavor::Collection, self.context())
    }

    /// Enumerates the whole hierarchy below this folder.
    ///
    /// Drain the pass and keep [`DeltaIterator::delta_link`] to ask for
    /// later changes with [`delta_from`](Self::delta_from).
    pub fn delta(&self) -> DeltaIterator {
        let url = self.resource.url("/delta", &self.page_query());
        DeltaIterator::new(url, self.context())
    }

    /// Enumerates changes made since `delta_link` was issued.
    ///
    /// Fails with [`OneDriveError::InvalidLink`](crate::OneDriveError::InvalidLink)
    /// when the link is not an absolute URL.
    pub fn delta_from(&self, delta_link: impl Into<String>) -> Result<DeltaIterator> {
        DeltaIterator::resume(delta_link, self.context())
    }

    /// Creates a child folder; fails if the name is taken
    #[instrument(skip(self), fields(parent = ?self.resource))]
    pub async fn create_folder(&self, name: &str) -> Result<ItemMetadata> {
        let body = json!({
            "name": name,
            "folder": {},
            "@microsoft.graph.conflictBehavior": "fail",
        });
        let url = self.resource.url("/children", &QueryString::new());
        let json = ApiRequest::new(self.resource.connection(), HttpMethod::Post, url)
            .json_body(&body)?
            .send_json()
            .await?;

        let folder = ItemMetadata::hydrate(&json, &self.context())?;
        info!("Created folder {}", folder.id());
        Ok(folder)
    }
}

#[async_trait]
impl DriveItem for Folder {
    fn resource(&self) -> &ResourceRef {
        &self.resource
    }
}
