//! File handles.

use async_trait::async_trait;
use bridge_traits::http::HttpMethod;
use bytes::Bytes;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::connection::Connection;
use crate::error::{OneDriveError, Result};
use crate::item::DriveItem;
use crate::metadata::{Hydrate, ItemMetadata};
use crate::reference::ResourceRef;
use crate::request::ApiRequest;
use crate::url::QueryString;

/// A file on a drive
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    resource: ResourceRef,
}

impl File {
    pub fn new(resource: ResourceRef) -> Self {
        Self { resource }
    }

    pub fn by_id(connection: Arc<Connection>, id: impl Into<String>) -> Self {
        Self::new(ResourceRef::with_id(connection, id))
    }

    /// File at `path` below the root, e.g. `Documents/report.txt`
    pub fn by_path(connection: Arc<Connection>, path: impl Into<String>) -> Self {
        Self::new(ResourceRef::with_path(connection, path))
    }

    fn content_url(&self) -> Result<String> {
        if self.resource.is_root() {
            return Err(OneDriveError::InvalidReference(
                "the drive root has no content".to_string(),
            ));
        }
        Ok(self.resource.url("/content", &QueryString::new()))
    }

    /// Downloads the whole content
    #[instrument(skip(self), fields(file = ?self.resource))]
    pub async fn download(&self) -> Result<Bytes> {
        let url = self.content_url()?;
        let response = ApiRequest::get(self.resource.connection(), url).send().await?;
        info!("Downloaded {} bytes", response.body.len());
        Ok(response.body)
    }

    /// Replaces (or creates, when addressed by path) the content in one request.
    ///
    /// The service limits single-request uploads to a few megabytes.
    #[instrument(skip(self, content), fields(file = ?self.resource, bytes = content.len()))]
    pub async fn upload(&self, content: Bytes) -> Result<ItemMetadata> {
        let url = self.content_url()?;
        let json = ApiRequest::new(self.resource.connection(), HttpMethod::Put, url)
            .octet_body(content)
            .send_json()
            .await?;

        let item = ItemMetadata::hydrate(&json, &self.context())?;
        info!("Uploaded file {}", item.id());
        Ok(item)
    }

    /// Renames the file, moving it under `new_parent_id` when given
    #[instrument(skip(self), fields(file = ?self.resource))]
    pub async fn rename(
        &self,
        new_name: &str,
        new_parent_id: Option<&str>,
    ) -> Result<ItemMetadata> {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::from(new_name));
        if let Some(parent) = new_parent_id {
            body.insert("parentReference".to_string(), json!({ "id": parent }));
        }

        let url = self.resource.url("", &QueryString::new());
        let json = ApiRequest::new(self.resource.connection(), HttpMethod::Patch, url)
            .json_body(&Value::Object(body))?
            .send_json()
            .await?;
        ItemMetadata::hydrate(&json, &self.context())
    }

    /// Current content version, taken from the file's cTag
    pub async fn version(&self) -> Result<Option<String>> {
        let metadata = self.metadata(&[]).await?;
        Ok(metadata
            .as_file()
            .and_then(|file| file.version())
            .map(str::to_string))
    }
}

#[async_trait]
impl DriveItem for File {
    fn resource(&self) -> &ResourceRef {
        &self.resource
    }
}
