//! Operations shared by files and folders.

use async_trait::async_trait;
use bridge_traits::http::HttpMethod;
use bytes::Bytes;
use serde_json::json;
use tracing::info;

use crate::error::Result;
use crate::iterator::CollectionIterator;
use crate::metadata::{
    Hydrate, HydrateContext, ItemMetadata, PermissionMetadata, SharingLinkType, Thumbnail,
    ThumbnailSetMetadata, ThumbnailSize,
};
use crate::page::{Page, PageFlavor};
use crate::reference::ResourceRef;
use crate::request::ApiRequest;
use crate::url::{Expand, QueryString};

/// A file or folder on a drive.
///
/// Handles are cheap references; every operation issues requests against the
/// handle's connection and nothing is cached between calls.
#[async_trait]
pub trait DriveItem: Send + Sync {
    fn resource(&self) -> &ResourceRef;

    /// Context for records returned about this item
    fn context(&self) -> HydrateContext {
        HydrateContext::new(self.resource().clone())
    }

    /// Fetches the item's metadata, inlining `expands`
    async fn metadata(&self, expands: &[Expand]) -> Result<ItemMetadata> {
        let url = self.resource().url("", &QueryString::new().expand(expands));
        let json = ApiRequest::get(self.resource().connection(), url)
            .send_json()
            .await?;
        ItemMetadata::hydrate(&json, &self.context())
    }

    fn thumbnail_sets(&self) -> CollectionIterator<ThumbnailSetMetadata> {
        let url = self.resource().url("/thumbnails", &QueryString::new());
        CollectionIterator::new(url, PageFlavor::Collection, self.context())
    }

    /// The item's first thumbnail set, if the service generated one
    async fn thumbnail_set(&self) -> Result<Option<ThumbnailSetMetadata>> {
        self.thumbnail_sets().try_next().await
    }

    /// Metadata of one rendition from the default set
    async fn thumbnail(&self, size: ThumbnailSize) -> Result<Thumbnail> {
        let url = self
            .resource()
            .url(&format!("/thumbnails/0/{}", size), &QueryString::new());
        let json = ApiRequest::get(self.resource().connection(), url)
            .send_json()
            .await?;
        Thumbnail::from_json(&json)
    }

    /// Image bytes of one rendition from the default set
    async fn download_thumbnail(&self, size: ThumbnailSize) -> Result<Bytes> {
        let url = self
            .resource()
            .url(&format!("/thumbnails/0/{}/content", size), &QueryString::new());
        let response = ApiRequest::get(self.resource().connection(), url).send().await?;
        Ok(response.body)
    }

    /// Invites `recipients` (email addresses) to read the item
    async fn create_share(&self, recipients: &[String]) -> Result<Vec<PermissionMetadata>> {
        let body = json!({
            "requireSignIn": false,
            "sendInvitation": true,
            "roles": ["read"],
            "recipients": recipients
                .iter()
                .map(|email| json!({ "email": email }))
                .collect::<Vec<_>>(),
        });

        let url = self.resource().url("/invite", &QueryString::new());
        let json = ApiRequest::new(self.resource().connection(), HttpMethod::Post, url)
            .json_body(&body)?
            .send_json()
            .await?;

        let context = self.context();
        let permissions = Page::from_json(&json, PageFlavor::Collection)?
            .items
            .iter()
            .map(|item| PermissionMetadata::hydrate(item, &context))
            .collect::<Result<Vec<_>>>()?;

        info!(item = ?self.resource(), "Shared item with {} recipients", permissions.len());
        Ok(permissions)
    }

    /// Creates (or returns the existing) sharing link of `link_type`
    async fn create_shared_link(&self, link_type: SharingLinkType) -> Result<PermissionMetadata> {
        let body = json!({ "type": link_type.as_str() });
        let url = self.resource().url("/createLink", &QueryString::new());
        let json = ApiRequest::new(self.resource().connection(), HttpMethod::Post, url)
            .json_body(&body)?
            .send_json()
            .await?;
        PermissionMetadata::hydrate(&json, &self.context())
    }

    fn permissions(&self) -> CollectionIterator<PermissionMetadata> {
        let url = self.resource().url("/permissions", &QueryString::new());
        CollectionIterator::new(url, PageFlavor::Collection, self.context())
    }

    /// Moves the item to the recycle bin
    async fn delete(&self) -> Result<()> {
        let url = self.resource().url("", &QueryString::new());
        ApiRequest::new(self.resource().connection(), HttpMethod::Delete, url)
            .send()
            .await?;
        info!(item = ?self.resource(), "Deleted item");
        Ok(())
    }
}
