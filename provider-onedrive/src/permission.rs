//! Permission handles.

use bridge_traits::http::HttpMethod;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::connection::Connection;
use crate::error::Result;
use crate::metadata::{Hydrate, HydrateContext, PermissionMetadata};
use crate::reference::ResourceRef;
use crate::request::ApiRequest;
use crate::url::QueryString;

/// A permission granted on an item
#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    item: ResourceRef,
    id: String,
}

impl Permission {
    pub fn new(item: ResourceRef, id: impl Into<String>) -> Self {
        Self {
            item,
            id: id.into(),
        }
    }

    pub fn for_item(
        connection: Arc<Connection>,
        item_id: impl Into<String>,
        permission_id: impl Into<String>,
    ) -> Self {
        Self::new(ResourceRef::with_id(connection, item_id), permission_id)
    }

    /// Permission on the drive root
    pub fn for_root(connection: Arc<Connection>, permission_id: impl Into<String>) -> Self {
        Self::new(ResourceRef::root(connection), permission_id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn item(&self) -> &ResourceRef {
        &self.item
    }

    fn url(&self) -> String {
        let suffix = format!("/permissions/{}", urlencoding::encode(&self.id));
        self.item.url(&suffix, &QueryString::new())
    }

    pub async fn metadata(&self) -> Result<PermissionMetadata> {
        let json = ApiRequest::get(self.item.connection(), self.url())
            .send_json()
            .await?;
        PermissionMetadata::hydrate(&json, &HydrateContext::new(self.item.clone()))
    }

    /// Revokes the permission
    #[instrument(skip(self), fields(item = ?self.item, permission = %self.id))]
    pub async fn delete(&self) -> Result<()> {
        ApiRequest::new(self.item.connection(), HttpMethod::Delete, self.url())
            .send()
            .await?;
        info!("Revoked permission");
        Ok(())
    }
}
