//! # OneDrive Provider
//!
//! Client core for the OneDrive / Microsoft Graph drive API.
//!
//! ## Overview
//!
//! This module provides:
//! - Connections to the personal, user, site and business endpoints
//! - Lazy iteration over paged collections (children, search, permissions)
//! - Delta enumeration with resumable sync tokens
//! - Schema-tolerant typed metadata for items, permissions, users and thumbnails
//! - File, folder and permission operations
//!
//! ## Usage
//!
//! ```ignore
//! use provider_onedrive::{Connection, DriveItem, Folder};
//!
//! let connection = Arc::new(Connection::graph(token, http_client));
//! let mut delta = Folder::root(connection.clone()).delta();
//! while let Some(item) = delta.try_next().await? {
//!     if item.is_deleted() {
//!         forget(item.id());
//!     }
//! }
//! save_token(delta.delta_link());
//! ```

pub mod connection;
pub mod delta;
pub mod error;
pub mod file;
pub mod folder;
pub mod item;
pub mod iterator;
pub mod metadata;
pub mod page;
pub mod permission;
pub mod reference;
mod request;
pub mod url;
pub mod user;

#[cfg(test)]
mod test_support;

pub use connection::{ApiFlavor, Connection, GraphTarget, GRAPH_ROOT};
pub use delta::DeltaIterator;
pub use error::{ErrorKind, OneDriveError, Result};
pub use file::File;
pub use folder::Folder;
pub use item::DriveItem;
pub use iterator::{CollectionIterator, CursorState};
pub use metadata::{
    Hydrate, HydrateContext, ItemKind, ItemMetadata, Metadata, MetadataKind, PermissionMetadata,
    SharingLinkType, ThumbnailSetMetadata, ThumbnailSize, UserMetadata,
};
pub use page::{Page, PageContinuation, PageFetcher, PageFlavor};
pub use permission::Permission;
pub use reference::ResourceRef;
pub use url::Expand;
pub use user::User;
