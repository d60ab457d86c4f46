//! # Typed Metadata
//!
//! Turns JSON objects returned by the drive API into typed records.
//!
//! ## Member dispatch
//!
//! Each record kind is built by walking the object's members once and
//! offering every member to an ordered chain of handlers:
//!
//! 1. [`ResourceFields`]: members every resource carries (`id`), plus the raw
//!    object kept for later reference
//! 2. the kind handler: members particular to the kind (`name`, timestamps,
//!    `size`, `parentReference`, `roles`, ...)
//! 3. nested handlers, for members that are sub-documents (`file` carries the
//!    mime type and `hashes`, `folder` carries `childCount`)
//!
//! A handler ignores members it does not know, so fields the service adds
//! later are dropped without error. A known member with the wrong shape is a
//! [`ParseError`](crate::OneDriveError::ParseError).

mod identity;
mod item;
mod permission;
mod thumbnail;
mod user;
pub(crate) mod value;

use serde_json::Value;
use std::sync::Arc;

use crate::connection::Connection;
use crate::error::Result;
use crate::reference::ResourceRef;

pub use identity::{Identity, IdentitySet};
pub use item::{FileFacet, FolderFacet, FolderReference, ItemFacet, ItemKind, ItemMetadata};
pub use permission::{Invitation, PermissionMetadata, SharingLink, SharingLinkType};
pub use thumbnail::{Thumbnail, ThumbnailSetMetadata, ThumbnailSize};
pub use user::UserMetadata;

/// A decoded JSON object
pub type JsonObject = serde_json::Map<String, Value>;

/// Kind tag of a [`Metadata`] record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    File,
    Folder,
    Permission,
    User,
    ThumbnailSet,
    SharingLink,
    Invitation,
    IdentitySet,
}

/// Where a record came from.
///
/// `owner` is the resource whose collection or response produced the record
/// (the listed folder, the item whose permissions were requested, or the drive
/// root). Back-links such as a permission's item are built from it.
#[derive(Debug, Clone)]
pub struct HydrateContext {
    owner: ResourceRef,
}

impl HydrateContext {
    pub fn new(owner: ResourceRef) -> Self {
        Self { owner }
    }

    /// Context for records not tied to a particular item
    pub fn root(connection: Arc<Connection>) -> Self {
        Self::new(ResourceRef::root(connection))
    }

    pub fn owner(&self) -> &ResourceRef {
        &self.owner
    }

    pub fn connection(&self) -> &Arc<Connection> {
        self.owner.connection()
    }
}

/// Builds a typed record from one JSON object
pub trait Hydrate: Sized {
    fn hydrate(json: &JsonObject, context: &HydrateContext) -> Result<Self>;
}

/// Offers every member of `json` to `handler`
pub(crate) fn parse_members<F>(json: &JsonObject, mut handler: F) -> Result<()>
where
    F: FnMut(&str, &Value) -> Result<()>,
{
    for (name, value) in json {
        handler(name, value)?;
    }
    Ok(())
}

/// Offers every member of the sub-document `field` to `handler`; `null` is skipped
pub(crate) fn parse_nested<F>(field: &str, value: &Value, handler: F) -> Result<()>
where
    F: FnMut(&str, &Value) -> Result<()>,
{
    match value::object(field, value)? {
        Some(object) => parse_members(object, handler),
        None => Ok(()),
    }
}

/// Members shared by every resource record
#[derive(Debug, Clone, Default)]
pub(crate) struct ResourceFields {
    pub(crate) id: Option<String>,
    pub(crate) raw: JsonObject,
}

impl ResourceFields {
    pub(crate) fn new(json: &JsonObject) -> Self {
        Self {
            id: None,
            raw: json.clone(),
        }
    }

    pub(crate) fn parse_member(&mut self, name: &str, value: &Value) -> Result<()> {
        if name == "id" {
            self.id = value::string(name, value)?;
        }
        Ok(())
    }
}

/// A hydrated record of any kind
#[derive(Debug, Clone)]
pub enum Metadata {
    File(ItemMetadata),
    Folder(ItemMetadata),
    Permission(PermissionMetadata),
    User(UserMetadata),
    ThumbnailSet(ThumbnailSetMetadata),
    SharingLink(SharingLink),
    Invitation(Invitation),
    IdentitySet(IdentitySet),
}

impl Metadata {
    /// Hydrates `json` as a record of `kind`
    pub fn hydrate(
        kind: MetadataKind,
        json: &JsonObject,
        context: &HydrateContext,
    ) -> Result<Self> {
        Ok(match kind {
            MetadataKind::File => {
                Metadata::File(ItemMetadata::hydrate_as(ItemKind::File, json, context)?)
            }
            MetadataKind::Folder => {
                Metadata::Folder(ItemMetadata::hydrate_as(ItemKind::Folder, json, context)?)
            }
            MetadataKind::Permission => {
                Metadata::Permission(PermissionMetadata::hydrate(json, context)?)
            }
            MetadataKind::User => Metadata::User(UserMetadata::hydrate(json, context)?),
            MetadataKind::ThumbnailSet => {
                Metadata::ThumbnailSet(ThumbnailSetMetadata::hydrate(json, context)?)
            }
            MetadataKind::SharingLink => Metadata::SharingLink(SharingLink::from_json(json)?),
            MetadataKind::Invitation => Metadata::Invitation(Invitation::from_json(json)?),
            MetadataKind::IdentitySet => Metadata::IdentitySet(IdentitySet::from_json(json)?),
        })
    }

    pub fn kind(&self) -> MetadataKind {
        match self {
            Metadata::File(_) => MetadataKind::File,
            Metadata::Folder(_) => MetadataKind::Folder,
            Metadata::Permission(_) => MetadataKind::Permission,
            Metadata::User(_) => MetadataKind::User,
            Metadata::ThumbnailSet(_) => MetadataKind::ThumbnailSet,
            Metadata::SharingLink(_) => MetadataKind::SharingLink,
            Metadata::Invitation(_) => MetadataKind::Invitation,
            Metadata::IdentitySet(_) => MetadataKind::IdentitySet,
        }
    }

    pub fn as_item(&self) -> Option<&ItemMetadata> {
        match self {
            Metadata::File(item) | Metadata::Folder(item) => Some(item),
            _ => None,
        }
    }
}
