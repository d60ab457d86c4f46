use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use super::{
    parse_members, parse_nested, value, Hydrate, HydrateContext, IdentitySet, JsonObject,
    ResourceFields, ThumbnailSetMetadata,
};
use crate::error::{OneDriveError, Result};
use crate::file::File;
use crate::folder::Folder;
use crate::reference::ResourceRef;

/// Whether a drive item is a file or a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Folder,
}

/// Content hashes and download details of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFacet {
    mime_type: Option<String>,
    c_tag: Option<String>,
    download_url: Option<String>,
    crc32_hash: Option<String>,
    sha1_hash: Option<String>,
    quick_xor_hash: Option<String>,
}

impl FileFacet {
    fn parse_member(&mut self, name: &str, value: &Value) -> Result<()> {
        match name {
            "mimeType" => self.mime_type = value::string(name, value)?,
            "hashes" => parse_nested(name, value, |name, value| {
                match name {
                    "crc32Hash" => self.crc32_hash = value::string(name, value)?,
                    "sha1Hash" => self.sha1_hash = value::string(name, value)?,
                    "quickXorHash" => self.quick_xor_hash = value::string(name, value)?,
                    _ => {}
                }
                Ok(())
            })?,
            _ => {}
        }
        Ok(())
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn c_tag(&self) -> Option<&str> {
        self.c_tag.as_deref()
    }

    /// Content version, the part of the cTag after its last comma
    ///
    /// `"{8D7E...},3"` gives `"3"`. A cTag without a comma is returned whole.
    pub fn version(&self) -> Option<&str> {
        let c_tag = self.c_tag.as_deref()?;
        Some(match c_tag.rfind(',') {
            Some(index) => &c_tag[index + 1..],
            None => c_tag,
        })
    }

    /// Short-lived pre-authenticated URL, only present on item responses
    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    pub fn crc32_hash(&self) -> Option<&str> {
        self.crc32_hash.as_deref()
    }

    pub fn sha1_hash(&self) -> Option<&str> {
        self.sha1_hash.as_deref()
    }

    pub fn quick_xor_hash(&self) -> Option<&str> {
        self.quick_xor_hash.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderFacet {
    child_count: u64,
}

impl FolderFacet {
    fn parse_member(&mut self, name: &str, value: &Value) -> Result<()> {
        if name == "childCount" {
            self.child_count = value::unsigned(name, value)?.unwrap_or(0);
        }
        Ok(())
    }

    pub fn child_count(&self) -> u64 {
        self.child_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFacet {
    File(FileFacet),
    Folder(FolderFacet),
}

/// A pointer to another folder (`parentReference`, `inheritedFrom`)
///
/// The referenced folder is not fetched; [`FolderReference::folder`] gives a
/// handle that can be resolved on demand.
#[derive(Debug, Clone)]
pub struct FolderReference {
    id: Option<String>,
    drive_id: Option<String>,
    path: Option<String>,
    resource: Option<ResourceRef>,
}

impl FolderReference {
    pub(crate) fn from_value(
        field: &str,
        value: &Value,
        context: &HydrateContext,
    ) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }

        let mut id = None;
        let mut drive_id = None;
        let mut path = None;
        parse_nested(field, value, |name, value| {
            match name {
                "id" => id = value::string(name, value)?,
                "driveId" => drive_id = value::string(name, value)?,
                "path" => path = value::string(name, value)?,
                _ => {}
            }
            Ok(())
        })?;

        let resource = id
            .as_ref()
            .map(|id| ResourceRef::with_id(context.connection().clone(), id.clone()));

        Ok(Some(Self {
            id,
            drive_id,
            path,
            resource,
        }))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn drive_id(&self) -> Option<&str> {
        self.drive_id.as_deref()
    }

    /// Server path of the folder, e.g. `/drive/root:/Documents`
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn resource(&self) -> Option<&ResourceRef> {
        self.resource.as_ref()
    }

    /// Handle on the referenced folder, when the reference carries an id
    pub fn folder(&self) -> Option<Folder> {
        self.resource.clone().map(Folder::new)
    }
}

/// Metadata of a file or folder
#[derive(Debug, Clone)]
pub struct ItemMetadata {
    id: String,
    name: Option<String>,
    e_tag: Option<String>,
    description: Option<String>,
    web_url: Option<String>,
    size: Option<u64>,
    created_by: Option<IdentitySet>,
    created_at: Option<DateTime<FixedOffset>>,
    last_modified_by: Option<IdentitySet>,
    last_modified_at: Option<DateTime<FixedOffset>>,
    parent_reference: Option<FolderReference>,
    thumbnail_sets: Vec<ThumbnailSetMetadata>,
    deleted: bool,
    facet: ItemFacet,
    resource: ResourceRef,
    raw: JsonObject,
}

impl ItemMetadata {
    /// Hydrates `json` as an item of the given kind, regardless of its facets
    pub fn hydrate_as(kind: ItemKind, json: &JsonObject, context: &HydrateContext) -> Result<Self> {
        let mut resource = ResourceFields::new(json);
        let mut name = None;
        let mut e_tag = None;
        let mut c_tag = None;
        let mut download_url = None;
        let mut description = None;
        let mut web_url = None;
        let mut size = None;
        let mut created_by = None;
        let mut created_at = None;
        let mut last_modified_by = None;
        let mut last_modified_at = None;
        let mut parent_reference = None;
        let mut thumbnail_sets = Vec::new();
        let mut deleted = false;
        let mut file = FileFacet::default();
        let mut folder = FolderFacet::default();

        parse_members(json, |member, value| {
            resource.parse_member(member, value)?;
            match member {
                "name" => name = value::string(member, value)?,
                "eTag" => e_tag = value::string(member, value)?,
                "cTag" => c_tag = value::string(member, value)?,
                "description" => description = value::string(member, value)?,
                "webUrl" => web_url = value::string(member, value)?,
                "size" => size = value::unsigned(member, value)?,
                "createdBy" => created_by = IdentitySet::from_value(member, value)?,
                "createdDateTime" => created_at = value::datetime(member, value)?,
                "lastModifiedBy" => last_modified_by = IdentitySet::from_value(member, value)?,
                "lastModifiedDateTime" => last_modified_at = value::datetime(member, value)?,
                "parentReference" => {
                    parent_reference = FolderReference::from_value(member, value, context)?
                }
                "@microsoft.graph.downloadUrl" | "@content.downloadUrl" => {
                    download_url = value::string(member, value)?
                }
                "thumbnails" | "thumbnailSets" => {
                    thumbnail_sets = thumbnail_sets_from_value(member, value)?
                }
                // A tombstone is marked by the member's presence; its value carries no meaning
                "deleted" => deleted = true,
                "file" => {
                    parse_nested(member, value, |name, value| file.parse_member(name, value))?
                }
                "folder" => {
                    parse_nested(member, value, |name, value| folder.parse_member(name, value))?
                }
                _ => {}
            }
            Ok(())
        })?;

        let id = value::required("id", resource.id)?;
        let facet = match kind {
            ItemKind::File => {
                file.c_tag = c_tag;
                file.download_url = download_url;
                ItemFacet::File(file)
            }
            ItemKind::Folder => ItemFacet::Folder(folder),
        };

        Ok(Self {
            resource: ResourceRef::with_id(context.connection().clone(), id.clone()),
            id,
            name,
            e_tag,
            description,
            web_url,
            size,
            created_by,
            created_at,
            last_modified_by,
            last_modified_at,
            parent_reference,
            thumbnail_sets,
            deleted,
            facet,
            raw: resource.raw,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn web_url(&self) -> Option<&str> {
        self.web_url.as_deref()
    }

    /// Bytes for a file, total bytes of the contents for a folder
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn created_by(&self) -> Option<&IdentitySet> {
        self.created_by.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at
    }

    pub fn last_modified_by(&self) -> Option<&IdentitySet> {
        self.last_modified_by.as_ref()
    }

    pub fn last_modified_at(&self) -> Option<DateTime<FixedOffset>> {
        self.last_modified_at
    }

    pub fn parent_reference(&self) -> Option<&FolderReference> {
        self.parent_reference.as_ref()
    }

    /// Thumbnail sets embedded by `$expand=thumbnails`; empty otherwise
    pub fn thumbnail_sets(&self) -> &[ThumbnailSetMetadata] {
        &self.thumbnail_sets
    }

    /// True for tombstones reported by a delta query
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn kind(&self) -> ItemKind {
        match self.facet {
            ItemFacet::File(_) => ItemKind::File,
            ItemFacet::Folder(_) => ItemKind::Folder,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind() == ItemKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == ItemKind::Folder
    }

    pub fn facet(&self) -> &ItemFacet {
        &self.facet
    }

    pub fn as_file(&self) -> Option<&FileFacet> {
        match &self.facet {
            ItemFacet::File(file) => Some(file),
            ItemFacet::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderFacet> {
        match &self.facet {
            ItemFacet::Folder(folder) => Some(folder),
            ItemFacet::File(_) => None,
        }
    }

    /// Id-only reference to this item
    pub fn resource(&self) -> &ResourceRef {
        &self.resource
    }

    pub fn to_file(&self) -> Option<File> {
        self.is_file().then(|| File::new(self.resource.clone()))
    }

    pub fn to_folder(&self) -> Option<Folder> {
        self.is_folder().then(|| Folder::new(self.resource.clone()))
    }

    /// The object this record was built from, unknown members included
    pub fn raw(&self) -> &JsonObject {
        &self.raw
    }
}

impl Hydrate for ItemMetadata {
    /// Detects the kind from the `folder` facet; anything else is a file
    fn hydrate(json: &JsonObject, context: &HydrateContext) -> Result<Self> {
        let kind = match json.get("folder") {
            Some(value) if !value.is_null() => ItemKind::Folder,
            _ => ItemKind::File,
        };
        Self::hydrate_as(kind, json, context)
    }
}

fn thumbnail_sets_from_value(field: &str, value: &Value) -> Result<Vec<ThumbnailSetMetadata>> {
    let Some(items) = value::array(field, value)? else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .map(|item| {
            let object = value::object(field, item)?
                .ok_or_else(|| OneDriveError::parse(field, "expected object, found null"))?;
            ThumbnailSetMetadata::from_json(object)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::connection;
    use serde_json::json;

    fn hydrate(value: Value) -> Result<ItemMetadata> {
        let json = value.as_object().cloned().unwrap();
        ItemMetadata::hydrate(&json, &HydrateContext::root(connection()))
    }

    #[test]
    fn test_file_item() {
        let item = hydrate(json!({
            "id": "01BYE5RZ",
            "name": "report.txt",
            "eTag": "\"{1},2\"",
            "cTag": "\"c:{8D7E},3\"",
            "size": 100,
            "webUrl": "https://onedrive.live.com/?id=01BYE5RZ",
            "createdDateTime": "2024-03-01T10:15:30Z",
            "lastModifiedDateTime": "2024-03-02T08:00:00Z",
            "createdBy": { "user": { "id": "u1", "displayName": "Ann" } },
            "parentReference": {
                "id": "01PARENT",
                "driveId": "d1",
                "path": "/drive/root:/Documents"
            },
            "file": {
                "mimeType": "text/plain",
                "hashes": { "sha1Hash": "A1B2", "quickXorHash": "qx==" }
            },
            "@microsoft.graph.downloadUrl": "https://download/report.txt"
        }))
        .unwrap();

        assert!(item.is_file());
        assert!(!item.is_deleted());
        assert_eq!(item.id(), "01BYE5RZ");
        assert_eq!(item.size(), Some(100));
        assert_eq!(item.created_at().map(|t| t.timestamp()), Some(1709288130));
        assert_eq!(
            item.created_by().and_then(|s| s.user()).and_then(|u| u.display_name()),
            Some("Ann")
        );

        let file = item.as_file().unwrap();
        assert_eq!(file.mime_type(), Some("text/plain"));
        assert_eq!(file.sha1_hash(), Some("A1B2"));
        assert_eq!(file.quick_xor_hash(), Some("qx=="));
        assert_eq!(file.crc32_hash(), None);
        assert_eq!(file.version(), Some("3\""));
        assert_eq!(file.download_url(), Some("https://download/report.txt"));

        let parent = item.parent_reference().unwrap();
        assert_eq!(parent.id(), Some("01PARENT"));
        assert_eq!(parent.path(), Some("/drive/root:/Documents"));
        assert_eq!(parent.resource().and_then(|r| r.id()), Some("01PARENT"));
        assert!(parent.folder().is_some());
        assert_eq!(item.resource().id(), Some("01BYE5RZ"));
    }

    #[test]
    fn test_folder_detected_from_facet() {
        let item = hydrate(json!({
            "id": "root",
            "name": "root",
            "root": {},
            "folder": { "childCount": 12 }
        }))
        .unwrap();

        assert!(item.is_folder());
        assert_eq!(item.as_folder().map(FolderFacet::child_count), Some(12));
        assert!(item.to_folder().is_some());
        assert!(item.to_file().is_none());
    }

    #[test]
    fn test_deleted_marker_presence() {
        assert!(hydrate(json!({ "id": "1", "deleted": {} })).unwrap().is_deleted());
        assert!(hydrate(json!({ "id": "1", "deleted": null })).unwrap().is_deleted());
        assert!(hydrate(json!({ "id": "1", "deleted": { "state": "deleted" } }))
            .unwrap()
            .is_deleted());
        assert!(!hydrate(json!({ "id": "1" })).unwrap().is_deleted());
    }

    #[test]
    fn test_null_members_are_absent() {
        let item = hydrate(json!({ "id": "1", "name": null, "size": null, "file": null })).unwrap();

        assert_eq!(item.name(), None);
        assert_eq!(item.size(), None);
        assert_eq!(item.as_file(), Some(&FileFacet::default()));
    }

    #[test]
    fn test_embedded_thumbnails() {
        let item = hydrate(json!({
            "id": "1",
            "thumbnails": [
                { "id": "0", "small": { "url": "https://t/s", "width": 48, "height": 48 } }
            ]
        }))
        .unwrap();

        assert_eq!(item.thumbnail_sets().len(), 1);
        assert_eq!(item.thumbnail_sets()[0].id(), 0);
    }

    #[test]
    fn test_missing_id_is_parse_error() {
        let error = hydrate(json!({ "name": "orphan" })).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_string_size_is_parse_error() {
        let error = hydrate(json!({ "id": "1", "size": "100" })).unwrap_err();

        assert!(matches!(error, OneDriveError::ParseError { ref field, .. } if field == "size"));
    }

    #[test]
    fn test_version_without_comma() {
        let facet = FileFacet {
            c_tag: Some("plain".to_string()),
            ..FileFacet::default()
        };
        assert_eq!(facet.version(), Some("plain"));
    }
}
