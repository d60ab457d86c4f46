use serde_json::Value;
use std::fmt;

use super::{
    parse_members, value, FolderReference, Hydrate, HydrateContext, IdentitySet, JsonObject,
    ResourceFields,
};
use crate::error::Result;
use crate::permission::Permission;
use crate::reference::ResourceRef;

/// Kind of sharing link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharingLinkType {
    View,
    Edit,
    Embed,
    Other(String),
}

impl SharingLinkType {
    pub fn as_str(&self) -> &str {
        match self {
            SharingLinkType::View => "view",
            SharingLinkType::Edit => "edit",
            SharingLinkType::Embed => "embed",
            SharingLinkType::Other(other) => other,
        }
    }

    fn parse(s: &str) -> Self {
        match s {
            "view" => SharingLinkType::View,
            "edit" => SharingLinkType::Edit,
            "embed" => SharingLinkType::Embed,
            other => SharingLinkType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SharingLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharingLink {
    link_type: Option<SharingLinkType>,
    scope: Option<String>,
    web_url: Option<String>,
    application: Option<IdentitySet>,
}

impl SharingLink {
    pub fn from_json(json: &JsonObject) -> Result<Self> {
        let mut link = SharingLink::default();
        parse_members(json, |name, value| {
            match name {
                "type" => {
                    link.link_type = value::string(name, value)?
                        .as_deref()
                        .map(SharingLinkType::parse)
                }
                "scope" => link.scope = value::string(name, value)?,
                "webUrl" => link.web_url = value::string(name, value)?,
                "application" => link.application = IdentitySet::from_value(name, value)?,
                _ => {}
            }
            Ok(())
        })?;
        Ok(link)
    }

    fn from_value(field: &str, value: &Value) -> Result<Option<Self>> {
        value::object(field, value)?.map(SharingLink::from_json).transpose()
    }

    pub fn link_type(&self) -> Option<&SharingLinkType> {
        self.link_type.as_ref()
    }

    /// `anonymous` or `organization`
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn web_url(&self) -> Option<&str> {
        self.web_url.as_deref()
    }

    /// The application that created the link
    pub fn application(&self) -> Option<&IdentitySet> {
        self.application.as_ref()
    }
}

/// Details of a sharing invitation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invitation {
    email: Option<String>,
    sign_in_required: Option<bool>,
    invited_by: Option<IdentitySet>,
}

impl Invitation {
    pub fn from_json(json: &JsonObject) -> Result<Self> {
        let mut invitation = Invitation::default();
        parse_members(json, |name, value| {
            match name {
                "email" => invitation.email = value::string(name, value)?,
                "signInRequired" => invitation.sign_in_required = value::boolean(name, value)?,
                "invitedBy" => invitation.invited_by = IdentitySet::from_value(name, value)?,
                _ => {}
            }
            Ok(())
        })?;
        Ok(invitation)
    }

    fn from_value(field: &str, value: &Value) -> Result<Option<Self>> {
        value::object(field, value)?.map(Invitation::from_json).transpose()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn sign_in_required(&self) -> Option<bool> {
        self.sign_in_required
    }

    pub fn invited_by(&self) -> Option<&IdentitySet> {
        self.invited_by.as_ref()
    }
}

/// A permission granted on an item
#[derive(Debug, Clone)]
pub struct PermissionMetadata {
    id: String,
    roles: Vec<String>,
    link: Option<SharingLink>,
    invitation: Option<Invitation>,
    granted_to: Option<IdentitySet>,
    inherited_from: Option<FolderReference>,
    share_id: Option<String>,
    item: ResourceRef,
    raw: JsonObject,
}

impl PermissionMetadata {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `read`, `write`, `owner`, ...
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn writable(&self) -> bool {
        self.roles.iter().any(|role| role.eq_ignore_ascii_case("write"))
    }

    pub fn link(&self) -> Option<&SharingLink> {
        self.link.as_ref()
    }

    pub fn invitation(&self) -> Option<&Invitation> {
        self.invitation.as_ref()
    }

    pub fn granted_to(&self) -> Option<&IdentitySet> {
        self.granted_to.as_ref()
    }

    /// Ancestor the permission is inherited from, if any
    pub fn inherited_from(&self) -> Option<&FolderReference> {
        self.inherited_from.as_ref()
    }

    pub fn share_id(&self) -> Option<&str> {
        self.share_id.as_deref()
    }

    /// The item the permission applies to
    pub fn item(&self) -> &ResourceRef {
        &self.item
    }

    /// Handle for acting on this permission
    pub fn permission(&self) -> Permission {
        Permission::new(self.item.clone(), self.id.clone())
    }

    pub fn raw(&self) -> &JsonObject {
        &self.raw
    }
}

impl Hydrate for PermissionMetadata {
    fn hydrate(json: &JsonObject, context: &HydrateContext) -> Result<Self> {
        let mut resource = ResourceFields::new(json);
        let mut roles = Vec::new();
        let mut link = None;
        let mut invitation = None;
        let mut granted_to = None;
        let mut inherited_from = None;
        let mut share_id = None;

        parse_members(json, |name, value| {
            resource.parse_member(name, value)?;
            match name {
                "roles" => {
                    roles = match value::array(name, value)? {
                        Some(items) => items
                            .iter()
                            .filter_map(|role| value::string(name, role).transpose())
                            .collect::<Result<_>>()?,
                        None => Vec::new(),
                    }
                }
                "link" => link = SharingLink::from_value(name, value)?,
                "invitation" => invitation = Invitation::from_value(name, value)?,
                "grantedTo" => granted_to = IdentitySet::from_value(name, value)?,
                "inheritedFrom" => {
                    inherited_from = FolderReference::from_value(name, value, context)?
                }
                "shareId" => share_id = value::string(name, value)?,
                _ => {}
            }
            Ok(())
        })?;

        Ok(Self {
            id: value::required("id", resource.id)?,
            roles,
            link,
            invitation,
            granted_to,
            inherited_from,
            share_id,
            item: context.owner().clone(),
            raw: resource.raw,
        })
    }
}
