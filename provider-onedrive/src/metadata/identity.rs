use serde_json::Value;

use super::{parse_members, parse_nested, value, JsonObject};
use crate::error::Result;

/// A user, application or device acting on a resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    id: Option<String>,
    display_name: Option<String>,
    email: Option<String>,
}

impl Identity {
    pub(crate) fn from_value(field: &str, value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        let mut identity = Identity::default();
        parse_nested(field, value, |name, value| {
            match name {
                "id" => identity.id = value::string(name, value)?,
                "displayName" => identity.display_name = value::string(name, value)?,
                "email" => identity.email = value::string(name, value)?,
                _ => {}
            }
            Ok(())
        })?;
        Ok(Some(identity))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Only reported by the business endpoint
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// The identities associated with an action (`createdBy`, `grantedTo`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySet {
    user: Option<Identity>,
    application: Option<Identity>,
    device: Option<Identity>,
}

impl IdentitySet {
    pub fn from_json(json: &JsonObject) -> Result<Self> {
        let mut set = IdentitySet::default();
        parse_members(json, |name, value| set.parse_member(name, value))?;
        Ok(set)
    }

    pub(crate) fn from_value(field: &str, value: &Value) -> Result<Option<Self>> {
        value::object(field, value)?
            .map(IdentitySet::from_json)
            .transpose()
    }

    fn parse_member(&mut self, name: &str, value: &Value) -> Result<()> {
        match name {
            "user" => self.user = Identity::from_value(name, value)?,
            "application" => self.application = Identity::from_value(name, value)?,
            "device" => self.device = Identity::from_value(name, value)?,
            _ => {}
        }
        Ok(())
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    pub fn application(&self) -> Option<&Identity> {
        self.application.as_ref()
    }

    pub fn device(&self) -> Option<&Identity> {
        self.device.as_ref()
    }
}
