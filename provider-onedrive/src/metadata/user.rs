use super::{parse_members, value, Hydrate, HydrateContext, JsonObject, ResourceFields};
use crate::error::Result;

/// Profile of the signed-in (or addressed) user
#[derive(Debug, Clone)]
pub struct UserMetadata {
    id: Option<String>,
    display_name: Option<String>,
    given_name: Option<String>,
    surname: Option<String>,
    user_principal_name: Option<String>,
    mail: Option<String>,
    raw: JsonObject,
}

impl UserMetadata {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    pub fn user_principal_name(&self) -> Option<&str> {
        self.user_principal_name.as_deref()
    }

    pub fn mail(&self) -> Option<&str> {
        self.mail.as_deref()
    }

    pub fn raw(&self) -> &JsonObject {
        &self.raw
    }
}

impl Hydrate for UserMetadata {
    fn hydrate(json: &JsonObject, _context: &HydrateContext) -> Result<Self> {
        let mut resource = ResourceFields::new(json);
        let mut display_name = None;
        let mut given_name = None;
        let mut surname = None;
        let mut user_principal_name = None;
        let mut mail = None;

        parse_members(json, |name, value| {
            resource.parse_member(name, value)?;
            match name {
                "displayName" => display_name = value::string(name, value)?,
                "givenName" => given_name = value::string(name, value)?,
                "surname" => surname = value::string(name, value)?,
                "userPrincipalName" => user_principal_name = value::string(name, value)?,
                "mail" => mail = value::string(name, value)?,
                _ => {}
            }
            Ok(())
        })?;

        Ok(Self {
            id: resource.id,
            display_name,
            given_name,
            surname,
            user_principal_name,
            mail,
            raw: resource.raw,
        })
    }
}
