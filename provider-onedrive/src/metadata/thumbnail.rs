use serde_json::Value;
use std::fmt;

use super::{
    parse_members, parse_nested, value, Hydrate, HydrateContext, JsonObject, ResourceFields,
};
use crate::error::{OneDriveError, Result};

/// Rendition sizes the service generates for every set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailSize {
    Small,
    Medium,
    Large,
}

impl ThumbnailSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailSize::Small => "small",
            ThumbnailSize::Medium => "medium",
            ThumbnailSize::Large => "large",
        }
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendition of an item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    url: Option<String>,
    width: Option<u64>,
    height: Option<u64>,
}

impl Thumbnail {
    pub fn from_json(json: &JsonObject) -> Result<Self> {
        let mut thumbnail = Thumbnail::default();
        parse_members(json, |name, value| thumbnail.parse_member(name, value))?;
        Ok(thumbnail)
    }

    fn from_value(field: &str, value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        let mut thumbnail = Thumbnail::default();
        parse_nested(field, value, |name, value| thumbnail.parse_member(name, value))?;
        Ok(Some(thumbnail))
    }

    fn parse_member(&mut self, name: &str, value: &Value) -> Result<()> {
        match name {
            "url" => self.url = value::string(name, value)?,
            "width" => self.width = value::unsigned(name, value)?,
            "height" => self.height = value::unsigned(name, value)?,
            _ => {}
        }
        Ok(())
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn width(&self) -> Option<u64> {
        self.width
    }

    pub fn height(&self) -> Option<u64> {
        self.height
    }
}

/// The renditions generated for one item
#[derive(Debug, Clone)]
pub struct ThumbnailSetMetadata {
    id: u32,
    small: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    large: Option<Thumbnail>,
    source: Option<Thumbnail>,
}

impl ThumbnailSetMetadata {
    pub(crate) fn from_json(json: &JsonObject) -> Result<Self> {
        let mut resource = ResourceFields::new(json);
        let mut small = None;
        let mut medium = None;
        let mut large = None;
        let mut source = None;

        parse_members(json, |name, value| {
            resource.parse_member(name, value)?;
            match name {
                "small" => small = Thumbnail::from_value(name, value)?,
                "medium" => medium = Thumbnail::from_value(name, value)?,
                "large" => large = Thumbnail::from_value(name, value)?,
                "source" => source = Thumbnail::from_value(name, value)?,
                _ => {}
            }
            Ok(())
        })?;

        // Set ids arrive as numeric strings ("0")
        let raw_id = value::required("id", resource.id)?;
        let id = raw_id.parse().map_err(|_| {
            OneDriveError::parse("id", format!("expected numeric set id, found '{}'", raw_id))
        })?;

        Ok(Self {
            id,
            small,
            medium,
            large,
            source,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn get(&self, size: ThumbnailSize) -> Option<&Thumbnail> {
        match size {
            ThumbnailSize::Small => self.small.as_ref(),
            ThumbnailSize::Medium => self.medium.as_ref(),
            ThumbnailSize::Large => self.large.as_ref(),
        }
    }

    /// Original-resolution rendition, present only when requested explicitly
    pub fn source(&self) -> Option<&Thumbnail> {
        self.source.as_ref()
    }
}

impl Hydrate for ThumbnailSetMetadata {
    fn hydrate(json: &JsonObject, _context: &HydrateContext) -> Result<Self> {
        Self::from_json(json)
    }
}
