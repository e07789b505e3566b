//! Tag catalog record.
//!
//! # Invariants
//! - `id` is never nil.
//! - `name` is trimmed and non-empty.
//! - `color`, when set, is a lowercase `#rgb` or `#rrggbb` hex color.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

/// Stable identifier of a catalog tag.
pub type TagId = Uuid;

/// Fixed tag grouping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    /// Role or job title.
    Position,
    /// Personal interest.
    Hobby,
    /// Anything else.
    Other,
}

impl TagCategory {
    /// All categories in display order.
    pub const ALL: [TagCategory; 3] = [Self::Position, Self::Hobby, Self::Other];

    /// Storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Hobby => "hobby",
            Self::Other => "other",
        }
    }

    /// Parses a storage/wire name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "position" => Some(Self::Position),
            "hobby" => Some(Self::Hobby),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Chip color used when a tag has no explicit color.
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Position => "#1976d2",
            Self::Hobby => "#2e7d32",
            Self::Other => "#757575",
        }
    }
}

impl Display for TagCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level tag validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    NilId,
    BlankName,
    InvalidColor(String),
}

impl Display for TagValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "tag id must not be nil"),
            Self::BlankName => write!(f, "tag name must not be blank"),
            Self::InvalidColor(value) => {
                write!(f, "tag color `{value}` is not a #rgb or #rrggbb hex color")
            }
        }
    }
}

impl Error for TagValidationError {}

/// Canonical catalog tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub category: TagCategory,
    pub color: Option<String>,
}

impl Tag {
    /// Builds a tag with a fresh id from a normalized draft.
    pub fn from_draft(draft: TagDraft) -> Result<Self, TagValidationError> {
        let draft = draft.normalized()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name,
            category: draft.category,
            color: draft.color,
        })
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), TagValidationError> {
        if self.id.is_nil() {
            return Err(TagValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(TagValidationError::BlankName);
        }
        if let Some(color) = self.color.as_deref() {
            if !HEX_COLOR_RE.is_match(color) {
                return Err(TagValidationError::InvalidColor(color.to_string()));
            }
        }
        Ok(())
    }

    /// Explicit color, or the category default.
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .unwrap_or_else(|| self.category.default_color())
    }
}

/// User-editable tag fields, as entered in tag management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub name: String,
    pub category: TagCategory,
    pub color: Option<String>,
}

impl TagDraft {
    pub fn new(name: impl Into<String>, category: TagCategory) -> Self {
        Self {
            name: name.into(),
            category,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Trims the name and normalizes the color.
    ///
    /// A blank color means "no color".
    pub fn normalized(&self) -> Result<TagDraft, TagValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TagValidationError::BlankName);
        }
        let color = match self.color.as_deref() {
            Some(value) => normalize_color(value)?,
            None => None,
        };
        Ok(TagDraft {
            name: name.to_string(),
            category: self.category,
            color,
        })
    }
}

/// Normalizes one color input to lowercase hex, `None` when blank.
pub fn normalize_color(value: &str) -> Result<Option<String>, TagValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !HEX_COLOR_RE.is_match(trimmed) {
        return Err(TagValidationError::InvalidColor(trimmed.to_string()));
    }
    Ok(Some(trimmed.to_ascii_lowercase()))
}
