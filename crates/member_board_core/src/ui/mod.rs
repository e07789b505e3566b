//! Render-agnostic view models.
//!
//! # Responsibility
//! - Hold per-overlay UI state (open flag, drafts, drag gesture).
//! - Turn store records into plain display models that any front end can
//!   draw.
//!
//! # Invariants
//! - Views never touch storage; they emit actions the composer applies.
//! - A closed overlay renders as `None`.

pub mod detail_view;
pub mod form_view;
pub mod list_view;
pub mod tag_view;

use crate::model::member::{classify_image, ImageSource};
use crate::model::tag::{Tag, TagId};

/// Colored tag label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub tag_id: TagId,
    pub label: String,
    /// Background color; the explicit tag color or its category default.
    pub color: String,
}

impl TagChip {
    pub fn from_tag(tag: &Tag) -> Self {
        Self {
            tag_id: tag.id,
            label: tag.name.clone(),
            color: tag.display_color().to_string(),
        }
    }
}

/// Owned image rendering hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    Url(String),
    Embedded { media_type: String, data_url: String },
}

impl ImagePreview {
    pub fn from_reference(reference: &str) -> Self {
        match classify_image(reference) {
            ImageSource::Url(url) => Self::Url(url.to_string()),
            ImageSource::Embedded { media_type } => Self::Embedded {
                media_type: media_type.to_string(),
                data_url: reference.to_string(),
            },
        }
    }
}

fn chips(tags: &[Tag]) -> Vec<TagChip> {
    tags.iter().map(TagChip::from_tag).collect()
}
