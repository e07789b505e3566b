//! Member profile record and form payload.
//!
//! # Responsibility
//! - Define the `Member` read model exposed to views.
//! - Define `MemberFormData`, the subset a form submits; identity,
//!   editability and timestamps stay store-managed.
//!
//! # Invariants
//! - `id` is stable and never reused for another member.
//! - `created_at` is assigned once at creation and never rewritten.
//! - `tags` holds no duplicate tag ids.

use crate::model::tag::{Tag, TagId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,").expect("valid data url regex")
});

/// Stable identifier of a member.
pub type MemberId = Uuid;

/// Member profile as shown by list, detail and form views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// URL or `data:` URL; passed through untouched.
    pub image_url: String,
    pub introduction: String,
    /// Catalog tags in the order they were selected.
    pub tags: Vec<Tag>,
    /// Seeded showcase profiles are read-only.
    pub is_editable: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Member {
    /// Classifies the image reference for rendering.
    pub fn image_source(&self) -> ImageSource<'_> {
        classify_image(&self.image_url)
    }

    /// Tag ids in display order.
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|tag| tag.id).collect()
    }

    /// Form payload pre-populated from this member.
    pub fn to_form_data(&self) -> MemberFormData {
        MemberFormData {
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            introduction: self.introduction.clone(),
            tags: self.tags.clone(),
            image_data: None,
        }
    }
}

/// Fields collected by the member form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFormData {
    pub name: String,
    pub image_url: String,
    pub introduction: String,
    pub tags: Vec<Tag>,
    /// Embedded image (base64 or `data:` URL); wins over `image_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl MemberFormData {
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
            ..Self::default()
        }
    }

    pub fn with_introduction(mut self, introduction: impl Into<String>) -> Self {
        self.introduction = introduction.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Image reference that will be stored for the member.
    pub fn effective_image(&self) -> &str {
        match self.image_data.as_deref() {
            Some(data) if !data.trim().is_empty() => data.trim(),
            _ => self.image_url.trim(),
        }
    }

    /// Tag ids in submitted order, first occurrence wins.
    pub fn unique_tag_ids(&self) -> Vec<TagId> {
        let mut seen = HashSet::new();
        self.tags
            .iter()
            .map(|tag| tag.id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Returns every field-level failure, in field order.
    pub fn validation_errors(&self) -> Vec<MemberValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(MemberValidationError::BlankName);
        }
        if self.effective_image().is_empty() {
            errors.push(MemberValidationError::MissingImage);
        }
        errors
    }

    /// Returns the first field-level failure, if any.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        match self.validation_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Field-level member validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberValidationError {
    BlankName,
    MissingImage,
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name is required"),
            Self::MissingImage => write!(f, "an image URL or image data is required"),
        }
    }
}

impl Error for MemberValidationError {}

/// How an image reference should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Remote or relative URL.
    Url(&'a str),
    /// Inline `data:` URL with its media type.
    Embedded { media_type: &'a str },
}

/// Classifies an image reference without decoding it.
pub fn classify_image(reference: &str) -> ImageSource<'_> {
    match DATA_URL_RE
        .captures(reference)
        .and_then(|caps| caps.get(1))
    {
        Some(media_type) => ImageSource::Embedded {
            media_type: media_type.as_str(),
        },
        None => ImageSource::Url(reference),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_image, ImageSource, MemberFormData, MemberValidationError};
    use crate::model::tag::{Tag, TagCategory, TagDraft};

    #[test]
    fn classify_image_detects_data_urls() {
        assert_eq!(
            classify_image("data:image/png;base64,iVBORw0KGgo="),
            ImageSource::Embedded {
                media_type: "image/png"
            }
        );
        assert_eq!(
            classify_image("https://example.com/a.jpg"),
            ImageSource::Url("https://example.com/a.jpg")
        );
    }

    #[test]
    fn image_data_takes_precedence_over_url() {
        let mut data = MemberFormData::new("Aiko", "https://example.com/a.jpg");
        data.image_data = Some("data:image/jpeg;base64,/9j/".to_string());
        assert_eq!(data.effective_image(), "data:image/jpeg;base64,/9j/");

        data.image_data = Some("   ".to_string());
        assert_eq!(data.effective_image(), "https://example.com/a.jpg");
    }

    #[test]
    fn validation_reports_every_missing_field() {
        let data = MemberFormData::new("  ", "");
        assert_eq!(
            data.validation_errors(),
            vec![
                MemberValidationError::BlankName,
                MemberValidationError::MissingImage
            ]
        );
        assert_eq!(data.validate(), Err(MemberValidationError::BlankName));
    }

    #[test]
    fn unique_tag_ids_keeps_first_occurrence_order() {
        let lead = Tag::from_draft(TagDraft::new("Lead", TagCategory::Position)).unwrap();
        let chess = Tag::from_draft(TagDraft::new("Chess", TagCategory::Hobby)).unwrap();
        let data = MemberFormData::new("Aiko", "a.png").with_tags(vec![
            chess.clone(),
            lead.clone(),
            chess.clone(),
        ]);
        assert_eq!(data.unique_tag_ids(), vec![chess.id, lead.id]);
    }
}
