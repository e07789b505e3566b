//! Member create/edit form overlay.
//!
//! # Invariants
//! - Opening for create always starts from empty fields.
//! - Opening for edit copies the member's current fields and tags.
//! - Submission is blocked while validation errors remain; the form keeps
//!   its input so the user can correct it.

use crate::model::member::{Member, MemberFormData, MemberId, MemberValidationError};
use crate::model::tag::{Tag, TagId};
use crate::ui::TagChip;

/// Editable text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    ImageUrl,
    /// Embedded image (base64 or `data:` URL).
    ImageData,
    Introduction,
}

/// One entry of the tag multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    pub chip: TagChip,
    pub selected: bool,
}

/// Rendered form overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModel {
    pub editing: Option<MemberId>,
    pub name: String,
    pub image_url: String,
    pub has_image_data: bool,
    pub introduction: String,
    pub tag_options: Vec<TagOption>,
    pub errors: Vec<MemberValidationError>,
}

/// Member form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFormView {
    open: bool,
    editing: Option<MemberId>,
    name: String,
    image_url: String,
    image_data: Option<String>,
    introduction: String,
    selected_tags: Vec<TagId>,
    errors: Vec<MemberValidationError>,
}

impl MemberFormView {
    /// Opens an empty form for a new member.
    pub fn open_create(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    /// Opens the form pre-populated from `member`.
    pub fn open_edit(&mut self, member: &Member) {
        *self = Self {
            open: true,
            editing: Some(member.id),
            name: member.name.clone(),
            image_url: member.image_url.clone(),
            image_data: None,
            introduction: member.introduction.clone(),
            selected_tags: member.tag_ids(),
            errors: Vec::new(),
        };
    }

    /// Closes the form and discards every unsaved change.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Member being edited; `None` in create mode.
    pub fn editing(&self) -> Option<MemberId> {
        self.editing
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => {
                self.name = value;
                self.errors
                    .retain(|err| *err != MemberValidationError::BlankName);
            }
            FormField::ImageUrl => {
                self.image_url = value;
                self.errors
                    .retain(|err| *err != MemberValidationError::MissingImage);
            }
            FormField::ImageData => {
                self.image_data = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                };
                self.errors
                    .retain(|err| *err != MemberValidationError::MissingImage);
            }
            FormField::Introduction => self.introduction = value,
        }
    }

    /// Adds or removes a tag from the selection.
    pub fn toggle_tag(&mut self, tag_id: TagId) {
        if let Some(position) = self.selected_tags.iter().position(|id| *id == tag_id) {
            self.selected_tags.remove(position);
        } else {
            self.selected_tags.push(tag_id);
        }
    }

    /// Drops a tag that left the catalog.
    pub fn forget_tag(&mut self, tag_id: TagId) {
        self.selected_tags.retain(|id| *id != tag_id);
    }

    pub fn selected_tags(&self) -> &[TagId] {
        &self.selected_tags
    }

    pub fn errors(&self) -> &[MemberValidationError] {
        &self.errors
    }

    /// Validates input and returns the payload to save.
    ///
    /// Selected tags missing from `catalog` are dropped. On failure the
    /// errors are kept for display and `None` is returned.
    pub fn submit(&mut self, catalog: &[Tag]) -> Option<MemberFormData> {
        if !self.open {
            return None;
        }

        let tags = self
            .selected_tags
            .iter()
            .filter_map(|id| catalog.iter().find(|tag| tag.id == *id))
            .cloned()
            .collect();
        let data = MemberFormData {
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            introduction: self.introduction.clone(),
            tags,
            image_data: self.image_data.clone(),
        };

        self.errors = data.validation_errors();
        if self.errors.is_empty() {
            Some(data)
        } else {
            None
        }
    }

    /// Renders the form; `None` when closed.
    pub fn render(&self, catalog: &[Tag]) -> Option<FormModel> {
        if !self.open {
            return None;
        }
        let tag_options = catalog
            .iter()
            .map(|tag| TagOption {
                chip: TagChip::from_tag(tag),
                selected: self.selected_tags.contains(&tag.id),
            })
            .collect();
        Some(FormModel {
            editing: self.editing,
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            has_image_data: self.image_data.is_some(),
            introduction: self.introduction.clone(),
            tag_options,
            errors: self.errors.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FormField, MemberFormView};
    use crate::model::member::{Member, MemberValidationError};
    use crate::model::tag::{Tag, TagCategory, TagDraft};
    use uuid::Uuid;

    fn catalog() -> Vec<Tag> {
        vec![
            Tag::from_draft(TagDraft::new("Lead", TagCategory::Position)).unwrap(),
            Tag::from_draft(TagDraft::new("Chess", TagCategory::Hobby)).unwrap(),
        ]
    }

    #[test]
    fn blank_submission_keeps_form_open_with_errors() {
        let mut form = MemberFormView::default();
        form.open_create();

        assert!(form.submit(&catalog()).is_none());
        assert!(form.is_open());
        assert_eq!(
            form.errors(),
            &[
                MemberValidationError::BlankName,
                MemberValidationError::MissingImage
            ]
        );

        form.set_field(FormField::Name, "Aiko".to_string());
        assert_eq!(form.errors(), &[MemberValidationError::MissingImage]);
    }

    #[test]
    fn submit_resolves_selected_tags_against_catalog() {
        let tags = catalog();
        let mut form = MemberFormView::default();
        form.open_create();
        form.set_field(FormField::Name, "Aiko".to_string());
        form.set_field(FormField::ImageUrl, "https://example.com/a.png".to_string());
        form.toggle_tag(tags[1].id);
        form.toggle_tag(tags[0].id);
        form.toggle_tag(Uuid::new_v4());

        let data = form.submit(&tags).unwrap();
        assert_eq!(data.name, "Aiko");
        assert_eq!(data.tags, vec![tags[1].clone(), tags[0].clone()]);
    }

    #[test]
    fn toggling_twice_deselects() {
        let tags = catalog();
        let mut form = MemberFormView::default();
        form.open_create();
        form.toggle_tag(tags[0].id);
        form.toggle_tag(tags[0].id);
        assert!(form.selected_tags().is_empty());
    }

    #[test]
    fn open_edit_prefills_and_close_discards() {
        let tags = catalog();
        let member = Member {
            id: Uuid::new_v4(),
            name: "Aiko".to_string(),
            image_url: "a.png".to_string(),
            introduction: "hello".to_string(),
            tags: vec![tags[0].clone()],
            is_editable: true,
            created_at: 0,
        };
        let mut form = MemberFormView::default();
        form.open_edit(&member);

        let model = form.render(&tags).unwrap();
        assert_eq!(model.editing, Some(member.id));
        assert_eq!(model.name, "Aiko");
        assert!(model.tag_options[0].selected);
        assert!(!model.tag_options[1].selected);

        form.set_field(FormField::Name, "changed".to_string());
        form.close();
        assert!(form.render(&tags).is_none());
        assert_eq!(form.editing(), None);
    }
}
