//! Tag catalog management overlay.
//!
//! The overlay owns one draft: either a new tag or an edit of an existing
//! one. Saving validates the draft and emits the matching action.

use crate::model::tag::{Tag, TagCategory, TagDraft, TagId, TagValidationError};
use crate::service::tag_store::group_by_category;
use crate::ui::TagChip;

/// Actions the overlay emits towards the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEditorAction {
    Add(TagDraft),
    Update(TagId, TagDraft),
}

/// One catalog row with its per-tag actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub chip: TagChip,
    /// Row is the one currently loaded into the draft.
    pub editing: bool,
}

/// Catalog rows of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSection {
    pub category: TagCategory,
    pub rows: Vec<TagRow>,
}

/// Rendered tag management overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagManagementModel {
    pub sections: Vec<TagSection>,
    pub editing: Option<TagId>,
    pub draft_name: String,
    pub draft_category: TagCategory,
    pub draft_color: String,
    pub error: Option<TagValidationError>,
}

/// Tag management state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagManagementView {
    open: bool,
    editing: Option<TagId>,
    name: String,
    category: TagCategory,
    color: String,
    error: Option<TagValidationError>,
}

impl Default for TagManagementView {
    fn default() -> Self {
        Self {
            open: false,
            editing: None,
            name: String::new(),
            category: TagCategory::Position,
            color: String::new(),
            error: None,
        }
    }
}

impl TagManagementView {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the overlay and drops the draft.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<TagId> {
        self.editing
    }

    /// Loads an existing tag into the draft.
    pub fn begin_edit(&mut self, tag: &Tag) {
        self.editing = Some(tag.id);
        self.name = tag.name.clone();
        self.category = tag.category;
        self.color = tag.color.clone().unwrap_or_default();
        self.error = None;
    }

    /// Returns the draft to "new tag" with empty fields.
    pub fn reset_draft(&mut self) {
        let open = self.open;
        *self = Self {
            open,
            ..Self::default()
        };
    }

    /// Resets the draft when it was editing a tag that no longer exists.
    pub fn forget(&mut self, tag_id: TagId) {
        if self.editing == Some(tag_id) {
            self.reset_draft();
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
        if self.error == Some(TagValidationError::BlankName) {
            self.error = None;
        }
    }

    pub fn set_category(&mut self, category: TagCategory) {
        self.category = category;
    }

    pub fn set_color(&mut self, color: String) {
        self.color = color;
        if matches!(self.error, Some(TagValidationError::InvalidColor(_))) {
            self.error = None;
        }
    }

    pub fn error(&self) -> Option<&TagValidationError> {
        self.error.as_ref()
    }

    /// Validates the draft and returns the action to apply.
    pub fn save(&mut self) -> Option<TagEditorAction> {
        if !self.open {
            return None;
        }
        let draft = TagDraft {
            name: self.name.clone(),
            category: self.category,
            color: Some(self.color.clone()),
        };
        match draft.normalized() {
            Ok(draft) => {
                self.error = None;
                Some(match self.editing {
                    Some(id) => TagEditorAction::Update(id, draft),
                    None => TagEditorAction::Add(draft),
                })
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    /// Renders the overlay; `None` when closed.
    pub fn render(&self, catalog: &[Tag]) -> Option<TagManagementModel> {
        if !self.open {
            return None;
        }
        let sections = group_by_category(catalog.to_vec())
            .into_iter()
            .map(|(category, tags)| TagSection {
                category,
                rows: tags
                    .iter()
                    .map(|tag| TagRow {
                        chip: TagChip::from_tag(tag),
                        editing: self.editing == Some(tag.id),
                    })
                    .collect(),
            })
            .collect();
        Some(TagManagementModel {
            sections,
            editing: self.editing,
            draft_name: self.name.clone(),
            draft_category: self.category,
            draft_color: self.color.clone(),
            error: self.error.clone(),
        })
    }
}
