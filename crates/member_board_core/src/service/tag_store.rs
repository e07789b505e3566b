//! Tag catalog store.
//!
//! # Invariants
//! - Tag ids are generated here and never supplied by callers.
//! - Deleting a tag detaches it from every member.

use crate::model::tag::{Tag, TagCategory, TagDraft, TagId, TagValidationError};
use crate::repo::tag_repo::TagRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from tag catalog operations.
#[derive(Debug)]
pub enum TagStoreError {
    Validation(TagValidationError),
    TagNotFound(TagId),
    Repo(RepoError),
}

impl Display for TagStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TagNotFound(id) => write!(f, "tag not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TagStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::TagNotFound(_) => None,
        }
    }
}

impl From<TagValidationError> for TagStoreError {
    fn from(value: TagValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TagStoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TagNotFound(id) => Self::TagNotFound(id),
            RepoError::TagValidation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Catalog facade over a tag repository.
pub struct TagStore<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a tag with a generated id.
    pub fn add(&self, draft: &TagDraft) -> Result<Tag, TagStoreError> {
        let tag = Tag::from_draft(draft.clone())?;
        self.repo.create_tag(&tag)?;
        info!(
            "event=tag_add module=store status=ok tag_id={} category={}",
            tag.id, tag.category
        );
        Ok(tag)
    }

    /// Replaces name, category and color of an existing tag.
    pub fn update(&self, id: TagId, draft: &TagDraft) -> Result<Tag, TagStoreError> {
        let draft = draft.normalized()?;
        let tag = Tag {
            id,
            name: draft.name,
            category: draft.category,
            color: draft.color,
        };
        self.repo.update_tag(&tag)?;
        info!("event=tag_update module=store status=ok tag_id={id}");
        Ok(tag)
    }

    /// Deletes a tag; returns how many members lost it.
    pub fn delete(&self, id: TagId) -> Result<usize, TagStoreError> {
        let detached = self.repo.delete_tag(id)?;
        info!("event=tag_delete module=store status=ok tag_id={id} detached_members={detached}");
        Ok(detached)
    }

    pub fn get(&self, id: TagId) -> Result<Option<Tag>, TagStoreError> {
        Ok(self.repo.get_tag(id)?)
    }

    /// Full catalog in creation order.
    pub fn list(&self) -> Result<Vec<Tag>, TagStoreError> {
        Ok(self.repo.list_tags()?)
    }

    /// Catalog grouped by category; every category is present, possibly empty.
    pub fn by_category(&self) -> Result<Vec<(TagCategory, Vec<Tag>)>, TagStoreError> {
        Ok(group_by_category(self.list()?))
    }
}

/// Groups tags by category in `TagCategory::ALL` order, keeping input order
/// within each group.
pub fn group_by_category(tags: Vec<Tag>) -> Vec<(TagCategory, Vec<Tag>)> {
    let mut groups: Vec<(TagCategory, Vec<Tag>)> = TagCategory::ALL
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();
    for tag in tags {
        if let Some((_, bucket)) = groups
            .iter_mut()
            .find(|(category, _)| *category == tag.category)
        {
            bucket.push(tag);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::group_by_category;
    use crate::model::tag::{Tag, TagCategory, TagDraft};

    #[test]
    fn group_by_category_keeps_all_sections_in_order() {
        let chess = Tag::from_draft(TagDraft::new("Chess", TagCategory::Hobby)).unwrap();
        let lead = Tag::from_draft(TagDraft::new("Lead", TagCategory::Position)).unwrap();
        let hiking = Tag::from_draft(TagDraft::new("Hiking", TagCategory::Hobby)).unwrap();

        let groups = group_by_category(vec![chess.clone(), lead.clone(), hiking.clone()]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], (TagCategory::Position, vec![lead]));
        assert_eq!(groups[1], (TagCategory::Hobby, vec![chess, hiking]));
        assert_eq!(groups[2], (TagCategory::Other, Vec::new()));
    }
}
