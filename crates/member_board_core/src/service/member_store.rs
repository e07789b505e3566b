//! Member list store.
//!
//! # Responsibility
//! - Create, edit, delete and reorder members.
//! - Track which member the detail view is bound to.
//!
//! # Invariants
//! - Editing keeps `id`, `is_editable` and `created_at` untouched.
//! - Non-editable members reject updates.
//! - Deleting the selected member clears the selection.
//! - The selection is resolved live, so it never shows stale fields.

use crate::model::member::{Member, MemberFormData, MemberId, MemberValidationError};
use crate::model::tag::TagId;
use crate::repo::member_repo::{MemberDraft, MemberRepository};
use crate::repo::RepoError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from member list operations.
#[derive(Debug)]
pub enum MemberStoreError {
    Validation(MemberValidationError),
    MemberNotFound(MemberId),
    /// Target member is a read-only profile.
    NotEditable(MemberId),
    /// Submitted tag is not in the catalog.
    UnknownTag(TagId),
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    Repo(RepoError),
}

impl MemberStoreError {
    /// Whether the error only means the targeted member or position is gone.
    pub fn is_missing_target(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_) | Self::IndexOutOfRange { .. }
        )
    }
}

impl Display for MemberStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::NotEditable(id) => write!(f, "member is not editable: {id}"),
            Self::UnknownTag(id) => write!(f, "tag is not in the catalog: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "list index {index} out of range for {len} members")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemberStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemberValidationError> for MemberStoreError {
    fn from(value: MemberValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for MemberStoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::MemberNotFound(id) => Self::MemberNotFound(id),
            RepoError::TagNotFound(id) => Self::UnknownTag(id),
            RepoError::MemberValidation(err) => Self::Validation(err),
            RepoError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            other => Self::Repo(other),
        }
    }
}

/// Ordered member list plus the current selection.
pub struct MemberStore<R: MemberRepository> {
    repo: R,
    selected: Option<MemberId>,
}

impl<R: MemberRepository> MemberStore<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            selected: None,
        }
    }

    /// Appends a new editable member.
    pub fn add(&self, data: &MemberFormData) -> Result<Member, MemberStoreError> {
        self.insert(data, true)
    }

    /// Appends a read-only member (seeded showcase profiles).
    pub fn add_fixed(&self, data: &MemberFormData) -> Result<Member, MemberStoreError> {
        self.insert(data, false)
    }

    /// Replaces profile fields and tags of an existing editable member.
    pub fn update(&self, id: MemberId, data: &MemberFormData) -> Result<Member, MemberStoreError> {
        let current = self
            .repo
            .get_member(id)?
            .ok_or(MemberStoreError::MemberNotFound(id))?;
        if !current.is_editable {
            return Err(MemberStoreError::NotEditable(id));
        }

        let draft = MemberDraft::from_form(data);
        draft.validate()?;
        let member = self.repo.update_member(id, &draft)?;
        info!(
            "event=member_update module=store status=ok member_id={} tag_count={}",
            member.id,
            member.tags.len()
        );
        Ok(member)
    }

    /// Removes a member and clears the selection when it pointed at it.
    pub fn delete(&mut self, id: MemberId) -> Result<(), MemberStoreError> {
        self.repo.delete_member(id)?;
        if self.selected == Some(id) {
            self.selected = None;
            debug!("event=member_select module=store status=cleared reason=deleted");
        }
        info!("event=member_delete module=store status=ok member_id={id}");
        Ok(())
    }

    /// Moves the entry at `from_index` to `to_index`.
    pub fn reorder(&self, from_index: usize, to_index: usize) -> Result<(), MemberStoreError> {
        self.repo.move_member(from_index, to_index)?;
        debug!("event=member_reorder module=store status=ok from={from_index} to={to_index}");
        Ok(())
    }

    /// Binds the selection to a member, or clears it with `None`.
    pub fn select(&mut self, id: Option<MemberId>) -> Result<(), MemberStoreError> {
        if let Some(id) = id {
            if self.repo.get_member(id)?.is_none() {
                return Err(MemberStoreError::MemberNotFound(id));
            }
        }
        self.selected = id;
        Ok(())
    }

    pub fn selected_id(&self) -> Option<MemberId> {
        self.selected
    }

    /// Current state of the selected member, `None` when nothing is selected.
    pub fn selected(&self) -> Result<Option<Member>, MemberStoreError> {
        match self.selected {
            Some(id) => Ok(self.repo.get_member(id)?),
            None => Ok(None),
        }
    }

    pub fn get(&self, id: MemberId) -> Result<Option<Member>, MemberStoreError> {
        Ok(self.repo.get_member(id)?)
    }

    /// Members in list order.
    pub fn list(&self) -> Result<Vec<Member>, MemberStoreError> {
        Ok(self.repo.list_members()?)
    }

    pub fn len(&self) -> Result<usize, MemberStoreError> {
        Ok(self.repo.count_members()?)
    }

    pub fn is_empty(&self) -> Result<bool, MemberStoreError> {
        Ok(self.len()? == 0)
    }

    fn insert(&self, data: &MemberFormData, is_editable: bool) -> Result<Member, MemberStoreError> {
        let draft = MemberDraft::from_form(data);
        draft.validate()?;
        let member = self.repo.create_member(&draft, is_editable)?;
        info!(
            "event=member_add module=store status=ok member_id={} editable={} tag_count={}",
            member.id,
            member.is_editable,
            member.tags.len()
        );
        Ok(member)
    }
}
