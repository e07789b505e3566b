//! Root composer: stores, overlays and event dispatch.
//!
//! # Responsibility
//! - Own the member store, the tag store and every view model for one
//!   session.
//! - Apply `AppEvent`s in dispatch order and wire view actions to store
//!   operations.
//!
//! # Invariants
//! - Opening one overlay never closes another, except edit-from-detail,
//!   which closes detail and opens the form.
//! - Edit and delete act only through an open detail overlay.
//! - Events aimed at a member, tag or list position that no longer exists
//!   are logged and ignored.
//! - Validation failures stay inside the overlay that produced them.

use crate::model::member::MemberId;
use crate::model::tag::{TagCategory, TagId};
use crate::repo::member_repo::SqliteMemberRepository;
use crate::repo::tag_repo::SqliteTagRepository;
use crate::repo::RepoError;
use crate::service::member_store::{MemberStore, MemberStoreError};
use crate::service::tag_store::{TagStore, TagStoreError};
use crate::ui::detail_view::{DetailModel, MemberDetailView};
use crate::ui::form_view::{FormField, FormModel, MemberFormView};
use crate::ui::list_view::{ListAction, MemberCard, MemberListView};
use crate::ui::tag_view::{TagEditorAction, TagManagementModel, TagManagementView};
use log::{debug, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User interactions, in the order the front end observed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    MemberClicked(MemberId),
    DragStarted(usize),
    DroppedAt(usize),
    DragCancelled,
    AddMemberClicked,
    EditRequested,
    DeleteRequested,
    DetailClosed,
    FormFieldChanged(FormField, String),
    FormTagToggled(TagId),
    FormSubmitted,
    FormClosed,
    TagManagementOpened,
    TagManagementClosed,
    TagDraftNameChanged(String),
    TagDraftCategoryChanged(TagCategory),
    TagDraftColorChanged(String),
    TagEditRequested(TagId),
    TagDraftReset,
    TagSaved,
    TagDeleteRequested(TagId),
}

/// Failures the composer cannot downgrade to a no-op.
#[derive(Debug)]
pub enum AppError {
    Member(MemberStoreError),
    Tag(TagStoreError),
    Repo(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member(err) => write!(f, "{err}"),
            Self::Tag(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Member(err) => Some(err),
            Self::Tag(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<MemberStoreError> for AppError {
    fn from(value: MemberStoreError) -> Self {
        Self::Member(value)
    }
}

impl From<TagStoreError> for AppError {
    fn from(value: TagStoreError) -> Self {
        Self::Tag(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Everything currently visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub cards: Vec<MemberCard>,
    pub dragging: Option<usize>,
    pub detail: Option<DetailModel>,
    pub form: Option<FormModel>,
    pub tag_management: Option<TagManagementModel>,
}

/// Session composer bound to one migrated connection.
pub struct App<'conn> {
    members: MemberStore<SqliteMemberRepository<'conn>>,
    tags: TagStore<SqliteTagRepository<'conn>>,
    list_view: MemberListView,
    detail_view: MemberDetailView,
    form_view: MemberFormView,
    tag_view: TagManagementView,
}

impl<'conn> App<'conn> {
    /// Builds the stores on `conn` with every overlay closed.
    pub fn new(conn: &'conn Connection) -> Result<Self, AppError> {
        Ok(Self {
            members: MemberStore::new(SqliteMemberRepository::try_new(conn)?),
            tags: TagStore::new(SqliteTagRepository::try_new(conn)?),
            list_view: MemberListView::default(),
            detail_view: MemberDetailView::default(),
            form_view: MemberFormView::default(),
            tag_view: TagManagementView::default(),
        })
    }

    pub fn members(&self) -> &MemberStore<SqliteMemberRepository<'conn>> {
        &self.members
    }

    pub fn tags(&self) -> &TagStore<SqliteTagRepository<'conn>> {
        &self.tags
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_view.is_open()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_view.is_open()
    }

    pub fn is_tag_management_open(&self) -> bool {
        self.tag_view.is_open()
    }

    /// Applies one user event.
    pub fn dispatch(&mut self, event: AppEvent) -> Result<(), AppError> {
        debug!("event=ui_dispatch module=app kind={}", event_name(&event));
        match event {
            AppEvent::MemberClicked(id) => self.on_member_clicked(id),
            AppEvent::DragStarted(index) => {
                let len = self.members.len()?;
                self.list_view.begin_drag(index, len);
                Ok(())
            }
            AppEvent::DroppedAt(index) => self.on_dropped(index),
            AppEvent::DragCancelled => {
                self.list_view.cancel_drag();
                Ok(())
            }
            AppEvent::AddMemberClicked => {
                self.form_view.open_create();
                Ok(())
            }
            AppEvent::EditRequested => self.on_edit_requested(),
            AppEvent::DeleteRequested => self.on_delete_requested(),
            AppEvent::DetailClosed => {
                self.detail_view.close();
                self.members.select(None)?;
                Ok(())
            }
            AppEvent::FormFieldChanged(field, value) => {
                self.form_view.set_field(field, value);
                Ok(())
            }
            AppEvent::FormTagToggled(tag_id) => {
                self.form_view.toggle_tag(tag_id);
                Ok(())
            }
            AppEvent::FormSubmitted => self.on_form_submitted(),
            AppEvent::FormClosed => {
                self.form_view.close();
                Ok(())
            }
            AppEvent::TagManagementOpened => {
                self.tag_view.open();
                Ok(())
            }
            AppEvent::TagManagementClosed => {
                self.tag_view.close();
                Ok(())
            }
            AppEvent::TagDraftNameChanged(name) => {
                self.tag_view.set_name(name);
                Ok(())
            }
            AppEvent::TagDraftCategoryChanged(category) => {
                self.tag_view.set_category(category);
                Ok(())
            }
            AppEvent::TagDraftColorChanged(color) => {
                self.tag_view.set_color(color);
                Ok(())
            }
            AppEvent::TagEditRequested(id) => self.on_tag_edit_requested(id),
            AppEvent::TagDraftReset => {
                self.tag_view.reset_draft();
                Ok(())
            }
            AppEvent::TagSaved => self.on_tag_saved(),
            AppEvent::TagDeleteRequested(id) => self.on_tag_delete_requested(id),
        }
    }

    /// Renders every visible surface.
    pub fn screen(&self) -> Result<Screen, AppError> {
        let members = self.members.list()?;
        let catalog = self.tags.list()?;
        let selected = self.members.selected()?;
        Ok(Screen {
            cards: MemberListView::cards(&members),
            dragging: self.list_view.dragging(),
            detail: self.detail_view.render(selected.as_ref()),
            form: self.form_view.render(&catalog),
            tag_management: self.tag_view.render(&catalog),
        })
    }

    /// List action for a click at `index`, as the list view would emit it.
    pub fn click_at(&self, index: usize) -> Result<Option<AppEvent>, AppError> {
        let members = self.members.list()?;
        Ok(match self.list_view.click(&members, index) {
            Some(ListAction::Select(id)) => Some(AppEvent::MemberClicked(id)),
            _ => None,
        })
    }

    fn on_member_clicked(&mut self, id: MemberId) -> Result<(), AppError> {
        if tolerate_missing(self.members.select(Some(id)), "member_click")?.is_some() {
            self.detail_view.open();
        }
        Ok(())
    }

    fn on_dropped(&mut self, index: usize) -> Result<(), AppError> {
        let len = self.members.len()?;
        if let Some(ListAction::Reorder { from, to }) = self.list_view.drop_at(index, len) {
            tolerate_missing(self.members.reorder(from, to), "member_reorder")?;
        }
        Ok(())
    }

    fn on_edit_requested(&mut self) -> Result<(), AppError> {
        if !self.detail_view.is_open() {
            debug!("event=member_edit module=app status=ignored reason=detail_closed");
            return Ok(());
        }
        let Some(member) = self.members.selected()? else {
            debug!("event=member_edit module=app status=ignored reason=no_selection");
            return Ok(());
        };
        if !member.is_editable {
            debug!(
                "event=member_edit module=app status=ignored reason=read_only member_id={}",
                member.id
            );
            return Ok(());
        }
        self.form_view.open_edit(&member);
        self.detail_view.close();
        Ok(())
    }

    fn on_delete_requested(&mut self) -> Result<(), AppError> {
        if !self.detail_view.is_open() {
            debug!("event=member_delete module=app status=ignored reason=detail_closed");
            return Ok(());
        }
        let Some(member) = self.members.selected()? else {
            debug!("event=member_delete module=app status=ignored reason=no_selection");
            return Ok(());
        };
        if !member.is_editable {
            debug!(
                "event=member_delete module=app status=ignored reason=read_only member_id={}",
                member.id
            );
            return Ok(());
        }
        tolerate_missing(self.members.delete(member.id), "member_delete")?;
        self.detail_view.close();
        if self.form_view.editing() == Some(member.id) {
            self.form_view.close();
        }
        Ok(())
    }

    fn on_form_submitted(&mut self) -> Result<(), AppError> {
        let catalog = self.tags.list()?;
        let Some(data) = self.form_view.submit(&catalog) else {
            return Ok(());
        };

        let result = match self.form_view.editing() {
            Some(id) => self.members.update(id, &data),
            None => self.members.add(&data),
        };
        match result {
            Ok(_) => {
                self.form_view.close();
                Ok(())
            }
            Err(err @ (MemberStoreError::MemberNotFound(_) | MemberStoreError::NotEditable(_))) => {
                warn!("event=member_save module=app status=ignored error={err}");
                self.form_view.close();
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn on_tag_edit_requested(&mut self, id: TagId) -> Result<(), AppError> {
        match self.tags.get(id)? {
            Some(tag) => self.tag_view.begin_edit(&tag),
            None => warn!("event=tag_edit module=app status=ignored reason=not_found tag_id={id}"),
        }
        Ok(())
    }

    fn on_tag_saved(&mut self) -> Result<(), AppError> {
        let Some(action) = self.tag_view.save() else {
            return Ok(());
        };
        let result = match &action {
            TagEditorAction::Add(draft) => self.tags.add(draft),
            TagEditorAction::Update(id, draft) => self.tags.update(*id, draft),
        };
        match result {
            Ok(_) => {}
            Err(TagStoreError::TagNotFound(id)) => {
                warn!("event=tag_save module=app status=ignored reason=not_found tag_id={id}");
            }
            Err(err) => return Err(err.into()),
        }
        self.tag_view.reset_draft();
        Ok(())
    }

    fn on_tag_delete_requested(&mut self, id: TagId) -> Result<(), AppError> {
        match self.tags.delete(id) {
            Ok(_) => {}
            Err(TagStoreError::TagNotFound(_)) => {
                warn!("event=tag_delete module=app status=ignored reason=not_found tag_id={id}");
            }
            Err(err) => return Err(err.into()),
        }
        self.tag_view.forget(id);
        self.form_view.forget_tag(id);
        Ok(())
    }
}

/// Turns "target is gone" into a logged no-op (`Ok(None)`).
fn tolerate_missing<T>(
    result: Result<T, MemberStoreError>,
    operation: &'static str,
) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_missing_target() => {
            warn!("event={operation} module=app status=ignored error={err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn event_name(event: &AppEvent) -> &'static str {
    match event {
        AppEvent::MemberClicked(_) => "member_clicked",
        AppEvent::DragStarted(_) => "drag_started",
        AppEvent::DroppedAt(_) => "dropped_at",
        AppEvent::DragCancelled => "drag_cancelled",
        AppEvent::AddMemberClicked => "add_member_clicked",
        AppEvent::EditRequested => "edit_requested",
        AppEvent::DeleteRequested => "delete_requested",
        AppEvent::DetailClosed => "detail_closed",
        AppEvent::FormFieldChanged(..) => "form_field_changed",
        AppEvent::FormTagToggled(_) => "form_tag_toggled",
        AppEvent::FormSubmitted => "form_submitted",
        AppEvent::FormClosed => "form_closed",
        AppEvent::TagManagementOpened => "tag_management_opened",
        AppEvent::TagManagementClosed => "tag_management_closed",
        AppEvent::TagDraftNameChanged(_) => "tag_draft_name_changed",
        AppEvent::TagDraftCategoryChanged(_) => "tag_draft_category_changed",
        AppEvent::TagDraftColorChanged(_) => "tag_draft_color_changed",
        AppEvent::TagEditRequested(_) => "tag_edit_requested",
        AppEvent::TagDraftReset => "tag_draft_reset",
        AppEvent::TagSaved => "tag_saved",
        AppEvent::TagDeleteRequested(_) => "tag_delete_requested",
    }
}
