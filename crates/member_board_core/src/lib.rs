//! Core of the member board: profiles, tag catalog and the view models
//! that present them.
//! Front ends drive everything through [`App::dispatch`].

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod ui;

pub use app::{App, AppError, AppEvent, Screen};
pub use config::SessionConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::member::{
    classify_image, ImageSource, Member, MemberFormData, MemberId, MemberValidationError,
};
pub use model::tag::{Tag, TagCategory, TagDraft, TagId, TagValidationError};
pub use repo::member_repo::{MemberDraft, MemberRepository, SqliteMemberRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::{RepoError, RepoResult};
pub use service::member_store::{MemberStore, MemberStoreError};
pub use service::tag_store::{TagStore, TagStoreError};
pub use ui::form_view::FormField;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
