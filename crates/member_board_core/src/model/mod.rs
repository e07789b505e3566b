//! Domain records for the member board.
//!
//! # Responsibility
//! - Define the canonical `Member` and `Tag` shapes shared by stores and
//!   views.
//! - Own field-level validation so every write path applies the same rules.
//!
//! # Invariants
//! - Every record is identified by a non-nil UUID v4.
//! - A member's tag list never carries the same tag id twice.

pub mod member;
pub mod tag;
