//! Member and tag stores.
//!
//! # Responsibility
//! - Turn repository calls into the operations views dispatch.
//! - Hold session-only state (current selection) that has no storage row.
//!
//! # Invariants
//! - Stores never bypass repository validation.
//! - Stores stay storage-agnostic; they only see repository traits.

pub mod member_store;
pub mod tag_store;
