//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define data access contracts for members and the tag catalog.
//! - Keep SQL details away from stores and views.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation.
//! - Read paths reject malformed rows instead of masking them.
//! - Repositories only accept connections at the latest schema version.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::member::{MemberId, MemberValidationError};
use crate::model::tag::{TagId, TagValidationError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod member_repo;
pub mod tag_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for member and tag persistence.
#[derive(Debug)]
pub enum RepoError {
    MemberValidation(MemberValidationError),
    TagValidation(TagValidationError),
    Db(DbError),
    MemberNotFound(MemberId),
    TagNotFound(TagId),
    /// List position outside `0..len`.
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberValidation(err) => write!(f, "{err}"),
            Self::TagValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::TagNotFound(id) => write!(f, "tag not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "list index {index} out of range for {len} members")
            }
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "repository requires column `{column}` in table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MemberValidation(err) => Some(err),
            Self::TagValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemberValidationError> for RepoError {
    fn from(value: MemberValidationError) -> Self {
        Self::MemberValidation(value)
    }
}

impl From<TagValidationError> for RepoError {
    fn from(value: TagValidationError) -> Self {
        Self::TagValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Epoch-milliseconds expression shared by write statements.
pub(crate) const NOW_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

/// Verifies schema version and the presence of every listed table/column.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required: &[(&'static str, &[&'static str])],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in required {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for column in columns.iter().copied() {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
