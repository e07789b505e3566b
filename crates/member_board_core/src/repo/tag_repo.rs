//! Tag catalog repository and SQLite implementation.
//!
//! # Invariants
//! - Catalog order is creation order.
//! - Deleting a tag detaches it from every member in the same transaction.

use crate::model::tag::{Tag, TagCategory, TagId};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const TAG_SELECT_SQL: &str = "SELECT id, name, category, color FROM tags";

/// Repository interface for catalog tags.
pub trait TagRepository {
    fn create_tag(&self, tag: &Tag) -> RepoResult<TagId>;
    fn update_tag(&self, tag: &Tag) -> RepoResult<()>;
    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>>;
    fn list_tags(&self) -> RepoResult<Vec<Tag>>;
    /// Deletes one tag and returns how many members carried it.
    fn delete_tag(&self, id: TagId) -> RepoResult<usize>;
}

/// SQLite-backed tag catalog.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                ("tags", &["id", "name", "category", "color", "created_at"]),
                ("member_tags", &["member_id", "tag_id", "position"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn create_tag(&self, tag: &Tag) -> RepoResult<TagId> {
        tag.validate()?;

        self.conn.execute(
            "INSERT INTO tags (id, name, category, color) VALUES (?1, ?2, ?3, ?4);",
            params![
                tag.id.to_string(),
                tag.name.as_str(),
                tag.category.as_str(),
                tag.color.as_deref(),
            ],
        )?;
        Ok(tag.id)
    }

    fn update_tag(&self, tag: &Tag) -> RepoResult<()> {
        tag.validate()?;

        let changed = self.conn.execute(
            "UPDATE tags
             SET name = ?2,
                 category = ?3,
                 color = ?4
             WHERE id = ?1;",
            params![
                tag.id.to_string(),
                tag.name.as_str(),
                tag.category.as_str(),
                tag.color.as_deref(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::TagNotFound(tag.id));
        }
        Ok(())
    }

    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TAG_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_tag_row(row)?));
        }
        Ok(None)
    }

    fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TAG_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn delete_tag(&self, id: TagId) -> RepoResult<usize> {
        let id_text = id.to_string();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let detached = tx.execute(
            &format!(
                "UPDATE members
                 SET updated_at = {NOW_MS_SQL}
                 WHERE id IN (SELECT member_id FROM member_tags WHERE tag_id = ?1);"
            ),
            [id_text.as_str()],
        )?;

        // member_tags rows go with the tag via ON DELETE CASCADE.
        let changed = tx.execute("DELETE FROM tags WHERE id = ?1;", [id_text.as_str()])?;
        if changed == 0 {
            return Err(RepoError::TagNotFound(id));
        }

        tx.commit()?;
        Ok(detached)
    }
}

/// Parses one `tags` row selected with `TAG_SELECT_SQL` columns.
///
/// Shared with the member repository, which joins tags through
/// `member_tags`.
pub(crate) fn parse_tag_row(row: &Row<'_>) -> RepoResult<Tag> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "tags.id")?;

    let category_text: String = row.get("category")?;
    let category = TagCategory::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid tag category `{category_text}` in tags.category"
        ))
    })?;

    let tag = Tag {
        id,
        name: row.get("name")?,
        category,
        color: row.get("color")?,
    };
    tag.validate()?;
    Ok(tag)
}
