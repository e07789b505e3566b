//! Member repository and SQLite implementation.
//!
//! # Responsibility
//! - Persist member profiles, their tag links and the list order.
//! - Resolve member tags against the live catalog on every read.
//!
//! # Invariants
//! - Listing is deterministic: `sort_order ASC, id ASC`.
//! - New members are appended after the current last position.
//! - `created_at` and `is_editable` are written once on insert.
//! - Tag links are replaced as a whole, inside one transaction.

use crate::model::member::{Member, MemberFormData, MemberId, MemberValidationError};
use crate::model::tag::{Tag, TagId};
use crate::repo::tag_repo::parse_tag_row;
use crate::repo::{
    bool_to_int, ensure_connection_ready, parse_uuid, RepoError, RepoResult, NOW_MS_SQL,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const MEMBER_SELECT_SQL: &str = "SELECT
    id,
    name,
    image_url,
    introduction,
    is_editable,
    created_at
FROM members";

/// Write model for member create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub image_url: String,
    pub introduction: String,
    /// Unique tag ids in display order.
    pub tag_ids: Vec<TagId>,
}

impl MemberDraft {
    /// Builds a write model from submitted form data.
    ///
    /// Trims name and image, resolves embedded image data and collapses
    /// duplicate tags.
    pub fn from_form(data: &MemberFormData) -> Self {
        Self {
            name: data.name.trim().to_string(),
            image_url: data.effective_image().to_string(),
            introduction: data.introduction.clone(),
            tag_ids: data.unique_tag_ids(),
        }
    }

    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::BlankName);
        }
        if self.image_url.trim().is_empty() {
            return Err(MemberValidationError::MissingImage);
        }
        Ok(())
    }
}

/// Repository interface for the ordered member list.
pub trait MemberRepository {
    /// Appends a member and returns it as stored.
    fn create_member(&self, draft: &MemberDraft, is_editable: bool) -> RepoResult<Member>;
    /// Replaces profile fields and tag links; returns the stored member.
    fn update_member(&self, id: MemberId, draft: &MemberDraft) -> RepoResult<Member>;
    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>>;
    fn list_members(&self) -> RepoResult<Vec<Member>>;
    fn count_members(&self) -> RepoResult<usize>;
    fn delete_member(&self, id: MemberId) -> RepoResult<()>;
    /// Moves the member at `from_index` so it ends up at `to_index`.
    fn move_member(&self, from_index: usize, to_index: usize) -> RepoResult<()>;
}

/// SQLite-backed member list.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                (
                    "members",
                    &[
                        "id",
                        "name",
                        "image_url",
                        "introduction",
                        "is_editable",
                        "sort_order",
                        "created_at",
                        "updated_at",
                    ],
                ),
                ("member_tags", &["member_id", "tag_id", "position"]),
                ("tags", &["id", "name", "category", "color"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn create_member(&self, draft: &MemberDraft, is_editable: bool) -> RepoResult<Member> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let id_text = id.to_string();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let sort_order: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM members;",
            [],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO members (
                id,
                name,
                image_url,
                introduction,
                is_editable,
                sort_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id_text.as_str(),
                draft.name.as_str(),
                draft.image_url.as_str(),
                draft.introduction.as_str(),
                bool_to_int(is_editable),
                sort_order,
            ],
        )?;
        replace_tag_links(&tx, id_text.as_str(), &draft.tag_ids)?;
        tx.commit()?;

        load_required_member(self.conn, id)
    }

    fn update_member(&self, id: MemberId, draft: &MemberDraft) -> RepoResult<Member> {
        draft.validate()?;

        let id_text = id.to_string();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            &format!(
                "UPDATE members
                 SET name = ?2,
                     image_url = ?3,
                     introduction = ?4,
                     updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![
                id_text.as_str(),
                draft.name.as_str(),
                draft.image_url.as_str(),
                draft.introduction.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::MemberNotFound(id));
        }
        replace_tag_links(&tx, id_text.as_str(), &draft.tag_ids)?;
        tx.commit()?;

        load_required_member(self.conn, id)
    }

    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_member_row(self.conn, row)?));
        }
        Ok(None)
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMBER_SELECT_SQL} ORDER BY sort_order ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(self.conn, row)?);
        }
        Ok(members)
    }

    fn count_members(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative member count {count}")))
    }

    fn delete_member(&self, id: MemberId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM members WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::MemberNotFound(id));
        }
        Ok(())
    }

    fn move_member(&self, from_index: usize, to_index: usize) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut ids = list_ordered_ids(&tx)?;
        let len = ids.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(RepoError::IndexOutOfRange { index, len });
            }
        }
        if from_index == to_index {
            return Ok(());
        }

        let moved = ids.remove(from_index);
        ids.insert(to_index, moved);

        for (position, id) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE members SET sort_order = ?2 WHERE id = ?1;",
                params![id.as_str(), position as i64],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn replace_tag_links(tx: &Transaction<'_>, member_id: &str, tag_ids: &[TagId]) -> RepoResult<()> {
    tx.execute("DELETE FROM member_tags WHERE member_id = ?1;", [member_id])?;

    for (position, tag_id) in tag_ids.iter().enumerate() {
        let exists: i64 = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM tags WHERE id = ?1);",
            [tag_id.to_string()],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::TagNotFound(*tag_id));
        }

        tx.execute(
            "INSERT INTO member_tags (member_id, tag_id, position) VALUES (?1, ?2, ?3);",
            params![member_id, tag_id.to_string(), position as i64],
        )?;
    }
    Ok(())
}

fn list_ordered_ids(conn: &Connection) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT id FROM members ORDER BY sort_order ASC, id ASC;")?;
    let mut rows = stmt.query([])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        ids.push(row.get(0)?);
    }
    Ok(ids)
}

fn load_required_member(conn: &Connection, id: MemberId) -> RepoResult<Member> {
    let mut stmt = conn.prepare(&format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return parse_member_row(conn, row);
    }
    Err(RepoError::MemberNotFound(id))
}

fn load_tags_for_member(conn: &Connection, member_id: &str) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id AS id, t.name AS name, t.category AS category, t.color AS color
         FROM member_tags mt
         INNER JOIN tags t ON t.id = mt.tag_id
         WHERE mt.member_id = ?1
         ORDER BY mt.position ASC;",
    )?;
    let mut rows = stmt.query([member_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(parse_tag_row(row)?);
    }
    Ok(tags)
}

fn parse_member_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Member> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "members.id")?;

    let is_editable = match row.get::<_, i64>("is_editable")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_editable value `{other}` in members.is_editable"
            )));
        }
    };

    Ok(Member {
        id,
        name: row.get("name")?,
        image_url: row.get("image_url")?,
        introduction: row.get("introduction")?,
        tags: load_tags_for_member(conn, &id_text)?,
        is_editable,
        created_at: row.get("created_at")?,
    })
}
