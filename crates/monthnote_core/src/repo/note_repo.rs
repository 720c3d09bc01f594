//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed persistence for category/group notes, general month notes
//!   and archived snapshots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - At most one note exists per `(scope, entity, month)` key; saving to an
//!   existing key updates in place and keeps the note id stable.
//! - `created_at` never changes after insert; `updated_at` bumps on update.
//! - Archived notes never participate in note queries.

use crate::db::DbError;
use crate::model::month::{InvalidMonthKey, MonthKey};
use crate::model::note::{
    ArchivedNote, CategoryKind, CategoryRef, EntityKey, GeneralMonthNote, Note, NoteId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    scope,
    entity_id,
    entity_name,
    group_id,
    group_name,
    month_key,
    content,
    created_at,
    updated_at
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    /// Required table is missing; the connection was not migrated.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
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

impl From<InvalidMonthKey> for RepoError {
    fn from(value: InvalidMonthKey) -> Self {
        Self::InvalidData(format!("invalid month key in notes.month_key: {value}"))
    }
}

/// Repository interface for note storage.
pub trait NoteRepository {
    /// Inserts or updates the note for `(category_ref, month)` in place.
    ///
    /// The note id stays stable across updates, so checkbox state keyed by
    /// it survives content edits.
    fn upsert_note(
        &self,
        category_ref: &CategoryRef,
        month: &MonthKey,
        content: &str,
    ) -> RepoResult<Note>;
    /// Gets the explicit note at exactly `(entity, month)`.
    fn get_note(&self, entity: &EntityKey, month: &MonthKey) -> RepoResult<Option<Note>>;
    /// Lists all of an entity's notes, ascending by month.
    fn list_notes(&self, entity: &EntityKey) -> RepoResult<Vec<Note>>;
    /// Removes the month's override. Returns whether a note existed.
    fn delete_note(&self, entity: &EntityKey, month: &MonthKey) -> RepoResult<bool>;

    /// Inserts or updates the general note for `month` in place.
    fn upsert_general_note(&self, month: &MonthKey, content: &str)
        -> RepoResult<GeneralMonthNote>;
    /// Gets the explicit general note at exactly `month`.
    fn get_general_note(&self, month: &MonthKey) -> RepoResult<Option<GeneralMonthNote>>;
    /// Lists all general notes, ascending by month.
    fn list_general_notes(&self) -> RepoResult<Vec<GeneralMonthNote>>;
    /// Removes the month's general note. Returns whether a note existed.
    fn delete_general_note(&self, month: &MonthKey) -> RepoResult<bool>;

    /// Moves all of an entity's notes into the archive in one transaction.
    ///
    /// Called when the category/group is deleted upstream; the provided
    /// names are the last known display names. Returns the archived count.
    fn archive_entity(
        &self,
        entity: &EntityKey,
        original_category_name: &str,
        original_group_name: Option<&str>,
    ) -> RepoResult<usize>;
    /// Lists archived notes, ascending by month, for display/export.
    fn list_archived(&self) -> RepoResult<Vec<ArchivedNote>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in ["notes", "archived_notes"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn upsert_note(
        &self,
        category_ref: &CategoryRef,
        month: &MonthKey,
        content: &str,
    ) -> RepoResult<Note> {
        let scope = kind_to_db(category_ref.kind);
        self.conn.execute(
            "INSERT INTO notes (
                uuid,
                scope,
                entity_id,
                entity_name,
                group_id,
                group_name,
                month_key,
                content
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (scope, ifnull(entity_id, ''), month_key) DO UPDATE SET
                entity_name = excluded.entity_name,
                group_id = excluded.group_id,
                group_name = excluded.group_name,
                content = excluded.content,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                Uuid::new_v4().to_string(),
                scope,
                category_ref.id.as_str(),
                category_ref.name.as_str(),
                category_ref.group_id.as_deref(),
                category_ref.group_name.as_deref(),
                month.as_str(),
                content,
            ],
        )?;

        self.get_note(&category_ref.entity_key(), month)?
            .ok_or(RepoError::InvalidData(
                "upserted note not found in read-back".to_string(),
            ))
    }

    fn get_note(&self, entity: &EntityKey, month: &MonthKey) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE scope = ?1 AND entity_id = ?2 AND month_key = ?3;"
        ))?;

        let mut rows = stmt.query(params![
            kind_to_db(entity.kind),
            entity.id.as_str(),
            month.as_str()
        ])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self, entity: &EntityKey) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE scope = ?1 AND entity_id = ?2
             ORDER BY month_key ASC;"
        ))?;

        let mut rows = stmt.query(params![kind_to_db(entity.kind), entity.id.as_str()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn delete_note(&self, entity: &EntityKey, month: &MonthKey) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM notes
             WHERE scope = ?1 AND entity_id = ?2 AND month_key = ?3;",
            params![
                kind_to_db(entity.kind),
                entity.id.as_str(),
                month.as_str()
            ],
        )?;
        Ok(changed > 0)
    }

    fn upsert_general_note(
        &self,
        month: &MonthKey,
        content: &str,
    ) -> RepoResult<GeneralMonthNote> {
        self.conn.execute(
            "INSERT INTO notes (uuid, scope, month_key, content)
             VALUES (?1, 'general', ?2, ?3)
             ON CONFLICT (scope, ifnull(entity_id, ''), month_key) DO UPDATE SET
                content = excluded.content,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![Uuid::new_v4().to_string(), month.as_str(), content],
        )?;

        self.get_general_note(month)?.ok_or(RepoError::InvalidData(
            "upserted general note not found in read-back".to_string(),
        ))
    }

    fn get_general_note(&self, month: &MonthKey) -> RepoResult<Option<GeneralMonthNote>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE scope = 'general' AND month_key = ?1;"
        ))?;

        let mut rows = stmt.query([month.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_general_row(row)?));
        }

        Ok(None)
    }

    fn list_general_notes(&self) -> RepoResult<Vec<GeneralMonthNote>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE scope = 'general'
             ORDER BY month_key ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_general_row(row)?);
        }

        Ok(notes)
    }

    fn delete_general_note(&self, month: &MonthKey) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE scope = 'general' AND month_key = ?1;",
            [month.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn archive_entity(
        &self,
        entity: &EntityKey,
        original_category_name: &str,
        original_group_name: Option<&str>,
    ) -> RepoResult<usize> {
        let scope = kind_to_db(entity.kind);
        let tx = self.conn.unchecked_transaction()?;

        let moved = tx.execute(
            "INSERT INTO archived_notes (
                uuid,
                scope,
                entity_id,
                original_category_name,
                original_group_id,
                original_group_name,
                month_key,
                content,
                created_at,
                updated_at
            )
            SELECT
                uuid,
                scope,
                entity_id,
                ?3,
                group_id,
                ?4,
                month_key,
                content,
                created_at,
                updated_at
            FROM notes
            WHERE scope = ?1 AND entity_id = ?2;",
            params![
                scope,
                entity.id.as_str(),
                original_category_name,
                original_group_name
            ],
        )?;

        tx.execute(
            "DELETE FROM notes WHERE scope = ?1 AND entity_id = ?2;",
            params![scope, entity.id.as_str()],
        )?;

        tx.commit()?;
        Ok(moved)
    }

    fn list_archived(&self) -> RepoResult<Vec<ArchivedNote>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                uuid,
                scope,
                entity_id,
                original_category_name,
                original_group_id,
                original_group_name,
                month_key,
                content,
                created_at,
                updated_at,
                archived_at
             FROM archived_notes
             ORDER BY month_key ASC, uuid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut archived = Vec::new();
        while let Some(row) = rows.next()? {
            archived.push(parse_archived_row(row)?);
        }

        Ok(archived)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let scope: String = row.get("scope")?;
    let kind = parse_kind(&scope)?;
    let entity_id: Option<String> = row.get("entity_id")?;
    let entity_id = entity_id.ok_or_else(|| {
        RepoError::InvalidData(format!("NULL entity_id on `{scope}` scoped note"))
    })?;

    Ok(Note {
        id: parse_uuid(&row.get::<_, String>("uuid")?)?,
        category_ref: CategoryRef {
            kind,
            id: entity_id,
            name: row.get::<_, Option<String>>("entity_name")?.unwrap_or_default(),
            group_id: row.get("group_id")?,
            group_name: row.get("group_name")?,
        },
        month: parse_month(&row.get::<_, String>("month_key")?)?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_general_row(row: &Row<'_>) -> RepoResult<GeneralMonthNote> {
    Ok(GeneralMonthNote {
        id: parse_uuid(&row.get::<_, String>("uuid")?)?,
        month: parse_month(&row.get::<_, String>("month_key")?)?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_archived_row(row: &Row<'_>) -> RepoResult<ArchivedNote> {
    let scope: String = row.get("scope")?;
    let kind = parse_kind(&scope)?;
    let original_category_name: String = row.get("original_category_name")?;
    let original_group_name: Option<String> = row.get("original_group_name")?;

    Ok(ArchivedNote {
        note: Note {
            id: parse_uuid(&row.get::<_, String>("uuid")?)?,
            category_ref: CategoryRef {
                kind,
                id: row.get("entity_id")?,
                name: original_category_name.clone(),
                group_id: row.get("original_group_id")?,
                group_name: original_group_name.clone(),
            },
            month: parse_month(&row.get::<_, String>("month_key")?)?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        },
        archived_at: row.get("archived_at")?,
        original_category_name,
        original_group_name,
    })
}

fn kind_to_db(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::Category => "category",
        CategoryKind::Group => "group",
    }
}

fn parse_kind(value: &str) -> RepoResult<CategoryKind> {
    match value {
        "category" => Ok(CategoryKind::Category),
        "group" => Ok(CategoryKind::Group),
        other => Err(RepoError::InvalidData(format!(
            "invalid note scope `{other}` in notes.scope"
        ))),
    }
}

fn parse_uuid(value: &str) -> RepoResult<NoteId> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in notes.uuid")))
}

fn parse_month(value: &str) -> RepoResult<MonthKey> {
    Ok(MonthKey::parse(value)?)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(exists.is_some())
}
