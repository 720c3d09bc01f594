//! Checkbox state repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist sidecar boolean checkbox arrays keyed by the resolved source
//!   note, independent of note content.
//!
//! # Invariants
//! - Stored positions are contiguous from 0; `toggle` backfills gaps from
//!   the caller-supplied literal token states before setting the target.
//! - The store never validates indices against live content; indices beyond
//!   the current content are accepted and the array grows.
//! - State is never deleted when its owning note goes away; orphaned rows
//!   are retained under the old key.

use crate::model::note::StateKey;
use crate::repo::note_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for per-note checkbox state.
pub trait CheckboxStateRepository {
    /// Returns the stored boolean array for `key`, empty when never toggled.
    fn get(&self, key: &StateKey) -> RepoResult<Vec<bool>>;
    /// Sets position `index` to `value`, extending the array to at least
    /// `index + 1`.
    ///
    /// Previously unstored positions default to the matching entry of
    /// `literal_defaults` (the literal markdown token states in scan order,
    /// see [`crate::markdown::scan_checkbox_states`]) and to `false` beyond
    /// it, so statically-checked boxes do not appear to uncheck on first
    /// toggle. Returns the full array after the write.
    fn toggle(
        &self,
        key: &StateKey,
        index: usize,
        value: bool,
        literal_defaults: &[bool],
    ) -> RepoResult<Vec<bool>>;
}

/// SQLite-backed checkbox state repository.
pub struct SqliteCheckboxStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCheckboxStateRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'checkbox_states'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable("checkbox_states"));
        }
        Ok(Self { conn })
    }
}

impl CheckboxStateRepository for SqliteCheckboxStateRepository<'_> {
    fn get(&self, key: &StateKey) -> RepoResult<Vec<bool>> {
        load_states(self.conn, &key.storage_key())
    }

    fn toggle(
        &self,
        key: &StateKey,
        index: usize,
        value: bool,
        literal_defaults: &[bool],
    ) -> RepoResult<Vec<bool>> {
        let storage_key = key.storage_key();
        let tx = self.conn.unchecked_transaction()?;

        let mut states = load_states(&tx, &storage_key)?;
        while states.len() <= index {
            let position = states.len();
            states.push(literal_defaults.get(position).copied().unwrap_or(false));
        }
        states[index] = value;

        let mut upsert = tx.prepare(
            "INSERT INTO checkbox_states (state_key, position, checked)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (state_key, position) DO UPDATE SET
                checked = excluded.checked;",
        )?;
        for (position, checked) in states.iter().enumerate() {
            upsert.execute(params![
                storage_key.as_str(),
                position as i64,
                i64::from(*checked)
            ])?;
        }
        drop(upsert);

        tx.commit()?;
        Ok(states)
    }
}

fn load_states(conn: &Connection, storage_key: &str) -> RepoResult<Vec<bool>> {
    let mut stmt = conn.prepare(
        "SELECT position, checked
         FROM checkbox_states
         WHERE state_key = ?1
         ORDER BY position ASC;",
    )?;

    let mut rows = stmt.query([storage_key])?;
    let mut states = Vec::new();
    while let Some(row) = rows.next()? {
        let position: i64 = row.get("position")?;
        if position != states.len() as i64 {
            return Err(RepoError::InvalidData(format!(
                "non-contiguous checkbox position {position} for key `{storage_key}`"
            )));
        }
        states.push(match row.get::<_, i64>("checked")? {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid checked value `{other}` in checkbox_states.checked"
                )));
            }
        });
    }

    Ok(states)
}
