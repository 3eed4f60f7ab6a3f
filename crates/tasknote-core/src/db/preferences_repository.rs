//! Preferences repository implementation

use crate::error::Result;
use crate::storage::{PreferenceEdit, PreferenceEdits, Preferences};
use rusqlite::{params, Connection, OptionalExtension};

/// `SQLite` implementation of `Preferences`, scoped to one namespace
pub struct SqlitePreferencesRepository<'a> {
    conn: &'a Connection,
    scope: String,
}

impl<'a> SqlitePreferencesRepository<'a> {
    /// Create a new repository over `scope` with the given connection
    pub fn new(conn: &'a Connection, scope: impl Into<String>) -> Self {
        Self {
            conn,
            scope: scope.into(),
        }
    }
}

impl Preferences for SqlitePreferencesRepository<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE scope = ? AND key = ?",
                params![self.scope, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn apply(&self, edits: &PreferenceEdits) -> Result<()> {
        if edits.is_empty() {
            return Ok(());
        }

        // Rolled back on drop unless committed below
        let tx = self.conn.unchecked_transaction()?;

        for edit in edits.iter() {
            match edit {
                PreferenceEdit::Put { key, value } => {
                    tx.execute(
                        "INSERT OR REPLACE INTO preferences (scope, key, value) VALUES (?, ?, ?)",
                        params![self.scope, key, value],
                    )?;
                }
                PreferenceEdit::Remove { key } => {
                    tx.execute(
                        "DELETE FROM preferences WHERE scope = ? AND key = ?",
                        params![self.scope, key],
                    )?;
                }
            }
        }

        tx.commit()?;
        tracing::debug!(
            "Committed {} preference edit(s) to scope '{}'",
            edits.len(),
            self.scope
        );
        Ok(())
    }
}
