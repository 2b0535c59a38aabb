// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings backend stored in SQLite.
//
// Values are kept as JSON text so the column can hold any `SettingValue`
// shape. One row per (group, key).

use netremote_core::error::{NetRemoteError, Result};
use netremote_core::types::SettingValue;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, instrument, warn};

use crate::traits::SettingsBackend;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS settings (
        group_name TEXT NOT NULL,
        key TEXT NOT NULL,
        value TEXT NOT NULL,
        PRIMARY KEY (group_name, key)
    )
"#;

/// SQLite-backed settings store.
///
/// `rusqlite` is synchronous, which matches the blocking load/save contract
/// of the settings surface.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) the settings database at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| NetRemoteError::Database(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| NetRemoteError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| NetRemoteError::Database(format!("create table: {e}")))?;

        info!("settings database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| NetRemoteError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| NetRemoteError::Database(format!("create table: {e}")))?;

        debug!("in-memory settings database opened");
        Ok(Self { conn })
    }
}

impl SettingsBackend for SqliteBackend {
    fn get(&self, group: &str, key: &str) -> Result<Option<SettingValue>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE group_name = ?1 AND key = ?2",
                params![group, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| NetRemoteError::Database(format!("get {group}/{key}: {e}")))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        // A value some other tool wrote badly reads as absent.
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(group, key, error = %e, "unreadable setting value ignored");
                Ok(None)
            }
        }
    }

    fn set(&self, group: &str, key: &str, value: SettingValue) -> Result<()> {
        let json = serde_json::to_string(&value)?;
        self.conn
            .execute(
                "INSERT INTO settings (group_name, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT (group_name, key) DO UPDATE SET value = excluded.value",
                params![group, key, json],
            )
            .map_err(|e| NetRemoteError::Database(format!("set {group}/{key}: {e}")))?;
        Ok(())
    }
}
