use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::error::{GazetteError, Result};
use crate::store::Storage;

/// Device-local key-value storage backed by a single sqlite table.
///
/// Records are whole JSON blobs written in one statement, so a reader
/// never observes a partially updated record.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.run_migrations()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.run_migrations()?;
        Ok(storage)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| GazetteError::Other(format!("migration failed: {e}")))?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GazetteError::Other("storage lock poisoned".into()))
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let storage = SqliteStorage::in_memory().unwrap();
        assert_eq!(storage.get_item("nope").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.set_item("k", r#"{"a":1}"#).unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn set_overwrites_the_whole_value() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.set_item("k", "first").unwrap();
        storage.set_item("k", "second").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_deletes_the_record() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn keys_are_independent() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.set_item("settings", "s").unwrap();
        storage.set_item("bookmarks", "b").unwrap();
        storage.remove_item("settings").unwrap();
        assert_eq!(storage.get_item("bookmarks").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gazette.db");

        {
            let storage = SqliteStorage::new(&path).unwrap();
            storage.set_item("k", "persisted").unwrap();
        }

        let storage = SqliteStorage::new(&path).unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("persisted"));
    }
}
