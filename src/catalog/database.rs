// Catalog connection handle
// Owns the single SQLite connection for the lifetime of the process

use crate::error::{CatalogError, CatalogResult};
use crate::query::guard;
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row};
use std::path::Path;
use tracing::debug;

/// Read-only handle to the parts dataset
///
/// SQLite connections must not be used from two threads at once, so every
/// statement runs with the mutex held. The lock covers one
/// prepare-execute-collect cycle and is released before rendering.
pub struct Catalog {
    conn: Mutex<Connection>,
}

impl Catalog {
    /// Open an existing dataset file in read-only mode
    ///
    /// A missing file is an error; we never create an empty database.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // SQLite opens lazily; touch the schema so a non-database file fails here
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(|source| CatalogError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_connection(conn))
    }

    /// Wrap an already opened connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Run a SELECT and map every returned row, in storage order
    pub fn query_rows<T, P, F>(&self, sql: &str, params: P, map: F) -> CatalogResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        guard::ensure_select(sql)?;
        debug!(sql, "executing catalog query");

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Run a SELECT expected to return at most one row
    pub fn query_optional<T, P, F>(&self, sql: &str, params: P, map: F) -> CatalogResult<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        guard::ensure_select(sql)?;
        debug!(sql, "executing catalog lookup");

        let conn = self.conn.lock();
        let row = conn.query_row(sql, params, map).optional()?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    #[test]
    fn test_open_missing_file_fails() {
        let path = std::env::temp_dir().join("jlcparts-query-missing-file.sqlite3");
        let _ = std::fs::remove_file(&path);

        let err = Catalog::open(&path).err().expect("opening a missing file must fail");
        assert!(matches!(err, CatalogError::Open { .. }));
        assert!(!path.exists(), "read-only open must not create the file");
    }

    #[test]
    fn test_query_rows_keeps_storage_order() {
        let catalog = fixtures::seeded();
        let ids = catalog
            .query_rows("SELECT id FROM manufacturers", [], |row| row.get::<_, i64>(0))
            .unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_query_optional_distinguishes_missing_row() {
        let catalog = fixtures::seeded();
        let found = catalog
            .query_optional("SELECT name FROM manufacturers WHERE id=?", [3], |row| {
                row.get::<_, String>(0)
            })
            .unwrap();
        assert_eq!(found.as_deref(), Some("YAGEO"));

        let missing = catalog
            .query_optional("SELECT name FROM manufacturers WHERE id=?", [404], |row| {
                row.get::<_, String>(0)
            })
            .unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_execution_error_propagates() {
        let catalog = fixtures::seeded();
        let err = catalog
            .query_rows("SELECT nope FROM manufacturers", [], |row| row.get::<_, i64>(0))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Query(_)));
    }

    #[test]
    fn test_write_statements_never_reach_sqlite() {
        let catalog = fixtures::seeded();
        let err = catalog
            .query_rows("DELETE FROM manufacturers", [], |row| row.get::<_, i64>(0))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Rejected(_)));

        let count = catalog
            .query_rows("SELECT id FROM manufacturers", [], |row| row.get::<_, i64>(0))
            .unwrap()
            .len();
        assert_eq!(count, 3);
    }
}
