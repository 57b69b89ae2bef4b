//! Database layer for hospital records.

mod access;
mod appointments;
mod billings;
mod doctors;
mod medical_records;
mod patients;
mod schema;
mod users;

pub use access::*;
pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Unknown column {column:?} for table {table}")]
    UnknownColumn { table: &'static str, column: String },
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        tracing::info!(path = %path.display(), "opened hospital database");
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create missing tables and seed the default administrator.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.seed_user(
            DEFAULT_ADMIN_USERNAME,
            &crate::auth::hash_password(DEFAULT_ADMIN_PASSWORD),
            crate::models::Role::Admin,
        )?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for table in Table::ALL {
            assert!(tables.contains(&table.name().to_string()), "{}", table.name());
        }
        assert!(tables.contains(&"users".to_string()));
    }

    #[test]
    fn test_reopen_keeps_data_and_single_admin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital.db");

        {
            let db = Database::open(&path).unwrap();
            db.insert_patient(&crate::models::NewPatient::new("Sara")).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.count(Table::Patients).unwrap(), 1);
        assert_eq!(db.list_users().unwrap().len(), 1);
    }
}
