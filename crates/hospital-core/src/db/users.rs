//! Login account storage.

use rusqlite::{params, OptionalExtension};

use super::access::classify;
use super::{Database, DbResult};
use crate::models::{Role, User};

impl Database {
    /// Insert an account unless the username already exists.
    pub(crate) fn seed_user(&self, username: &str, password_hash: &str, role: Role) -> DbResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
            params![username, password_hash, role],
        )?;
        Ok(())
    }

    /// Insert a new account. A taken username is a constraint violation.
    pub fn insert_user(&self, username: &str, password_hash: &str, role: Role) -> DbResult<()> {
        self.conn
            .execute(
                "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
                params![username, password_hash, role],
            )
            .map_err(classify)?;
        Ok(())
    }

    /// Account whose username and password digest both match.
    pub fn find_user_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                "SELECT username, role FROM users WHERE username = ?1 AND password_hash = ?2",
                params![username, password_hash],
                |row| {
                    Ok(User {
                        username: row.get(0)?,
                        role: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn list_users(&self) -> DbResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT username, role FROM users ORDER BY username")?;
        let rows = stmt.query_map([], |row| {
            Ok(User {
                username: row.get(0)?,
                role: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
