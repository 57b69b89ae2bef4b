//! Staff login.
//!
//! Credentials are checked against the `users` table. Passwords are stored as
//! SHA-256 hex digests; the comparison is an exact match on both username and
//! digest. There is no expiry or lockout: a [`Session`] lives exactly as long
//! as the caller keeps its [`SessionState`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{Role, User};

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Username and password must not be empty")]
    EmptyCredentials,

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Hex-encoded SHA-256 digest of a password.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// A successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Random token identifying this login
    pub token: String,
    pub username: String,
    pub role: Role,
    /// RFC 3339 timestamp
    pub logged_in_at: String,
}

impl Session {
    fn start(user: User) -> Self {
        Self {
            token: uuid::Uuid::new_v4().to_string(),
            username: user.username,
            role: user.role,
            logged_in_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Credential checks against the database.
pub struct Authenticator<'a> {
    db: &'a Database,
}

impl<'a> Authenticator<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Accept only the exact stored username/password pair.
    pub fn login(&self, username: &str, password: &str) -> AuthResult<Session> {
        if username.is_empty() || password.is_empty() {
            tracing::warn!("login rejected: empty credentials");
            return Err(AuthError::InvalidCredentials);
        }

        match self
            .db
            .find_user_by_credentials(username, &hash_password(password))?
        {
            Some(user) => {
                tracing::info!(username, role = %user.role, "login succeeded");
                Ok(Session::start(user))
            }
            None => {
                tracing::warn!(username, "login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Create another login account.
    pub fn add_user(&self, username: &str, password: &str, role: Role) -> AuthResult<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::EmptyCredentials);
        }
        self.db.insert_user(username, &hash_password(password), role)?;
        tracing::info!(username, role = %role, "user added");
        Ok(())
    }
}

/// Per-interaction "logged in" flag.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current session with a fresh login. A failed attempt
    /// leaves the state logged out.
    pub fn login(&mut self, auth: &Authenticator<'_>, username: &str, password: &str) -> AuthResult<&Session> {
        self.current = None;
        let session = auth.login(username, password)?;
        Ok(self.current.insert(session))
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            tracing::info!(username = %session.username, "logged out");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current session, or [`AuthError::NotLoggedIn`].
    pub fn require(&self) -> AuthResult<&Session> {
        self.current.as_ref().ok_or(AuthError::NotLoggedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

    #[test]
    fn test_hash_password_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_login_default_admin() {
        let db = Database::open_in_memory().unwrap();
        let auth = Authenticator::new(&db);

        let session = auth
            .login(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.token.len(), 36);
    }

    #[test]
    fn test_add_user_then_login() {
        let db = Database::open_in_memory().unwrap();
        let auth = Authenticator::new(&db);

        auth.add_user("reception", "s3cret", Role::Staff).unwrap();
        let session = auth.login("reception", "s3cret").unwrap();
        assert_eq!(session.role, Role::Staff);

        assert!(matches!(
            auth.add_user("", "x", Role::Staff),
            Err(AuthError::EmptyCredentials)
        ));
    }

    #[test]
    fn test_session_state() {
        let db = Database::open_in_memory().unwrap();
        let auth = Authenticator::new(&db);
        let mut state = SessionState::new();

        assert!(!state.is_logged_in());
        assert!(matches!(state.require(), Err(AuthError::NotLoggedIn)));

        state.login(&auth, "admin", "admin123").unwrap();
        assert!(state.is_logged_in());

        // A failed re-login drops the previous session
        assert!(state.login(&auth, "admin", "wrong").is_err());
        assert!(!state.is_logged_in());

        state.login(&auth, "admin", "admin123").unwrap();
        state.logout();
        assert!(state.current().is_none());
    }
}
