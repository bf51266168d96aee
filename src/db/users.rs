use crate::db::db::Db;
use crate::libs::auth::{self, AuthError, PasswordHash};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_USER: &str = "INSERT INTO users (username, password_hash, salt) VALUES (?1, ?2, ?3)";
const SELECT_USER_BY_ID: &str = "SELECT id, username, created_at FROM users WHERE id = ?1";
const SELECT_USER_BY_NAME: &str = "SELECT id, username, created_at FROM users WHERE username = ?1";
const SELECT_CREDENTIALS: &str = "SELECT id, username, created_at, password_hash, salt FROM users WHERE username = ?1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: Option<String>,
}

impl User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            created_at: row.get(2)?,
        })
    }
}

pub struct Users {
    db: Db,
}

impl Users {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    /// Registers a coach and returns the new user id.
    pub fn create(&mut self, username: &str, password: &str) -> Result<i64> {
        let username = username.trim();
        auth::validate_credentials(username, password)?;

        if self.get_by_username(username)?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()).into());
        }

        let hashed = auth::hash_password(password);
        self.db
            .conn
            .execute(INSERT_USER, params![username, hashed.hash, hashed.salt])?;
        Ok(self.db.conn.last_insert_rowid())
    }

    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<User> {
        let found = self
            .db
            .conn
            .query_row(SELECT_CREDENTIALS, params![username.trim()], |row| {
                let user = User::from_row(row)?;
                let stored = PasswordHash {
                    hash: row.get(3)?,
                    salt: row.get(4)?,
                };
                Ok((user, stored))
            })
            .optional()?;

        match found {
            Some((user, stored)) if auth::verify_password(password, &stored) => Ok(user),
            _ => Err(AuthError::InvalidCredentials.into()),
        }
    }

    pub fn get(&mut self, id: i64) -> Result<Option<User>> {
        self.db
            .conn
            .query_row(SELECT_USER_BY_ID, params![id], User::from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn get_by_username(&mut self, username: &str) -> Result<Option<User>> {
        self.db
            .conn
            .query_row(SELECT_USER_BY_NAME, params![username], User::from_row)
            .optional()
            .map_err(Into::into)
    }
}
