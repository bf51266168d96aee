use super::migrations::init_with_migrations;
use crate::libs::config::Config;
use anyhow::Result;
use rusqlite::{Connection, Transaction};
use std::path::Path;

pub const DB_FILE_NAME: &str = "minkamp.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database and brings its schema up to date.
    pub fn new() -> Result<Db> {
        let db_file_path = Config::load()?.database_path()?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Self::open_without_migrations(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Raw connection for inspecting the schema version without upgrading it.
    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = Config::load()?.database_path()?;
        Self::open_without_migrations(db_file_path)
    }

    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Runs `f` inside a transaction, committing only when it succeeds.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T>,
    {
        let tx = self.conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
