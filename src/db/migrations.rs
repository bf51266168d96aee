//! Versioned schema migrations.
//!
//! Every migration has a version number and a name and is applied at most
//! once. Applied migrations are recorded in the `migrations` table, so opening
//! a database through [`super::db::Db`] always brings it to the latest schema.
//!
//! To change the schema, register a new migration with the next version
//! number in [`MigrationManager::register_migrations`]. Never edit a
//! migration that has already shipped.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };

        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        self.add_migration(1, "create_users_players_matches", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY,
                    username TEXT NOT NULL UNIQUE,
                    password_hash TEXT NOT NULL,
                    salt TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS players (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    position TEXT NOT NULL,
                    number INTEGER,
                    active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    FOREIGN KEY (user_id) REFERENCES users(id)
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS matches (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    date DATE NOT NULL,
                    opponent TEXT NOT NULL,
                    home BOOLEAN NOT NULL DEFAULT TRUE,
                    period_count INTEGER NOT NULL,
                    players_on_field INTEGER NOT NULL,
                    period_length INTEGER NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    FOREIGN KEY (user_id) REFERENCES users(id)
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS squads (
                    match_id INTEGER NOT NULL,
                    player_id INTEGER NOT NULL,
                    selected BOOLEAN NOT NULL DEFAULT TRUE,
                    PRIMARY KEY (match_id, player_id),
                    FOREIGN KEY (match_id) REFERENCES matches(id),
                    FOREIGN KEY (player_id) REFERENCES players(id)
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_players_user_id ON players(user_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_matches_user_date ON matches(user_id, date)", [])?;

            Ok(())
        });

        self.add_migration(2, "add_substitution_plans", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS plans (
                    id INTEGER PRIMARY KEY,
                    match_id INTEGER NOT NULL,
                    player_id INTEGER NOT NULL,
                    period INTEGER NOT NULL,
                    on_field BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    UNIQUE (match_id, player_id, period),
                    FOREIGN KEY (match_id) REFERENCES matches(id),
                    FOREIGN KEY (player_id) REFERENCES players(id)
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_plans_match_id ON plans(match_id)", [])?;
            Ok(())
        });

        self.add_migration(3, "add_playing_time", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS playing_time (
                    id INTEGER PRIMARY KEY,
                    match_id INTEGER NOT NULL,
                    player_id INTEGER NOT NULL,
                    minutes INTEGER NOT NULL DEFAULT 0,
                    UNIQUE (match_id, player_id),
                    FOREIGN KEY (match_id) REFERENCES matches(id),
                    FOREIGN KEY (player_id) REFERENCES players(id)
                )",
                [],
            )?;
            Ok(())
        });

        self.add_migration(4, "add_settings", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS settings (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL DEFAULT 0,
                    key TEXT NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    UNIQUE (user_id, key)
                )",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every pending migration in one transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;

        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// `(version, name, applied_at)` for every applied migration, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    /// Forgets migrations newer than `target_version` so they run again.
    #[cfg(debug_assertions)]
    pub fn rollback_to(&self, conn: &mut Connection, target_version: u32) -> Result<()> {
        let current_version = self.get_current_version(conn)?;

        if target_version >= current_version {
            msg_info!(Message::NothingToRollback);
            return Ok(());
        }

        msg_info!(Message::RollingBack(current_version, target_version));

        conn.execute("DELETE FROM migrations WHERE version > ?1", params![target_version])?;

        msg_success!(Message::RollbackCompleted(target_version));
        Ok(())
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
