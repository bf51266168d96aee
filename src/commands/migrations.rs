//! Database migration inspection, available in debug builds only.

#[cfg(debug_assertions)]
use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::messages::Message,
    msg_info, msg_print,
};
#[cfg(debug_assertions)]
use anyhow::Result;
#[cfg(debug_assertions)]
use clap::{Args, Subcommand};

#[cfg(debug_assertions)]
#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[cfg(debug_assertions)]
#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show the schema version and whether migrations are pending
    Status,
    /// List applied migrations
    History,
    /// Roll the schema back to an earlier version
    Rollback {
        version: u32,
    },
}

#[cfg(debug_assertions)]
pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let mut conn = Db::new_without_migrations()?;
    let manager = MigrationManager::new();

    match args.command {
        MigrationsCommand::Status => {
            let version = get_db_version(&conn)?;

            msg_print!(Message::DatabaseVersion(version, manager.latest_version()));
            if needs_migration(&conn)? {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            let history = manager.get_migration_history(&conn)?;

            msg_print!(Message::MigrationHistory, true);
            for (version, name, applied_at) in history {
                msg_print!(Message::MigrationHistoryEntry(version, name, applied_at));
            }
        }
        MigrationsCommand::Rollback { version } => {
            manager.rollback_to(&mut conn, version)?;
        }
    }

    Ok(())
}
