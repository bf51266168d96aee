//! SQLite persistence.
//!
//! Every table has a handler that owns its own [`db::Db`] connection. Handlers
//! are built with `new()`, which opens the configured database and runs
//! pending migrations, or with `from_db()` when the caller already holds a
//! connection (tests open a temporary database this way).
//!
//! ```rust,no_run
//! use minkamp::db::{db::Db, players::{Player, Players}};
//! use minkamp::libs::position::Position;
//!
//! let mut players = Players::from_db(Db::open("minkamp.db")?);
//! players.create(&Player::new(1, "Ola", Position::Defense, Some(4)))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod migrations;

/// Coach accounts.
pub mod users;

/// Roster of each coach, with soft deactivation.
pub mod players;

pub mod matches;

/// Which players are picked for which match.
pub mod squads;

/// Stored on-field flags, one row per match, player and period.
pub mod plans;

/// Minutes per player and match, written when a plan is saved.
pub mod playing_time;

/// Key-value settings per coach, with global fallbacks.
pub mod settings;
