//! Planned minutes per player and match.
//!
//! Rows in `playing_time` are derived from a saved plan: periods on the field
//! times the period length. They can also be edited by hand, and they feed
//! the season summary across all of a coach's matches.
//!
//! ## Features
//!
//! - **Computed minutes**: Replace a match's rows with the output of `compute_playing_time`
//! - **Manual corrections**: Insert, update or delete a single player's minutes
//! - **Season totals**: Minutes, match count and share of possible minutes per active player
//!
//! ## Usage
//!
//! ```ignore
//! use minkamp::db::playing_time::PlayingTimes;
//!
//! let mut times = PlayingTimes::new()?;
//! for total in times.season_totals(user_id)? {
//!     println!("{}: {} min ({}%)", total.name, total.minutes, total.percent);
//! }
//! ```

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::plan::PlayingTime;
use crate::libs::position::Position;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minutes of every player in a match, by player name.
const SELECT_MATCH_MINUTES: &str = "
    SELECT pt.id, pt.match_id, pt.player_id, p.name, pt.minutes
    FROM playing_time pt
    JOIN players p ON p.id = pt.player_id
    WHERE pt.match_id = ?1
    ORDER BY p.name
";
const SELECT_PLAYER_MINUTES: &str = "SELECT minutes FROM playing_time WHERE match_id = ?1 AND player_id = ?2";
/// Insert minutes or overwrite them; one row per match and player.
const UPSERT_MINUTES: &str = "INSERT INTO playing_time (match_id, player_id, minutes) VALUES (?1, ?2, ?3)
    ON CONFLICT(match_id, player_id) DO UPDATE SET minutes = excluded.minutes";
const UPDATE_MINUTES: &str = "UPDATE playing_time SET minutes = ?3 WHERE match_id = ?1 AND player_id = ?2";
const DELETE_MATCH_MINUTES: &str = "DELETE FROM playing_time WHERE match_id = ?1";
const DELETE_PLAYER_MINUTES: &str = "DELETE FROM playing_time WHERE match_id = ?1 AND player_id = ?2";
/// Season summary over active players.
///
/// Players without any minutes still appear with zero matches. The possible
/// minutes of a player are the summed lengths of the matches they have rows for.
const SELECT_SEASON_TOTALS: &str = "
    SELECT p.id, p.name, p.position,
           COUNT(pt.match_id),
           COALESCE(SUM(pt.minutes), 0),
           COALESCE(SUM(m.period_count * m.period_length), 0)
    FROM players p
    LEFT JOIN playing_time pt ON pt.player_id = p.id
    LEFT JOIN matches m ON m.id = pt.match_id
    WHERE p.user_id = ?1 AND p.active
    GROUP BY p.id, p.name, p.position
    ORDER BY p.name
";

/// A stored `playing_time` row with the player's name attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayingTimeRecord {
    pub id: Option<i64>,
    pub match_id: i64,
    pub player_id: i64,
    pub player_name: String,
    pub minutes: u32,
}

/// Minutes a player has been planned for across all saved matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonTotal {
    pub player_id: i64,
    pub name: String,
    pub position: Position,
    pub matches: u32,
    pub minutes: u32,
    pub possible_minutes: u32,
    pub percent: f64,
}

/// Replaces the minutes of a match inside an open transaction.
pub(crate) fn write_computed(tx: &Transaction, match_id: i64, computed: &BTreeMap<i64, PlayingTime>) -> Result<()> {
    tx.execute(DELETE_MATCH_MINUTES, params![match_id])?;
    let mut stmt = tx.prepare(UPSERT_MINUTES)?;
    for (player_id, time) in computed {
        stmt.execute(params![match_id, player_id, time.total_minutes])?;
    }
    Ok(())
}

pub struct PlayingTimes {
    db: Db,
}

impl PlayingTimes {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    pub fn fetch(&mut self, match_id: i64) -> Result<Vec<PlayingTimeRecord>> {
        let mut stmt = self.db.conn.prepare(SELECT_MATCH_MINUTES)?;
        let records = stmt
            .query_map(params![match_id], |row| {
                Ok(PlayingTimeRecord {
                    id: row.get(0)?,
                    match_id: row.get(1)?,
                    player_id: row.get(2)?,
                    player_name: row.get(3)?,
                    minutes: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn fetch_player(&mut self, match_id: i64, player_id: i64) -> Result<Option<u32>> {
        self.db
            .conn
            .query_row(SELECT_PLAYER_MINUTES, params![match_id, player_id], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    pub fn upsert(&mut self, match_id: i64, player_id: i64, minutes: u32) -> Result<()> {
        self.db
            .conn
            .execute(UPSERT_MINUTES, params![match_id, player_id, minutes])?;
        Ok(())
    }

    /// Changes stored minutes; fails when the player has none for the match.
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match the minutes belong to
    /// * `player_id` - Player whose minutes change
    /// * `minutes` - New value
    ///
    /// # Returns
    ///
    /// `Ok(())` when a row was changed, or a `PlayingTimeNotFound` error.
    pub fn update(&mut self, match_id: i64, player_id: i64, minutes: u32) -> Result<()> {
        let affected = self
            .db
            .conn
            .execute(UPDATE_MINUTES, params![match_id, player_id, minutes])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::PlayingTimeNotFound(match_id, player_id)));
        }
        Ok(())
    }

    /// Deletes the minutes of one player, or of the whole match when `player_id` is `None`.
    pub fn delete(&mut self, match_id: i64, player_id: Option<i64>) -> Result<usize> {
        let affected = match player_id {
            Some(player_id) => self.db.conn.execute(DELETE_PLAYER_MINUTES, params![match_id, player_id])?,
            None => self.db.conn.execute(DELETE_MATCH_MINUTES, params![match_id])?,
        };
        Ok(affected)
    }

    /// Replaces the stored minutes of a match with freshly computed ones.
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match whose rows are replaced
    /// * `computed` - Minutes per player id
    ///
    /// # Returns
    ///
    /// `Ok(())` once the transaction commits. Players missing from `computed`
    /// lose their row.
    pub fn store_computed(&mut self, match_id: i64, computed: &BTreeMap<i64, PlayingTime>) -> Result<()> {
        self.db.transaction(|tx| write_computed(tx, match_id, computed))
    }

    /// Season summary for a coach, one entry per active player sorted by name.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Coach whose players are summarised
    ///
    /// # Returns
    ///
    /// Totals with `percent` rounded to one decimal; `0.0` when no minutes were possible.
    pub fn season_totals(&mut self, user_id: i64) -> Result<Vec<SeasonTotal>> {
        let mut stmt = self.db.conn.prepare(SELECT_SEASON_TOTALS)?;
        let totals = stmt
            .query_map(params![user_id], |row| {
                let position: String = row.get(2)?;
                let minutes = clamp_minutes(row.get(4)?);
                let possible_minutes = clamp_minutes(row.get(5)?);
                Ok(SeasonTotal {
                    player_id: row.get(0)?,
                    name: row.get(1)?,
                    position: Position::parse_or_default(Some(&position)),
                    matches: row.get(3)?,
                    minutes,
                    possible_minutes,
                    percent: share_of(minutes, possible_minutes),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }
}

fn clamp_minutes(total: i64) -> u32 {
    u32::try_from(total.max(0)).unwrap_or(u32::MAX)
}

fn share_of(minutes: u32, possible_minutes: u32) -> f64 {
    if possible_minutes == 0 {
        return 0.0;
    }
    (minutes as f64 / possible_minutes as f64 * 1000.0).round() / 10.0
}
