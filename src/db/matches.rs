use crate::db::db::Db;
use crate::db::plans::{read_plan, trim_periods};
use crate::db::playing_time::write_computed;
use crate::db::settings::formation_key;
use crate::libs::config::{ConfigError, PlanConfig};
use crate::libs::messages::Message;
use crate::libs::periods::period_count_for;
use crate::libs::plan::compute_playing_time;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INSERT_MATCH: &str = "INSERT INTO matches (user_id, date, opponent, home, period_count, players_on_field, period_length)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_MATCH: &str = "UPDATE matches
    SET date = ?2, opponent = ?3, home = ?4, period_count = ?5, players_on_field = ?6, period_length = ?7
    WHERE id = ?1";
const SELECT_MATCH_BY_ID: &str = "SELECT id, user_id, date, opponent, home, period_count, players_on_field, period_length, created_at
    FROM matches WHERE id = ?1";
const SELECT_MATCHES: &str = "SELECT id, user_id, date, opponent, home, period_count, players_on_field, period_length, created_at
    FROM matches WHERE user_id = ?1 ORDER BY date DESC, id DESC";
const DELETE_PLAYING_TIME: &str = "DELETE FROM playing_time WHERE match_id = ?1";
const DELETE_PLAN: &str = "DELETE FROM plans WHERE match_id = ?1";
const DELETE_SQUAD: &str = "DELETE FROM squads WHERE match_id = ?1";
const DELETE_FORMATION: &str = "DELETE FROM settings WHERE key = ?1";
const DELETE_MATCH: &str = "DELETE FROM matches WHERE id = ?1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Option<i64>,
    pub user_id: i64,
    pub date: NaiveDate,
    pub opponent: String,
    pub home: bool,
    pub period_count: u32,
    pub players_on_field: u32,
    pub period_length: u32,
    pub created_at: Option<String>,
}

impl Match {
    /// A match laid out with the configured match length, period length and on-field count.
    pub fn new(user_id: i64, date: NaiveDate, opponent: &str, home: bool, config: &PlanConfig) -> Self {
        Self {
            id: None,
            user_id,
            date,
            opponent: opponent.trim().to_string(),
            home,
            period_count: period_count_for(config.match_minutes, config.period_length_minutes),
            players_on_field: config.players_on_field as u32,
            period_length: config.period_length_minutes,
            created_at: None,
        }
    }

    /// Total planned minutes, saturating at `u32::MAX`.
    pub fn match_minutes(&self) -> u32 {
        self.period_count.saturating_mul(self.period_length)
    }

    /// Checks the period layout and on-field count against `limits`.
    ///
    /// Uses `min_periods..=max_periods` for the period count and
    /// `min_on_field..=max_on_field` for the players on the field.
    pub fn validate_layout(&self, limits: &PlanConfig) -> Result<(), ConfigError> {
        if self.period_length == 0 {
            return Err(ConfigError::InvalidPeriodLength);
        }
        if !(limits.min_periods..=limits.max_periods).contains(&self.period_count) {
            return Err(ConfigError::InvalidPeriodCount {
                count: self.period_count,
                min: limits.min_periods,
                max: limits.max_periods,
            });
        }
        let on_field = self.players_on_field as usize;
        if !(limits.min_on_field..=limits.max_on_field).contains(&on_field) {
            return Err(ConfigError::InvalidPlayersOnField(on_field));
        }
        Ok(())
    }

    /// Header label, e.g. `Brann (away, 2025-05-03)`.
    pub fn title(&self) -> String {
        let venue = if self.home { "home" } else { "away" };
        format!("{} ({}, {})", self.opponent, venue, self.date.format("%Y-%m-%d"))
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Match {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: row.get(2)?,
            opponent: row.get(3)?,
            home: row.get(4)?,
            period_count: row.get(5)?,
            players_on_field: row.get(6)?,
            period_length: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}

/// Partial update of a match. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct MatchUpdate {
    pub date: Option<NaiveDate>,
    pub opponent: Option<String>,
    pub home: Option<bool>,
    pub period_count: Option<u32>,
    pub players_on_field: Option<u32>,
    pub period_length: Option<u32>,
}

impl MatchUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.opponent.is_none()
            && self.home.is_none()
            && self.period_count.is_none()
            && self.players_on_field.is_none()
            && self.period_length.is_none()
    }
}

pub struct Matches {
    db: Db,
}

impl Matches {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    pub fn create(&mut self, m: &Match) -> Result<i64> {
        self.db.conn.execute(
            INSERT_MATCH,
            params![m.user_id, m.date, m.opponent, m.home, m.period_count, m.players_on_field, m.period_length],
        )?;
        Ok(self.db.conn.last_insert_rowid())
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Match>> {
        self.db
            .conn
            .query_row(SELECT_MATCH_BY_ID, params![id], Match::from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Fetches a match owned by `user_id` or fails with a user-facing error.
    pub fn get_owned(&mut self, id: i64, user_id: i64) -> Result<Match> {
        self.get(id)?
            .filter(|m| m.user_id == user_id)
            .ok_or_else(|| msg_error_anyhow!(Message::MatchNotFound(id)))
    }

    /// All matches of a coach, newest first.
    pub fn list(&mut self, user_id: i64) -> Result<Vec<Match>> {
        let mut stmt = self.db.conn.prepare(SELECT_MATCHES)?;
        let matches = stmt
            .query_map(params![user_id], Match::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(matches)
    }

    /// Applies `update` after checking the merged match against `limits`.
    ///
    /// When the period count or length changes, plan cells past the new last
    /// period are dropped and the playing time of a stored plan is recomputed,
    /// all in the same transaction as the match row.
    pub fn update(&mut self, id: i64, update: &MatchUpdate, limits: &PlanConfig) -> Result<Match> {
        let stored = self.get(id)?.ok_or_else(|| msg_error_anyhow!(Message::MatchNotFound(id)))?;
        let mut m = stored.clone();

        if let Some(date) = update.date {
            m.date = date;
        }
        if let Some(opponent) = &update.opponent {
            m.opponent = opponent.trim().to_string();
        }
        if let Some(home) = update.home {
            m.home = home;
        }
        if let Some(period_count) = update.period_count {
            m.period_count = period_count;
        }
        if let Some(players_on_field) = update.players_on_field {
            m.players_on_field = players_on_field;
        }
        if let Some(period_length) = update.period_length {
            m.period_length = period_length;
        }

        m.validate_layout(limits)?;
        let layout_changed = m.period_count != stored.period_count || m.period_length != stored.period_length;

        self.db.transaction(|tx| {
            tx.execute(
                UPDATE_MATCH,
                params![id, m.date, m.opponent, m.home, m.period_count, m.players_on_field, m.period_length],
            )?;
            if !layout_changed {
                return Ok(());
            }

            let trimmed = trim_periods(tx, id, m.period_count)?;
            let plan = read_plan(tx, id, m.period_count as usize)?;
            if !plan.is_empty() {
                let times = compute_playing_time(&plan, m.period_count as usize, m.period_length);
                write_computed(tx, id, &times)?;
            }
            debug!(match_id = id, trimmed, players = plan.len(), "match layout changed");
            Ok(())
        })?;
        Ok(m)
    }

    /// Deletes a match together with its squad, plan, playing time and formation.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.db.transaction(|tx| {
            tx.execute(DELETE_PLAYING_TIME, params![id])?;
            tx.execute(DELETE_PLAN, params![id])?;
            tx.execute(DELETE_SQUAD, params![id])?;
            tx.execute(DELETE_FORMATION, params![formation_key(id)])?;
            Ok(tx.execute(DELETE_MATCH, params![id])?)
        })?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::MatchNotFound(id)));
        }
        Ok(())
    }
}
