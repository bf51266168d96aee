//! Key/value settings per coach with a global fallback.
//!
//! Each row is scoped to a user id. Rows stored under [`GLOBAL_USER`] act as
//! defaults for every coach and also hold data that belongs to a match rather
//! than a person, such as the chosen formation.
//!
//! ## Features
//!
//! - **Per-coach overrides**: A coach's own value wins over the global one
//! - **On-field limits**: Typed access to the min/max players on the field
//! - **Formations**: One validated formation name per match
//!
//! ## Usage
//!
//! ```ignore
//! use minkamp::db::settings::Settings;
//!
//! let mut settings = Settings::new()?;
//! settings.set_plan_limits(user_id, 5, 9)?;
//! let (min, max) = settings.plan_limits(user_id, &config.plan)?;
//! ```

use crate::db::db::Db;
use crate::libs::config::PlanConfig;
use crate::libs::formation::find_formation;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, OptionalExtension};

/// Settings stored with this user id apply to every account.
pub const GLOBAL_USER: i64 = 0;

pub const MIN_ON_FIELD_KEY: &str = "min_on_field";
pub const MAX_ON_FIELD_KEY: &str = "max_on_field";

/// Insert a setting or overwrite its value, bumping `updated_at`.
const UPSERT_SETTING: &str = "INSERT INTO settings (user_id, key, value) VALUES (?1, ?2, ?3)
    ON CONFLICT(user_id, key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP";
const SELECT_SETTING: &str = "SELECT value FROM settings WHERE user_id = ?1 AND key = ?2";
const DELETE_SETTING: &str = "DELETE FROM settings WHERE user_id = ?1 AND key = ?2";

/// Settings key holding the formation of a match.
pub fn formation_key(match_id: i64) -> String {
    format!("formation:{}", match_id)
}

pub struct Settings {
    db: Db,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    /// Stores `value` under `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - Setting name
    /// * `value` - Raw string value
    /// * `user_id` - Owning coach, or `None` for a global setting
    pub fn set(&mut self, key: &str, value: &str, user_id: Option<i64>) -> Result<()> {
        self.db
            .conn
            .execute(UPSERT_SETTING, params![user_id.unwrap_or(GLOBAL_USER), key, value])?;
        Ok(())
    }

    /// A user's value for `key`, falling back to the global one.
    ///
    /// # Arguments
    ///
    /// * `key` - Setting name
    /// * `user_id` - Coach to look up first; `None` reads only the global value
    ///
    /// # Returns
    ///
    /// The first value found, or `None` when neither scope has one.
    pub fn get(&mut self, key: &str, user_id: Option<i64>) -> Result<Option<String>> {
        if let Some(user_id) = user_id {
            if let Some(value) = self.get_exact(key, user_id)? {
                return Ok(Some(value));
            }
        }
        self.get_exact(key, GLOBAL_USER)
    }

    fn get_exact(&mut self, key: &str, user_id: i64) -> Result<Option<String>> {
        self.db
            .conn
            .query_row(SELECT_SETTING, params![user_id, key], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Removes a setting from one scope. Returns whether a row existed.
    pub fn delete(&mut self, key: &str, user_id: Option<i64>) -> Result<bool> {
        let affected = self
            .db
            .conn
            .execute(DELETE_SETTING, params![user_id.unwrap_or(GLOBAL_USER), key])?;
        Ok(affected > 0)
    }

    /// On-field limits for a coach; unset or unreadable values fall back to `defaults`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Coach whose limits are read, with global values as fallback
    /// * `defaults` - Configured limits used when nothing is stored
    ///
    /// # Returns
    ///
    /// `(min_on_field, max_on_field)`.
    pub fn plan_limits(&mut self, user_id: i64, defaults: &PlanConfig) -> Result<(usize, usize)> {
        let min = self
            .get(MIN_ON_FIELD_KEY, Some(user_id))?
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.min_on_field);
        let max = self
            .get(MAX_ON_FIELD_KEY, Some(user_id))?
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_on_field);
        Ok((min, max))
    }

    /// Stores a coach's on-field limits after checking `0 < min <= max`.
    pub fn set_plan_limits(&mut self, user_id: i64, min: usize, max: usize) -> Result<()> {
        if min == 0 || min > max {
            return Err(msg_error_anyhow!(Message::InvalidOnFieldLimits(min, max)));
        }
        self.set(MIN_ON_FIELD_KEY, &min.to_string(), Some(user_id))?;
        self.set(MAX_ON_FIELD_KEY, &max.to_string(), Some(user_id))?;
        Ok(())
    }

    pub fn formation(&mut self, match_id: i64) -> Result<Option<String>> {
        self.get_exact(&formation_key(match_id), GLOBAL_USER)
    }

    /// Stores the formation of a match under its canonical name.
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match the formation applies to
    /// * `formation` - Formation name as typed, e.g. `4-4-2`
    ///
    /// # Returns
    ///
    /// `Ok(())`, or an `UnknownFormation` error for names that are not in the catalogue.
    pub fn set_formation(&mut self, match_id: i64, formation: &str) -> Result<()> {
        let formation = find_formation(formation).ok_or_else(|| msg_error_anyhow!(Message::UnknownFormation(formation.to_string())))?;
        self.set(&formation_key(match_id), formation.name, None)
    }
}
