//! Session state kept between command invocations.
//!
//! The session is a small JSON key-value file in the data directory. It
//! remembers who is logged in, which match is selected and any substitution
//! plan the coach is still editing. Plans only reach the database on
//! `minkamp plan save`.

use super::auth::AuthError;
use super::data_storage::DataStorage;
use super::plan::SubstitutionPlan;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SESSION_FILE_NAME: &str = "session.json";

pub const USER_ID_KEY: &str = "user_id";
pub const USERNAME_KEY: &str = "username";
pub const MATCH_ID_KEY: &str = "match_id";

pub fn draft_plan_key(match_id: i64) -> String {
    format!("draft_plan_{}", match_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl Session {
    pub fn load() -> Result<Self> {
        let path = DataStorage::new().get_path(SESSION_FILE_NAME)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            serde_json::from_str(&fs::read_to_string(path)?)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn save(&self) -> Result<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(&file, &self.values)?;
        debug!(path = %self.path.display(), keys = self.values.len(), "session saved");
        Ok(())
    }

    /// Typed read. A value of the wrong shape reads as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        self.values.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn login(&mut self, user_id: i64, username: &str) -> Result<()> {
        self.clear();
        self.set(USER_ID_KEY, &user_id)?;
        self.set(USERNAME_KEY, username)
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        Some(CurrentUser {
            id: self.get(USER_ID_KEY)?,
            username: self.get(USERNAME_KEY)?,
        })
    }

    pub fn require_user(&self) -> Result<CurrentUser> {
        self.current_user().ok_or_else(|| AuthError::NotLoggedIn.into())
    }

    pub fn selected_match(&self) -> Option<i64> {
        self.get(MATCH_ID_KEY)
    }

    pub fn select_match(&mut self, match_id: i64) -> Result<()> {
        self.set(MATCH_ID_KEY, &match_id)
    }

    pub fn draft_plan(&self, match_id: i64) -> Option<SubstitutionPlan<i64>> {
        self.get(&draft_plan_key(match_id))
    }

    pub fn set_draft_plan(&mut self, match_id: i64, plan: &SubstitutionPlan<i64>) -> Result<()> {
        self.set(&draft_plan_key(match_id), plan)
    }

    pub fn discard_draft_plan(&mut self, match_id: i64) -> bool {
        self.remove(&draft_plan_key(match_id))
    }
}
