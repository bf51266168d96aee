//! Configuration management for minkamp.
//!
//! Settings live in `config.json` inside the application data directory.
//! Values can be overridden from the environment (or a `.env` file) using the
//! `MINKAMP_*` variables listed below, which is handy for tests and for
//! running several teams side by side.
//!
//! | Variable                     | Field                        |
//! |------------------------------|------------------------------|
//! | `MINKAMP_DB_PATH`            | `db_path`                    |
//! | `MINKAMP_MIN_ON_FIELD`       | `plan.min_on_field`          |
//! | `MINKAMP_MAX_ON_FIELD`       | `plan.max_on_field`          |
//! | `MINKAMP_PLAYERS_ON_FIELD`   | `plan.players_on_field`      |
//! | `MINKAMP_PERIOD_LENGTH`      | `plan.period_length_minutes` |
//! | `MINKAMP_MATCH_MINUTES`      | `plan.match_minutes`         |
//! | `MINKAMP_MIN_MATCH_MINUTES`  | `plan.min_match_minutes`     |
//! | `MINKAMP_MAX_MATCH_MINUTES`  | `plan.max_match_minutes`     |
//!
//! ```rust,no_run
//! use minkamp::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("{} players on field", config.plan.players_on_field);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Defaults for new matches and for plan validation.
///
/// A coach can override the on-field limits per account (see
/// `db::settings::Settings::plan_limits`); these values are the fallback.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlanConfig {
    /// Fewest players allowed on the field in any period.
    pub min_on_field: usize,
    /// Most players allowed on the field in any period.
    pub max_on_field: usize,
    /// On-field count suggested for new matches.
    pub players_on_field: usize,
    /// Length of one period in minutes.
    pub period_length_minutes: u32,
    /// Match length suggested for new matches.
    pub match_minutes: u32,
    pub min_match_minutes: u32,
    pub max_match_minutes: u32,
    pub min_periods: u32,
    pub max_periods: u32,
}

/// - 7 to 11 players on field, 7 suggested for new matches
/// - 5 minute periods over a 60 minute match
/// - matches between 20 and 90 minutes, 2 to 12 periods
impl Default for PlanConfig {
    fn default() -> Self {
        PlanConfig {
            min_on_field: 7,
            max_on_field: 11,
            players_on_field: 7,
            period_length_minutes: 5,
            match_minutes: 60,
            min_match_minutes: 20,
            max_match_minutes: 90,
            min_periods: 2,
            max_periods: 12,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanConfig,

    /// Database location. Defaults to `minkamp.db` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("on-field limits must satisfy 0 < min ({min}) <= max ({max})")]
    InvalidOnFieldRange { min: usize, max: usize },

    #[error("players on field ({0}) must lie within the on-field limits")]
    InvalidPlayersOnField(usize),

    #[error("period length must be positive")]
    InvalidPeriodLength,

    #[error("match length must satisfy 0 < min ({min}) <= max ({max})")]
    InvalidMatchLength { min: u32, max: u32 },

    #[error("period range must satisfy 0 < min ({min}) <= max ({max})")]
    InvalidPeriodRange { min: u32, max: u32 },

    #[error("period count ({count}) must lie within {min}..={max}")]
    InvalidPeriodCount { count: u32, min: u32, max: u32 },

    #[error("invalid value '{value}' for {key}")]
    InvalidOverride { key: String, value: String },
}

impl PlanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_on_field == 0 || self.min_on_field > self.max_on_field {
            return Err(ConfigError::InvalidOnFieldRange {
                min: self.min_on_field,
                max: self.max_on_field,
            });
        }
        if !(self.min_on_field..=self.max_on_field).contains(&self.players_on_field) {
            return Err(ConfigError::InvalidPlayersOnField(self.players_on_field));
        }
        if self.period_length_minutes == 0 {
            return Err(ConfigError::InvalidPeriodLength);
        }
        if self.min_match_minutes == 0 || self.min_match_minutes > self.max_match_minutes {
            return Err(ConfigError::InvalidMatchLength {
                min: self.min_match_minutes,
                max: self.max_match_minutes,
            });
        }
        if self.min_periods == 0 || self.min_periods > self.max_periods {
            return Err(ConfigError::InvalidPeriodRange {
                min: self.min_periods,
                max: self.max_periods,
            });
        }
        Ok(())
    }
}

impl Config {
    /// Reads the configuration file, or returns defaults when there is none.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Reads the configuration file and applies `.env` and `MINKAMP_*` overrides.
    pub fn load() -> Result<Config> {
        dotenv::dotenv().ok();

        let mut config = Self::read()?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.plan.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("MINKAMP_DB_PATH").filter(|p| !p.is_empty()) {
            self.db_path = Some(PathBuf::from(path));
        }

        let plan = &mut self.plan;
        override_value(&lookup, "MINKAMP_MIN_ON_FIELD", &mut plan.min_on_field)?;
        override_value(&lookup, "MINKAMP_MAX_ON_FIELD", &mut plan.max_on_field)?;
        override_value(&lookup, "MINKAMP_PLAYERS_ON_FIELD", &mut plan.players_on_field)?;
        override_value(&lookup, "MINKAMP_PERIOD_LENGTH", &mut plan.period_length_minutes)?;
        override_value(&lookup, "MINKAMP_MATCH_MINUTES", &mut plan.match_minutes)?;
        override_value(&lookup, "MINKAMP_MIN_MATCH_MINUTES", &mut plan.min_match_minutes)?;
        override_value(&lookup, "MINKAMP_MAX_MATCH_MINUTES", &mut plan.max_match_minutes)?;
        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.plan.clone();

        msg_print!(Message::ConfigModulePlan);
        config.plan = PlanConfig {
            min_on_field: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMinOnField.to_string())
                .default(default.min_on_field)
                .interact_text()?,
            max_on_field: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMaxOnField.to_string())
                .default(default.max_on_field)
                .interact_text()?,
            players_on_field: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPlayersOnField.to_string())
                .default(default.players_on_field)
                .interact_text()?,
            period_length_minutes: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPeriodLength.to_string())
                .default(default.period_length_minutes)
                .interact_text()?,
            match_minutes: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMatchMinutes.to_string())
                .default(default.match_minutes)
                .interact_text()?,
            ..default
        };
        config.plan.validate()?;

        Ok(config)
    }
}

fn override_value<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(value) = lookup(key) {
        *target = value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
            key: key.to_string(),
            value,
        })?;
    }
    Ok(())
}
