//! Stored substitution plans.
//!
//! A plan is kept as one row per player and 0-based period holding the
//! player's on-field flag. The in-memory form is [`SubstitutionPlan`], keyed
//! by player id; this module converts between the two.
//!
//! ## Features
//!
//! - **Whole-plan replacement**: Saving a plan swaps every row of the match in one transaction
//! - **Single cells**: Toggling one player in one period without touching the rest
//! - **Squad alignment**: Loading a plan for the current squad fills gaps with "off the field"
//! - **Atomic save**: [`Plans::save_with_playing_time`] commits the plan and the minutes it implies together
//!
//! ## Usage
//!
//! ```ignore
//! use minkamp::db::plans::Plans;
//!
//! let mut plans = Plans::new()?;
//! let plan = plans.load_plan(match_id, 12)?;
//! plans.save_with_playing_time(match_id, &plan, 12, &times)?;
//! ```

use crate::db::db::Db;
use crate::db::players::Player;
use crate::db::playing_time::write_computed;
use crate::libs::plan::{normalize_sequence, PlayerPlan, PlayingTime, SubstitutionPlan};
use anyhow::Result;
use rusqlite::{params, Connection, Row, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Every stored cell of a match, in period order.
const SELECT_RECORDS: &str = "SELECT id, match_id, player_id, period, on_field, created_at, updated_at
    FROM plans WHERE match_id = ?1 ORDER BY period, player_id";

/// Stored cells joined with the player name, grouped by player.
///
/// Feeds [`read_plan`], which folds the rows back into one sequence per player.
const SELECT_PLAN: &str = "
    SELECT b.player_id, p.name, b.period, b.on_field
    FROM plans b
    JOIN players p ON p.id = b.player_id
    WHERE b.match_id = ?1
    ORDER BY b.player_id, b.period
";

const DELETE_PLAN: &str = "DELETE FROM plans WHERE match_id = ?1";

/// Drops the cells of periods that no longer exist after the period count shrinks.
const DELETE_PERIODS_FROM: &str = "DELETE FROM plans WHERE match_id = ?1 AND period >= ?2";

/// Insert a cell or overwrite its flag.
///
/// `(match_id, player_id, period)` is unique, so a repeated write updates the
/// flag and bumps `updated_at` instead of failing.
const UPSERT_RECORD: &str = "INSERT INTO plans (match_id, player_id, period, on_field) VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(match_id, player_id, period)
    DO UPDATE SET on_field = excluded.on_field, updated_at = CURRENT_TIMESTAMP";

/// One cell of a stored plan: a player's on-field flag for one 0-based period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionRecord {
    pub id: Option<i64>,
    pub match_id: i64,
    pub player_id: i64,
    pub period: u32,
    pub on_field: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl SubstitutionRecord {
    pub fn new(match_id: i64, player_id: i64, period: u32, on_field: bool) -> Self {
        Self {
            id: None,
            match_id,
            player_id,
            period,
            on_field,
            created_at: None,
            updated_at: None,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(SubstitutionRecord {
            id: row.get(0)?,
            match_id: row.get(1)?,
            player_id: row.get(2)?,
            period: row.get(3)?,
            on_field: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

/// Flattens a plan into one record per player and period.
pub fn plan_records(match_id: i64, plan: &SubstitutionPlan<i64>, period_count: usize) -> Vec<SubstitutionRecord> {
    plan.iter()
        .flat_map(|(player_id, player)| {
            (0..period_count).map(move |period| SubstitutionRecord::new(match_id, *player_id, period as u32, player.is_on_field(period)))
        })
        .collect()
}

/// Replaces the cells of a match inside an open transaction.
///
/// Records that belong to another match are skipped with a warning.
pub(crate) fn write_records(tx: &Transaction, match_id: i64, records: &[SubstitutionRecord]) -> Result<()> {
    tx.execute(DELETE_PLAN, params![match_id])?;
    let mut stmt = tx.prepare(UPSERT_RECORD)?;
    for record in records {
        if record.match_id != match_id {
            warn!(match_id, record_match_id = record.match_id, "skipping plan record of another match");
            continue;
        }
        stmt.execute(params![match_id, record.player_id, record.period, record.on_field])?;
    }
    Ok(())
}

/// Removes cells at or beyond `period_count`.
pub(crate) fn trim_periods(tx: &Transaction, match_id: i64, period_count: u32) -> Result<usize> {
    Ok(tx.execute(DELETE_PERIODS_FROM, params![match_id, period_count])?)
}

/// Reads the stored plan of a match, padded or cut to `period_count` periods.
///
/// Takes a plain connection so it works both on [`Db::conn`] and inside a
/// transaction.
///
/// # Arguments
///
/// * `conn` - Open connection or transaction
/// * `match_id` - Match whose plan is read
/// * `period_count` - Length every player's sequence is resized to
///
/// # Returns
///
/// One [`PlayerPlan`] per player with at least one stored cell. Missing cells
/// read as off the field.
pub(crate) fn read_plan(conn: &Connection, match_id: i64, period_count: usize) -> Result<SubstitutionPlan<i64>> {
    let mut stmt = conn.prepare(SELECT_PLAN)?;
    let rows = stmt
        .query_map(params![match_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, bool>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut plan = SubstitutionPlan::new();
    for (player_id, name, period, on_field) in rows {
        if plan.get(&player_id).is_none() {
            plan.insert(player_id, PlayerPlan::new(name, Vec::new()));
        }
        plan.set(&player_id, period as usize, on_field);
    }
    plan.resize(period_count);
    Ok(plan)
}

/// Plan storage for the `plans` table.
pub struct Plans {
    db: Db,
}

impl Plans {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    /// Raw cells of a match, ordered by period then player.
    pub fn fetch(&mut self, match_id: i64) -> Result<Vec<SubstitutionRecord>> {
        let mut stmt = self.db.conn.prepare(SELECT_RECORDS)?;
        let records = stmt
            .query_map(params![match_id], SubstitutionRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Swaps the stored plan of a match for `records` in one transaction.
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match whose cells are replaced
    /// * `records` - New cells; entries for other matches are ignored
    ///
    /// # Returns
    ///
    /// `Ok(())` once the transaction commits. On error nothing changes.
    pub fn replace(&mut self, match_id: i64, records: &[SubstitutionRecord]) -> Result<()> {
        self.db.transaction(|tx| write_records(tx, match_id, records))
    }

    pub fn save_plan(&mut self, match_id: i64, plan: &SubstitutionPlan<i64>, period_count: usize) -> Result<()> {
        self.replace(match_id, &plan_records(match_id, plan, period_count))
    }

    /// Saves a plan and the playing time computed from it as one unit.
    ///
    /// Both the `plans` rows and the `playing_time` rows of the match are
    /// replaced in a single transaction, so a failure in either leaves the
    /// previously saved plan and minutes in place.
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match being saved
    /// * `plan` - Plan keyed by player id
    /// * `period_count` - Number of periods written per player
    /// * `times` - Minutes per player id, usually from `compute_playing_time`
    ///
    /// # Returns
    ///
    /// `Ok(())` when both tables were written and committed.
    pub fn save_with_playing_time(
        &mut self,
        match_id: i64,
        plan: &SubstitutionPlan<i64>,
        period_count: usize,
        times: &BTreeMap<i64, PlayingTime>,
    ) -> Result<()> {
        let records = plan_records(match_id, plan, period_count);
        self.db.transaction(|tx| {
            write_records(tx, match_id, &records)?;
            write_computed(tx, match_id, times)
        })
    }

    /// Sets a single cell, inserting it when missing.
    pub fn set(&mut self, match_id: i64, player_id: i64, period: u32, on_field: bool) -> Result<()> {
        self.db
            .conn
            .execute(UPSERT_RECORD, params![match_id, player_id, period, on_field])?;
        Ok(())
    }

    pub fn delete(&mut self, match_id: i64) -> Result<usize> {
        Ok(self.db.conn.execute(DELETE_PLAN, params![match_id])?)
    }

    /// Deletes the plan of a match and its playing time in one transaction.
    ///
    /// # Returns
    ///
    /// The number of plan cells removed.
    pub fn clear_with_playing_time(&mut self, match_id: i64) -> Result<usize> {
        self.db.transaction(|tx| {
            let removed = tx.execute(DELETE_PLAN, params![match_id])?;
            write_computed(tx, match_id, &BTreeMap::new())?;
            Ok(removed)
        })
    }

    /// The stored plan of a match, one sequence per player that has records.
    pub fn load_plan(&mut self, match_id: i64, period_count: usize) -> Result<SubstitutionPlan<i64>> {
        read_plan(&self.db.conn, match_id, period_count)
    }

    /// Plan for the current squad: stored flags where they exist, off the field otherwise.
    /// Players no longer in the squad are left out.
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match whose stored plan is read
    /// * `squad` - Players currently picked for the match
    /// * `period_count` - Length of every returned sequence
    ///
    /// # Returns
    ///
    /// A plan with exactly one entry per squad player that has an id.
    pub fn load_plan_for_squad(&mut self, match_id: i64, squad: &[Player], period_count: usize) -> Result<SubstitutionPlan<i64>> {
        let stored = self.load_plan(match_id, period_count)?;
        let mut plan = SubstitutionPlan::new();

        for player in squad {
            let Some(player_id) = player.id else { continue };
            let on_field = stored
                .get(&player_id)
                .map(|p| p.on_field.clone())
                .unwrap_or_default();
            let (on_field, _) = normalize_sequence(&on_field, period_count);
            plan.insert(player_id, PlayerPlan::new(player.name.clone(), on_field));
        }
        Ok(plan)
    }
}
