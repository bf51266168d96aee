//! Substitution plan validation and playing-time accounting.
//!
//! A substitution plan assigns every squad player an "on field" flag per
//! period. The functions in this module work on an in-memory
//! [`SubstitutionPlan`] and return plain values; they do no I/O and never
//! fail. A plan that is being edited is usually incomplete, so rule breaches
//! are reported as violations and malformed input (wrong sequence lengths,
//! impossible limits) as warnings.
//!
//! ## Usage
//!
//! ```rust
//! use minkamp::libs::plan::{compute_playing_time, validate_plan, SubstitutionPlan};
//!
//! let plan = SubstitutionPlan::from_sequences([
//!     ("Alice".to_string(), vec![true, true, false]),
//!     ("Bob".to_string(), vec![false, true, true]),
//! ]);
//!
//! let result = validate_plan(&plan, 3, 1, 1);
//! assert!(!result.is_valid());
//!
//! let minutes = compute_playing_time(&plan, 3, 5);
//! assert_eq!(minutes["Alice"].total_minutes, 10);
//! ```

use super::periods::period_label;
use super::position::{Position, DEFAULT_POSITION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use tracing::warn;

/// A stored "on field" value.
///
/// Older plan records carry an object with an explicit flag instead of a bare
/// boolean. Both shapes are accepted and reduced to a `bool` when a plan is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodEntry {
    Flag(bool),
    Record { on_field: bool },
}

impl PeriodEntry {
    pub fn is_on_field(&self) -> bool {
        match self {
            PeriodEntry::Flag(value) => *value,
            PeriodEntry::Record { on_field } => *on_field,
        }
    }
}

impl From<bool> for PeriodEntry {
    fn from(value: bool) -> Self {
        PeriodEntry::Flag(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPlan {
    pub name: String,
    pub on_field: Vec<bool>,
}

impl PlayerPlan {
    pub fn new(name: impl Into<String>, on_field: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            on_field,
        }
    }

    /// Entries past the end of the sequence count as off the field.
    pub fn is_on_field(&self, period: usize) -> bool {
        self.on_field.get(period).copied().unwrap_or(false)
    }

    pub fn periods_played(&self, period_count: usize) -> usize {
        self.on_field.iter().take(period_count).filter(|on| **on).count()
    }
}

/// A sequence whose length does not match the configured period count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub expected: usize,
    pub actual: usize,
}

impl Display for ShapeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} period entries, expected {}", self.actual, self.expected)
    }
}

/// Truncates or right-pads a sequence with `false` to `period_count` entries.
pub fn normalize_sequence(sequence: &[bool], period_count: usize) -> (Vec<bool>, Option<ShapeMismatch>) {
    let mut normalized = sequence.to_vec();
    normalized.resize(period_count, false);

    let mismatch = (sequence.len() != period_count).then(|| ShapeMismatch {
        expected: period_count,
        actual: sequence.len(),
    });

    (normalized, mismatch)
}

/// Per-player period flags for one match, keyed by player id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionPlan<K: Ord> {
    players: BTreeMap<K, PlayerPlan>,
}

impl<K: Ord> Default for SubstitutionPlan<K> {
    fn default() -> Self {
        Self { players: BTreeMap::new() }
    }
}

impl<K: Ord + Clone> SubstitutionPlan<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from stored entries of either shape.
    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, String, Vec<E>)>,
        E: Into<PeriodEntry>,
    {
        let mut plan = Self::new();
        for (id, name, periods) in entries {
            let on_field = periods.into_iter().map(|e| e.into().is_on_field()).collect();
            plan.insert(id, PlayerPlan::new(name, on_field));
        }
        plan
    }

    pub fn insert(&mut self, id: K, player: PlayerPlan) -> Option<PlayerPlan> {
        self.players.insert(id, player)
    }

    pub fn remove(&mut self, id: &K) -> Option<PlayerPlan> {
        self.players.remove(id)
    }

    pub fn get(&self, id: &K) -> Option<&PlayerPlan> {
        self.players.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &PlayerPlan)> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sets one cell, growing the player's sequence with `false` when needed.
    /// Returns `false` when the player is not part of the plan.
    pub fn set(&mut self, id: &K, period: usize, on_field: bool) -> bool {
        match self.players.get_mut(id) {
            Some(player) => {
                if player.on_field.len() <= period {
                    player.on_field.resize(period + 1, false);
                }
                player.on_field[period] = on_field;
                true
            }
            None => false,
        }
    }

    /// Flips one cell and returns the new value.
    pub fn toggle(&mut self, id: &K, period: usize) -> Option<bool> {
        let current = self.players.get(id)?.is_on_field(period);
        self.set(id, period, !current);
        Some(!current)
    }

    /// Normalizes every sequence to `period_count` entries.
    pub fn resize(&mut self, period_count: usize) {
        for player in self.players.values_mut() {
            let (normalized, mismatch) = normalize_sequence(&player.on_field, period_count);
            if let Some(mismatch) = mismatch {
                warn!(player = %player.name, "resized plan sequence: {}", mismatch);
            }
            player.on_field = normalized;
        }
    }
}

impl<K: Ord + Clone + Display> SubstitutionPlan<K> {
    /// Builds a plan where each player's display name is its id.
    pub fn from_sequences<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<bool>)>,
    {
        let mut plan = Self::new();
        for (id, on_field) in sequences {
            let name = id.to_string();
            plan.insert(id, PlayerPlan::new(name, on_field));
        }
        plan
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub violations: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
        self.warnings.extend(other.warnings);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayingTime {
    pub periods_played: usize,
    pub total_minutes: u32,
    pub percent: f64,
}

/// Number of players on the field in each period.
pub fn count_on_field<K: Ord + Clone>(plan: &SubstitutionPlan<K>, period_count: usize) -> Vec<usize> {
    (0..period_count)
        .map(|period| plan.iter().filter(|(_, player)| player.is_on_field(period)).count())
        .collect()
}

/// Checks the on-field count of every period against `[min_on_field, max_on_field]`.
pub fn validate_plan<K: Ord + Clone>(
    plan: &SubstitutionPlan<K>,
    period_count: usize,
    min_on_field: usize,
    max_on_field: usize,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    if period_count == 0 {
        warn!("plan validation skipped: period count is zero");
        result.warnings.push("period count must be positive, nothing to validate".to_string());
        return result;
    }
    if min_on_field > max_on_field {
        warn!(min_on_field, max_on_field, "plan validation skipped: minimum exceeds maximum");
        result.warnings.push(format!(
            "minimum players on field ({}) is greater than maximum ({}), nothing to validate",
            min_on_field, max_on_field
        ));
        return result;
    }

    for (_, player) in plan.iter() {
        if player.on_field.len() != period_count {
            let mismatch = ShapeMismatch {
                expected: period_count,
                actual: player.on_field.len(),
            };
            warn!(player = %player.name, "plan sequence length mismatch: {}", mismatch);
            result.warnings.push(format!("{} has {}", player.name, mismatch));
        }
    }

    for (period, count) in count_on_field(plan, period_count).into_iter().enumerate() {
        if count < min_on_field {
            result.violations.push(format!(
                "too few players on field in period {} ({}), minimum required is {}",
                period, count, min_on_field
            ));
        } else if count > max_on_field {
            result.violations.push(format!(
                "too many players on field in period {} ({}), maximum allowed is {}",
                period, count, max_on_field
            ));
        }
    }

    result
}

/// Periods played, minutes and share of the match for every player in the plan.
pub fn compute_playing_time<K: Ord + Clone>(
    plan: &SubstitutionPlan<K>,
    period_count: usize,
    period_length_minutes: u32,
) -> BTreeMap<K, PlayingTime> {
    plan.iter()
        .map(|(id, player)| {
            let periods_played = player.periods_played(period_count);
            let percent = if period_count == 0 {
                0.0
            } else {
                round_one_decimal(periods_played as f64 / period_count as f64 * 100.0)
            };
            let time = PlayingTime {
                periods_played,
                total_minutes: minutes_for(periods_played, period_length_minutes),
                percent,
            };
            (id.clone(), time)
        })
        .collect()
}

/// Players entering and leaving the field at the start of `period_index`,
/// each list sorted by name. The first period has no substitutions.
pub fn detect_substitutions<K: Ord + Clone>(plan: &SubstitutionPlan<K>, period_index: usize) -> (Vec<String>, Vec<String>) {
    if period_index == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut entering = Vec::new();
    let mut leaving = Vec::new();

    for (_, player) in plan.iter() {
        let previous = player.is_on_field(period_index - 1);
        let current = player.is_on_field(period_index);
        match (previous, current) {
            (false, true) => entering.push(player.name.clone()),
            (true, false) => leaving.push(player.name.clone()),
            _ => {}
        }
    }

    entering.sort();
    leaving.sort();
    (entering, leaving)
}

pub fn format_substitution_summary(entering: &[String], leaving: &[String]) -> String {
    let mut parts = Vec::new();
    if !entering.is_empty() {
        parts.push(format!("IN: {}", entering.join(", ")));
    }
    if !leaving.is_empty() {
        parts.push(format!("OUT: {}", leaving.join(", ")));
    }

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" | ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub index: usize,
    pub label: String,
    pub on_field: usize,
    pub substitutions: String,
}

/// One line per period for plan tables and exports.
pub fn summarize_periods<K: Ord + Clone>(plan: &SubstitutionPlan<K>, period_count: usize) -> Vec<PeriodSummary> {
    count_on_field(plan, period_count)
        .into_iter()
        .enumerate()
        .map(|(index, on_field)| {
            let (entering, leaving) = detect_substitutions(plan, index);
            PeriodSummary {
                index,
                label: period_label(index),
                on_field,
                substitutions: format_substitution_summary(&entering, &leaving),
            }
        })
        .collect()
}

/// Share of the average deviation, relative to match length, that triggers a warning.
pub const PLAYING_TIME_DEVIATION: f64 = 0.2;

/// Checks stored minutes against the match length and flags uneven distribution.
pub fn validate_playing_time(minutes_by_player: &[(String, u32)], match_minutes: u32) -> ValidationResult {
    let mut result = ValidationResult::default();
    if minutes_by_player.is_empty() {
        return result;
    }

    let average = minutes_by_player.iter().map(|(_, m)| *m as f64).sum::<f64>() / minutes_by_player.len() as f64;
    let tolerance = match_minutes as f64 * PLAYING_TIME_DEVIATION;

    for (name, minutes) in minutes_by_player {
        if *minutes > match_minutes {
            result.violations.push(format!(
                "{} is planned for {} minutes, the match only lasts {}",
                name, minutes, match_minutes
            ));
        }
        if (*minutes as f64 - average).abs() > tolerance {
            result.warnings.push(format!(
                "{} plays {} minutes, the average is {:.1}",
                name, minutes, average
            ));
        }
    }

    result
}

/// Checks the positions on the field in one period against per-position minimums.
pub fn validate_positions(on_field: &[Position], minimum_per_position: &BTreeMap<Position, usize>) -> ValidationResult {
    let mut result = ValidationResult::default();

    let mut counts: BTreeMap<Position, usize> = BTreeMap::new();
    for position in on_field {
        *counts.entry(*position).or_default() += 1;
    }

    for (position, minimum) in minimum_per_position {
        let count = counts.get(position).copied().unwrap_or(0);
        if count < *minimum {
            result.violations.push(format!(
                "too few {} players on field ({}), minimum required is {}",
                position.label().to_lowercase(),
                count,
                minimum
            ));
        }
    }

    let keepers = counts.get(&Position::Goalkeeper).copied().unwrap_or(0);
    if keepers > 1 {
        result.warnings.push(format!("more than one goalkeeper on field ({})", keepers));
    }

    result
}

/// Runs [`validate_positions`] for every period. Players without a known
/// position count as [`DEFAULT_POSITION`].
pub fn validate_plan_positions<K: Ord + Clone>(
    plan: &SubstitutionPlan<K>,
    positions: &BTreeMap<K, Position>,
    period_count: usize,
    minimum_per_position: &BTreeMap<Position, usize>,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    for period in 0..period_count {
        let on_field: Vec<Position> = plan
            .iter()
            .filter(|(_, player)| player.is_on_field(period))
            .map(|(id, _)| positions.get(id).copied().unwrap_or(DEFAULT_POSITION))
            .collect();

        let checked = validate_positions(&on_field, minimum_per_position);
        result.violations.extend(checked.violations.into_iter().map(|v| format!("period {}: {}", period, v)));
        result.warnings.extend(checked.warnings.into_iter().map(|w| format!("period {}: {}", period, w)));
    }

    result
}

/// Minutes covered by `periods` periods, saturating at `u32::MAX`.
pub fn minutes_for(periods: usize, period_length_minutes: u32) -> u32 {
    u32::try_from(periods)
        .unwrap_or(u32::MAX)
        .saturating_mul(period_length_minutes)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
