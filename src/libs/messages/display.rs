//! Text of every [`Message`].
//!
//! All user-facing wording is kept here so command code only deals with
//! variants and their values.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === ACCOUNT MESSAGES ===
            Message::UserRegistered(username) => format!("Account '{}' created, you are logged in", username),
            Message::LoggedIn(username) => format!("Logged in as {}", username),
            Message::LoggedOut(username) => format!("{} logged out", username),
            Message::LoggedInAs(username) => format!("Logged in as {}", username),
            Message::NotLoggedIn => "Not logged in".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigReset => "Configuration reset to defaults".to_string(),
            Message::ConfigModulePlan => "Plan defaults".to_string(),
            Message::PromptMinOnField => "Minimum players on field".to_string(),
            Message::PromptMaxOnField => "Maximum players on field".to_string(),
            Message::PromptPlayersOnField => "Players on field in new matches".to_string(),
            Message::PromptPeriodLength => "Period length (minutes)".to_string(),
            Message::PromptMatchMinutes => "Match length (minutes)".to_string(),
            Message::SettingsHeader => "Plan settings".to_string(),
            Message::SettingOnFieldLimits(min, max) => format!("Players on field: {} to {}", min, max),
            Message::SettingPlayersOnField(count) => format!("Players on field in new matches: {}", count),
            Message::SettingMatchLength(minutes, period) => {
                format!("Match length: {} minutes in {} minute periods", minutes, period)
            }
            Message::SettingDatabase(path) => format!("Database: {}", path),
            Message::OnFieldLimitsSaved(min, max) => format!("Players on field set to {} to {}", min, max),
            Message::InvalidOnFieldLimits(min, max) => {
                format!("Invalid on-field limits {} to {}: minimum must be positive and not above maximum", min, max)
            }

            // === MATCH MESSAGES ===
            Message::MatchCreated(title, id) => format!("Match {} created with id {} and selected", title, id),
            Message::MatchUpdated(title) => format!("Match {} updated", title),
            Message::MatchDeleted(title) => format!("Match {} deleted", title),
            Message::MatchSelected(title) => format!("Selected match {}", title),
            Message::MatchNotFound(id) => format!("Match {} not found", id),
            Message::MatchHeader(title) => format!("Match {}", title),
            Message::MatchListHeader => "Matches".to_string(),
            Message::NoMatchesFound => "No matches found".to_string(),
            Message::NoMatchSelected => "No match selected, run `minkamp match select` or pass --match".to_string(),
            Message::SelectMatch => "Select a match".to_string(),
            Message::OpponentRequired => "Opponent name is required".to_string(),
            Message::ConfirmDeleteMatch(title) => {
                format!("Delete match {} with its squad, plan and playing time?", title)
            }
            Message::InvalidPeriodConfiguration(problem) => format!("Invalid period setup: {}", problem),
            Message::UnusualMatchLength(minutes, min, max) => {
                format!("Match length {} minutes is outside the usual {} to {} minutes", minutes, min, max)
            }

            // === PLAYER MESSAGES ===
            Message::PlayerCreated(name) => format!("Player '{}' added", name),
            Message::PlayerUpdated(name) => format!("Player '{}' updated", name),
            Message::PlayerActivated(name) => format!("Player '{}' is active again", name),
            Message::PlayerDeactivated(name) => format!("Player '{}' deactivated", name),
            Message::PlayerAlreadyExists(name) => format!("Player '{}' already exists", name),
            Message::PlayerNotFound(identifier) => format!("Player '{}' not found", identifier),
            Message::PlayerNameRequired => "Player name is required".to_string(),
            Message::PlayerListHeader => "Players".to_string(),
            Message::NoPlayersFound => "No players found, add some with `minkamp player add`".to_string(),
            Message::PlayersImported(created, skipped) => {
                format!("Imported {} players, skipped {} already known", created, skipped)
            }

            // === SQUAD MESSAGES ===
            Message::SquadHeader(title) => format!("Squad for {}", title),
            Message::SquadSaved(count) => format!("Squad saved with {} players", count),
            Message::SelectSquad(title) => format!("Players in the squad for {}", title),
            Message::PlayerAddedToSquad(name) => format!("{} added to the squad", name),
            Message::PlayerRemovedFromSquad(name) => format!("{} taken out of the squad", name),
            Message::NoSquadSelected(title) => {
                format!("No squad picked for {}, run `minkamp squad set` first", title)
            }

            // === PLAN MESSAGES ===
            Message::PlanHeader(title) => format!("Substitution plan for {}", title),
            Message::PlanSaved(title) => format!("Plan for {} saved", title),
            Message::PlanCleared(count) => format!("Plan cleared ({} entries removed)", count),
            Message::PlanValid => "Plan is valid".to_string(),
            Message::PlanViolation(text) => text.clone(),
            Message::PlanWarning(text) => text.clone(),
            Message::PlanDraftUpdated => "Plan updated, run `minkamp plan save` to store it".to_string(),
            Message::PlanDraftDiscarded => "Unsaved plan changes discarded".to_string(),
            Message::NoPlanDraft => "No unsaved plan changes".to_string(),
            Message::UnsavedPlanChanges => "This plan has unsaved changes".to_string(),
            Message::PlayerOnField(name, period) => format!("{} on the field in {}", name, period),
            Message::PlayerOnBench(name, period) => format!("{} on the bench in {}", name, period),
            Message::PlayerPeriodsSet(name, count) => format!("{} plays {} periods", name, count),
            Message::PlayerNotInSquad(name) => format!("{} is not in the squad for this match", name),
            Message::InvalidPeriod(period, count) => {
                format!("Period {} does not exist, the match has periods 1 to {}", period, count)
            }
            Message::InvalidPeriodList(input) => format!("Could not read periods '{}', use e.g. 1,2,5", input),
            Message::SelectOnField(period) => format!("On the field in {}", period),
            Message::SubstitutionsHeader(title) => format!("Substitutions for {}", title),
            Message::ConfirmSaveInvalidPlan(count) => format!("The plan has {} violations. Save anyway?", count),
            Message::ConfirmClearPlan(title) => format!("Delete the stored plan for {}?", title),

            // === FORMATION MESSAGES ===
            Message::FormationListHeader => "Formations".to_string(),
            Message::FormationSet(name, title) => format!("Formation {} set for {}", name, title),
            Message::FormationOfMatch(title, name) => format!("{} plays {}", title, name),
            Message::FormationSizeMismatch(name, formation_size, on_field) => format!(
                "Formation {} needs {} players on the field, the match has {}",
                name, formation_size, on_field
            ),
            Message::NoFormationSet(title) => format!("No formation set for {}", title),
            Message::UnknownFormation(name) => format!("Unknown formation '{}'", name),

            // === PLAYING TIME MESSAGES ===
            Message::PlayingTimeHeader(title) => format!("Playing time for {}", title),
            Message::PlayingTimeTotals(total, average) => {
                format!("Total {} minutes, {:.1} minutes per player", total, average)
            }
            Message::PlayingTimeNotFound(match_id, player_id) => {
                format!("No playing time stored for player {} in match {}", player_id, match_id)
            }
            Message::NoPlayingTime(title) => format!("No playing time saved for {}", title),
            Message::SeasonStatsHeader => "Playing time this season".to_string(),
            Message::NoSeasonStats => "No saved plans yet".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(data, format) => format!("Exporting {} as {}...", data, format),
            Message::ExportCompleted(path) => format!("Export saved to {}", path),
            Message::ExportUsesSavedPlan => "Exporting the saved plan, unsaved changes are left out".to_string(),

            // === GENERAL MESSAGES ===
            Message::NothingToUpdate => "Nothing to update".to_string(),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version, latest) => format!("Database version: {} (latest {})", version, latest),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => {
                format!("  v{}: {} (applied: {})", version, name, applied_at)
            }
            Message::NothingToRollback => "Nothing to rollback".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rollback to v{} completed", version),
        };

        write!(f, "{}", text)
    }
}
