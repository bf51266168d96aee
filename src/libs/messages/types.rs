/// Every user-facing message of the application.
///
/// Text lives in the `Display` implementation in `display.rs`; call sites
/// only pick a variant and pass the values to interpolate.
#[derive(Debug, Clone)]
pub enum Message {
    // === ACCOUNT MESSAGES ===
    UserRegistered(String),
    LoggedIn(String),
    LoggedOut(String),
    LoggedInAs(String),
    NotLoggedIn,
    PromptPassword,
    PromptPasswordConfirm,
    PasswordMismatch,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigReset,
    ConfigModulePlan,
    PromptMinOnField,
    PromptMaxOnField,
    PromptPlayersOnField,
    PromptPeriodLength,
    PromptMatchMinutes,
    SettingsHeader,
    SettingOnFieldLimits(usize, usize),
    SettingPlayersOnField(usize),
    SettingMatchLength(u32, u32),
    SettingDatabase(String),
    OnFieldLimitsSaved(usize, usize),
    InvalidOnFieldLimits(usize, usize),

    // === MATCH MESSAGES ===
    MatchCreated(String, i64),
    MatchUpdated(String),
    MatchDeleted(String),
    MatchSelected(String),
    MatchNotFound(i64),
    MatchHeader(String),
    MatchListHeader,
    NoMatchesFound,
    NoMatchSelected,
    SelectMatch,
    OpponentRequired,
    ConfirmDeleteMatch(String),
    InvalidPeriodConfiguration(String),
    UnusualMatchLength(u32, u32, u32),

    // === PLAYER MESSAGES ===
    PlayerCreated(String),
    PlayerUpdated(String),
    PlayerActivated(String),
    PlayerDeactivated(String),
    PlayerAlreadyExists(String),
    PlayerNotFound(String),
    PlayerNameRequired,
    PlayerListHeader,
    NoPlayersFound,
    PlayersImported(usize, usize),

    // === SQUAD MESSAGES ===
    SquadHeader(String),
    SquadSaved(usize),
    SelectSquad(String),
    PlayerAddedToSquad(String),
    PlayerRemovedFromSquad(String),
    NoSquadSelected(String),

    // === PLAN MESSAGES ===
    PlanHeader(String),
    PlanSaved(String),
    PlanCleared(usize),
    PlanValid,
    PlanViolation(String),
    PlanWarning(String),
    PlanDraftUpdated,
    PlanDraftDiscarded,
    NoPlanDraft,
    UnsavedPlanChanges,
    PlayerOnField(String, String),
    PlayerOnBench(String, String),
    PlayerPeriodsSet(String, usize),
    PlayerNotInSquad(String),
    InvalidPeriod(u32, u32),
    InvalidPeriodList(String),
    SelectOnField(String),
    SubstitutionsHeader(String),
    ConfirmSaveInvalidPlan(usize),
    ConfirmClearPlan(String),

    // === FORMATION MESSAGES ===
    FormationListHeader,
    FormationSet(String, String),
    FormationOfMatch(String, String),
    FormationSizeMismatch(String, usize, u32),
    NoFormationSet(String),
    UnknownFormation(String),

    // === PLAYING TIME MESSAGES ===
    PlayingTimeHeader(String),
    PlayingTimeTotals(u32, f64),
    PlayingTimeNotFound(i64, i64),
    NoPlayingTime(String),
    SeasonStatsHeader,
    NoSeasonStats,

    // === EXPORT MESSAGES ===
    ExportingData(String, String),
    ExportCompleted(String),
    ExportUsesSavedPlan,

    // === GENERAL MESSAGES ===
    NothingToUpdate,
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32, u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationHistoryEntry(u32, String, String),
    NothingToRollback,
    RollingBack(u32, u32),
    RollbackCompleted(u32),
}
