//! Substitution plan editing.
//!
//! Changes made with `toggle`, `set` and `edit` are kept as a draft in the
//! session until `plan save` writes them to the database together with the
//! computed playing time. `plan reset` throws the draft away.
//!
//! ## Subcommands
//!
//! - **show**: Grid of the current plan, draft or stored
//! - **toggle / set / edit**: Change who is on the field in which period
//! - **validate**: On-field limits, formation minimums and playing time balance
//! - **subs**: Players coming on and going off between periods
//! - **save**: Write the plan and its minutes in one transaction
//! - **clear**: Remove the stored plan and its minutes
//!
//! ## Usage
//!
//! ```bash
//! minkamp plan set Ola 1,2,4
//! minkamp plan toggle Kari 3
//! minkamp plan validate
//! minkamp plan save
//! ```

use super::matches::current_match;
use crate::{
    db::{
        matches::Match,
        players::{Player, Players},
        plans::Plans,
        settings::Settings,
        squads::Squads,
    },
    libs::{
        config::Config,
        formation::find_formation,
        messages::Message,
        periods::{is_valid_period, period_label},
        plan::{
            compute_playing_time, detect_substitutions, format_substitution_summary, normalize_sequence,
            validate_plan, validate_plan_positions, validate_playing_time, PlayerPlan, SubstitutionPlan,
            ValidationResult,
        },
        session::{CurrentUser, Session},
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    command: Option<PlanCommand>,
    /// Match id, defaults to the selected match
    #[arg(short = 'm', long = "match", global = true)]
    match_id: Option<i64>,
}

#[derive(Debug, Subcommand)]
enum PlanCommand {
    /// Show the plan grid
    Show,
    /// Flip one player in one period
    Toggle {
        /// Player id or name
        player: String,
        /// Period number, starting at 1
        period: u32,
    },
    /// Put a player on the field in exactly the given periods
    Set {
        /// Player id or name
        player: String,
        /// Comma separated period numbers, e.g. `1,2,5`. Empty benches the player.
        #[arg(default_value = "")]
        periods: String,
    },
    /// Pick the players on the field period by period
    Edit,
    /// Discard unsaved changes
    Reset,
    /// Check the plan against the on-field limits, formation and playing time
    Validate,
    /// Show substitutions between periods
    Subs {
        /// Period number, starting at 1
        period: Option<u32>,
    },
    /// Store the plan and its playing time
    Save {
        /// Save without asking when the plan has violations
        #[arg(short, long)]
        force: bool,
    },
    /// Delete the stored plan of the match
    Clear,
}

pub async fn cmd(args: PlanArgs) -> Result<()> {
    let mut session = Session::load()?;
    let mut ctx = PlanContext::load(&session, args.match_id)?;

    match args.command {
        Some(PlanCommand::Show) | None => handle_show(&session, &ctx),
        Some(PlanCommand::Toggle { player, period }) => handle_toggle(&mut session, &mut ctx, &player, period),
        Some(PlanCommand::Set { player, periods }) => handle_set(&mut session, &mut ctx, &player, &periods),
        Some(PlanCommand::Edit) => handle_edit(&mut session, &mut ctx),
        Some(PlanCommand::Reset) => handle_reset(&mut session, &ctx),
        Some(PlanCommand::Validate) => {
            let result = ctx.validate()?;
            print_validation(&result);
            Ok(())
        }
        Some(PlanCommand::Subs { period }) => handle_subs(&ctx, period),
        Some(PlanCommand::Save { force }) => handle_save(&mut session, &ctx, force),
        Some(PlanCommand::Clear) => handle_clear(&mut session, &ctx),
    }
}

/// Everything a plan subcommand needs: the match, its squad and the plan
/// being worked on (the session draft if there is one, else the stored plan).
struct PlanContext {
    user: CurrentUser,
    match_id: i64,
    m: Match,
    squad: Vec<Player>,
    plan: SubstitutionPlan<i64>,
    from_draft: bool,
}

impl PlanContext {
    /// Resolves the match and squad and picks the plan to work on.
    ///
    /// # Arguments
    ///
    /// * `session` - Session holding the user, the selected match and any draft
    /// * `match_id` - Explicit match id; the selected match is used when `None`
    ///
    /// # Returns
    ///
    /// The context, or an error when no match is selected or the squad is empty.
    fn load(session: &Session, match_id: Option<i64>) -> Result<Self> {
        let user = session.require_user()?;
        let (match_id, m) = current_match(session, user.id, match_id)?;
        let squad = Squads::new()?.selected(match_id)?;
        if squad.is_empty() {
            msg_bail_anyhow!(Message::NoSquadSelected(m.title()));
        }

        let period_count = m.period_count as usize;
        let (plan, from_draft) = match session.draft_plan(match_id) {
            Some(draft) => (align_to_squad(&draft, &squad, period_count), true),
            None => (Plans::new()?.load_plan_for_squad(match_id, &squad, period_count)?, false),
        };
        debug!(match_id, players = plan.len(), from_draft, "plan loaded");

        Ok(Self {
            user,
            match_id,
            m,
            squad,
            plan,
            from_draft,
        })
    }

    fn period_count(&self) -> usize {
        self.m.period_count as usize
    }

    /// Maps a 1-based period number to an index, rejecting numbers outside the match.
    fn period_index(&self, period: u32) -> Result<usize> {
        if !is_valid_period(period, self.m.period_count) {
            msg_bail_anyhow!(Message::InvalidPeriod(period, self.m.period_count));
        }
        Ok(period as usize - 1)
    }

    fn squad_player(&self, identifier: &str) -> Result<&Player> {
        let player = Players::new()?.find(self.user.id, identifier)?;
        self.squad
            .iter()
            .find(|p| p.id == player.id)
            .ok_or_else(|| msg_error_anyhow!(Message::PlayerNotInSquad(player.name)))
    }

    /// Runs every plan check for the match.
    ///
    /// On-field limits come from the coach's settings, position minimums from
    /// the stored formation when there is one, and the playing time check from
    /// the minutes the plan implies.
    ///
    /// # Returns
    ///
    /// The merged violations and warnings of all checks.
    fn validate(&self) -> Result<ValidationResult> {
        let config = Config::load()?;
        let mut settings = Settings::new()?;
        let (min_on_field, max_on_field) = settings.plan_limits(self.user.id, &config.plan)?;
        let period_count = self.period_count();

        let mut result = validate_plan(&self.plan, period_count, min_on_field, max_on_field);

        if let Some(formation) = settings.formation(self.match_id)?.as_deref().and_then(find_formation) {
            let positions: BTreeMap<i64, _> = self
                .squad
                .iter()
                .filter_map(|p| Some((p.id?, p.position)))
                .collect();
            result.merge(validate_plan_positions(
                &self.plan,
                &positions,
                period_count,
                &formation.minimum_per_position(),
            ));
        }

        let times = compute_playing_time(&self.plan, period_count, self.m.period_length);
        let minutes: Vec<(String, u32)> = self
            .plan
            .iter()
            .map(|(id, player)| (player.name.clone(), times.get(id).map(|t| t.total_minutes).unwrap_or(0)))
            .collect();
        result.merge(validate_playing_time(&minutes, self.m.match_minutes()));

        Ok(result)
    }

    fn store_draft(&self, session: &mut Session) -> Result<()> {
        session.set_draft_plan(self.match_id, &self.plan)?;
        session.save()
    }
}

/// Rebuilds a draft for the current squad: players who left the squad are
/// dropped, new players start on the bench and names are refreshed.
fn align_to_squad(draft: &SubstitutionPlan<i64>, squad: &[Player], period_count: usize) -> SubstitutionPlan<i64> {
    let mut plan = SubstitutionPlan::new();
    for player in squad {
        let Some(id) = player.id else { continue };
        let on_field = draft.get(&id).map(|p| p.on_field.clone()).unwrap_or_default();
        let (on_field, _) = normalize_sequence(&on_field, period_count);
        plan.insert(id, PlayerPlan::new(player.name.clone(), on_field));
    }
    plan
}

/// Parses `1,2,5` into period numbers. Blank input means no periods.
fn parse_periods(input: &str) -> Result<Vec<u32>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| msg_error_anyhow!(Message::InvalidPeriodList(input.to_string())))
        })
        .collect()
}

fn handle_show(session: &Session, ctx: &PlanContext) -> Result<()> {
    msg_print!(Message::PlanHeader(ctx.m.title()), true);
    View::plan(&ctx.m, &ctx.squad, &ctx.plan)?;

    if ctx.from_draft && session.draft_plan(ctx.match_id).is_some() {
        msg_info!(Message::UnsavedPlanChanges);
    }
    Ok(())
}

fn handle_toggle(session: &mut Session, ctx: &mut PlanContext, identifier: &str, period: u32) -> Result<()> {
    let index = ctx.period_index(period)?;
    let player = ctx.squad_player(identifier)?.clone();
    let player_id = player.id.unwrap_or_default();

    let Some(on_field) = ctx.plan.toggle(&player_id, index) else {
        msg_bail_anyhow!(Message::PlayerNotInSquad(player.name));
    };
    ctx.store_draft(session)?;

    if on_field {
        msg_success!(Message::PlayerOnField(player.name, period_label(index)));
    } else {
        msg_success!(Message::PlayerOnBench(player.name, period_label(index)));
    }
    Ok(())
}

fn handle_set(session: &mut Session, ctx: &mut PlanContext, identifier: &str, periods: &str) -> Result<()> {
    let indexes = parse_periods(periods)?
        .into_iter()
        .map(|p| ctx.period_index(p))
        .collect::<Result<Vec<_>>>()?;
    let player = ctx.squad_player(identifier)?.clone();
    let player_id = player.id.unwrap_or_default();

    for period in 0..ctx.period_count() {
        ctx.plan.set(&player_id, period, indexes.contains(&period));
    }
    ctx.store_draft(session)?;

    msg_success!(Message::PlayerPeriodsSet(player.name, indexes.len()));
    Ok(())
}

fn handle_edit(session: &mut Session, ctx: &mut PlanContext) -> Result<()> {
    let ids: Vec<i64> = ctx.squad.iter().filter_map(|p| p.id).collect();
    let labels: Vec<String> = ctx
        .squad
        .iter()
        .map(|p| format!("{} ({})", p.name, p.position))
        .collect();

    for period in 0..ctx.period_count() {
        let defaults: Vec<bool> = ids
            .iter()
            .map(|id| ctx.plan.get(id).map(|p| p.is_on_field(period)).unwrap_or(false))
            .collect();

        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::SelectOnField(period_label(period)).to_string())
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        for (i, id) in ids.iter().enumerate() {
            ctx.plan.set(id, period, chosen.contains(&i));
        }
    }
    ctx.store_draft(session)?;

    msg_success!(Message::PlanDraftUpdated);
    print_validation(&ctx.validate()?);
    Ok(())
}

fn handle_reset(session: &mut Session, ctx: &PlanContext) -> Result<()> {
    if session.discard_draft_plan(ctx.match_id) {
        session.save()?;
        msg_success!(Message::PlanDraftDiscarded);
    } else {
        msg_info!(Message::NoPlanDraft);
    }
    Ok(())
}

fn handle_subs(ctx: &PlanContext, period: Option<u32>) -> Result<()> {
    let periods = match period {
        Some(period) => vec![ctx.period_index(period)?],
        None => (1..ctx.period_count()).collect(),
    };

    msg_print!(Message::SubstitutionsHeader(ctx.m.title()), true);
    for index in periods {
        let (entering, leaving) = detect_substitutions(&ctx.plan, index);
        msg_print!(format!("{}: {}", period_label(index), format_substitution_summary(&entering, &leaving)));
    }
    Ok(())
}

/// Validates the plan, asks before saving a plan with violations unless
/// `force` is set, then stores plan and minutes together and drops the draft.
///
/// # Arguments
///
/// * `session` - Session whose draft is discarded after the save
/// * `ctx` - Plan context holding the plan to save
/// * `force` - Skip the confirmation for invalid plans
///
/// # Returns
///
/// `Ok(())` when saved or when the user cancels.
fn handle_save(session: &mut Session, ctx: &PlanContext, force: bool) -> Result<()> {
    let result = ctx.validate()?;
    print_validation(&result);

    if !result.is_valid() && !force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmSaveInvalidPlan(result.violations.len()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let period_count = ctx.period_count();
    let times = compute_playing_time(&ctx.plan, period_count, ctx.m.period_length);
    Plans::new()?.save_with_playing_time(ctx.match_id, &ctx.plan, period_count, &times)?;
    debug!(match_id = ctx.match_id, players = times.len(), "plan and playing time saved");

    session.discard_draft_plan(ctx.match_id);
    session.save()?;

    msg_success!(Message::PlanSaved(ctx.m.title()));
    Ok(())
}

fn handle_clear(session: &mut Session, ctx: &PlanContext) -> Result<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmClearPlan(ctx.m.title()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let removed = Plans::new()?.clear_with_playing_time(ctx.match_id)?;
    session.discard_draft_plan(ctx.match_id);
    session.save()?;

    msg_success!(Message::PlanCleared(removed));
    Ok(())
}

fn print_validation(result: &ValidationResult) {
    for violation in &result.violations {
        msg_error!(Message::PlanViolation(violation.clone()));
    }
    for warning in &result.warnings {
        msg_warning!(Message::PlanWarning(warning.clone()));
    }
    if result.is_valid() {
        msg_success!(Message::PlanValid);
    }
}
