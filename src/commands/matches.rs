//! Match management: create, list, edit, delete and select the match the
//! other commands work on.

use crate::{
    db::{
        matches::{Match, MatchUpdate, Matches},
        settings::Settings,
    },
    libs::{
        config::{Config, PlanConfig},
        messages::Message,
        periods::{period_count_for, validate_period_configuration},
        session::{CurrentUser, Session, MATCH_ID_KEY},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

#[derive(Debug, Args)]
pub struct MatchArgs {
    #[command(subcommand)]
    command: Option<MatchCommand>,
}

#[derive(Debug, Subcommand)]
enum MatchCommand {
    /// Create a match and select it
    Create {
        opponent: String,
        /// Match date (`today` or YYYY-MM-DD)
        #[arg(short, long, default_value = "today")]
        date: String,
        #[arg(long)]
        away: bool,
        /// Number of periods, derived from the match length when omitted
        #[arg(short, long)]
        periods: Option<u32>,
        /// Period length in minutes
        #[arg(short = 'l', long)]
        period_length: Option<u32>,
        /// Players on the field at once
        #[arg(short = 'n', long)]
        on_field: Option<u32>,
        /// Match length in minutes
        #[arg(short, long)]
        minutes: Option<u32>,
    },
    List,
    Show {
        id: Option<i64>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        opponent: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        home: Option<bool>,
        #[arg(short, long)]
        periods: Option<u32>,
        #[arg(short = 'l', long)]
        period_length: Option<u32>,
        #[arg(short = 'n', long)]
        on_field: Option<u32>,
    },
    Delete {
        id: i64,
    },
    Select {
        id: Option<i64>,
    },
}

pub async fn cmd(args: MatchArgs) -> Result<()> {
    let mut session = Session::load()?;
    let user = session.require_user()?;

    match args.command {
        Some(MatchCommand::Create {
            opponent,
            date,
            away,
            periods,
            period_length,
            on_field,
            minutes,
        }) => handle_create(
            &mut session,
            &user,
            CreateOptions {
                opponent,
                date,
                home: !away,
                periods,
                period_length,
                on_field,
                minutes,
            },
        ),
        Some(MatchCommand::List) | None => handle_list(&session, &user),
        Some(MatchCommand::Show { id }) => handle_show(&session, &user, id),
        Some(MatchCommand::Edit {
            id,
            opponent,
            date,
            home,
            periods,
            period_length,
            on_field,
        }) => {
            let update = MatchUpdate {
                date: date.as_deref().map(parse_date).transpose()?,
                opponent,
                home,
                period_count: periods,
                players_on_field: on_field,
                period_length,
            };
            handle_edit(&user, id, update)
        }
        Some(MatchCommand::Delete { id }) => handle_delete(&mut session, &user, id),
        Some(MatchCommand::Select { id }) => handle_select(&mut session, &user, id),
    }
}

struct CreateOptions {
    opponent: String,
    date: String,
    home: bool,
    periods: Option<u32>,
    period_length: Option<u32>,
    on_field: Option<u32>,
    minutes: Option<u32>,
}

fn handle_create(session: &mut Session, user: &CurrentUser, options: CreateOptions) -> Result<()> {
    if options.opponent.trim().is_empty() {
        msg_bail_anyhow!(Message::OpponentRequired);
    }

    let config = Config::load()?;
    let plan = &config.plan;
    let date = parse_date(&options.date)?;
    let period_length = options.period_length.unwrap_or(plan.period_length_minutes);
    let minutes = options.minutes.unwrap_or(plan.match_minutes);

    if options.periods.is_none() {
        if let Some(problem) = validate_period_configuration(minutes, period_length, plan.min_periods, plan.max_periods) {
            msg_bail_anyhow!(Message::InvalidPeriodConfiguration(problem));
        }
    }
    if !(plan.min_match_minutes..=plan.max_match_minutes).contains(&minutes) {
        msg_warning!(Message::UnusualMatchLength(minutes, plan.min_match_minutes, plan.max_match_minutes));
    }

    let mut m = Match::new(user.id, date, &options.opponent, options.home, plan);
    m.period_length = period_length;
    m.period_count = options.periods.unwrap_or_else(|| period_count_for(minutes, period_length));
    if let Some(on_field) = options.on_field {
        m.players_on_field = on_field;
    }
    m.validate_layout(&match_limits(plan.clone(), user.id)?)?;

    let id = Matches::new()?.create(&m)?;
    session.select_match(id)?;
    session.save()?;

    msg_success!(Message::MatchCreated(m.title(), id));
    Ok(())
}

fn handle_list(session: &Session, user: &CurrentUser) -> Result<()> {
    let matches = Matches::new()?.list(user.id)?;

    if matches.is_empty() {
        msg_info!(Message::NoMatchesFound);
        return Ok(());
    }

    msg_print!(Message::MatchListHeader, true);
    View::matches(&matches, session.selected_match())
}

fn handle_show(session: &Session, user: &CurrentUser, id: Option<i64>) -> Result<()> {
    let (_, m) = current_match(session, user.id, id)?;

    msg_print!(Message::MatchHeader(m.title()), true);
    View::matches(&[m], session.selected_match())
}

fn handle_edit(user: &CurrentUser, id: i64, update: MatchUpdate) -> Result<()> {
    if update.is_empty() {
        msg_info!(Message::NothingToUpdate);
        return Ok(());
    }

    let limits = match_limits(Config::load()?.plan, user.id)?;
    let mut matches = Matches::new()?;
    matches.get_owned(id, user.id)?;
    let m = matches.update(id, &update, &limits)?;

    msg_success!(Message::MatchUpdated(m.title()));
    Ok(())
}

fn handle_delete(session: &mut Session, user: &CurrentUser, id: i64) -> Result<()> {
    let mut matches = Matches::new()?;
    let m = matches.get_owned(id, user.id)?;

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteMatch(m.title()).to_string())
        .default(false)
        .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    matches.delete(id)?;
    session.discard_draft_plan(id);
    if session.selected_match() == Some(id) {
        session.remove(MATCH_ID_KEY);
    }
    session.save()?;

    msg_success!(Message::MatchDeleted(m.title()));
    Ok(())
}

fn handle_select(session: &mut Session, user: &CurrentUser, id: Option<i64>) -> Result<()> {
    let mut matches = Matches::new()?;

    let m = match id {
        Some(id) => matches.get_owned(id, user.id)?,
        None => {
            let all = matches.list(user.id)?;
            if all.is_empty() {
                msg_info!(Message::NoMatchesFound);
                return Ok(());
            }
            let titles: Vec<String> = all.iter().map(Match::title).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::SelectMatch.to_string())
                .items(&titles)
                .default(0)
                .interact()?;
            all.into_iter().nth(selection).ok_or_else(|| anyhow::anyhow!("selection out of range"))?
        }
    };

    let Some(match_id) = m.id else {
        msg_bail_anyhow!(Message::MatchNotFound(0));
    };
    session.select_match(match_id)?;
    session.save()?;

    msg_success!(Message::MatchSelected(m.title()));
    Ok(())
}

/// Configured plan limits with the coach's own on-field limits applied.
fn match_limits(mut limits: PlanConfig, user_id: i64) -> Result<PlanConfig> {
    let (min_on_field, max_on_field) = Settings::new()?.plan_limits(user_id, &limits)?;
    limits.min_on_field = min_on_field;
    limits.max_on_field = max_on_field;
    Ok(limits)
}

/// Resolves the match a command works on: the explicit id when given,
/// otherwise the match selected in the session.
pub(crate) fn current_match(session: &Session, user_id: i64, id: Option<i64>) -> Result<(i64, Match)> {
    let Some(match_id) = id.or_else(|| session.selected_match()) else {
        msg_bail_anyhow!(Message::NoMatchSelected);
    };
    let m = Matches::new()?.get_owned(match_id, user_id)?;
    Ok((match_id, m))
}

pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
