use crate::{
    db::settings::Settings,
    libs::{config::Config, messages::Message, session::Session},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: Option<SettingsCommand>,
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Show the effective plan settings
    Show,
    /// Set the allowed number of players on the field
    Limits {
        min: usize,
        max: usize,
    },
}

pub fn cmd(args: SettingsArgs) -> Result<()> {
    let user = Session::load()?.require_user()?;
    let config = Config::load()?;
    let mut settings = Settings::new()?;

    match args.command {
        Some(SettingsCommand::Show) | None => {
            let (min, max) = settings.plan_limits(user.id, &config.plan)?;
            let plan = &config.plan;

            msg_print!(Message::SettingsHeader, true);
            msg_print!(Message::SettingOnFieldLimits(min, max));
            msg_print!(Message::SettingPlayersOnField(plan.players_on_field));
            msg_print!(Message::SettingMatchLength(plan.match_minutes, plan.period_length_minutes));
            msg_print!(Message::SettingDatabase(config.database_path()?.display().to_string()));
        }
        Some(SettingsCommand::Limits { min, max }) => {
            settings.set_plan_limits(user.id, min, max)?;
            msg_success!(Message::OnFieldLimitsSaved(min, max));
        }
    }

    Ok(())
}
