use super::matches::current_match;
use crate::{
    db::settings::Settings,
    libs::{formation::find_formation, messages::Message, session::Session, view::View},
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct FormationArgs {
    #[command(subcommand)]
    command: Option<FormationCommand>,
    /// Match id, defaults to the selected match
    #[arg(short = 'm', long = "match", global = true)]
    match_id: Option<i64>,
}

#[derive(Debug, Subcommand)]
enum FormationCommand {
    /// List supported formations
    List,
    /// Use a formation for the match, e.g. `4-4-2`
    Set {
        name: String,
    },
    /// Show the formation of the match
    Show,
}

pub async fn cmd(args: FormationArgs) -> Result<()> {
    let session = Session::load()?;
    let user = session.require_user()?;
    let mut settings = Settings::new()?;

    match args.command {
        Some(FormationCommand::List) => {
            let current = match current_match(&session, user.id, args.match_id) {
                Ok((match_id, _)) => settings.formation(match_id)?,
                Err(_) => None,
            };
            msg_print!(Message::FormationListHeader, true);
            View::formations(current.as_deref())?;
        }
        Some(FormationCommand::Set { name }) => {
            let (match_id, m) = current_match(&session, user.id, args.match_id)?;
            settings.set_formation(match_id, &name)?;

            if let Some(formation) = find_formation(&name) {
                if formation.players_on_field() != m.players_on_field as usize {
                    msg_warning!(Message::FormationSizeMismatch(
                        formation.name.to_string(),
                        formation.players_on_field(),
                        m.players_on_field
                    ));
                }
                msg_success!(Message::FormationSet(formation.name.to_string(), m.title()));
            }
        }
        Some(FormationCommand::Show) | None => {
            let (match_id, m) = current_match(&session, user.id, args.match_id)?;
            match settings.formation(match_id)? {
                Some(name) => msg_print!(Message::FormationOfMatch(m.title(), name)),
                None => msg_info!(Message::NoFormationSet(m.title())),
            }
        }
    }

    Ok(())
}
