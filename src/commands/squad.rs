use super::matches::current_match;
use crate::{
    db::{players::Players, squads::Squads},
    libs::{messages::Message, session::Session, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, MultiSelect};

#[derive(Debug, Args)]
pub struct SquadArgs {
    #[command(subcommand)]
    command: Option<SquadCommand>,
    /// Match id, defaults to the selected match
    #[arg(short = 'm', long = "match", global = true)]
    match_id: Option<i64>,
}

#[derive(Debug, Subcommand)]
enum SquadCommand {
    Show,
    /// Pick the squad interactively
    Set,
    /// Add a player to the squad or take them out
    Toggle {
        /// Player id or name
        player: String,
    },
}

pub async fn cmd(args: SquadArgs) -> Result<()> {
    let session = Session::load()?;
    let user = session.require_user()?;
    let (match_id, m) = current_match(&session, user.id, args.match_id)?;
    let mut squads = Squads::new()?;

    match args.command {
        Some(SquadCommand::Show) | None => {
            let entries = squads.get(match_id, user.id)?;
            if entries.is_empty() {
                msg_info!(Message::NoPlayersFound);
                return Ok(());
            }
            msg_print!(Message::SquadHeader(m.title()), true);
            View::squad(&entries)?;
        }
        Some(SquadCommand::Set) => {
            let entries = squads.get(match_id, user.id)?;
            if entries.is_empty() {
                msg_info!(Message::NoPlayersFound);
                return Ok(());
            }

            let labels: Vec<String> = entries
                .iter()
                .map(|e| format!("{} ({})", e.player.name, e.player.position))
                .collect();
            let defaults: Vec<bool> = entries.iter().map(|e| e.selected).collect();

            let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::SelectSquad(m.title()).to_string())
                .items(&labels)
                .defaults(&defaults)
                .interact()?;

            let ids: Vec<i64> = chosen.iter().filter_map(|&i| entries[i].player.id).collect();
            squads.replace(match_id, &ids)?;
            msg_success!(Message::SquadSaved(ids.len()));
        }
        Some(SquadCommand::Toggle { player }) => {
            let player = Players::new()?.find(user.id, &player)?;
            let player_id = player.id.unwrap_or_default();
            let selected = squads.selected(match_id)?.iter().any(|p| p.id == Some(player_id));

            squads.set_player(match_id, player_id, !selected)?;
            if selected {
                msg_success!(Message::PlayerRemovedFromSquad(player.name));
            } else {
                msg_success!(Message::PlayerAddedToSquad(player.name));
            }
        }
    }

    Ok(())
}
