use crate::{
    db::players::{Player, PlayerUpdate, Players},
    libs::{import::read_players_csv, messages::Message, position::Position, session::Session, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PlayerArgs {
    #[command(subcommand)]
    command: Option<PlayerCommand>,
}

#[derive(Debug, Subcommand)]
enum PlayerCommand {
    Add {
        name: String,
        /// Goalkeeper, defense, midfield or attack
        #[arg(short, long, default_value = "midfield")]
        position: Position,
        #[arg(short, long)]
        number: Option<u32>,
    },
    List {
        /// Include deactivated players
        #[arg(short, long)]
        all: bool,
    },
    Edit {
        /// Player id or name
        player: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        position: Option<Position>,
        #[arg(short, long)]
        number: Option<u32>,
        /// Remove the shirt number
        #[arg(long, conflicts_with = "number")]
        no_number: bool,
    },
    Deactivate {
        player: String,
    },
    Activate {
        player: String,
    },
    /// Import players from a CSV file
    Import {
        path: PathBuf,
    },
}

pub async fn cmd(args: PlayerArgs) -> Result<()> {
    let user = Session::load()?.require_user()?;
    let mut players = Players::new()?;

    match args.command {
        Some(PlayerCommand::Add { name, position, number }) => {
            let name = name.trim();
            if name.is_empty() {
                msg_error!(Message::PlayerNameRequired);
                return Ok(());
            }
            if players.get_by_name(user.id, name)?.is_some() {
                msg_error!(Message::PlayerAlreadyExists(name.to_string()));
                return Ok(());
            }
            players.create(&Player::new(user.id, name, position, number))?;
            msg_success!(Message::PlayerCreated(name.to_string()));
        }
        Some(PlayerCommand::List { all }) => handle_list(&mut players, user.id, all)?,
        None => handle_list(&mut players, user.id, false)?,
        Some(PlayerCommand::Edit {
            player,
            name,
            position,
            number,
            no_number,
        }) => {
            let found = players.find(user.id, &player)?;
            let update = PlayerUpdate {
                name,
                position,
                number: if no_number { Some(None) } else { number.map(Some) },
            };
            if update.name.is_none() && update.position.is_none() && update.number.is_none() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            let id = found.id.unwrap_or_default();
            let updated = players.update(id, &update)?;
            msg_success!(Message::PlayerUpdated(updated.name));
        }
        Some(PlayerCommand::Deactivate { player }) => {
            let found = players.find(user.id, &player)?;
            players.deactivate(found.id.unwrap_or_default())?;
            msg_success!(Message::PlayerDeactivated(found.name));
        }
        Some(PlayerCommand::Activate { player }) => {
            let found = players.find(user.id, &player)?;
            players.reactivate(found.id.unwrap_or_default())?;
            msg_success!(Message::PlayerActivated(found.name));
        }
        Some(PlayerCommand::Import { path }) => handle_import(&mut players, user.id, &path)?,
    }

    Ok(())
}

fn handle_list(players: &mut Players, user_id: i64, include_inactive: bool) -> Result<()> {
    let list = players.list(user_id, include_inactive)?;
    if list.is_empty() {
        msg_info!(Message::NoPlayersFound);
        return Ok(());
    }

    msg_print!(Message::PlayerListHeader, true);
    View::players(&list)
}

fn handle_import(players: &mut Players, user_id: i64, path: &std::path::Path) -> Result<()> {
    let imported = read_players_csv(path)?;

    let mut new_players = Vec::new();
    let mut skipped = 0;
    for entry in imported {
        let duplicate = players.get_by_name(user_id, &entry.name)?.is_some()
            || new_players.iter().any(|p: &Player| p.name.eq_ignore_ascii_case(&entry.name));
        if duplicate {
            skipped += 1;
            continue;
        }
        new_players.push(Player::new(user_id, &entry.name, entry.position, entry.number));
    }

    let created = players.create_many(&new_players)?;
    msg_success!(Message::PlayersImported(created, skipped));
    Ok(())
}
