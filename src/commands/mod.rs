pub mod export;
pub mod formation;
pub mod init;
pub mod login;
pub mod logout;
pub mod matches;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod plan;
pub mod player;
pub mod register;
pub mod settings;
pub mod squad;
pub mod stats;

use crate::libs::{messages::Message, session::Session};
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Create a coach account")]
    Register(register::RegisterArgs),
    #[command(about = "Log in")]
    Login(login::LoginArgs),
    #[command(about = "Log out and clear the session")]
    Logout,
    #[command(about = "Show the logged in coach")]
    Whoami,
    #[command(about = "Manage matches")]
    Match(matches::MatchArgs),
    #[command(about = "Manage players")]
    Player(player::PlayerArgs),
    #[command(about = "Pick the squad for a match")]
    Squad(squad::SquadArgs),
    #[command(about = "Edit, validate and save the substitution plan")]
    Plan(plan::PlanArgs),
    #[command(about = "Choose a formation for a match")]
    Formation(formation::FormationArgs),
    #[command(about = "Playing time statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Export plans, squads and statistics")]
    Export(export::ExportArgs),
    #[command(about = "Show or change plan settings")]
    Settings(settings::SettingsArgs),
    #[cfg(debug_assertions)]
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Register(args) => register::cmd(args),
            Commands::Login(args) => login::cmd(args),
            Commands::Logout => logout::cmd(),
            Commands::Whoami => {
                match Session::load()?.current_user() {
                    Some(user) => msg_print!(Message::LoggedInAs(user.username)),
                    None => msg_info!(Message::NotLoggedIn),
                }
                Ok(())
            }
            Commands::Match(args) => matches::cmd(args).await,
            Commands::Player(args) => player::cmd(args).await,
            Commands::Squad(args) => squad::cmd(args).await,
            Commands::Plan(args) => plan::cmd(args).await,
            Commands::Formation(args) => formation::cmd(args).await,
            Commands::Stats(args) => stats::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
            Commands::Settings(args) => settings::cmd(args),
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
