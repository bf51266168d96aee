use super::matches::current_match;
use crate::{
    db::playing_time::PlayingTimes,
    libs::{messages::Message, session::Session, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Show one match instead of the season
    #[arg(short = 'm', long = "match")]
    match_id: Option<i64>,
    /// Use the selected match
    #[arg(short, long, conflicts_with = "match_id")]
    selected: bool,
}

pub async fn cmd(args: StatsArgs) -> Result<()> {
    let session = Session::load()?;
    let user = session.require_user()?;
    let mut playing_times = PlayingTimes::new()?;

    if args.match_id.is_some() || args.selected {
        let (match_id, m) = current_match(&session, user.id, args.match_id)?;
        let records = playing_times.fetch(match_id)?;
        if records.is_empty() {
            msg_info!(Message::NoPlayingTime(m.title()));
            return Ok(());
        }

        msg_print!(Message::PlayingTimeHeader(m.title()), true);
        View::playing_time(&records, m.match_minutes())?;

        let total: u32 = records.iter().map(|r| r.minutes).sum();
        let average = total as f64 / records.len() as f64;
        msg_print!(Message::PlayingTimeTotals(total, average));
        return Ok(());
    }

    let totals = playing_times.season_totals(user.id)?;
    if totals.iter().all(|t| t.matches == 0) {
        msg_info!(Message::NoSeasonStats);
        return Ok(());
    }

    msg_print!(Message::SeasonStatsHeader, true);
    View::season_totals(&totals)
}
