//! Export of plans, squads and season statistics to CSV, JSON or Excel.

use super::matches::current_match;
use crate::{
    db::{plans::Plans, playing_time::PlayingTimes, squads::Squads},
    libs::{
        export::{ExportData, ExportFormat, ExportSquadPlayer, Exporter, PlanExport},
        messages::Message,
        session::Session,
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// What to export
    #[arg(value_enum, default_value = "plan")]
    data: ExportData,

    #[arg(short, long, value_enum, default_value = "excel")]
    format: ExportFormat,

    /// Output file, defaults to `minkamp_<data>_<timestamp>.<ext>` in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Match id, defaults to the selected match
    #[arg(short = 'm', long = "match")]
    match_id: Option<i64>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let session = Session::load()?;
    let user = session.require_user()?;

    msg_info!(Message::ExportingData(format!("{:?}", args.data), format!("{:?}", args.format)));

    let label = format!("{:?}", args.data).to_lowercase();
    let exporter = Exporter::new(args.format, args.output, &label);

    match args.data {
        ExportData::Plan => {
            let (match_id, m) = current_match(&session, user.id, args.match_id)?;
            let squad = Squads::new()?.selected(match_id)?;
            if squad.is_empty() {
                msg_bail_anyhow!(Message::NoSquadSelected(m.title()));
            }
            if session.draft_plan(match_id).is_some() {
                msg_info!(Message::ExportUsesSavedPlan);
            }
            let plan = Plans::new()?.load_plan_for_squad(match_id, &squad, m.period_count as usize)?;
            exporter.export_plan(&PlanExport::build(&m, &squad, &plan))?;
        }
        ExportData::Squad => {
            let (match_id, _) = current_match(&session, user.id, args.match_id)?;
            let entries = Squads::new()?.get(match_id, user.id)?;
            let squad: Vec<ExportSquadPlayer> = entries.iter().map(ExportSquadPlayer::from).collect();
            exporter.export_squad(&squad)?;
        }
        ExportData::Stats => {
            let totals = PlayingTimes::new()?.season_totals(user.id)?;
            exporter.export_stats(&totals)?;
        }
    }

    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}
