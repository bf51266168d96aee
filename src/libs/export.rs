//! Export of plans, squads and season statistics.
//!
//! Supports CSV, JSON and Excel output. Every export type is first gathered
//! into a serializable structure so the three writers share the same data.
//!
//! ```rust,no_run
//! use minkamp::libs::export::{ExportFormat, Exporter};
//!
//! let exporter = Exporter::new(ExportFormat::Excel, None, "plan");
//! ```

use super::periods::{period_label, period_minutes};
use super::plan::{compute_playing_time, summarize_periods, PeriodSummary, SubstitutionPlan};
use crate::db::matches::Match;
use crate::db::players::Player;
use crate::db::playing_time::SeasonTotal;
use crate::db::squads::SquadEntry;
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Color, Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportData {
    /// Substitution plan of the selected match
    Plan,
    /// Squad selection of the selected match
    Squad,
    /// Playing time across all matches
    Stats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanExport {
    pub opponent: String,
    pub date: String,
    pub home: bool,
    pub period_count: usize,
    pub period_length: u32,
    pub players: Vec<ExportPlanRow>,
    pub periods: Vec<PeriodSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportPlanRow {
    pub name: String,
    pub position: String,
    pub number: Option<u32>,
    pub on_field: Vec<bool>,
    pub minutes: u32,
    pub percent: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportSquadPlayer {
    pub name: String,
    pub position: String,
    pub number: Option<u32>,
    pub selected: bool,
}

impl PlanExport {
    /// Rows follow the squad order (position, then name).
    pub fn build(m: &Match, squad: &[Player], plan: &SubstitutionPlan<i64>) -> Self {
        let period_count = m.period_count as usize;
        let times = compute_playing_time(plan, period_count, m.period_length);

        let players = squad
            .iter()
            .filter_map(|player| {
                let id = player.id?;
                let entry = plan.get(&id)?;
                let time = times.get(&id)?;
                Some(ExportPlanRow {
                    name: entry.name.clone(),
                    position: player.position.to_string(),
                    number: player.number,
                    on_field: (0..period_count).map(|p| entry.is_on_field(p)).collect(),
                    minutes: time.total_minutes,
                    percent: time.percent,
                })
            })
            .collect();

        PlanExport {
            opponent: m.opponent.clone(),
            date: m.date.format("%Y-%m-%d").to_string(),
            home: m.home,
            period_count,
            period_length: m.period_length,
            players,
            periods: summarize_periods(plan, period_count),
        }
    }
}

impl From<&SquadEntry> for ExportSquadPlayer {
    fn from(entry: &SquadEntry) -> Self {
        ExportSquadPlayer {
            name: entry.player.name.clone(),
            position: entry.player.position.to_string(),
            number: entry.player.number,
            selected: entry.selected,
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, label: &str) -> Self {
        let default_name = format!("minkamp_{}_{}", label, Local::now().format("%Y%m%d_%H%M%S"));

        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        };

        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export_plan(&self, plan: &PlanExport) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_plan_csv(plan),
            ExportFormat::Json => self.write_json(plan),
            ExportFormat::Excel => self.export_plan_excel(plan),
        }
    }

    pub fn export_squad(&self, squad: &[ExportSquadPlayer]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_squad_csv(squad),
            ExportFormat::Json => self.write_json(&squad),
            ExportFormat::Excel => self.export_squad_excel(squad),
        }
    }

    pub fn export_stats(&self, totals: &[SeasonTotal]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_stats_csv(totals),
            ExportFormat::Json => self.write_json(&totals),
            ExportFormat::Excel => self.export_stats_excel(totals),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn plan_header(plan: &PlanExport) -> Vec<String> {
        let mut header = vec!["Name".to_string(), "Position".to_string()];
        header.extend((0..plan.period_count).map(|p| format!("{} ({})", period_label(p), period_minutes(p, plan.period_length))));
        header.push("Minutes".to_string());
        header.push("Percent".to_string());
        header
    }

    fn export_plan_csv(&self, plan: &PlanExport) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(&self.output_path)?;
        let venue = if plan.home { "Home" } else { "Away" };

        wtr.write_record([format!("SUBSTITUTION PLAN - {} ({}, {})", plan.opponent, venue, plan.date)])?;
        wtr.write_record(Self::plan_header(plan))?;
        for row in &plan.players {
            let mut record = vec![row.name.clone(), row.position.clone()];
            record.extend(row.on_field.iter().map(|on| if *on { "X".to_string() } else { String::new() }));
            record.push(row.minutes.to_string());
            record.push(format!("{:.1}%", row.percent));
            wtr.write_record(&record)?;
        }

        wtr.write_record([""])?;
        wtr.write_record(["PERIODS"])?;
        wtr.write_record(["Period", "On field", "Substitutions"])?;
        for period in &plan.periods {
            wtr.write_record([period.label.clone(), period.on_field.to_string(), period.substitutions.clone()])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_squad_csv(&self, squad: &[ExportSquadPlayer]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["Name", "Number", "Position", "Selected"])?;

        for player in squad {
            wtr.write_record([
                player.name.clone(),
                player.number.map(|n| n.to_string()).unwrap_or_default(),
                player.position.clone(),
                if player.selected { "Yes".to_string() } else { "No".to_string() },
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_stats_csv(&self, totals: &[SeasonTotal]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["Name", "Position", "Matches", "Minutes", "Possible minutes", "Percent"])?;

        for total in totals {
            wtr.write_record([
                total.name.clone(),
                total.position.to_string(),
                total.matches.to_string(),
                total.minutes.to_string(),
                total.possible_minutes.to_string(),
                format!("{:.1}%", total.percent),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn header_format() -> Format {
        Format::new().set_bold().set_background_color(Color::Gray)
    }

    fn export_plan_excel(&self, plan: &PlanExport) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Self::header_format();
        let venue = if plan.home { "Home" } else { "Away" };

        worksheet.write_string_with_format(0, 0, format!("SUBSTITUTION PLAN - {} ({}, {})", plan.opponent, venue, plan.date), &header_format)?;
        for (col, title) in Self::plan_header(plan).iter().enumerate() {
            worksheet.write_string_with_format(1, col as u16, title, &header_format)?;
        }

        let mut row = 2;
        for player in &plan.players {
            worksheet.write_string(row, 0, &player.name)?;
            worksheet.write_string(row, 1, &player.position)?;
            for (period, on) in player.on_field.iter().enumerate() {
                if *on {
                    worksheet.write_string(row, (period + 2) as u16, "X")?;
                }
            }
            let tail = (plan.period_count + 2) as u16;
            worksheet.write_number(row, tail, player.minutes as f64)?;
            worksheet.write_string(row, tail + 1, format!("{:.1}%", player.percent))?;
            row += 1;
        }

        row += 1;
        worksheet.write_string_with_format(row, 0, "PERIODS", &header_format)?;
        row += 1;
        worksheet.write_string_with_format(row, 0, "Period", &header_format)?;
        worksheet.write_string_with_format(row, 1, "On field", &header_format)?;
        worksheet.write_string_with_format(row, 2, "Substitutions", &header_format)?;
        row += 1;
        for period in &plan.periods {
            worksheet.write_string(row, 0, &period.label)?;
            worksheet.write_number(row, 1, period.on_field as f64)?;
            worksheet.write_string(row, 2, &period.substitutions)?;
            row += 1;
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn export_squad_excel(&self, squad: &[ExportSquadPlayer]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Self::header_format();

        for (col, title) in ["Name", "Number", "Position", "Selected"].iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (i, player) in squad.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_string(row, 0, &player.name)?;
            if let Some(number) = player.number {
                worksheet.write_number(row, 1, number as f64)?;
            }
            worksheet.write_string(row, 2, &player.position)?;
            worksheet.write_string(row, 3, if player.selected { "Yes" } else { "No" })?;
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn export_stats_excel(&self, totals: &[SeasonTotal]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Self::header_format();

        let headers = ["Name", "Position", "Matches", "Minutes", "Possible minutes", "Percent"];
        for (col, title) in headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (i, total) in totals.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_string(row, 0, &total.name)?;
            worksheet.write_string(row, 1, total.position.to_string())?;
            worksheet.write_number(row, 2, total.matches as f64)?;
            worksheet.write_number(row, 3, total.minutes as f64)?;
            worksheet.write_number(row, 4, total.possible_minutes as f64)?;
            worksheet.write_string(row, 5, format!("{:.1}%", total.percent))?;
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}
