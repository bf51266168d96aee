use super::formation::FORMATIONS;
use super::periods::period_label;
use super::plan::{compute_playing_time, count_on_field, detect_substitutions, format_substitution_summary, SubstitutionPlan};
use crate::db::matches::Match;
use crate::db::players::Player;
use crate::db::playing_time::{PlayingTimeRecord, SeasonTotal};
use crate::db::squads::SquadEntry;
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn matches(matches: &[Match], selected: Option<i64>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "ID", "DATE", "OPPONENT", "VENUE", "PERIODS", "ON FIELD", "MINUTES"]);
        for m in matches {
            let marker = if m.id.is_some() && m.id == selected { "*" } else { "" };
            table.add_row(row![
                marker,
                m.id.unwrap_or(0),
                m.date.format("%Y-%m-%d"),
                m.opponent,
                if m.home { "Home" } else { "Away" },
                format!("{} x {} min", m.period_count, m.period_length),
                m.players_on_field,
                m.match_minutes()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn players(players: &[Player]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NUMBER", "NAME", "POSITION", "ACTIVE"]);
        for player in players {
            table.add_row(row![
                player.id.unwrap_or(0),
                player.number.map(|n| n.to_string()).unwrap_or_default(),
                player.name,
                player.position,
                if player.active { "Yes" } else { "No" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn squad(entries: &[SquadEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NUMBER", "NAME", "POSITION", "SELECTED"]);
        for entry in entries {
            table.add_row(row![
                entry.player.id.unwrap_or(0),
                entry.player.number.map(|n| n.to_string()).unwrap_or_default(),
                entry.player.name,
                entry.player.position,
                if entry.selected { "✔" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Plan grid: one row per player, one column per period, with
    /// per-period counts and substitutions underneath.
    pub fn plan(m: &Match, squad: &[Player], plan: &SubstitutionPlan<i64>) -> Result<()> {
        let period_count = m.period_count as usize;
        let times = compute_playing_time(plan, period_count, m.period_length);
        let mut table = Table::new();

        let mut header = vec![Cell::new("PLAYER"), Cell::new("POS")];
        header.extend((0..period_count).map(|p| Cell::new(&(p + 1).to_string())));
        header.push(Cell::new("MIN"));
        header.push(Cell::new("%"));
        table.add_row(Row::new(header));

        for player in squad {
            let Some(id) = player.id else { continue };
            let Some(entry) = plan.get(&id) else { continue };

            let mut cells = vec![Cell::new(&entry.name), Cell::new(&player.position.to_string())];
            cells.extend((0..period_count).map(|p| Cell::new(if entry.is_on_field(p) { "●" } else { "·" })));
            let (minutes, percent) = times.get(&id).map(|t| (t.total_minutes, t.percent)).unwrap_or((0, 0.0));
            cells.push(Cell::new(&minutes.to_string()));
            cells.push(Cell::new(&format!("{:.1}", percent)));
            table.add_row(Row::new(cells));
        }

        let mut counts = vec![Cell::new("ON FIELD"), Cell::new("")];
        counts.extend(count_on_field(plan, period_count).iter().map(|c| Cell::new(&c.to_string())));
        table.add_row(Row::new(counts));
        table.printstd();

        let mut subs = Table::new();
        subs.add_row(row!["PERIOD", "SUBSTITUTIONS"]);
        for period in 1..period_count {
            let (entering, leaving) = detect_substitutions(plan, period);
            subs.add_row(row![period_label(period), format_substitution_summary(&entering, &leaving)]);
        }
        if period_count > 1 {
            subs.printstd();
        }

        Ok(())
    }

    pub fn playing_time(records: &[PlayingTimeRecord], match_minutes: u32) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["PLAYER", "MINUTES", "%"]);
        for record in records {
            let percent = if match_minutes == 0 {
                0.0
            } else {
                record.minutes as f64 / match_minutes as f64 * 100.0
            };
            table.add_row(row![record.player_name, record.minutes, format!("{:.1}", percent)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn season_totals(totals: &[SeasonTotal]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["PLAYER", "POSITION", "MATCHES", "MINUTES", "POSSIBLE", "%"]);
        for total in totals {
            table.add_row(row![
                total.name,
                total.position,
                total.matches,
                total.minutes,
                total.possible_minutes,
                format!("{:.1}", total.percent)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn formations(current: Option<&str>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "FORMATION", "DEFENSE", "MIDFIELD", "ATTACK", "ON FIELD"]);
        for formation in FORMATIONS.iter() {
            let marker = if current == Some(formation.name) { "*" } else { "" };
            table.add_row(row![
                marker,
                formation.name,
                formation.defense,
                formation.midfield,
                formation.attack,
                formation.players_on_field()
            ]);
        }
        table.printstd();

        Ok(())
    }
}
