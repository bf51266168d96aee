//! Player import from CSV.
//!
//! The first column holds the player name. Optional `number` and `position`
//! columns are matched by header name (English or Norwegian). Rows without a
//! name are skipped and unknown positions fall back to the default position.

use super::position::Position;
use anyhow::Result;
use std::io::Read;
use std::path::Path;

const NUMBER_HEADERS: [&str; 4] = ["number", "nummer", "nr", "#"];
const POSITION_HEADERS: [&str; 2] = ["position", "posisjon"];

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedPlayer {
    pub name: String,
    pub number: Option<u32>,
    pub position: Position,
}

pub fn read_players_csv(path: &Path) -> Result<Vec<ImportedPlayer>> {
    let file = std::fs::File::open(path)?;
    read_players(file)
}

pub fn read_players<R: Read>(reader: R) -> Result<Vec<ImportedPlayer>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.contains(&h.to_lowercase().as_str()))
    };
    let number_column = column(&NUMBER_HEADERS[..]);
    let position_column = column(&POSITION_HEADERS[..]);

    let mut players = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let name = record.get(0).unwrap_or("").trim();
        if name.is_empty() || name.eq_ignore_ascii_case("nan") {
            continue;
        }

        let number = number_column
            .and_then(|i| record.get(i))
            .and_then(|v| v.trim().trim_end_matches(".0").parse().ok());
        let position = Position::parse_or_default(position_column.and_then(|i| record.get(i)));

        players.push(ImportedPlayer {
            name: name.to_string(),
            number,
            position,
        });
    }

    Ok(players)
}
