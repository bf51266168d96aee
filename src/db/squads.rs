use crate::db::db::Db;
use crate::db::players::{sort_by_position, Player};
use anyhow::Result;
use rusqlite::params;
use serde::{Deserialize, Serialize};

const SELECT_SQUAD: &str = "
    SELECT p.id, p.user_id, p.name, p.position, p.number, p.active, p.created_at, p.updated_at,
           COALESCE(s.selected, FALSE)
    FROM players p
    LEFT JOIN squads s ON s.player_id = p.id AND s.match_id = ?1
    WHERE p.user_id = ?2 AND p.active
";
const SELECT_SELECTED: &str = "
    SELECT p.id, p.user_id, p.name, p.position, p.number, p.active, p.created_at, p.updated_at
    FROM squads s
    JOIN players p ON p.id = s.player_id
    WHERE s.match_id = ?1 AND s.selected
";
const DELETE_SQUAD: &str = "DELETE FROM squads WHERE match_id = ?1";
const INSERT_SQUAD_ENTRY: &str = "INSERT OR IGNORE INTO squads (match_id, player_id, selected) VALUES (?1, ?2, TRUE)";
const UPSERT_SQUAD_ENTRY: &str = "INSERT INTO squads (match_id, player_id, selected) VALUES (?1, ?2, ?3)
    ON CONFLICT(match_id, player_id) DO UPDATE SET selected = excluded.selected";

/// An active player and whether they are picked for the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadEntry {
    pub player: Player,
    pub selected: bool,
}

pub struct Squads {
    db: Db,
}

impl Squads {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    /// Every active player of the coach with their selection for the match.
    pub fn get(&mut self, match_id: i64, user_id: i64) -> Result<Vec<SquadEntry>> {
        let mut stmt = self.db.conn.prepare(SELECT_SQUAD)?;
        let mut entries = stmt
            .query_map(params![match_id, user_id], |row| {
                Ok(SquadEntry {
                    player: Player::from_row(row)?,
                    selected: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        entries.sort_by(|a, b| {
            a.player
                .position
                .sort_order()
                .cmp(&b.player.position.sort_order())
                .then_with(|| a.player.name.to_lowercase().cmp(&b.player.name.to_lowercase()))
        });
        Ok(entries)
    }

    /// Players picked for the match, including ones deactivated since.
    pub fn selected(&mut self, match_id: i64) -> Result<Vec<Player>> {
        let mut stmt = self.db.conn.prepare(SELECT_SELECTED)?;
        let mut players = stmt
            .query_map(params![match_id], Player::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        sort_by_position(&mut players);
        Ok(players)
    }

    /// Replaces the whole squad of a match with `player_ids`.
    pub fn replace(&mut self, match_id: i64, player_ids: &[i64]) -> Result<()> {
        self.db.transaction(|tx| {
            tx.execute(DELETE_SQUAD, params![match_id])?;
            let mut stmt = tx.prepare(INSERT_SQUAD_ENTRY)?;
            for player_id in player_ids {
                stmt.execute(params![match_id, player_id])?;
            }
            Ok(())
        })
    }

    pub fn set_player(&mut self, match_id: i64, player_id: i64, selected: bool) -> Result<()> {
        self.db
            .conn
            .execute(UPSERT_SQUAD_ENTRY, params![match_id, player_id, selected])?;
        Ok(())
    }
}
