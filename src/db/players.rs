use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::position::Position;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_PLAYER: &str = "INSERT INTO players (user_id, name, position, number, active) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_PLAYER: &str = "UPDATE players SET name = ?2, position = ?3, number = ?4, updated_at = CURRENT_TIMESTAMP WHERE id = ?1";
const SET_ACTIVE: &str = "UPDATE players SET active = ?2, updated_at = CURRENT_TIMESTAMP WHERE id = ?1";
const SELECT_PLAYER_BY_ID: &str = "SELECT id, user_id, name, position, number, active, created_at, updated_at FROM players WHERE id = ?1";
const SELECT_PLAYER_BY_NAME: &str = "SELECT id, user_id, name, position, number, active, created_at, updated_at
    FROM players WHERE user_id = ?1 AND name = ?2 COLLATE NOCASE";
const SELECT_PLAYERS: &str = "SELECT id, user_id, name, position, number, active, created_at, updated_at
    FROM players WHERE user_id = ?1 AND (active OR ?2)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<i64>,
    pub user_id: i64,
    pub name: String,
    pub position: Position,
    pub number: Option<u32>,
    pub active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Player {
    pub fn new(user_id: i64, name: &str, position: Position, number: Option<u32>) -> Self {
        Self {
            id: None,
            user_id,
            name: name.trim().to_string(),
            position,
            number,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let position: String = row.get(3)?;
        Ok(Player {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            position: Position::parse_or_default(Some(&position)),
            number: row.get(4)?,
            active: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

/// Orders players the way a line-up is read: by position, then name.
pub fn sort_by_position(players: &mut [Player]) {
    players.sort_by(|a, b| {
        a.position
            .sort_order()
            .cmp(&b.position.sort_order())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Changes to apply to a player. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub position: Option<Position>,
    pub number: Option<Option<u32>>,
}

pub struct Players {
    db: Db,
}

impl Players {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    pub fn create(&mut self, player: &Player) -> Result<i64> {
        self.db.conn.execute(
            INSERT_PLAYER,
            params![player.user_id, player.name, player.position.label(), player.number, player.active],
        )?;
        Ok(self.db.conn.last_insert_rowid())
    }

    /// Inserts a batch of players atomically and returns how many were added.
    pub fn create_many(&mut self, players: &[Player]) -> Result<usize> {
        self.db.transaction(|tx| {
            let mut stmt = tx.prepare(INSERT_PLAYER)?;
            for player in players {
                stmt.execute(params![player.user_id, player.name, player.position.label(), player.number, player.active])?;
            }
            Ok(players.len())
        })
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Player>> {
        self.db
            .conn
            .query_row(SELECT_PLAYER_BY_ID, params![id], Player::from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn get_by_name(&mut self, user_id: i64, name: &str) -> Result<Option<Player>> {
        self.db
            .conn
            .query_row(SELECT_PLAYER_BY_NAME, params![user_id, name.trim()], Player::from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Looks a player up by id or, failing that, by name.
    pub fn find(&mut self, user_id: i64, identifier: &str) -> Result<Player> {
        let player = match identifier.parse::<i64>() {
            Ok(id) => self.get(id)?.filter(|p| p.user_id == user_id),
            Err(_) => self.get_by_name(user_id, identifier)?,
        };
        player.ok_or_else(|| msg_error_anyhow!(Message::PlayerNotFound(identifier.to_string())))
    }

    pub fn list(&mut self, user_id: i64, include_inactive: bool) -> Result<Vec<Player>> {
        let mut stmt = self.db.conn.prepare(SELECT_PLAYERS)?;
        let mut players = stmt
            .query_map(params![user_id, include_inactive], Player::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        sort_by_position(&mut players);
        Ok(players)
    }

    pub fn update(&mut self, id: i64, update: &PlayerUpdate) -> Result<Player> {
        let mut player = self
            .get(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::PlayerNotFound(id.to_string())))?;

        if let Some(name) = &update.name {
            player.name = name.trim().to_string();
        }
        if let Some(position) = update.position {
            player.position = position;
        }
        if let Some(number) = update.number {
            player.number = number;
        }

        self.db
            .conn
            .execute(UPDATE_PLAYER, params![id, player.name, player.position.label(), player.number])?;
        Ok(player)
    }

    /// Soft delete: the player disappears from lists but old plans keep their rows.
    pub fn deactivate(&mut self, id: i64) -> Result<()> {
        self.set_active(id, false)
    }

    pub fn reactivate(&mut self, id: i64) -> Result<()> {
        self.set_active(id, true)
    }

    fn set_active(&mut self, id: i64, active: bool) -> Result<()> {
        let affected = self.db.conn.execute(SET_ACTIVE, params![id, active])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::PlayerNotFound(id.to_string())));
        }
        Ok(())
    }
}
