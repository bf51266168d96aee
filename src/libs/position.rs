//! Player positions.
//!
//! Positions are stored as their canonical English label. Parsing accepts the
//! Norwegian labels coaches tend to use in spreadsheets as well.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Position assigned when an imported row has no usable position.
pub const DEFAULT_POSITION: Position = Position::Midfield;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown position '{0}'")]
pub struct UnknownPosition(pub String);

impl Position {
    pub const ALL: [Position; 4] = [Position::Goalkeeper, Position::Defense, Position::Midfield, Position::Attack];

    /// Line-up order used when listing squads: goalkeepers first, attackers last.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Goalkeeper => 1,
            Position::Defense => 2,
            Position::Midfield => 3,
            Position::Attack => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defense => "Defense",
            Position::Midfield => "Midfield",
            Position::Attack => "Attack",
        }
    }

    /// Parses a free-text position, falling back to [`DEFAULT_POSITION`].
    pub fn parse_or_default(value: Option<&str>) -> Position {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_POSITION)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goalkeeper" | "keeper" | "gk" | "målvakt" | "malvakt" => Ok(Position::Goalkeeper),
            "defense" | "defence" | "defender" | "forsvar" => Ok(Position::Defense),
            "midfield" | "midfielder" | "midtbane" => Ok(Position::Midfield),
            "attack" | "forward" | "striker" | "angrep" => Ok(Position::Attack),
            _ => Err(UnknownPosition(s.to_string())),
        }
    }
}
