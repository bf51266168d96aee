//! Supported formations and the position minimums they imply.

use super::position::Position;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formation {
    pub name: &'static str,
    pub defense: usize,
    pub midfield: usize,
    pub attack: usize,
}

pub const FORMATIONS: [Formation; 6] = [
    Formation { name: "4-4-2", defense: 4, midfield: 4, attack: 2 },
    Formation { name: "4-3-3", defense: 4, midfield: 3, attack: 3 },
    Formation { name: "4-2-3-1", defense: 4, midfield: 5, attack: 1 },
    Formation { name: "3-5-2", defense: 3, midfield: 5, attack: 2 },
    Formation { name: "5-3-2", defense: 5, midfield: 3, attack: 2 },
    Formation { name: "3-4-3", defense: 3, midfield: 4, attack: 3 },
];

impl Formation {
    pub fn outfield_players(&self) -> usize {
        self.defense + self.midfield + self.attack
    }

    /// Players on the field including the goalkeeper.
    pub fn players_on_field(&self) -> usize {
        self.outfield_players() + 1
    }

    pub fn minimum_per_position(&self) -> BTreeMap<Position, usize> {
        BTreeMap::from([
            (Position::Goalkeeper, 1),
            (Position::Defense, self.defense),
            (Position::Midfield, self.midfield),
            (Position::Attack, self.attack),
        ])
    }
}

pub fn available_formations() -> Vec<&'static str> {
    FORMATIONS.iter().map(|f| f.name).collect()
}

pub fn find_formation(name: &str) -> Option<&'static Formation> {
    let name = name.trim();
    FORMATIONS.iter().find(|f| f.name == name)
}

pub fn validate_formation(name: &str) -> bool {
    find_formation(name).is_some()
}
