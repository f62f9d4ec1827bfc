//! Division: a competitive bracket with its own format and scoring settings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a division.
pub type DivisionId = Uuid;

/// Singles teams have one player, doubles teams two.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionFormat {
    #[default]
    Singles,
    Doubles,
}

/// A division within an event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub name: String,
    pub format: DivisionFormat,
    /// Points needed to win a game.
    pub target: u32,
    /// Required lead at the end of a game.
    pub win_by: u32,
    pub games_per_match: u32,
}

impl Division {
    /// New division with the usual 11-point, win-by-2, single-game settings.
    pub fn new(name: impl Into<String>, format: DivisionFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            target: 11,
            win_by: 2,
            games_per_match: 1,
        }
    }

    pub fn with_scoring(mut self, target: u32, win_by: u32, games_per_match: u32) -> Self {
        self.target = target;
        self.win_by = win_by;
        self.games_per_match = games_per_match;
        self
    }
}
