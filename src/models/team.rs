//! Team: a registered singles player or doubles pair within a division.

use crate::models::division::DivisionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Player identity handed to us by the account layer.
pub type PlayerId = Uuid;

/// A team. Never mutated after registration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub division_id: DivisionId,
    pub player_a: PlayerId,
    /// None for singles.
    pub player_b: Option<PlayerId>,
    /// Registration order within the registry; final standings tie-break.
    pub seq: u64,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(
        division_id: DivisionId,
        player_a: PlayerId,
        player_b: Option<PlayerId>,
        seq: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            division_id,
            player_a,
            player_b,
            seq,
            created_at: Utc::now(),
        }
    }

    /// True if this team is made of exactly the given players, in either order.
    pub fn has_players(&self, player_a: PlayerId, player_b: Option<PlayerId>) -> bool {
        (self.player_a == player_a && self.player_b == player_b)
            || (Some(self.player_a) == player_b && self.player_b == Some(player_a))
    }
}
