//! Standings row (derived from final matches, never stored).

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_differential: i64,
}

impl StandingsRow {
    pub fn empty(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Self::default()
        }
    }

    pub fn record_match(&mut self, scored: u64, conceded: u64, won: bool) {
        self.points_for = self.points_for.saturating_add(scored);
        self.points_against = self.points_against.saturating_add(conceded);
        self.point_differential = differential(self.points_for, self.points_against);
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// `points_for - points_against`, saturating at the i64 bounds.
fn differential(points_for: u64, points_against: u64) -> i64 {
    let pf = i64::try_from(points_for).unwrap_or(i64::MAX);
    let pa = i64::try_from(points_against).unwrap_or(i64::MAX);
    pf.saturating_sub(pa)
}
