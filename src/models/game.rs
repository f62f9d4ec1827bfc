//! Match (game) record, its status and per-game score lines.

use crate::models::division::DivisionId;
use crate::models::submission::SubmissionId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which team position a participant occupies.
/// Serialized as `"A"` / `"B"`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Points for team A and team B in one game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub a: u32,
    pub b: u32,
}

impl ScoreLine {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }
}

/// Sum each column of the score lines: (total for A, total for B).
///
/// Widened to u64 so any sequence of u32 lines sums without overflow.
pub fn totals(lines: &[ScoreLine]) -> (u64, u64) {
    lines.iter().fold((0, 0), |(a, b), line| {
        (a + u64::from(line.a), b + u64::from(line.b))
    })
}

/// Lifecycle of a match. Only the fields legal in each state exist.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchStatus {
    /// No score reported.
    #[default]
    Pending,
    /// One side reported; waiting for the opponent.
    AwaitingConfirmation { submission_id: SubmissionId },
    /// Terminal.
    Final { winner: TeamId },
}

/// A scheduled match between two teams of one division.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub division_id: DivisionId,
    /// 1-based.
    pub round: u32,
    pub team_a: TeamId,
    pub team_b: TeamId,
    #[serde(flatten)]
    pub status: MatchStatus,
    /// Empty until final.
    pub scores: Vec<ScoreLine>,
}

impl GameMatch {
    pub fn new(division_id: DivisionId, round: u32, team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            division_id,
            round,
            team_a,
            team_b,
            status: MatchStatus::Pending,
            scores: Vec::new(),
        }
    }

    /// Position of `team` in this match, if it plays in it.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if team == self.team_a {
            Some(Side::A)
        } else if team == self.team_b {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn team_on(&self, side: Side) -> TeamId {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.status {
            MatchStatus::Final { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn pending_submission(&self) -> Option<SubmissionId> {
        match self.status {
            MatchStatus::AwaitingConfirmation { submission_id } => Some(submission_id),
            _ => None,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self.status, MatchStatus::Final { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_do_not_overflow_on_large_lines() {
        let lines = [ScoreLine::new(u32::MAX, 0), ScoreLine::new(1, 2)];
        assert_eq!(totals(&lines), (u64::from(u32::MAX) + 1, 2));
    }

    #[test]
    fn side_uses_upper_case_wire_form() {
        assert_eq!(serde_json::to_string(&Side::A).unwrap(), "\"A\"");
        assert_eq!(serde_json::from_str::<Side>("\"B\"").unwrap(), Side::B);
    }
}
