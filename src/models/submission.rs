//! Submission: a proposed score reported by one participant.

use crate::models::game::{MatchId, ScoreLine, Side};
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a submission.
pub type SubmissionId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Pending,
    /// The opponent confirmed; the match is final with these scores.
    Confirmed,
    /// Withdrawn by the submitter.
    Superseded,
    /// Rejected by the opponent.
    Disputed,
}

/// Kept forever as an audit record. Only `state` changes after creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub match_id: MatchId,
    pub by_team: TeamId,
    pub side: Side,
    pub scores: Vec<ScoreLine>,
    pub state: SubmissionState,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(match_id: MatchId, by_team: TeamId, side: Side, scores: Vec<ScoreLine>) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            by_team,
            side,
            scores,
            state: SubmissionState::Pending,
            submitted_at: Utc::now(),
        }
    }
}
