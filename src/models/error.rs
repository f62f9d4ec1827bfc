//! Errors from registry, scheduler, ledger and the score protocol.

use crate::models::division::DivisionId;
use crate::models::game::{MatchId, Side};
use crate::models::submission::SubmissionId;
use crate::models::team::TeamId;

/// Coarse cause of a failure, for callers that map errors onto responses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    InvalidRequest,
}

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    DivisionNotFound(DivisionId),
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    SubmissionNotFound(SubmissionId),
    /// The match is final; no further reports are accepted.
    MatchFinal(MatchId),
    /// A submission is already waiting for confirmation.
    SubmissionPending(SubmissionId),
    /// Nothing is waiting for confirmation.
    NothingPending(MatchId),
    /// Reschedule would discard reported or final results.
    ResultsRecorded { final_matches: usize, pending: usize },
    /// Fewer than two teams to schedule.
    NotEnoughTeams(usize),
    /// The team does not play in this match.
    NotAParticipant { match_id: MatchId, team_id: TeamId },
    /// The claimed side is not the position the team occupies.
    WrongSide { team_id: TeamId, claimed: Side },
    /// Confirm/dispute/withdraw named a submission that is not the pending one.
    SubmissionMismatch { expected: SubmissionId, given: SubmissionId },
    /// The submitting team tried to confirm or dispute its own score.
    OwnSubmission(TeamId),
    /// Only the submitter may withdraw a submission.
    NotSubmitter(TeamId),
    EmptyScores,
    /// Both sides total the same points; a final match needs a winner.
    TiedScores(u64),
    /// Doubles division registration without a partner.
    PartnerRequired,
    /// Singles division registration with a partner, or partner equals player.
    UnexpectedPartner,
    DuplicateTeams,
}

impl LeagueError {
    pub fn kind(&self) -> ErrorKind {
        use LeagueError::*;
        match self {
            DivisionNotFound(_) | TeamNotFound(_) | MatchNotFound(_) | SubmissionNotFound(_) => {
                ErrorKind::NotFound
            }
            MatchFinal(_) | SubmissionPending(_) | NothingPending(_) | ResultsRecorded { .. } => {
                ErrorKind::InvalidState
            }
            NotEnoughTeams(_)
            | NotAParticipant { .. }
            | WrongSide { .. }
            | SubmissionMismatch { .. }
            | OwnSubmission(_)
            | NotSubmitter(_)
            | EmptyScores
            | TiedScores(_)
            | PartnerRequired
            | UnexpectedPartner
            | DuplicateTeams => ErrorKind::InvalidRequest,
        }
    }
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::DivisionNotFound(_) => write!(f, "Division not found"),
            LeagueError::TeamNotFound(_) => write!(f, "Team not found"),
            LeagueError::MatchNotFound(_) => write!(f, "Match not found"),
            LeagueError::SubmissionNotFound(_) => write!(f, "Submission not found"),
            LeagueError::MatchFinal(_) => write!(f, "Match already final"),
            LeagueError::SubmissionPending(_) => {
                write!(f, "A submission is already awaiting confirmation")
            }
            LeagueError::NothingPending(_) => write!(f, "No pending submission"),
            LeagueError::ResultsRecorded { final_matches, pending } => write!(
                f,
                "Division has {} final and {} pending results; rescheduling would discard them",
                final_matches, pending
            ),
            LeagueError::NotEnoughTeams(n) => {
                write!(f, "Need at least 2 teams to schedule (have {})", n)
            }
            LeagueError::NotAParticipant { .. } => write!(f, "Team does not play in this match"),
            LeagueError::WrongSide { claimed, .. } => {
                write!(f, "Team is not on side {:?} of this match", claimed)
            }
            LeagueError::SubmissionMismatch { .. } => write!(f, "Submission mismatch"),
            LeagueError::OwnSubmission(_) => {
                write!(f, "The opponent must respond to a submission, not the submitter")
            }
            LeagueError::NotSubmitter(_) => write!(f, "Only the submitting team can withdraw"),
            LeagueError::EmptyScores => write!(f, "At least one score line is required"),
            LeagueError::TiedScores(total) => {
                write!(f, "Scores are tied at {} points; a match needs a winner", total)
            }
            LeagueError::PartnerRequired => write!(f, "Partner required for doubles"),
            LeagueError::UnexpectedPartner => write!(f, "Partner not allowed here"),
            LeagueError::DuplicateTeams => write!(f, "Teams to schedule must be distinct"),
        }
    }
}

impl std::error::Error for LeagueError {}
