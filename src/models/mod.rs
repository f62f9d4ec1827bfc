//! Data structures: divisions, teams, matches, submissions, standings rows.

mod division;
mod error;
mod game;
mod standings;
mod submission;
mod team;

pub use division::{Division, DivisionFormat, DivisionId};
pub use error::{ErrorKind, LeagueError};
pub use game::{totals, GameMatch, MatchId, MatchStatus, ScoreLine, Side};
pub use standings::StandingsRow;
pub use submission::{Submission, SubmissionId, SubmissionState};
pub use team::{PlayerId, Team, TeamId};
