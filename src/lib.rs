//! Round-robin division play: team registry, circle-method scheduling,
//! two-party score confirmation and standings.

pub mod league;
pub mod logic;
pub mod models;
pub mod store;

pub use league::League;
pub use logic::{
    confirm_score, dispute_score, rank, report_score, round_robin, schedule_division, standings,
    standings_csv, withdraw_score, Reschedule, Round, ScheduleReport, SeedOrder,
};
pub use models::{
    totals, Division, DivisionFormat, DivisionId, ErrorKind, GameMatch, LeagueError, MatchId,
    MatchStatus, PlayerId, ScoreLine, Side, StandingsRow, Submission, SubmissionId,
    SubmissionState, Team, TeamId,
};
