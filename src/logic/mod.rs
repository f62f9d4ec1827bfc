//! League business logic: scheduling, score protocol, standings.

mod protocol;
mod schedule;
mod standings;

pub use protocol::{confirm_score, dispute_score, report_score, withdraw_score};
pub use schedule::{round_robin, schedule_division, Reschedule, Round, ScheduleReport, SeedOrder};
pub use standings::{rank, standings, standings_csv};
