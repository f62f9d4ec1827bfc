//! In-memory repositories keyed by id, each with a per-division or per-match index.

mod ledger;
mod registry;
mod submissions;

pub use ledger::MatchLedger;
pub use registry::TeamRegistry;
pub use submissions::SubmissionLog;
