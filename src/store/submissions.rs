//! Submission log: every reported score, kept as an audit trail.

use crate::models::{MatchId, Submission, SubmissionId};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct SubmissionLog {
    submissions: HashMap<SubmissionId, Submission>,
    by_match: HashMap<MatchId, Vec<SubmissionId>>,
}

impl SubmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: SubmissionId) -> Option<&Submission> {
        self.submissions.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: SubmissionId) -> Option<&mut Submission> {
        self.submissions.get_mut(&id)
    }

    pub(crate) fn insert(&mut self, submission: Submission) {
        self.by_match
            .entry(submission.match_id)
            .or_default()
            .push(submission.id);
        self.submissions.insert(submission.id, submission);
    }

    /// Submissions for a match, oldest first.
    pub fn for_match(&self, match_id: MatchId) -> Vec<&Submission> {
        self.by_match
            .get(&match_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.submissions.get(id))
            .collect()
    }
}
