//! Match ledger: match records per division and round.

use crate::models::{DivisionId, GameMatch, MatchId, MatchStatus};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct MatchLedger {
    matches: HashMap<MatchId, GameMatch>,
    /// Match ids per division, in schedule order (round, then pairing).
    by_division: HashMap<DivisionId, Vec<MatchId>>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.get(&id)
    }

    /// Status changes go through the score protocol only.
    pub(crate) fn get_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.get_mut(&id)
    }

    /// Matches of a division in schedule order.
    pub fn in_division(&self, division_id: DivisionId) -> impl Iterator<Item = &GameMatch> + '_ {
        self.by_division
            .get(&division_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.matches.get(id))
    }

    pub fn in_round(&self, division_id: DivisionId, round: u32) -> Vec<&GameMatch> {
        self.in_division(division_id)
            .filter(|m| m.round == round)
            .collect()
    }

    pub fn final_in(&self, division_id: DivisionId) -> impl Iterator<Item = &GameMatch> + '_ {
        self.in_division(division_id).filter(|m| m.is_final())
    }

    /// (final, awaiting confirmation) counts for a division.
    pub fn recorded_results(&self, division_id: DivisionId) -> (usize, usize) {
        self.in_division(division_id)
            .fold((0, 0), |(fin, awaiting), m| match m.status {
                MatchStatus::Final { .. } => (fin + 1, awaiting),
                MatchStatus::AwaitingConfirmation { .. } => (fin, awaiting + 1),
                MatchStatus::Pending => (fin, awaiting),
            })
    }

    /// Replace every match of the division with `matches`. Returns the discarded ids.
    ///
    /// Destructive: results of the old matches are gone for good.
    pub(crate) fn replace_division(
        &mut self,
        division_id: DivisionId,
        matches: Vec<GameMatch>,
    ) -> Vec<MatchId> {
        let discarded = self.by_division.remove(&division_id).unwrap_or_default();
        for id in &discarded {
            self.matches.remove(id);
        }
        let ids: Vec<MatchId> = matches.iter().map(|m| m.id).collect();
        for m in matches {
            self.matches.insert(m.id, m);
        }
        if !ids.is_empty() {
            self.by_division.insert(division_id, ids);
        }
        discarded
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn matches_for(division: DivisionId, rounds: u32) -> Vec<GameMatch> {
        (1..=rounds)
            .map(|r| GameMatch::new(division, r, Uuid::new_v4(), Uuid::new_v4()))
            .collect()
    }

    #[test]
    fn replace_discards_only_that_division() {
        let mut ledger = MatchLedger::new();
        let (d1, d2) = (Uuid::new_v4(), Uuid::new_v4());
        let old = matches_for(d1, 3);
        let old_ids: Vec<_> = old.iter().map(|m| m.id).collect();
        ledger.replace_division(d1, old);
        ledger.replace_division(d2, matches_for(d2, 2));

        let discarded = ledger.replace_division(d1, matches_for(d1, 1));

        assert_eq!(discarded, old_ids);
        assert!(old_ids.iter().all(|id| ledger.get(*id).is_none()));
        assert_eq!(ledger.in_division(d1).count(), 1);
        assert_eq!(ledger.in_division(d2).count(), 2);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn in_round_filters_by_round() {
        let mut ledger = MatchLedger::new();
        let d = Uuid::new_v4();
        ledger.replace_division(d, matches_for(d, 3));
        let round_two = ledger.in_round(d, 2);
        assert_eq!(round_two.len(), 1);
        assert_eq!(round_two[0].round, 2);
        assert!(ledger.in_round(d, 4).is_empty());
    }
}
