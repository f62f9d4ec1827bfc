//! Team registry: deduplicates player registrations into teams.

use crate::models::{DivisionId, PlayerId, Team, TeamId};
use log::{debug, info};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct TeamRegistry {
    teams: HashMap<TeamId, Team>,
    /// Team ids per division, in registration order.
    by_division: HashMap<DivisionId, Vec<TeamId>>,
    next_seq: u64,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the team made of these players in the division, creating it on first sight.
    ///
    /// The pair is compared as a set: (X, Y) and (Y, X) resolve to the same team.
    pub fn ensure_team(
        &mut self,
        division_id: DivisionId,
        player_a: PlayerId,
        player_b: Option<PlayerId>,
    ) -> TeamId {
        if let Some(existing) = self
            .teams_in(division_id)
            .find(|t| t.has_players(player_a, player_b))
        {
            debug!("Registration resolved to existing team {}", existing.id);
            return existing.id;
        }

        let team = Team::new(division_id, player_a, player_b, self.next_seq);
        self.next_seq += 1;
        let id = team.id;
        info!("Registered team {} in division {}", id, division_id);
        self.by_division.entry(division_id).or_default().push(id);
        self.teams.insert(id, team);
        id
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    /// Teams of a division in registration order.
    pub fn teams_in(&self, division_id: DivisionId) -> impl Iterator<Item = &Team> + '_ {
        self.by_division
            .get(&division_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.teams.get(id))
    }

    pub fn team_ids_in(&self, division_id: DivisionId) -> Vec<TeamId> {
        self.by_division
            .get(&division_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
