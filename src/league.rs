//! League: divisions plus the team, match and submission repositories.

use crate::models::{
    Division, DivisionFormat, DivisionId, GameMatch, LeagueError, MatchId, PlayerId, Submission,
    SubmissionId, Team, TeamId,
};
use crate::store::{MatchLedger, SubmissionLog, TeamRegistry};
use log::info;
use std::collections::HashMap;

/// All state for a set of divisions.
///
/// Writers take `&mut self`, so wrapping a `League` in one lock serialises every
/// report/confirm/schedule sequence, and readers see whole operations only.
#[derive(Clone, Debug, Default)]
pub struct League {
    pub(crate) divisions: HashMap<DivisionId, Division>,
    pub(crate) registry: TeamRegistry,
    pub(crate) ledger: MatchLedger,
    pub(crate) submissions: SubmissionLog,
}

impl League {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a division and return its id.
    pub fn add_division(&mut self, division: Division) -> DivisionId {
        let id = division.id;
        info!("Created division {} ({:?})", division.name, division.format);
        self.divisions.insert(id, division);
        id
    }

    pub fn division(&self, id: DivisionId) -> Result<&Division, LeagueError> {
        self.divisions
            .get(&id)
            .ok_or(LeagueError::DivisionNotFound(id))
    }

    /// Register a player (singles) or pair (doubles); returns the team id.
    ///
    /// Registering the same pair again, in either order, returns the existing team.
    pub fn register(
        &mut self,
        division_id: DivisionId,
        player: PlayerId,
        partner: Option<PlayerId>,
    ) -> Result<TeamId, LeagueError> {
        let format = self.division(division_id)?.format;
        match (format, partner) {
            (DivisionFormat::Doubles, None) => return Err(LeagueError::PartnerRequired),
            (DivisionFormat::Singles, Some(_)) => return Err(LeagueError::UnexpectedPartner),
            (DivisionFormat::Doubles, Some(p)) if p == player => {
                return Err(LeagueError::UnexpectedPartner)
            }
            _ => {}
        }
        Ok(self.registry.ensure_team(division_id, player, partner))
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, LeagueError> {
        self.registry.get(id).ok_or(LeagueError::TeamNotFound(id))
    }

    /// Teams of a division in registration order.
    pub fn teams(&self, division_id: DivisionId) -> Result<Vec<&Team>, LeagueError> {
        self.division(division_id)?;
        Ok(self.registry.teams_in(division_id).collect())
    }

    pub fn game(&self, id: MatchId) -> Result<&GameMatch, LeagueError> {
        self.ledger.get(id).ok_or(LeagueError::MatchNotFound(id))
    }

    /// Matches of a division ordered by round.
    pub fn matches(&self, division_id: DivisionId) -> Result<Vec<&GameMatch>, LeagueError> {
        self.division(division_id)?;
        Ok(self.ledger.in_division(division_id).collect())
    }

    pub fn matches_in_round(
        &self,
        division_id: DivisionId,
        round: u32,
    ) -> Result<Vec<&GameMatch>, LeagueError> {
        self.division(division_id)?;
        Ok(self.ledger.in_round(division_id, round))
    }

    pub fn submission(&self, id: SubmissionId) -> Result<&Submission, LeagueError> {
        self.submissions
            .get(id)
            .ok_or(LeagueError::SubmissionNotFound(id))
    }

    /// Every submission made for a match, oldest first.
    ///
    /// Still answers for matches discarded by a reschedule.
    pub fn submissions_for(&self, match_id: MatchId) -> Result<Vec<&Submission>, LeagueError> {
        let submissions = self.submissions.for_match(match_id);
        if submissions.is_empty() {
            self.game(match_id)?;
        }
        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorKind;
    use uuid::Uuid;

    #[test]
    fn doubles_requires_distinct_partner() {
        let mut league = League::new();
        let d = league.add_division(Division::new("Mixed", DivisionFormat::Doubles));
        let p = Uuid::new_v4();

        assert_eq!(league.register(d, p, None), Err(LeagueError::PartnerRequired));
        assert_eq!(league.register(d, p, Some(p)), Err(LeagueError::UnexpectedPartner));
        assert!(league.register(d, p, Some(Uuid::new_v4())).is_ok());
    }

    #[test]
    fn singles_refuses_partner() {
        let mut league = League::new();
        let d = league.add_division(Division::new("Open", DivisionFormat::Singles));
        let err = league
            .register(d, Uuid::new_v4(), Some(Uuid::new_v4()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn unknown_division_is_not_found() {
        let mut league = League::new();
        let err = league.register(Uuid::new_v4(), Uuid::new_v4(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(league.matches(Uuid::new_v4()).is_err());
    }
}
