//! Round-robin scheduling (circle method) and division (re)scheduling.

use crate::league::League;
use crate::models::{DivisionId, GameMatch, LeagueError, MatchId, TeamId};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// One round: disjoint pairs of teams.
pub type Round<T> = Vec<(T, T)>;

/// Single round-robin over `teams` using the circle method.
///
/// An odd count gets a bye appended; pairings against the bye are dropped, so
/// one team sits out each round. Position 0 stays fixed and the rest rotate
/// right by one between rounds. Output depends only on input order.
pub fn round_robin<T>(teams: &[T]) -> Result<Vec<Round<T>>, LeagueError>
where
    T: Copy + Eq + Hash,
{
    if teams.len() < 2 {
        return Err(LeagueError::NotEnoughTeams(teams.len()));
    }
    if teams.iter().collect::<HashSet<_>>().len() != teams.len() {
        return Err(LeagueError::DuplicateTeams);
    }

    // None is the bye.
    let mut order: Vec<Option<T>> = teams.iter().copied().map(Some).collect();
    if order.len() % 2 == 1 {
        order.push(None);
    }
    let n = order.len();
    let half = n / 2;

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let round: Round<T> = (0..half)
            .filter_map(|i| match (order[i], order[n - 1 - i]) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect();
        rounds.push(round);
        order[1..].rotate_right(1);
    }
    Ok(rounds)
}

/// Order in which registered teams are seated before pairing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SeedOrder {
    #[default]
    Registration,
    /// Deterministic shuffle: the same seed always gives the same schedule.
    Shuffled(u64),
}

/// What to do with existing matches that already carry results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Reschedule {
    /// Refuse if any match is final or awaiting confirmation.
    #[default]
    Guarded,
    /// Throw away every existing match, results included.
    DiscardResults,
}

/// Outcome of scheduling a division.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub rounds: usize,
    pub matches: usize,
    /// Ids of the matches that were replaced.
    pub discarded: Vec<MatchId>,
}

/// Schedule the division's teams and replace all of its matches.
///
/// Destructive: every existing match of the division is discarded, including
/// any reported or final results when `Reschedule::DiscardResults` is given.
/// Submissions stay in the audit log.
pub fn schedule_division(
    league: &mut League,
    division_id: DivisionId,
    seed: SeedOrder,
    policy: Reschedule,
) -> Result<ScheduleReport, LeagueError> {
    league.division(division_id)?;

    let mut team_ids: Vec<TeamId> = league.registry.team_ids_in(division_id);
    if let SeedOrder::Shuffled(s) = seed {
        team_ids.shuffle(&mut StdRng::seed_from_u64(s));
    }
    let rounds = round_robin(&team_ids)?;

    let (final_matches, pending) = league.ledger.recorded_results(division_id);
    if policy == Reschedule::Guarded && final_matches + pending > 0 {
        return Err(LeagueError::ResultsRecorded {
            final_matches,
            pending,
        });
    }

    let matches: Vec<GameMatch> = rounds
        .iter()
        .zip(1u32..)
        .flat_map(|(round, number)| {
            round
                .iter()
                .map(move |&(a, b)| GameMatch::new(division_id, number, a, b))
        })
        .collect();
    let total = matches.len();
    let discarded = league.ledger.replace_division(division_id, matches);

    if !discarded.is_empty() {
        warn!(
            "Rescheduling division {} discarded {} matches ({} final, {} awaiting confirmation)",
            division_id,
            discarded.len(),
            final_matches,
            pending
        );
    }
    info!(
        "Scheduled division {}: {} teams, {} rounds, {} matches",
        division_id,
        team_ids.len(),
        rounds.len(),
        total
    );

    Ok(ScheduleReport {
        rounds: rounds.len(),
        matches: total,
        discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn unordered(a: u32, b: u32) -> (u32, u32) {
        (a.min(b), a.max(b))
    }

    fn pair_counts(rounds: &[Round<u32>]) -> HashMap<(u32, u32), usize> {
        let mut counts = HashMap::new();
        for &(a, b) in rounds.iter().flatten() {
            *counts.entry(unordered(a, b)).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn four_teams_match_the_circle_rotation() {
        let rounds = round_robin(&['A', 'B', 'C', 'D']).unwrap();
        assert_eq!(
            rounds,
            vec![
                vec![('A', 'D'), ('B', 'C')],
                vec![('A', 'C'), ('D', 'B')],
                vec![('A', 'B'), ('C', 'D')],
            ]
        );
    }

    #[test]
    fn two_teams_play_once() {
        assert_eq!(round_robin(&[1, 2]).unwrap(), vec![vec![(1, 2)]]);
    }

    #[test]
    fn fewer_than_two_teams_is_an_error() {
        assert_eq!(round_robin::<u32>(&[]), Err(LeagueError::NotEnoughTeams(0)));
        assert_eq!(round_robin(&[7]), Err(LeagueError::NotEnoughTeams(1)));
    }

    #[test]
    fn duplicate_teams_are_rejected() {
        assert_eq!(round_robin(&[1, 2, 1]), Err(LeagueError::DuplicateTeams));
    }

    #[test]
    fn even_counts_cover_every_pair_once() {
        for n in (2..=16u32).step_by(2) {
            let teams: Vec<u32> = (0..n).collect();
            let rounds = round_robin(&teams).unwrap();
            assert_eq!(rounds.len() as u32, n - 1);
            for round in &rounds {
                assert_eq!(round.len() as u32, n / 2);
                let seen: HashSet<u32> = round.iter().flat_map(|&(a, b)| [a, b]).collect();
                assert_eq!(seen.len() as u32, n, "team plays twice in one round");
            }
            let counts = pair_counts(&rounds);
            assert_eq!(counts.len() as u32, n * (n - 1) / 2);
            assert!(counts.values().all(|&c| c == 1));
        }
    }

    #[test]
    fn odd_counts_give_each_team_exactly_one_bye() {
        for n in (3..=15u32).step_by(2) {
            let teams: Vec<u32> = (0..n).collect();
            let rounds = round_robin(&teams).unwrap();
            assert_eq!(rounds.len() as u32, n);

            let mut byes: HashMap<u32, usize> = HashMap::new();
            for round in &rounds {
                assert_eq!(round.len() as u32, (n - 1) / 2);
                let playing: HashSet<u32> = round.iter().flat_map(|&(a, b)| [a, b]).collect();
                for t in teams.iter().filter(|t| !playing.contains(*t)) {
                    *byes.entry(*t).or_insert(0) += 1;
                }
            }
            assert_eq!(byes.len() as u32, n);
            assert!(byes.values().all(|&c| c == 1));

            let counts = pair_counts(&rounds);
            assert_eq!(counts.len() as u32, n * (n - 1) / 2);
            assert!(counts.values().all(|&c| c == 1));
        }
    }

    #[test]
    fn same_input_gives_same_schedule() {
        let teams: Vec<u32> = (0..9).collect();
        assert_eq!(round_robin(&teams).unwrap(), round_robin(&teams).unwrap());
    }
}
