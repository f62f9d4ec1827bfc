//! Standings: fold final matches into per-team records and rank them.

use crate::league::League;
use crate::models::{
    totals, DivisionId, GameMatch, LeagueError, StandingsRow, Team, TeamId,
};
use log::debug;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Ranked standings for a division.
///
/// Every registered team gets a row, even without a final match. Ordering:
/// wins desc, point differential desc, points for desc, then registration
/// order (earlier team first).
pub fn standings(
    league: &League,
    division_id: DivisionId,
) -> Result<Vec<StandingsRow>, LeagueError> {
    let teams = league.teams(division_id)?;
    let rows = rank(&teams, league.ledger.final_in(division_id));
    debug!("Computed standings for division {} ({} rows)", division_id, rows.len());
    Ok(rows)
}

/// Pure fold + sort over the given teams and matches. Non-final matches and
/// matches naming unknown teams are ignored.
pub fn rank<'a>(
    teams: &[&Team],
    matches: impl IntoIterator<Item = &'a GameMatch>,
) -> Vec<StandingsRow> {
    let mut table: HashMap<TeamId, StandingsRow> = teams
        .iter()
        .map(|t| (t.id, StandingsRow::empty(t.id)))
        .collect();

    for m in matches {
        let Some(winner) = m.winner() else {
            continue;
        };
        if !table.contains_key(&m.team_a) || !table.contains_key(&m.team_b) {
            continue;
        }
        let (total_a, total_b) = totals(&m.scores);
        if let Some(row) = table.get_mut(&m.team_a) {
            row.record_match(total_a, total_b, winner == m.team_a);
        }
        if let Some(row) = table.get_mut(&m.team_b) {
            row.record_match(total_b, total_a, winner == m.team_b);
        }
    }

    let seq: HashMap<TeamId, u64> = teams.iter().map(|t| (t.id, t.seq)).collect();
    let mut rows: Vec<StandingsRow> = table.into_values().collect();
    rows.sort_by_key(|r| {
        (
            Reverse(r.wins),
            Reverse(r.point_differential),
            Reverse(r.points_for),
            seq.get(&r.team_id).copied().unwrap_or(u64::MAX),
        )
    });
    rows
}

/// Standings as CSV with a header row.
pub fn standings_csv(rows: &[StandingsRow]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "rank",
        "team_id",
        "wins",
        "losses",
        "points_for",
        "points_against",
        "point_differential",
    ])?;
    for (i, row) in rows.iter().enumerate() {
        wtr.write_record(&[
            (i + 1).to_string(),
            row.team_id.to_string(),
            row.wins.to_string(),
            row.losses.to_string(),
            row.points_for.to_string(),
            row.points_against.to_string(),
            row.point_differential.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, ScoreLine};
    use uuid::Uuid;

    fn teams(n: u64) -> Vec<Team> {
        let division = Uuid::new_v4();
        (0..n)
            .map(|seq| Team::new(division, Uuid::new_v4(), None, seq))
            .collect()
    }

    fn finished(a: &Team, b: &Team, scores: &[(u32, u32)]) -> GameMatch {
        let mut m = GameMatch::new(a.division_id, 1, a.id, b.id);
        m.scores = scores.iter().map(|&(x, y)| ScoreLine::new(x, y)).collect();
        let (ta, tb) = totals(&m.scores);
        m.status = MatchStatus::Final {
            winner: if ta > tb { a.id } else { b.id },
        };
        m
    }

    #[test]
    fn two_wins_fold_into_one_row() {
        let t = teams(3);
        let refs: Vec<&Team> = t.iter().collect();
        let matches = vec![
            finished(&t[0], &t[1], &[(11, 6), (9, 11), (11, 7)]),
            finished(&t[2], &t[0], &[(5, 11), (6, 11)]),
        ];

        let rows = rank(&refs, &matches);

        assert_eq!(
            rows[0],
            StandingsRow {
                team_id: t[0].id,
                wins: 2,
                losses: 0,
                points_for: 53,
                points_against: 35,
                point_differential: 18,
            }
        );
    }

    #[test]
    fn pending_matches_do_not_count() {
        let t = teams(2);
        let refs: Vec<&Team> = t.iter().collect();
        let pending = GameMatch::new(t[0].division_id, 1, t[0].id, t[1].id);
        let rows = rank(&refs, [&pending]);
        assert!(rows.iter().all(|r| *r == StandingsRow::empty(r.team_id)));
    }

    #[test]
    fn full_ties_fall_back_to_registration_order() {
        let t = teams(4);
        let refs: Vec<&Team> = t.iter().rev().collect();
        let rows = rank(&refs, std::iter::empty());
        let order: Vec<_> = rows.iter().map(|r| r.team_id).collect();
        assert_eq!(order, t.iter().map(|t| t.id).collect::<Vec<_>>());
    }

    #[test]
    fn differential_then_points_for_break_win_ties() {
        let t = teams(4);
        let refs: Vec<&Team> = t.iter().collect();
        let matches = vec![
            // t1 wins by 2 with 11 points
            finished(&t[0], &t[1], &[(9, 11)]),
            // t2 wins by 2 with 13 points
            finished(&t[2], &t[3], &[(13, 11)]),
        ];
        let rows = rank(&refs, &matches);
        assert_eq!(rows[0].team_id, t[2].id);
        assert_eq!(rows[1].team_id, t[1].id);
        // Both losers are -2; t0 scored 9, t3 scored 11.
        assert_eq!(rows[2].team_id, t[3].id);
        assert_eq!(rows[3].team_id, t[0].id);
    }

    #[test]
    fn csv_has_header_and_ranked_rows() {
        let t = teams(2);
        let refs: Vec<&Team> = t.iter().collect();
        let matches = vec![finished(&t[0], &t[1], &[(11, 4)])];
        let csv = standings_csv(&rank(&refs, &matches)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "rank,team_id,wins,losses,points_for,points_against,point_differential"
        );
        assert_eq!(lines[1], format!("1,{},1,0,11,4,7", t[0].id));
        assert_eq!(lines[2], format!("2,{},0,1,4,11,-7", t[1].id));
    }
}
