//! Score protocol: one side reports, the opponent confirms (or disputes).
//!
//! `pending` -> `awaiting_confirmation` on report, then `final` on confirm, or
//! back to `pending` on dispute or withdrawal. Every check runs before any
//! write, so a failed call leaves the match and the log untouched.

use crate::league::League;
use crate::models::{
    totals, GameMatch, LeagueError, MatchId, MatchStatus, ScoreLine, Side, Submission,
    SubmissionId, SubmissionState, TeamId,
};
use log::{info, warn};

/// Report a score for a match on behalf of `by_team`, who claims to be `side`.
///
/// Creates a pending submission and moves the match to awaiting confirmation.
/// Totals must differ: a final match always has a winner.
pub fn report_score(
    league: &mut League,
    match_id: MatchId,
    by_team: TeamId,
    side: Side,
    scores: Vec<ScoreLine>,
) -> Result<Submission, LeagueError> {
    let game = league.game(match_id)?;
    match game.status {
        MatchStatus::Final { .. } => return Err(LeagueError::MatchFinal(match_id)),
        MatchStatus::AwaitingConfirmation { submission_id } => {
            return Err(LeagueError::SubmissionPending(submission_id))
        }
        MatchStatus::Pending => {}
    }
    let actual = game
        .side_of(by_team)
        .ok_or(LeagueError::NotAParticipant {
            match_id,
            team_id: by_team,
        })?;
    if actual != side {
        return Err(LeagueError::WrongSide {
            team_id: by_team,
            claimed: side,
        });
    }
    if scores.is_empty() {
        return Err(LeagueError::EmptyScores);
    }
    let (total_a, total_b) = totals(&scores);
    if total_a == total_b {
        return Err(LeagueError::TiedScores(total_a));
    }

    let submission = Submission::new(match_id, by_team, side, scores);
    let game = league
        .ledger
        .get_mut(match_id)
        .ok_or(LeagueError::MatchNotFound(match_id))?;
    game.status = MatchStatus::AwaitingConfirmation {
        submission_id: submission.id,
    };
    info!(
        "Team {} reported {}-{} for match {} (submission {})",
        by_team, total_a, total_b, match_id, submission.id
    );
    league.submissions.insert(submission.clone());
    Ok(submission)
}

/// Confirm the pending submission as the opponent of the submitter; the match becomes final.
///
/// `submission_id` must be the one currently pending, so a confirmation aimed at a
/// withdrawn or replaced submission is rejected.
pub fn confirm_score(
    league: &mut League,
    match_id: MatchId,
    submission_id: SubmissionId,
    by_team: TeamId,
) -> Result<GameMatch, LeagueError> {
    let submission = responding_opponent(league, match_id, submission_id, by_team)?;
    let scores = submission.scores.clone();
    let (total_a, total_b) = totals(&scores);
    if total_a == total_b {
        return Err(LeagueError::TiedScores(total_a));
    }

    let game = league
        .ledger
        .get_mut(match_id)
        .ok_or(LeagueError::MatchNotFound(match_id))?;
    let winner = if total_a > total_b {
        game.team_a
    } else {
        game.team_b
    };
    game.scores = scores;
    game.status = MatchStatus::Final { winner };
    let finalized = game.clone();

    set_submission_state(league, submission_id, SubmissionState::Confirmed)?;
    info!(
        "Match {} final: {}-{}, winner {} (confirmed by {})",
        match_id, total_a, total_b, winner, by_team
    );
    Ok(finalized)
}

/// The opponent rejects the pending submission; the match goes back to pending.
pub fn dispute_score(
    league: &mut League,
    match_id: MatchId,
    submission_id: SubmissionId,
    by_team: TeamId,
) -> Result<GameMatch, LeagueError> {
    responding_opponent(league, match_id, submission_id, by_team)?;
    let reopened = reopen(league, match_id)?;
    set_submission_state(league, submission_id, SubmissionState::Disputed)?;
    warn!(
        "Team {} disputed submission {} for match {}",
        by_team, submission_id, match_id
    );
    Ok(reopened)
}

/// The submitter retracts its pending submission; the match goes back to pending.
pub fn withdraw_score(
    league: &mut League,
    match_id: MatchId,
    submission_id: SubmissionId,
    by_team: TeamId,
) -> Result<GameMatch, LeagueError> {
    let submission = pending_submission(league, match_id, submission_id)?;
    if submission.by_team != by_team {
        return Err(LeagueError::NotSubmitter(by_team));
    }
    let reopened = reopen(league, match_id)?;
    set_submission_state(league, submission_id, SubmissionState::Superseded)?;
    info!(
        "Team {} withdrew submission {} for match {}",
        by_team, submission_id, match_id
    );
    Ok(reopened)
}

/// The match's pending submission, provided it is `submission_id`.
fn pending_submission(
    league: &League,
    match_id: MatchId,
    submission_id: SubmissionId,
) -> Result<&Submission, LeagueError> {
    let game = league.game(match_id)?;
    let expected = game
        .pending_submission()
        .ok_or(LeagueError::NothingPending(match_id))?;
    if expected != submission_id {
        return Err(LeagueError::SubmissionMismatch {
            expected,
            given: submission_id,
        });
    }
    league.submission(submission_id)
}

/// Pending submission, checked that `by_team` plays in the match and did not submit it.
fn responding_opponent(
    league: &League,
    match_id: MatchId,
    submission_id: SubmissionId,
    by_team: TeamId,
) -> Result<&Submission, LeagueError> {
    let submission = pending_submission(league, match_id, submission_id)?;
    let game = league.game(match_id)?;
    if game.side_of(by_team).is_none() {
        return Err(LeagueError::NotAParticipant {
            match_id,
            team_id: by_team,
        });
    }
    if submission.by_team == by_team {
        return Err(LeagueError::OwnSubmission(by_team));
    }
    Ok(submission)
}

fn reopen(league: &mut League, match_id: MatchId) -> Result<GameMatch, LeagueError> {
    let game = league
        .ledger
        .get_mut(match_id)
        .ok_or(LeagueError::MatchNotFound(match_id))?;
    game.status = MatchStatus::Pending;
    Ok(game.clone())
}

fn set_submission_state(
    league: &mut League,
    submission_id: SubmissionId,
    state: SubmissionState,
) -> Result<(), LeagueError> {
    league
        .submissions
        .get_mut(submission_id)
        .ok_or(LeagueError::SubmissionNotFound(submission_id))?
        .state = state;
    Ok(())
}
