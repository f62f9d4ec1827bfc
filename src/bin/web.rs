//! Single binary web server over the league core: divisions, registration,
//! scheduling, score submission/confirmation and standings via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use score_keeper::{
    confirm_score, dispute_score, report_score, schedule_division, standings, standings_csv,
    withdraw_score, Division, DivisionFormat, DivisionId, ErrorKind, League, LeagueError, MatchId,
    PlayerId, Reschedule, ScoreLine, SeedOrder, Side, SubmissionId, TeamId,
};
use serde::Deserialize;
use std::sync::RwLock;

/// In-memory state. One lock serialises every writer, so two reports or two
/// confirmations against the same match can never interleave.
type AppState = Data<RwLock<League>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateDivisionBody {
    name: String,
    #[serde(default)]
    format: DivisionFormat,
    #[serde(default = "default_target")]
    target: u32,
    #[serde(default = "default_win_by")]
    win_by: u32,
    #[serde(default = "default_games_per_match")]
    games_per_match: u32,
}

fn default_target() -> u32 {
    11
}

fn default_win_by() -> u32 {
    2
}

fn default_games_per_match() -> u32 {
    1
}

#[derive(Deserialize)]
struct RegisterBody {
    player_id: PlayerId,
    partner_id: Option<PlayerId>,
}

#[derive(Deserialize, Default)]
struct ScheduleBody {
    /// Shuffle seating order deterministically with this seed.
    seed: Option<u64>,
    /// Discard matches that already have results. Irreversible.
    #[serde(default)]
    discard_results: bool,
}

#[derive(Deserialize)]
struct SubmitBody {
    by_team: TeamId,
    side: Side,
    scores: Vec<ScoreLine>,
}

#[derive(Deserialize)]
struct RespondBody {
    submission_id: SubmissionId,
    by_team: TeamId,
}

/// Path segment: division id (e.g. /api/divisions/{id})
#[derive(Deserialize)]
struct DivisionPath {
    id: DivisionId,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

fn error_response(e: LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidState => HttpResponse::Conflict().json(body),
        ErrorKind::InvalidRequest => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "score-keeper",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a division (returns it with id).
#[post("/api/divisions")]
async fn api_create_division(state: AppState, body: Json<CreateDivisionBody>) -> HttpResponse {
    let body = body.into_inner();
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Name required" }));
    }
    let division = Division::new(name, body.format).with_scoring(
        body.target,
        body.win_by,
        body.games_per_match,
    );
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = g.add_division(division);
    match g.division(id) {
        Ok(d) => HttpResponse::Ok().json(d),
        Err(e) => error_response(e),
    }
}

#[get("/api/divisions/{id}")]
async fn api_get_division(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.division(path.id) {
        Ok(d) => HttpResponse::Ok().json(d),
        Err(e) => error_response(e),
    }
}

/// Register a player or pair; re-registering the same pair returns the same team.
#[post("/api/divisions/{id}/register")]
async fn api_register(state: AppState, path: Path<DivisionPath>, body: Json<RegisterBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g
        .register(path.id, body.player_id, body.partner_id)
        .and_then(|team_id| g.team(team_id).cloned());
    match result {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => error_response(e),
    }
}

#[get("/api/divisions/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.teams(path.id) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(e),
    }
}

/// Round-robin schedule the division. Replaces all of its matches.
#[post("/api/divisions/{id}/schedule")]
async fn api_schedule(state: AppState, path: Path<DivisionPath>, body: Option<Json<ScheduleBody>>) -> HttpResponse {
    let body = body.map(Json::into_inner).unwrap_or_default();
    let seed = body.seed.map_or(SeedOrder::Registration, SeedOrder::Shuffled);
    let policy = if body.discard_results {
        Reschedule::DiscardResults
    } else {
        Reschedule::Guarded
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match schedule_division(&mut g, path.id, seed, policy) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(e),
    }
}

#[get("/api/divisions/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.matches(path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(e),
    }
}

#[get("/api/divisions/{id}/standings")]
async fn api_standings(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match standings(&g, path.id) {
        Ok(rows) => HttpResponse::Ok().json(serde_json::json!({ "rows": rows })),
        Err(e) => error_response(e),
    }
}

#[get("/api/divisions/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let rows = match standings(&g, path.id) {
        Ok(rows) => rows,
        Err(e) => return error_response(e),
    };
    match standings_csv(&rows) {
        Ok(body) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(body),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

/// Report a score for a match; the opponent must confirm it.
#[post("/api/matches/{id}/submit")]
async fn api_submit_score(state: AppState, path: Path<MatchPath>, body: Json<SubmitBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match report_score(&mut g, path.id, body.by_team, body.side, body.scores) {
        Ok(sub) => HttpResponse::Ok().json(sub),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/confirm")]
async fn api_confirm_score(state: AppState, path: Path<MatchPath>, body: Json<RespondBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match confirm_score(&mut g, path.id, body.submission_id, body.by_team) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/dispute")]
async fn api_dispute_score(state: AppState, path: Path<MatchPath>, body: Json<RespondBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match dispute_score(&mut g, path.id, body.submission_id, body.by_team) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/withdraw")]
async fn api_withdraw_score(state: AppState, path: Path<MatchPath>, body: Json<RespondBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match withdraw_score(&mut g, path.id, body.submission_id, body.by_team) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

/// Audit trail: every submission for the match, oldest first.
#[get("/api/matches/{id}/submissions")]
async fn api_list_submissions(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.submissions_for(path.id) {
        Ok(subs) => HttpResponse::Ok().json(subs),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(League::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_division)
            .service(api_get_division)
            .service(api_register)
            .service(api_list_teams)
            .service(api_schedule)
            .service(api_list_matches)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_submit_score)
            .service(api_confirm_score)
            .service(api_dispute_score)
            .service(api_withdraw_score)
            .service(api_list_submissions)
    })
    .bind(bind)?
    .run()
    .await
}
