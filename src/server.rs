//! Axum HTTP server: stateless endpoints over the shared engine context.
//!
//! Every handler is a pure computation against `Arc<DartsContext>`; the only
//! state a request carries is its own body. Seeds make `/throw` and
//! `/simulate` reproducible.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/classify` | x, y → Hit |
//! | GET | `/target` | segment, ring → aim point |
//! | GET | `/suggest` | score, darts_remaining, level, difficulty → tip |
//! | GET | `/checkout` | score → table entry / bogey escape |
//! | GET | `/checkouts` | full table + bogeys + preferred finishes |
//! | POST | `/throw` | target + gesture-or-skill + stance + board → outcome |
//! | POST | `/risk` | point + board darts → risk + safe alternative |
//! | POST | `/cricket/suggest` | both players' cricket state → suggestion |
//! | GET | `/simulate` | legs, skill, seed → batch statistics |

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::advisor::suggest_x01;
use crate::collision::{collision_risk, safe_alternative};
use crate::constants::{is_bogey, BOGEY_NUMBERS, CRICKET_NUMBERS, PREFERRED_FINISHES};
use crate::cricket::{status, suggest_cricket, CricketState};
use crate::geometry::{classify, target_center};
use crate::oche::OcheStance;
use crate::simulation::simulate_batch;
use crate::swipe::{analyze, normalize, SwipePoint};
use crate::throw::{throw_automated, throw_swipe};
use crate::tips::{format_tip, TipLevel};
use crate::types::{
    BoardPoint, DartOnBoard, DartsContext, Difficulty, Ring, Target, ThrowBaseline,
};

pub type AppState = Arc<DartsContext>;

pub fn create_router(ctx: Arc<DartsContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/classify", get(handle_classify))
        .route("/target", get(handle_target))
        .route("/suggest", get(handle_suggest))
        .route("/checkout", get(handle_checkout))
        .route("/checkouts", get(handle_checkouts))
        .route("/throw", post(handle_throw))
        .route("/risk", post(handle_risk))
        .route("/cricket/suggest", post(handle_cricket_suggest))
        .route("/simulate", get(handle_simulate))
        .layer(cors)
        .with_state(ctx)
}

// ── Request/Response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct ClassifyQuery {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct TargetQuery {
    segment: i32,
    ring: String,
}

#[derive(Deserialize)]
struct SuggestQuery {
    score: i32,
    darts_remaining: i32,
    level: Option<i32>,
    difficulty: Option<String>,
}

#[derive(Deserialize)]
struct CheckoutQuery {
    score: i32,
}

#[derive(Deserialize)]
struct SimulateQuery {
    legs: Option<usize>,
    skill: Option<i32>,
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct PointBody {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct ThrowRequest {
    /// Shorthand target code (`T20`, `D16`, `25`, `Bull`).
    target: String,
    /// Sampled gesture path; mutually exclusive with `skill`.
    swipe: Option<Vec<SwipePoint>>,
    /// Automated-throw skill 0..=100; mutually exclusive with `swipe`.
    skill: Option<i32>,
    difficulty: Option<String>,
    baseline: Option<ThrowBaseline>,
    oche_offset: Option<f64>,
    darts: Option<Vec<PointBody>>,
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct RiskRequest {
    target: PointBody,
    darts: Vec<PointBody>,
}

#[derive(Deserialize)]
struct CricketStateBody {
    /// Marks in the priority order 20 19 18 17 16 15 bull.
    marks: [i32; CRICKET_NUMBERS.len()],
    points: i32,
}

#[derive(Deserialize)]
struct CricketSuggestRequest {
    player: CricketStateBody,
    opponent: Option<CricketStateBody>,
    darts_remaining: Option<i32>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, msg: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": msg })))
}

fn bad_request(msg: &str) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn parse_ring(s: &str) -> Option<Ring> {
    match s {
        "treble" => Some(Ring::Treble),
        "double" => Some(Ring::Double),
        "inner-single" => Some(Ring::InnerSingle),
        "outer-single" | "single" => Some(Ring::OuterSingle),
        "single-bull" => Some(Ring::SingleBull),
        "double-bull" | "bull" => Some(Ring::DoubleBull),
        _ => None,
    }
}

fn board_darts(points: &Option<Vec<PointBody>>) -> Vec<DartOnBoard> {
    points
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|p| {
            let position = BoardPoint::new(p.x, p.y);
            DartOnBoard { position, hit: classify(position) }
        })
        .collect()
}

// ── GET handlers ────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_classify(
    Query(params): Query<ClassifyQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !params.x.is_finite() || !params.y.is_finite() {
        return Err(bad_request("x and y must be finite"));
    }
    let hit = classify(BoardPoint::new(params.x, params.y));
    Ok(Json(serde_json::json!({
        "segment": hit.segment,
        "ring": hit.ring.as_str(),
        "multiplier": hit.multiplier,
        "score": hit.score,
    })))
}

async fn handle_target(
    Query(params): Query<TargetQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(ring) = parse_ring(&params.ring) else {
        return Err(bad_request("unknown ring"));
    };
    let target = Target::new(params.segment, ring);
    let Some(point) = target_center(target) else {
        return Err(bad_request("no aim point for that segment and ring"));
    };
    Ok(Json(serde_json::json!({
        "code": target.code(),
        "x": point.x,
        "y": point.y,
    })))
}

async fn handle_suggest(
    State(ctx): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if params.score < 0 || params.score > 1001 {
        return Err(bad_request("score must be in 0..=1001"));
    }
    if !(1..=3).contains(&params.darts_remaining) {
        return Err(bad_request("darts_remaining must be 1, 2, or 3"));
    }
    let level = match params.level {
        None => TipLevel::Intermediate,
        Some(n) => {
            TipLevel::from_number(n).ok_or_else(|| bad_request("level must be 1..=4"))?
        }
    };
    let difficulty = match &params.difficulty {
        None => Difficulty::Medium,
        Some(s) => Difficulty::parse(s).ok_or_else(|| bad_request("unknown difficulty"))?,
    };

    let suggestion = suggest_x01(&ctx.checkouts, params.score, params.darts_remaining);
    let tip = format_tip(&suggestion, params.score, level, difficulty);
    Ok(Json(serde_json::json!({
        "kind": suggestion.kind.as_str(),
        "suggestion": suggestion,
        "tip": tip,
    })))
}

async fn handle_checkout(
    State(ctx): State<AppState>,
    Query(params): Query<CheckoutQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let score = params.score;
    if let Some(entry) = ctx.checkouts.entry(score) {
        return Ok(Json(serde_json::json!({
            "score": score,
            "checkout": true,
            "darts_required": entry.darts_required,
            "path": entry.codes,
            "description": entry.description,
        })));
    }
    if is_bogey(score) {
        // No table row by design; report the escape shot instead.
        let escape = suggest_x01(&ctx.checkouts, score, 3);
        return Ok(Json(serde_json::json!({
            "score": score,
            "checkout": false,
            "bogey": true,
            "escape": escape,
        })));
    }
    Err(bad_request("score has no checkout (outside 2..=170)"))
}

async fn handle_checkouts(State(ctx): State<AppState>) -> Json<serde_json::Value> {
    let entries: Vec<serde_json::Value> = ctx
        .checkouts
        .iter()
        .map(|(score, entry)| {
            serde_json::json!({
                "score": score,
                "darts_required": entry.darts_required,
                "path": entry.codes,
                "description": entry.description,
            })
        })
        .collect();

    Json(serde_json::json!({
        "checkouts": entries,
        "bogey_numbers": BOGEY_NUMBERS,
        "preferred_finishes": PREFERRED_FINISHES,
    }))
}

async fn handle_simulate(
    State(ctx): State<AppState>,
    Query(params): Query<SimulateQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let legs = params.legs.unwrap_or(1000);
    if legs == 0 || legs > 1_000_000 {
        return Err(bad_request("legs must be in 1..=1000000"));
    }
    let skill = params.skill.unwrap_or(80);
    if !(0..=100).contains(&skill) {
        return Err(bad_request("skill must be in 0..=100"));
    }
    let seed = params.seed.unwrap_or(42);

    let result = simulate_batch(&ctx, legs, skill, seed);
    Ok(Json(serde_json::json!({
        "legs": legs,
        "skill": skill,
        "seed": seed,
        "mean_darts": result.mean,
        "std_dev": result.std_dev,
        "min_darts": result.min,
        "max_darts": result.max,
        "median_darts": result.median,
        "three_dart_average": result.three_dart_average,
        "elapsed_ms": result.elapsed.as_millis() as u64,
    })))
}

// ── POST handlers ───────────────────────────────────────────────────

async fn handle_throw(
    Json(req): Json<ThrowRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(target) = Target::parse(&req.target) else {
        return Err(bad_request("unknown target code"));
    };
    let Some(aim) = target_center(target) else {
        return Err(bad_request("target cannot be aimed at"));
    };

    let mut stance = OcheStance::new();
    if let Some(offset) = req.oche_offset {
        if !offset.is_finite() {
            return Err(bad_request("oche_offset must be finite"));
        }
        stance.set_offset(offset);
    }
    let darts = board_darts(&req.darts);
    let mut rng = SmallRng::seed_from_u64(req.seed.unwrap_or_else(rand::random));

    let outcome = match (&req.swipe, req.skill) {
        (Some(points), None) => {
            let Some(metrics) = analyze(points) else {
                return Err(bad_request("swipe needs at least two samples"));
            };
            if !metrics.valid {
                return Err(bad_request("swipe too short"));
            }
            let difficulty = match &req.difficulty {
                None => Difficulty::Medium,
                Some(s) => {
                    Difficulty::parse(s).ok_or_else(|| bad_request("unknown difficulty"))?
                }
            };
            let baseline = req.baseline.unwrap_or_else(ThrowBaseline::neutral);
            throw_swipe(
                &normalize(&metrics),
                aim,
                difficulty,
                &baseline,
                &stance,
                &darts,
                &mut rng,
            )
        }
        (None, Some(skill)) => {
            if !(0..=100).contains(&skill) {
                return Err(bad_request("skill must be in 0..=100"));
            }
            throw_automated(aim, skill, &stance, &darts, &mut rng)
        }
        _ => return Err(bad_request("provide exactly one of swipe or skill")),
    };

    Ok(Json(serde_json::json!({
        "target": target.code(),
        "aim": { "x": aim.x, "y": aim.y },
        "outcome": outcome,
    })))
}

async fn handle_risk(Json(req): Json<RiskRequest>) -> Result<Json<serde_json::Value>, ApiError> {
    if !req.target.x.is_finite() || !req.target.y.is_finite() {
        return Err(bad_request("target coordinates must be finite"));
    }
    let point = BoardPoint::new(req.target.x, req.target.y);
    let darts = board_darts(&Some(req.darts));

    let risk = collision_risk(point, &darts);
    let alternative = safe_alternative(point, &darts).map(|alt| {
        serde_json::json!({
            "x": alt.x,
            "y": alt.y,
            "risk": collision_risk(alt, &darts),
        })
    });

    Ok(Json(serde_json::json!({
        "risk": risk,
        "alternative": alternative,
    })))
}

async fn handle_cricket_suggest(
    Json(req): Json<CricketSuggestRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if req.player.marks.iter().any(|&m| !(0..=3).contains(&m)) {
        return Err(bad_request("marks must be in 0..=3"));
    }
    let player = CricketState::with_marks(req.player.marks, req.player.points);
    let opponent = match &req.opponent {
        None => None,
        Some(body) => {
            if body.marks.iter().any(|&m| !(0..=3).contains(&m)) {
                return Err(bad_request("marks must be in 0..=3"));
            }
            Some(CricketState::with_marks(body.marks, body.points))
        }
    };
    let darts_remaining = req.darts_remaining.unwrap_or(3);
    if !(1..=3).contains(&darts_remaining) {
        return Err(bad_request("darts_remaining must be 1, 2, or 3"));
    }

    let suggestion = suggest_cricket(&player, opponent.as_ref(), darts_remaining);
    Ok(Json(serde_json::json!({
        "suggestion": suggestion,
        "status": status(&player, opponent.as_ref()),
    })))
}

pub async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
