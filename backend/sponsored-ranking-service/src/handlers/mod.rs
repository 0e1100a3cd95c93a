use crate::error::{RankingServiceError, Result};
use crate::models::RankableItem;
use crate::services::exposure::{self, ExposureReport};
use crate::services::rotation::{RankingStrategy, RotationSeed};
use crate::state::AppState;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

const DEFAULT_EXPOSURE_RENDERS: u64 = 7;

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub items: Vec<RankableItem>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Truncate after ranking; the carousel only shows this many cards
    #[serde(default)]
    pub limit: Option<usize>,
    /// Screen section the list is rendered in (`entertainment`, `events`, ...)
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankResponse {
    pub items: Vec<RankableItem>,
    pub seed: RotationSeed,
    pub strategy: RankingStrategy,
    /// Candidate count before `limit` was applied
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExposureRequest {
    pub items: Vec<RankableItem>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub start_seed: Option<u64>,
    #[serde(default)]
    pub renders: Option<u64>,
}

#[derive(Debug, Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    service: &'a str,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(rank_items).service(exposure_report);
}

/// GET /api/v1/health
#[get("/api/v1/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: &state.config.service_name,
    })
}

/// POST /api/v1/rank
/// Order a candidate list by tier with fair rotation of the lead slot
#[post("/api/v1/rank")]
pub async fn rank_items(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RankRequest>,
) -> Result<HttpResponse> {
    let correlation_id = correlation_id(&req);
    let body = body.into_inner();

    validate_item_count(&state, body.items.len())?;
    let strategy = parse_strategy(body.strategy.as_deref())?;
    let seed = state.resolve_seed(body.seed, Utc::now());

    let total = body.items.len();
    let mut ranked = state.rotation.rerank(&body.items, seed, strategy);
    if let Some(limit) = body.limit {
        ranked.truncate(limit);
    }

    let strategy = strategy.unwrap_or_else(|| state.rotation.strategy());
    info!(
        correlation_id = %correlation_id,
        section = body.section.as_deref().unwrap_or("unspecified"),
        total,
        returned = ranked.len(),
        seed = seed.value(),
        strategy = %strategy,
        "ranked sponsored items"
    );

    Ok(HttpResponse::Ok()
        .insert_header((CORRELATION_HEADER, correlation_id))
        .json(RankResponse {
            items: ranked,
            seed,
            strategy,
            total,
        }))
}

/// POST /api/v1/rank/exposure
/// Replay the rotation over consecutive seeds and tally lead slots
#[post("/api/v1/rank/exposure")]
pub async fn exposure_report(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ExposureRequest>,
) -> Result<HttpResponse> {
    let correlation_id = correlation_id(&req);
    let body = body.into_inner();

    validate_item_count(&state, body.items.len())?;
    let renders = body.renders.unwrap_or(DEFAULT_EXPOSURE_RENDERS);
    if renders > state.config.max_exposure_renders {
        return Err(RankingServiceError::Validation(format!(
            "renders must be at most {}, got {}",
            state.config.max_exposure_renders, renders
        )));
    }

    let strategy = parse_strategy(body.strategy.as_deref())?
        .unwrap_or_else(|| state.rotation.strategy());
    let start_seed = state.peek_seed(body.start_seed, Utc::now());

    let report: ExposureReport =
        exposure::lead_exposure(&body.items, start_seed, renders, strategy);

    info!(
        correlation_id = %correlation_id,
        items = body.items.len(),
        renders,
        fair = report.fair,
        "computed lead exposure"
    );

    Ok(HttpResponse::Ok()
        .insert_header((CORRELATION_HEADER, correlation_id))
        .json(report))
}

fn correlation_id(req: &HttpRequest) -> String {
    req.headers()
        .get(CORRELATION_HEADER)
        .and_then(|val| val.to_str().ok())
        .filter(|val| !val.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn parse_strategy(raw: Option<&str>) -> Result<Option<RankingStrategy>> {
    raw.map(str::parse).transpose()
}

fn validate_item_count(state: &AppState, count: usize) -> Result<()> {
    if count > state.config.max_items {
        return Err(RankingServiceError::Validation(format!(
            "at most {} items may be ranked, got {}",
            state.config.max_items, count
        )));
    }
    Ok(())
}
