use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::error::RankError;
use crate::model::{SchemeQuery, Seller, SellerQuery};
use crate::rank::RankedSeller;
use crate::scheme::{SchemeOutcome, SchemeSelection};
use crate::service::RankingService;

pub fn router(service: RankingService) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/recommend", post(recommend))
        .route("/api/scheme/bycrop", post(scheme_by_crop))
        .route("/api/sellers", get(sellers_by_state))
        .layer(CorsLayer::very_permissive())
        .with_state(service)
}

/// Handler errors mapped onto the public JSON error shape `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Rank(RankError),
    NoScheme,
}

impl From<RankError> for ApiError {
    fn from(e: RankError) -> Self {
        ApiError::Rank(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        ApiError::Rank(RankError::invalid(rej.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Rank(RankError::InvalidQuery(m)) => (StatusCode::BAD_REQUEST, m),
            ApiError::Rank(RankError::PoolFetch(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Recommendation failed".to_string(),
            ),
            ApiError::NoScheme => (StatusCode::NOT_FOUND, "No scheme available".to_string()),
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

#[derive(Deserialize)]
struct RecommendReq {
    #[serde(default)]
    crop: String,
    #[serde(default)]
    district: String,
    #[serde(default)]
    state: String,
    // legacy clients send `region` instead of `district`
    #[serde(default)]
    region: Option<String>,
}

async fn recommend(
    State(svc): State<RankingService>,
    body: Result<Json<RecommendReq>, JsonRejection>,
) -> Result<Json<Vec<RankedSeller>>, ApiError> {
    let Json(body) = body?;
    let query = SellerQuery::new(&body.crop, &body.district, &body.state)
        .with_region_fallback(body.region.as_deref());
    Ok(Json(svc.rank_sellers(&query).await?))
}

#[derive(Deserialize)]
struct SchemeReq {
    #[serde(default)]
    crop: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    shown_schemes: Vec<String>,
}

#[derive(Serialize)]
struct SchemeResp {
    recommended_scheme: SchemeSelection,
}

async fn scheme_by_crop(
    State(svc): State<RankingService>,
    body: Result<Json<SchemeReq>, JsonRejection>,
) -> Result<Json<SchemeResp>, ApiError> {
    let Json(body) = body?;
    let query = SchemeQuery::new(&body.crop, &body.state, body.shown_schemes)?;
    match svc.select_scheme(&query).await? {
        SchemeOutcome::Selected(recommended_scheme) => Ok(Json(SchemeResp { recommended_scheme })),
        SchemeOutcome::NoneAvailable => Err(ApiError::NoScheme),
    }
}

#[derive(Serialize)]
struct SellersResp {
    sellers: Vec<Seller>,
}

async fn sellers_by_state(
    State(svc): State<RankingService>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<SellersResp>, ApiError> {
    let state = q.get("state").map(String::as_str).unwrap_or_default();
    if state.trim().is_empty() {
        return Err(RankError::invalid("State required").into());
    }
    let sellers = svc.sellers_in_state(state).await?;
    Ok(Json(SellersResp { sellers }))
}
