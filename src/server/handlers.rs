use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::export::{self, EXPORT_FILENAME, EXPORT_MIME};
use crate::place::{
    PlaceRecord, SearchError, SearchOutcome, SearchQuery, DEFAULT_LAT, DEFAULT_LIMIT,
    DEFAULT_LON, DEFAULT_RADIUS_M, MAX_LIMIT,
};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        let status = if e.is_config() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::BAD_GATEWAY
        };
        api_error(status, e.to_string())
    }
}

// ─── GET /api/categories ─────────────────────────────────────────

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub parents: Vec<String>,
    pub children: BTreeMap<String, Vec<String>>,
}

pub async fn categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let catalog = state.finder.catalog();
    let parents: Vec<String> = catalog.parents().into_iter().map(str::to_string).collect();
    let children = parents
        .iter()
        .map(|p| (p.clone(), catalog.children(p).to_vec()))
        .collect();
    Json(CategoriesResponse { parents, children })
}

// ─── GET /api/search ─────────────────────────────────────────────

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub status: &'static str,
    pub count: usize,
    pub center: Center,
    pub results: Vec<PlaceRecord>,
}

/// Query strings that fail to decode get the same JSON error body.
fn decoded(params: Result<Query<SearchParams>, QueryRejection>) -> Result<SearchParams, ApiError> {
    params
        .map(|Query(p)| p)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))
}

/// Validate parameters against the catalog and build the query.
fn build_query(state: &AppState, params: &SearchParams) -> Result<SearchQuery, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("limit must be between 1 and {}", MAX_LIMIT),
        ));
    }

    let catalog = state.finder.catalog();
    let parent = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| catalog.default_category());
    let category = if parent.contains('.') {
        parent.to_string()
    } else {
        catalog.select(parent, params.subcategory.as_deref())
    };

    SearchQuery::new(
        params.lat.unwrap_or(DEFAULT_LAT),
        params.lon.unwrap_or(DEFAULT_LON),
        params.radius.unwrap_or(DEFAULT_RADIUS_M),
        category,
        limit,
    )
    .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

/// Run the blocking search off the async runtime.
async fn run_search(state: &AppState, query: SearchQuery) -> Result<Vec<PlaceRecord>, ApiError> {
    let finder = state.finder.clone();
    let outcome = tokio::task::spawn_blocking(move || finder.search(&query))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("search task: {}", e)))?;
    match outcome {
        SearchOutcome::Found(records) => Ok(records),
        SearchOutcome::Empty => Ok(Vec::new()),
        SearchOutcome::Failed(e) => Err(e.into()),
    }
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = Instant::now();
    let params = decoded(params)?;
    let query = build_query(&state, &params)?;
    let center = Center {
        lat: query.lat,
        lon: query.lon,
    };
    let label = query.to_string();

    let result = run_search(&state, query).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let results = match result {
        Ok(r) => r,
        Err(e) => {
            tracing::info!(query = %label, status = e.0.as_u16(), elapsed_ms, "GET /api/search");
            return Err(e);
        }
    };
    tracing::info!(query = %label, results = results.len(), elapsed_ms, "GET /api/search");

    Ok(Json(SearchResponse {
        status: if results.is_empty() { "empty" } else { "ok" },
        count: results.len(),
        center,
        results,
    }))
}

// ─── GET /api/export ─────────────────────────────────────────────

pub async fn export_csv(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let params = decoded(params)?;
    let query = build_query(&state, &params)?;
    let label = query.to_string();
    let records = run_search(&state, query).await?;

    let body = export::to_csv_bytes(&records)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(
        query = %label,
        results = records.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/export"
    );

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
