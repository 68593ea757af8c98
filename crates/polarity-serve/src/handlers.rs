use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use polarity::{Analysis, AnalysisOptions, GraphRequest};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    /// Decimal precision; a positive integer.
    pub dp: Option<String>,
    pub binning: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub entry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

fn parse_precision(raw: Option<&str>, default: u32) -> ApiResult<u32> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(dp) if dp >= 1 => Ok(dp),
        _ => Err(ApiError::bad_request(format!(
            "dp must be a positive integer, got {raw:?}"
        ))),
    }
}

fn parse_flag(raw: Option<&str>, name: &str) -> ApiResult<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(other) => Err(ApiError::bad_request(format!(
            "{name} must be true or false, got {other:?}"
        ))),
    }
}

/// `POST /graphs`: analyze the edge list in the request body.
pub async fn analyze_graph(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    body: Result<Json<GraphRequest>, JsonRejection>,
) -> ApiResult<Json<Analysis>> {
    let Json(request) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let dp = parse_precision(query.dp.as_deref(), state.default_precision)?;
    let binning = parse_flag(query.binning.as_deref(), "binning")?;
    let options = AnalysisOptions::default()
        .with_decimal_precision(dp)
        .with_binning(binning);

    tracing::debug!(
        bytes = request.graph.len(),
        dtype = request.dtype.as_str(),
        dp,
        binning,
        "analyze request"
    );
    let analysis = state.pool.analyze(request, options).await?;
    Ok(Json(analysis))
}

/// `GET /graphs`: list dataset names, or return one dataset's text with `?entry=`.
pub async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Response> {
    match query.entry {
        Some(name) => {
            let text = state.catalog.read(&name).await?;
            Ok(Json(text).into_response())
        }
        None => {
            let names = state.catalog.list().await?;
            Ok(Json(names).into_response())
        }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
