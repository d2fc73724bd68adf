//! JSON API over the report service

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    CoastcastError,
    report::{ConditionsReport, ReportOptions, ReportService},
};

/// Shared, immutable state handed to every request
pub struct AppState {
    pub service: ReportService,
    pub default_city: String,
    pub default_options: ReportOptions,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub city: Option<String>,
    pub ocean: Option<bool>,
    pub forecast: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

pub struct ApiFailure(CoastcastError);

impl From<CoastcastError> for ApiFailure {
    fn from(err: CoastcastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoastcastError::InputInvalid { .. } => StatusCode::BAD_REQUEST,
            CoastcastError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CoastcastError::ProviderUnavailable { .. }
            | CoastcastError::ProviderDataMissing { .. }
            | CoastcastError::Http { .. }
            | CoastcastError::Conditions(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ApiError {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/report", get(get_report))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ConditionsReport>, ApiFailure> {
    let city = query.city.as_deref().unwrap_or(&state.default_city);
    let options = ReportOptions {
        include_ocean: query.ocean.unwrap_or(state.default_options.include_ocean),
        include_forecast: query
            .forecast
            .unwrap_or(state.default_options.include_forecast),
    };

    let report = state.service.build(city, options).await?;
    Ok(Json(report))
}
