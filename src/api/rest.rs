use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::service::economic::EconomicData;
use crate::service::platforms::PlatformsResponse;
use crate::service::rate::RateResponse;
use crate::service::{EconomicService, PlatformsService, RateService};

pub struct ApiState {
    pub rate: Arc<RateService>,
    pub platforms: Arc<PlatformsService>,
    pub economic: Arc<EconomicService>,
}

pub fn create_router(state: Arc<ApiState>, public_dir: &str) -> Router {
    let frontend = ServeDir::new(public_dir)
        .fallback(ServeFile::new(Path::new(public_dir).join("index.html")));

    Router::new()
        .route("/api/rate", get(get_rate))
        .route("/api/platforms", get(get_platforms))
        .route("/api/economic-data", get(get_economic_data))
        .route("/api/health", get(health_check))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_rate(State(state): State<Arc<ApiState>>) -> Result<Json<RateResponse>, ApiError> {
    let rate = state.rate.get_rate().await?;
    Ok(Json(rate))
}

async fn get_platforms(State(state): State<Arc<ApiState>>) -> Json<PlatformsResponse> {
    Json(state.platforms.get_platforms().await)
}

async fn get_economic_data(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<EconomicData>, ApiError> {
    let data = state.economic.get_economic_data().await?;
    Ok(Json(data))
}

/// Upstream hard failures surface as a 500 with a diagnostic envelope.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match &self.0 {
            Error::ReferenceUnavailable(_) => "failed to fetch the reference quote",
            Error::EconomicDataUnavailable(_) => "failed to fetch economic data",
            _ => "internal error",
        };
        tracing::error!(error = %self.0, "request failed");
        let body = Json(json!({ "error": error, "message": self.0.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
