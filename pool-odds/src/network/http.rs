use crate::calculations::ModelParams;
use crate::db::OddsStore;
use crate::service::compute_odds;
use crate::types::ErrorBody;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

pub type SharedState<S> = Arc<AppState<S>>;

pub struct AppState<S> {
    pub store: S,
    pub params: ModelParams,
}

impl<S> AppState<S> {
    pub fn new(store: S, params: ModelParams) -> Self {
        Self { store, params }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictParams {
    pub player_a: Option<String>,
    pub player_b: Option<String>,
}

pub fn router<S: OddsStore>(state: SharedState<S>) -> Router {
    Router::new()
        .route("/predict", get(predict::<S>))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// `GET /predict?player_a=<id>&player_b=<id>`
pub async fn predict<S: OddsStore>(
    State(state): State<SharedState<S>>,
    Query(params): Query<PredictParams>,
) -> Response {
    let (player_a, player_b) = match (non_blank(params.player_a), non_blank(params.player_b)) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            warn!("Rejected /predict request with missing player ids");
            return error_response(StatusCode::BAD_REQUEST, "Missing player IDs");
        }
    };

    if player_a == player_b {
        return error_response(StatusCode::BAD_REQUEST, "player_a and player_b must differ");
    }

    info!("🎱 Predicting {} vs {}", player_a, player_b);

    match compute_odds(&state.store, &state.params, &player_a, &player_b).await {
        Ok(Some(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "No finalized matches found for these players",
        ),
        Err(e) => {
            error!("Odds computation failed for {} vs {}: {}", player_a, player_b, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
