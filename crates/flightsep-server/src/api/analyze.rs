//! Analysis endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use flightsep_core::{waypoint_index, AnalysisConfig, AnalysisResult, Flight};

use crate::api::request_id::RequestId;
use crate::state::AppState;

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Run a separation analysis over the posted flight list.
///
/// The scan is CPU-bound, so it runs on the blocking pool.
pub async fn analyze_flights(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(flights): Json<Vec<Flight>>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let sequence = state.next_analysis();
    tracing::info!(
        request_id = %request_id,
        sequence,
        flights = flights.len(),
        "analysis requested"
    );

    let worker_state = state.clone();
    let result = tokio::task::spawn_blocking(move || worker_state.engine().analyze(&flights))
        .await
        .map_err(|err| {
            tracing::error!(request_id = %request_id, "Analysis task failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Analysis failed"
                })),
            )
        })?;

    Ok(Json(result))
}

/// Route tokens mapped to the flights that file them.
pub async fn waypoints(Json(flights): Json<Vec<Flight>>) -> Json<BTreeMap<String, Vec<String>>> {
    Json(waypoint_index(&flights))
}

pub async fn current_config(State(state): State<Arc<AppState>>) -> Json<AnalysisConfig> {
    Json(state.engine().config().clone())
}
