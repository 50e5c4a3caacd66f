use axum::{extract::State, Json};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

use crate::display::DisplayPanel;
use crate::tracker::{Snapshot, TrackerError};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub snapshot: Snapshot,
    pub panel: DisplayPanel,
}

impl StatusResponse {
    pub fn collect(state: &AppState) -> Self {
        let snapshot = state.tracker.snapshot();
        let panel = DisplayPanel::build(
            snapshot.reading.as_ref(),
            &Local,
            &state.config.display.time_format,
        );
        StatusResponse { snapshot, panel }
    }
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Current reading, formatted panel and map frame", body = StatusResponse)
    ),
    tag = "tracker"
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::collect(&state))
}

#[utoipa::path(
    post,
    path = "/api/refresh",
    responses(
        (status = 200, description = "Fetch finished; a failed fetch is reported in snapshot.error", body = StatusResponse),
        (status = 409, description = "A fetch is already in flight", body = ErrorResponse)
    ),
    tag = "tracker"
)]
pub async fn refresh(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    match state.tracker.manual_refresh().await {
        Ok(_) | Err(TrackerError::Fetch(_)) => {}
        Err(TrackerError::Busy) => return Err(ApiError::Conflict("refresh_in_progress")),
    }
    Ok(Json(StatusResponse::collect(&state)))
}
