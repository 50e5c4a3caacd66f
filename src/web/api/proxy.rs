use axum::{extract::State, Json};
use serde_json::Value;

use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/iss-position",
    responses(
        (status = 200, description = "Upstream JSON body, passed through unchanged"),
        (status = 500, description = "Upstream failed or returned a non-2xx status", body = ErrorResponse)
    ),
    tag = "proxy"
)]
pub async fn iss_position(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let body = state
        .tracker
        .provider()
        .raw()
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(body))
}
