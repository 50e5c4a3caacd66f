use axum::{extract::State, response::IntoResponse};
use chrono::Local;

use crate::display::DisplayPanel;
use crate::web::state::AppState;

use super::templates::DashboardTemplate;

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.tracker.snapshot();
    let config = &state.config;

    DashboardTemplate {
        panel: DisplayPanel::build(
            snapshot.reading.as_ref(),
            &Local,
            &config.display.time_format,
        ),
        loading: snapshot.loading,
        error: snapshot.error,
        poll_interval_ms: u64::try_from(config.poller.interval.as_millis()).unwrap_or(u64::MAX),
        tile_url: config.map.tile_url.clone(),
        attribution: config.map.attribution.clone(),
    }
}
