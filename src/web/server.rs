use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::tracker::{Poller, Tracker};

use super::api::proxy as proxy_handlers;
use super::api::status as status_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.web.static_dir.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        // Tracker API endpoints
        .route("/api/status", get(status_handlers::status))
        .route("/api/refresh", post(status_handlers::refresh))
        // Upstream proxy
        .route("/api/iss-position", get(proxy_handlers::iss_position))
        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the dashboard and polls the upstream until Ctrl-C.
pub async fn run_server(config: Config, tracker: Tracker) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let poller = Poller::start(tracker.clone(), config.poller.interval);

    let state = AppState {
        config: Arc::new(config),
        tracker,
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    poller.stop().await;
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
