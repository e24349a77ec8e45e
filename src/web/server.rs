use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::session::FileSessionProvider;

use super::api::compare as compare_handlers;
use super::api::landmarks as landmark_handlers;
use super::api::pace as pace_handlers;
use super::api_doc::ApiDoc;
use super::auth::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/compare", post(compare_handlers::compare))
        .route(
            "/api/landmarks/{course}",
            get(landmark_handlers::list_landmarks),
        )
        .route("/api/pace", post(pace_handlers::race_pace))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let provider = FileSessionProvider::new(config.sessions.base_folder.clone());
    let catalog = config.landmark_catalog();

    if config.api_keys.is_empty() {
        log::warn!("No API keys configured; every request will be rejected");
    }
    log::info!(
        "Serving sessions from {} with landmarks for {:?}",
        config.sessions.base_folder.display(),
        catalog.courses()
    );

    let state = AppState {
        config: Arc::new(config),
        provider: Arc::new(provider),
        catalog: Arc::new(catalog),
    };

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
