//! Empire API Routes
//!
//! - /twins, /twins/:id, /twins/:id/stats, /twin-visibility - Twin registry
//! - /assign-daily-quests, /complete-quest, /twins/:id/quests - Daily quests
//! - /evolve-memory-shards, /twins/:id/shards - Memory shards
//! - /evolve-twin, /twin-level-up - XP grants
//! - /twin-relations, /twins/:id/relations - Affinity
//! - /seasonal-event-rotation, /seasonal-event - Seasons
//! - /unlock-portal - Portal gate
//! - /generate-lore, /twins/:id/lore - Lore
//! - /imprint-memory, /train-twin - Training

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

pub mod error;
pub mod leveling;
pub mod lore;
pub mod portals;
pub mod quests;
pub mod relations;
pub mod seasons;
pub mod shards;
pub mod swagger;
pub mod training;
pub mod twins;

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Empire API is running - the twins are awake".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full application router with shared state
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(twins::router())
        .merge(quests::router())
        .merge(shards::router())
        .merge(leveling::router())
        .merge(relations::router())
        .merge(seasons::router())
        .merge(portals::router())
        .merge(lore::router())
        .merge(training::router());

    // OpenAPI documentation
    let openapi = swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
