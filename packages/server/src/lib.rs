pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRUD Resources API",
        version = "1.0.0",
        description = "Blog list, notes and phonebook resources"
    ),
    tags(
        (name = "Blogs", description = "Blog list CRUD operations"),
        (name = "Notes", description = "Note CRUD operations"),
        (name = "Persons", description = "Phonebook CRUD operations"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes())
        .split_for_parts();

    router
        .route("/", get(handlers::note::hello))
        .route("/info", get(handlers::person::info))
        .with_state(state)
        .merge(Scalar::with_url("/scalar", api))
        .fallback(error::unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allow_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.allow_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .inspect_err(|_| tracing::warn!(origin = %o, "Ignoring invalid CORS origin"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}
