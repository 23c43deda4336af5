use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod timing;

/// Shared application state. The pool is reference-counted internally, so
/// cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Products CRUD ───────────────────────────────────────────────────
        .route("/api/products", get(handlers::products::list_products))
        .route(
            "/api/products/create",
            post(handlers::products::create_product),
        )
        .route(
            "/api/products/:id",
            put(handlers::products::update_product)
                .get(handlers::products::get_product)
                .delete(handlers::products::delete_product),
        )

        // ── Clients CRUD ────────────────────────────────────────────────────
        .route("/api/clients", get(handlers::clients::list_clients))
        .route("/api/clients/create", post(handlers::clients::create_client))
        .route(
            "/api/clients/:id",
            put(handlers::clients::update_client)
                .get(handlers::clients::get_client)
                .delete(handlers::clients::delete_client),
        )

        // ── Diagnostics ─────────────────────────────────────────────────────
        .route(
            "/api/test_performance",
            get(handlers::performance::test_performance),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(middleware::from_fn(timing::track_request_time))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
