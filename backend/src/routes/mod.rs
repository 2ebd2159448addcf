//! Route definitions for the Shrimp Traceability Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Classification management, scoped to a processing plant
        .nest(
            "/plants/:plant_id/classifications",
            classification_routes(),
        )
        // Static catalogs
        .nest("/catalogs", catalog_routes())
}

/// Classification management routes
fn classification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_classifications).post(handlers::create_classification),
        )
        .route("/preview", post(handlers::preview_classification))
        .route(
            "/:classification_id",
            get(handlers::get_classification).put(handlers::update_classification),
        )
        .route(
            "/by-order/:production_order",
            get(handlers::get_classification_by_order),
        )
}

/// Catalog routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/size-grades/:process_type", get(handlers::list_size_grades))
        .route("/presentations", get(handlers::list_presentations))
        .route("/freezing-types", get(handlers::list_freezing_types))
        .route("/machines", get(handlers::list_machines))
        .route("/brands", get(handlers::list_brands))
}
