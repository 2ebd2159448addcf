//! HTTP handlers for the static catalogs

use axum::{extract::Path, response::IntoResponse, Json};

use crate::{error::AppResult, services::catalog};

/// Size grades for a process type
pub async fn list_size_grades(Path(process_type): Path<String>) -> AppResult<impl IntoResponse> {
    Ok(Json(catalog::size_grades(&process_type)?))
}

/// Presentation types
pub async fn list_presentations() -> impl IntoResponse {
    Json(catalog::presentations())
}

/// Freezing types
pub async fn list_freezing_types() -> impl IntoResponse {
    Json(catalog::freezing_types())
}

/// Freezing machines
pub async fn list_machines() -> impl IntoResponse {
    Json(catalog::machines())
}

/// Packing brands with their canonical box weights
pub async fn list_brands() -> impl IntoResponse {
    Json(catalog::brands())
}
