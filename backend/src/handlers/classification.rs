//! HTTP handlers for processing-order classifications

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    services::classification::{ClassificationService, SaveClassificationInput},
    AppState,
};

/// Create a classification for a production order
pub async fn create_classification(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Json(input): Json<SaveClassificationInput>,
) -> AppResult<impl IntoResponse> {
    let service = ClassificationService::new(state.db);
    let record = service.create_classification(plant_id, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a classification
pub async fn update_classification(
    State(state): State<AppState>,
    Path((plant_id, classification_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<SaveClassificationInput>,
) -> AppResult<impl IntoResponse> {
    let service = ClassificationService::new(state.db);
    let record = service
        .update_classification(plant_id, classification_id, input)
        .await?;
    Ok(Json(record))
}

/// Get a classification by ID
pub async fn get_classification(
    State(state): State<AppState>,
    Path((plant_id, classification_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let service = ClassificationService::new(state.db);
    let record = service
        .get_classification(plant_id, classification_id)
        .await?;
    Ok(Json(record))
}

/// Get the classification for a production order
pub async fn get_classification_by_order(
    State(state): State<AppState>,
    Path((plant_id, production_order)): Path<(Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    let service = ClassificationService::new(state.db);
    let record = service
        .get_by_production_order(plant_id, &production_order)
        .await?;
    Ok(Json(record))
}

/// List all classifications for a plant
pub async fn list_classifications(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = ClassificationService::new(state.db);
    let records = service.list_classifications(plant_id).await?;
    Ok(Json(records))
}

/// Compute derived form state without persisting anything
pub async fn preview_classification(
    State(state): State<AppState>,
    Json(input): Json<SaveClassificationInput>,
) -> AppResult<impl IntoResponse> {
    let service = ClassificationService::new(state.db);
    let preview = service.preview(input)?;
    Ok(Json(preview))
}
