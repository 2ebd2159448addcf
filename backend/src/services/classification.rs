//! Classification service for shrimp processing orders
//!
//! Persists one classification per production order: header columns plus the
//! row details as a JSONB document. All derived values are recomputed through
//! the shared [`ClassificationSheet`] before anything is written.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    validate_detail, validate_header, ClassificationDetail, ClassificationHeader,
    ClassificationSheet, ProcessType, SheetErrors, SheetTotals, WeightUnit,
};

/// Classification service for managing processing-order classifications
#[derive(Clone)]
pub struct ClassificationService {
    db: PgPool,
}

/// Database row for a classification
#[derive(Debug, sqlx::FromRow)]
struct ClassificationRow {
    id: Uuid,
    plant_id: Uuid,
    production_order: String,
    product_name: Option<String>,
    process_type: String,
    total_output_quantity: Decimal,
    rejected_weight: Decimal,
    waste_weight: Decimal,
    received_quantity: Decimal,
    received_unit: String,
    processed_weight: Decimal,
    details: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A persisted classification with its recomputed totals
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub production_order: String,
    pub product_name: Option<String>,
    pub process_type: ProcessType,
    pub header: ClassificationHeader,
    pub processed_weight: Decimal,
    pub details: Vec<ClassificationDetail>,
    pub totals: SheetTotals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a classification
#[derive(Debug, Deserialize, Validate)]
pub struct SaveClassificationInput {
    #[validate(length(min = 1, max = 50, message = "Production order must be 1-50 characters"))]
    pub production_order: String,
    /// Upstream semi-product name; drives the process-type inference
    pub product_name: Option<String>,
    pub header: ClassificationHeader,
    pub details: Vec<ClassificationDetail>,
}

/// Computed form state for an unsaved classification
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationPreview {
    pub process_type: ProcessType,
    pub processed_weight: Decimal,
    pub totals: SheetTotals,
    pub totals_exceed_output: bool,
    pub errors: SheetErrors,
}

impl ClassificationService {
    /// Create a new ClassificationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a classification for a production order
    pub async fn create_classification(
        &self,
        plant_id: Uuid,
        input: SaveClassificationInput,
    ) -> AppResult<ClassificationRecord> {
        let sheet = build_sheet(&input)?;
        reject_exceeded_output(&sheet)?;

        // One classification per production order and plant
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM classifications WHERE plant_id = $1 AND production_order = $2",
        )
        .bind(plant_id)
        .bind(&input.production_order)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("production_order".to_string()));
        }

        let details_json = serde_json::to_value(sheet.rows())
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let row = sqlx::query_as::<_, ClassificationRow>(
            r#"
            INSERT INTO classifications (plant_id, production_order, product_name, process_type,
                                         total_output_quantity, rejected_weight, waste_weight,
                                         received_quantity, received_unit, processed_weight, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, plant_id, production_order, product_name, process_type,
                      total_output_quantity, rejected_weight, waste_weight, received_quantity,
                      received_unit, processed_weight, details, created_at, updated_at
            "#,
        )
        .bind(plant_id)
        .bind(&input.production_order)
        .bind(&input.product_name)
        .bind(sheet.process_type().as_str())
        .bind(sheet.header().total_output_quantity)
        .bind(sheet.header().rejected_weight)
        .bind(sheet.header().waste_weight)
        .bind(sheet.header().received_quantity)
        .bind(sheet.header().received_unit.code())
        .bind(sheet.processed_weight())
        .bind(&details_json)
        .fetch_one(&self.db)
        .await?;

        row_to_record(row)
    }

    /// Update an existing classification
    pub async fn update_classification(
        &self,
        plant_id: Uuid,
        classification_id: Uuid,
        input: SaveClassificationInput,
    ) -> AppResult<ClassificationRecord> {
        let sheet = build_sheet(&input)?;
        reject_exceeded_output(&sheet)?;

        let details_json = serde_json::to_value(sheet.rows())
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let row = sqlx::query_as::<_, ClassificationRow>(
            r#"
            UPDATE classifications
            SET product_name = $1, process_type = $2, total_output_quantity = $3,
                rejected_weight = $4, waste_weight = $5, received_quantity = $6,
                received_unit = $7, processed_weight = $8, details = $9, updated_at = now()
            WHERE id = $10 AND plant_id = $11
            RETURNING id, plant_id, production_order, product_name, process_type,
                      total_output_quantity, rejected_weight, waste_weight, received_quantity,
                      received_unit, processed_weight, details, created_at, updated_at
            "#,
        )
        .bind(&input.product_name)
        .bind(sheet.process_type().as_str())
        .bind(sheet.header().total_output_quantity)
        .bind(sheet.header().rejected_weight)
        .bind(sheet.header().waste_weight)
        .bind(sheet.header().received_quantity)
        .bind(sheet.header().received_unit.code())
        .bind(sheet.processed_weight())
        .bind(&details_json)
        .bind(classification_id)
        .bind(plant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Classification".to_string()))?;

        row_to_record(row)
    }

    /// Get a classification by ID
    pub async fn get_classification(
        &self,
        plant_id: Uuid,
        classification_id: Uuid,
    ) -> AppResult<ClassificationRecord> {
        let row = sqlx::query_as::<_, ClassificationRow>(
            r#"
            SELECT id, plant_id, production_order, product_name, process_type,
                   total_output_quantity, rejected_weight, waste_weight, received_quantity,
                   received_unit, processed_weight, details, created_at, updated_at
            FROM classifications
            WHERE id = $1 AND plant_id = $2
            "#,
        )
        .bind(classification_id)
        .bind(plant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Classification".to_string()))?;

        row_to_record(row)
    }

    /// Get the classification for a production order, if any
    pub async fn get_by_production_order(
        &self,
        plant_id: Uuid,
        production_order: &str,
    ) -> AppResult<Option<ClassificationRecord>> {
        let row = sqlx::query_as::<_, ClassificationRow>(
            r#"
            SELECT id, plant_id, production_order, product_name, process_type,
                   total_output_quantity, rejected_weight, waste_weight, received_quantity,
                   received_unit, processed_weight, details, created_at, updated_at
            FROM classifications
            WHERE plant_id = $1 AND production_order = $2
            "#,
        )
        .bind(plant_id)
        .bind(production_order)
        .fetch_optional(&self.db)
        .await?;

        row.map(row_to_record).transpose()
    }

    /// List all classifications for a plant
    pub async fn list_classifications(&self, plant_id: Uuid) -> AppResult<Vec<ClassificationRecord>> {
        let rows = sqlx::query_as::<_, ClassificationRow>(
            r#"
            SELECT id, plant_id, production_order, product_name, process_type,
                   total_output_quantity, rejected_weight, waste_weight, received_quantity,
                   received_unit, processed_weight, details, created_at, updated_at
            FROM classifications
            WHERE plant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(plant_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }

    /// Compute the derived form state for an unsaved classification.
    ///
    /// Unlike create/update this does not reject an exceeded output bound:
    /// the flags come back in the preview so the form can render them.
    pub fn preview(&self, input: SaveClassificationInput) -> AppResult<ClassificationPreview> {
        let sheet = build_sheet(&input)?;
        Ok(ClassificationPreview {
            process_type: sheet.process_type(),
            processed_weight: sheet.processed_weight(),
            totals: sheet.totals(),
            totals_exceed_output: sheet.totals_exceed_output(),
            errors: sheet.errors().clone(),
        })
    }
}

/// Validate the input and rebuild the classification sheet from it
fn build_sheet(input: &SaveClassificationInput) -> AppResult<ClassificationSheet> {
    input
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    validate_header(&input.header).map_err(|msg| AppError::Validation {
        field: "header".to_string(),
        message: msg.to_string(),
        message_es: "Los campos de cabecera no son válidos".to_string(),
    })?;

    let process_type = shared::classify_product_name(input.product_name.as_deref());

    for (index, detail) in input.details.iter().enumerate() {
        if detail.process_type != process_type {
            return Err(AppError::Validation {
                field: format!("details[{}].process_type", index),
                message: format!(
                    "Row process type does not match the inferred type {}",
                    process_type
                ),
                message_es: "El tipo de proceso de la fila no coincide con el tipo inferido"
                    .to_string(),
            });
        }
        validate_detail(detail).map_err(|msg| AppError::Validation {
            field: format!("details[{}]", index),
            message: msg.to_string(),
            message_es: "La fila de clasificación no es válida".to_string(),
        })?;
    }

    Ok(ClassificationSheet::from_rows(
        input.header.clone(),
        process_type,
        input.details.clone(),
    ))
}

/// Reject persistence when the output bound is exceeded
fn reject_exceeded_output(sheet: &ClassificationSheet) -> AppResult<()> {
    if sheet.totals_exceed_output() {
        return Err(AppError::Validation {
            field: "total_output_quantity".to_string(),
            message: "Processed, rejected and waste weights exceed the declared output quantity"
                .to_string(),
            message_es:
                "Los pesos procesado, rechazado y de desecho exceden la cantidad declarada de salida"
                    .to_string(),
        });
    }
    Ok(())
}

/// Convert a database row into a record with recomputed totals
fn row_to_record(row: ClassificationRow) -> AppResult<ClassificationRecord> {
    let process_type = process_type_from_db(&row.process_type)?;
    let received_unit = unit_from_db(&row.received_unit)?;
    let details: Vec<ClassificationDetail> = serde_json::from_value(row.details)
        .map_err(|e| AppError::Internal(format!("Corrupt details document: {}", e)))?;
    let totals = SheetTotals::of(&details);

    Ok(ClassificationRecord {
        id: row.id,
        plant_id: row.plant_id,
        production_order: row.production_order,
        product_name: row.product_name,
        process_type,
        header: ClassificationHeader {
            total_output_quantity: row.total_output_quantity,
            rejected_weight: row.rejected_weight,
            waste_weight: row.waste_weight,
            received_quantity: row.received_quantity,
            received_unit,
        },
        processed_weight: row.processed_weight,
        details,
        totals,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn process_type_from_db(value: &str) -> AppResult<ProcessType> {
    match value {
        "head_on" => Ok(ProcessType::HeadOn),
        "shell_on" => Ok(ProcessType::ShellOn),
        other => Err(AppError::Internal(format!(
            "Unknown process type in database: {}",
            other
        ))),
    }
}

fn unit_from_db(value: &str) -> AppResult<WeightUnit> {
    match value {
        "kg" => Ok(WeightUnit::Kg),
        "lb" => Ok(WeightUnit::Lb),
        other => Err(AppError::Internal(format!(
            "Unknown weight unit in database: {}",
            other
        ))),
    }
}
