//! Read side of the static classification catalogs

use serde::Serialize;

use crate::error::{AppError, AppResult};
use shared::{size_grades_for, Brand, ProcessType, BRANDS, FREEZING_TYPES, MACHINES, PRESENTATION_TYPES};

/// A code/name catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
}

fn entries(pairs: &'static [(&'static str, &'static str)]) -> Vec<CatalogEntry> {
    pairs
        .iter()
        .map(|(code, name)| CatalogEntry { code, name })
        .collect()
}

/// Size grades for a process type given as its API code
pub fn size_grades(process_type: &str) -> AppResult<Vec<&'static str>> {
    let process_type = match process_type {
        "head_on" => ProcessType::HeadOn,
        "shell_on" => ProcessType::ShellOn,
        other => {
            return Err(AppError::Validation {
                field: "process_type".to_string(),
                message: format!("Unknown process type: {}", other),
                message_es: format!("Tipo de proceso desconocido: {}", other),
            })
        }
    };
    Ok(size_grades_for(process_type).to_vec())
}

pub fn presentations() -> Vec<CatalogEntry> {
    entries(PRESENTATION_TYPES)
}

pub fn freezing_types() -> Vec<CatalogEntry> {
    entries(FREEZING_TYPES)
}

pub fn machines() -> Vec<CatalogEntry> {
    entries(MACHINES)
}

pub fn brands() -> &'static [Brand] {
    BRANDS
}
