//! Static lookup catalogs for classification fields
//!
//! Size grades, presentations, freezing types, machines and brands are
//! read-only reference data. Brand entries carry a canonical box weight used
//! to auto-populate a row when the brand is selected.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::classification::ProcessType;
use crate::types::WeightUnit;

/// Size grades for head-on product (pieces per kilogram)
pub const HEAD_ON_SIZE_GRADES: &[&str] = &[
    "20/30", "30/40", "40/50", "50/60", "60/70", "70/80", "80/100",
];

/// Size grades for shell-on tails (pieces per pound)
pub const SHELL_ON_SIZE_GRADES: &[&str] = &[
    "16/20", "21/25", "26/30", "31/35", "36/40", "41/50", "51/60", "61/70", "71/90",
];

/// Presentation types, meaningful only for shell-on product
pub const PRESENTATION_TYPES: &[(&str, &str)] = &[
    ("block", "Block frozen"),
    ("iqf", "Individually quick frozen"),
    ("semi_block", "Semi block"),
];

/// Freezing types
pub const FREEZING_TYPES: &[(&str, &str)] = &[
    ("plate", "Plate freezer"),
    ("tunnel", "Tunnel freezer"),
    ("brine", "Brine immersion"),
];

/// Freezing machines
pub const MACHINES: &[(&str, &str)] = &[
    ("tunnel_1", "Tunnel 1"),
    ("tunnel_2", "Tunnel 2"),
    ("plate_1", "Plate 1"),
    ("plate_2", "Plate 2"),
];

/// A packing brand with its canonical box weight
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Brand {
    pub code: &'static str,
    pub name: &'static str,
    pub weight_per_box: Decimal,
    pub weight_unit: WeightUnit,
}

/// Packing brands
pub const BRANDS: &[Brand] = &[
    Brand {
        code: "oceanic_10",
        name: "Oceanic 10 lb",
        weight_per_box: Decimal::from_parts(10, 0, 0, false, 0),
        weight_unit: WeightUnit::Lb,
    },
    Brand {
        code: "mar_azul_2kg",
        name: "Mar Azul 2 kg",
        weight_per_box: Decimal::from_parts(2, 0, 0, false, 0),
        weight_unit: WeightUnit::Kg,
    },
    Brand {
        code: "coral_20",
        name: "Coral 20 lb",
        weight_per_box: Decimal::from_parts(20, 0, 0, false, 0),
        weight_unit: WeightUnit::Lb,
    },
    Brand {
        code: "pacifico_5kg",
        name: "Pacífico 5 kg",
        weight_per_box: Decimal::from_parts(5, 0, 0, false, 0),
        weight_unit: WeightUnit::Kg,
    },
];

/// Size grade catalog for a process type
pub fn size_grades_for(process_type: ProcessType) -> &'static [&'static str] {
    match process_type {
        ProcessType::HeadOn => HEAD_ON_SIZE_GRADES,
        ProcessType::ShellOn => SHELL_ON_SIZE_GRADES,
    }
}

/// Default size grade inserted on a new row
pub fn default_size_grade(process_type: ProcessType) -> &'static str {
    size_grades_for(process_type)[0]
}

/// Default presentation inserted on a new shell-on row
pub fn default_presentation() -> &'static str {
    PRESENTATION_TYPES[0].0
}

pub fn is_valid_size_grade(process_type: ProcessType, code: &str) -> bool {
    size_grades_for(process_type).contains(&code)
}

pub fn is_valid_presentation(code: &str) -> bool {
    PRESENTATION_TYPES.iter().any(|(c, _)| *c == code)
}

pub fn is_valid_freezing_type(code: &str) -> bool {
    FREEZING_TYPES.iter().any(|(c, _)| *c == code)
}

pub fn is_valid_machine(code: &str) -> bool {
    MACHINES.iter().any(|(c, _)| *c == code)
}

pub fn find_brand(code: &str) -> Option<&'static Brand> {
    BRANDS.iter().find(|b| b.code == code)
}
