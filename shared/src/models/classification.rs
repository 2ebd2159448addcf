//! Processing-order classification models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::catalog::{default_presentation, default_size_grade};
use crate::types::{round2, to_pounds, WeightUnit};

/// Shrimp processing variants. The variant determines which size-grade
/// catalog applies and whether the presentation field is meaningful.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    /// Whole shrimp, head on
    HeadOn,
    /// Tail only, shell on
    #[default]
    ShellOn,
}

impl ProcessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessType::HeadOn => "head_on",
            ProcessType::ShellOn => "shell_on",
        }
    }
}

impl std::fmt::Display for ProcessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessType::HeadOn => write!(f, "Head On"),
            ProcessType::ShellOn => write!(f, "Shell On"),
        }
    }
}

/// One classification row: a batch of boxes of a single size grade
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationDetail {
    pub process_type: ProcessType,
    /// Size grade code from the catalog for `process_type`
    pub size_grade: String,
    /// Only meaningful for [`ProcessType::ShellOn`]
    pub presentation: Option<String>,
    pub box_count: u32,
    pub weight_per_box: Decimal,
    pub weight_unit: WeightUnit,
    pub price_per_pound: Decimal,
    // Provenance
    pub production_order: Option<String>,
    pub freezing_type: Option<String>,
    pub machine: Option<String>,
    pub brand: Option<String>,
}

impl ClassificationDetail {
    /// Default row for a process type, as inserted when the user adds a row.
    /// Presentation is defaulted only for shell-on.
    pub fn new(process_type: ProcessType) -> Self {
        Self {
            process_type,
            size_grade: default_size_grade(process_type).to_string(),
            presentation: match process_type {
                ProcessType::ShellOn => Some(default_presentation().to_string()),
                ProcessType::HeadOn => None,
            },
            box_count: 0,
            weight_per_box: Decimal::ZERO,
            weight_unit: WeightUnit::Lb,
            price_per_pound: Decimal::ZERO,
            production_order: None,
            freezing_type: None,
            machine: None,
            brand: None,
        }
    }

    /// Total weight of the row in its native unit, exact
    pub fn total_weight(&self) -> Decimal {
        Decimal::from(self.box_count) * self.weight_per_box
    }

    /// Total weight of the row converted to pounds, unrounded
    pub fn total_pounds(&self) -> Decimal {
        to_pounds(self.total_weight(), self.weight_unit)
    }

    /// Monetary amount for the row: pounds times price per pound
    pub fn line_amount(&self) -> Decimal {
        self.total_pounds() * self.price_per_pound
    }
}

/// User-editable header fields of a classification.
///
/// Derived values (processed weight, received pounds) are intentionally not
/// stored here: they are owned by the sheet and recomputed from the rows, so
/// the two classes of fields cannot be confused.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassificationHeader {
    /// Declared quantity for the whole output, in pounds
    pub total_output_quantity: Decimal,
    pub rejected_weight: Decimal,
    pub waste_weight: Decimal,
    /// Upstream received quantity with its measure unit; the received
    /// weight in pounds derives from this pair
    pub received_quantity: Decimal,
    pub received_unit: WeightUnit,
}

impl ClassificationHeader {
    /// Received weight in pounds, derived from the quantity/unit pair
    pub fn received_pounds(&self) -> Decimal {
        round2(to_pounds(self.received_quantity, self.received_unit))
    }
}
