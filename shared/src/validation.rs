//! Validation for processing-order classifications
//!
//! Validation never throws: cross-field problems surface as structured flags
//! on the header and on individual fields, and catalog checks return
//! `Result<(), &'static str>` for the service layer to translate.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    find_brand, is_valid_freezing_type, is_valid_machine, is_valid_presentation,
    is_valid_size_grade, ClassificationDetail, ClassificationHeader,
};
use crate::types::WEIGHT_TOLERANCE;

/// Structured validation flags carried on fields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFlag {
    /// processed + rejected + waste exceeds the declared output quantity
    TotalsExceedOutput,
    Required,
}

/// Error flags attached to one field (or to the header aggregate).
///
/// Setting or clearing a flag merges with whatever other flags are present;
/// it never clobbers unrelated ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldErrors {
    flags: BTreeSet<ValidationFlag>,
}

impl FieldErrors {
    pub fn set(&mut self, flag: ValidationFlag) {
        self.flags.insert(flag);
    }

    pub fn clear(&mut self, flag: ValidationFlag) {
        self.flags.remove(&flag);
    }

    pub fn contains(&self, flag: ValidationFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn flags(&self) -> impl Iterator<Item = ValidationFlag> + '_ {
        self.flags.iter().copied()
    }
}

/// Error state of a classification sheet: a header-level aggregate plus the
/// three weight fields the output-bound check annotates
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetErrors {
    pub header: FieldErrors,
    pub processed_weight: FieldErrors,
    pub rejected_weight: FieldErrors,
    pub waste_weight: FieldErrors,
}

impl SheetErrors {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.processed_weight.is_empty()
            && self.rejected_weight.is_empty()
            && self.waste_weight.is_empty()
    }
}

/// Read-only form of the output-bound check: does
/// `processed + rejected + waste` exceed the declared output quantity beyond
/// tolerance? Absent values count as zero. Mutates nothing, safe to call
/// while rendering.
pub fn totals_exceed_output(
    processed: Option<Decimal>,
    rejected: Option<Decimal>,
    waste: Option<Decimal>,
    total_output: Option<Decimal>,
) -> bool {
    let sum = processed.unwrap_or(Decimal::ZERO)
        + rejected.unwrap_or(Decimal::ZERO)
        + waste.unwrap_or(Decimal::ZERO);
    sum > total_output.unwrap_or(Decimal::ZERO) + WEIGHT_TOLERANCE
}

/// Apply the output-bound check to the sheet's error state.
///
/// When the bound is exceeded the flag is set on the header aggregate and on
/// each of the three weight fields; otherwise exactly that flag is removed
/// from all four places, preserving any unrelated flags.
pub fn apply_output_bound(
    errors: &mut SheetErrors,
    processed: Decimal,
    rejected: Decimal,
    waste: Decimal,
    total_output: Decimal,
) {
    let exceeded = totals_exceed_output(
        Some(processed),
        Some(rejected),
        Some(waste),
        Some(total_output),
    );
    let fields = [
        &mut errors.header,
        &mut errors.processed_weight,
        &mut errors.rejected_weight,
        &mut errors.waste_weight,
    ];
    for field in fields {
        if exceeded {
            field.set(ValidationFlag::TotalsExceedOutput);
        } else {
            field.clear(ValidationFlag::TotalsExceedOutput);
        }
    }
}

/// Validate a row against the static catalogs
pub fn validate_detail(detail: &ClassificationDetail) -> Result<(), &'static str> {
    if !is_valid_size_grade(detail.process_type, &detail.size_grade) {
        return Err("Size grade is not in the catalog for this process type");
    }
    if let Some(presentation) = &detail.presentation {
        if !is_valid_presentation(presentation) {
            return Err("Unknown presentation type");
        }
    }
    if let Some(freezing) = &detail.freezing_type {
        if !is_valid_freezing_type(freezing) {
            return Err("Unknown freezing type");
        }
    }
    if let Some(machine) = &detail.machine {
        if !is_valid_machine(machine) {
            return Err("Unknown machine");
        }
    }
    if let Some(brand) = &detail.brand {
        if find_brand(brand).is_none() {
            return Err("Unknown brand");
        }
    }
    if detail.weight_per_box < Decimal::ZERO {
        return Err("Weight per box cannot be negative");
    }
    if detail.price_per_pound < Decimal::ZERO {
        return Err("Price per pound cannot be negative");
    }
    Ok(())
}

/// Validate header fields are non-negative
pub fn validate_header(header: &ClassificationHeader) -> Result<(), &'static str> {
    if header.total_output_quantity < Decimal::ZERO {
        return Err("Total output quantity cannot be negative");
    }
    if header.rejected_weight < Decimal::ZERO {
        return Err("Rejected weight cannot be negative");
    }
    if header.waste_weight < Decimal::ZERO {
        return Err("Waste weight cannot be negative");
    }
    if header.received_quantity < Decimal::ZERO {
        return Err("Received quantity cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sum_equal_to_bound_is_within_tolerance() {
        assert!(!totals_exceed_output(
            Some(dec("50")),
            Some(dec("10")),
            Some(dec("0")),
            Some(dec("60")),
        ));
    }

    #[test]
    fn test_sum_above_bound_plus_tolerance_is_flagged() {
        assert!(totals_exceed_output(
            Some(dec("50")),
            Some(dec("10")),
            Some(dec("0")),
            Some(dec("59.9")),
        ));
    }

    #[test]
    fn test_sum_within_tolerance_is_not_flagged() {
        // 60.01 vs 60 sits exactly on the tolerance edge
        assert!(!totals_exceed_output(
            Some(dec("50")),
            Some(dec("10.01")),
            Some(dec("0")),
            Some(dec("60")),
        ));
    }

    #[test]
    fn test_absent_values_coerce_to_zero() {
        assert!(!totals_exceed_output(None, None, None, None));
        assert!(totals_exceed_output(Some(dec("1")), None, None, None));
    }

    #[test]
    fn test_apply_sets_flag_on_header_and_all_three_fields() {
        let mut errors = SheetErrors::default();
        apply_output_bound(&mut errors, dec("50"), dec("10"), dec("0"), dec("59.9"));
        for field in [
            &errors.header,
            &errors.processed_weight,
            &errors.rejected_weight,
            &errors.waste_weight,
        ] {
            assert!(field.contains(ValidationFlag::TotalsExceedOutput));
        }
    }

    #[test]
    fn test_apply_clears_only_its_own_flag() {
        let mut errors = SheetErrors::default();
        errors.rejected_weight.set(ValidationFlag::Required);

        apply_output_bound(&mut errors, dec("50"), dec("10"), dec("0"), dec("59.9"));
        assert!(errors
            .rejected_weight
            .contains(ValidationFlag::TotalsExceedOutput));

        // A correcting edit brings the sum back under the bound
        apply_output_bound(&mut errors, dec("50"), dec("10"), dec("0"), dec("60"));
        assert!(!errors
            .rejected_weight
            .contains(ValidationFlag::TotalsExceedOutput));
        // The unrelated flag survives
        assert!(errors.rejected_weight.contains(ValidationFlag::Required));
        assert!(errors.header.is_empty());
        assert!(errors.processed_weight.is_empty());
    }

    #[test]
    fn test_validate_detail_rejects_wrong_catalog() {
        let mut detail = ClassificationDetail::new(ProcessType::HeadOn);
        detail.size_grade = "16/20".to_string(); // shell-on grade
        assert!(validate_detail(&detail).is_err());

        detail.size_grade = "40/50".to_string();
        assert!(validate_detail(&detail).is_ok());

        detail.brand = Some("unknown".to_string());
        assert!(validate_detail(&detail).is_err());
    }

    #[test]
    fn test_validate_header_rejects_negatives() {
        let mut header = ClassificationHeader::default();
        assert!(validate_header(&header).is_ok());
        header.rejected_weight = dec("-1");
        assert!(validate_header(&header).is_err());
    }
}
