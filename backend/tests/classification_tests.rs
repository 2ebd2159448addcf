//! Classification tests for the Shrimp Traceability Platform
//!
//! Covers the classification sheet invariants, the output-bound validator
//! and the process-type classifier.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    classify_product_name, totals_exceed_output, ClassificationHeader, ClassificationSheet,
    ProcessType, ValidationFlag, WeightUnit,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn empty_sheet() -> ClassificationSheet {
    ClassificationSheet::new(ClassificationHeader::default(), ProcessType::ShellOn)
}

// ============================================================================
// Property 1: Row Weight
// ============================================================================
// For any non-negative box count B and weight-per-box W, the row weight
// SHALL equal B × W exactly, with no rounding before aggregation.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn property_1_row_weight_is_exact_product(
        boxes in 0u32..10_000,
        weight_cents in 0u32..1_000_000,
    ) {
        let weight = Decimal::new(i64::from(weight_cents), 2);
        let mut sheet = empty_sheet();
        sheet.update_row(0, |row| {
            row.box_count = boxes;
            row.weight_per_box = weight;
        });
        prop_assert_eq!(sheet.rows()[0].total_weight(), Decimal::from(boxes) * weight);
    }

    /// Row stores never shrink below one row
    #[test]
    fn property_2_store_keeps_at_least_one_row(extra_rows in 0usize..5) {
        let mut sheet = empty_sheet();
        for _ in 0..extra_rows {
            sheet.add_row();
        }
        // Remove more rows than exist
        for index in (0..extra_rows + 3).rev() {
            sheet.remove_row(index);
        }
        prop_assert_eq!(sheet.rows().len(), 1);
    }

    /// Switching to the type all rows already have never discards data
    #[test]
    fn property_3_set_process_type_is_idempotent(boxes in 1u32..1_000) {
        let mut sheet = empty_sheet();
        sheet.update_row(0, |row| row.box_count = boxes);
        sheet.add_row();

        sheet.set_process_type(ProcessType::ShellOn);
        prop_assert_eq!(sheet.rows().len(), 2);
        prop_assert_eq!(sheet.rows()[0].box_count, boxes);
    }

    /// The output-bound check is symmetric in the three weight buckets
    #[test]
    fn property_4_output_bound_is_symmetric(
        a in 0u32..1_000,
        b in 0u32..1_000,
        c in 0u32..1_000,
        bound in 0u32..3_000,
    ) {
        let (a, b, c) = (Decimal::from(a), Decimal::from(b), Decimal::from(c));
        let bound = Decimal::from(bound);
        let direct = totals_exceed_output(Some(a), Some(b), Some(c), Some(bound));
        let swapped = totals_exceed_output(Some(c), Some(a), Some(b), Some(bound));
        prop_assert_eq!(direct, swapped);
    }
}

// ============================================================================
// Output-Bound Validator Scenarios
// ============================================================================

#[test]
fn test_sum_equal_to_bound_passes() {
    let sheet = sheet_with_weights("50", "10", "0", "60");
    assert!(!sheet.totals_exceed_output());
    assert!(sheet.errors().is_empty());
}

#[test]
fn test_sum_above_bound_flags_header_and_fields() {
    let sheet = sheet_with_weights("50", "10", "0", "59.9");
    assert!(sheet.totals_exceed_output());
    assert!(sheet
        .errors()
        .header
        .contains(ValidationFlag::TotalsExceedOutput));
    assert!(sheet
        .errors()
        .processed_weight
        .contains(ValidationFlag::TotalsExceedOutput));
    assert!(sheet
        .errors()
        .rejected_weight
        .contains(ValidationFlag::TotalsExceedOutput));
    assert!(sheet
        .errors()
        .waste_weight
        .contains(ValidationFlag::TotalsExceedOutput));
}

#[test]
fn test_correcting_edit_clears_flag_but_keeps_unrelated_flags() {
    let mut sheet = sheet_with_weights("50", "10", "0", "59.9");
    sheet.errors_mut().waste_weight.set(ValidationFlag::Required);

    sheet.update_header(|h| h.total_output_quantity = dec("60"));

    assert!(!sheet.totals_exceed_output());
    assert!(!sheet
        .errors()
        .waste_weight
        .contains(ValidationFlag::TotalsExceedOutput));
    assert!(sheet.errors().waste_weight.contains(ValidationFlag::Required));
    assert!(sheet.errors().header.is_empty());
}

/// Sheet whose single row produces the given processed weight
fn sheet_with_weights(
    processed: &str,
    rejected: &str,
    waste: &str,
    total_output: &str,
) -> ClassificationSheet {
    let mut sheet = ClassificationSheet::new(
        ClassificationHeader {
            total_output_quantity: dec(total_output),
            rejected_weight: dec(rejected),
            waste_weight: dec(waste),
            ..Default::default()
        },
        ProcessType::ShellOn,
    );
    sheet.update_row(0, |row| {
        row.box_count = 1;
        row.weight_per_box = dec(processed);
        row.weight_unit = WeightUnit::Lb;
    });
    sheet
}

// ============================================================================
// Process-Type Classifier Scenarios
// ============================================================================

#[test]
fn test_classifier_whole_shrimp_is_head_on() {
    assert_eq!(
        classify_product_name(Some("Camarón entero")),
        ProcessType::HeadOn
    );
}

#[test]
fn test_classifier_headless_wins_over_bare_cabeza() {
    assert_eq!(
        classify_product_name(Some("Cola sin cabeza")),
        ProcessType::ShellOn
    );
}

#[test]
fn test_classifier_defaults_to_shell_on() {
    assert_eq!(classify_product_name(None), ProcessType::ShellOn);
    assert_eq!(
        classify_product_name(Some("Producto misceláneo")),
        ProcessType::ShellOn
    );
}

#[test]
fn test_classifier_change_replaces_mismatched_rows() {
    let mut sheet = empty_sheet();
    sheet.update_row(0, |row| row.box_count = 9);

    sheet.apply_product_name(Some("Camarón entero"));
    assert_eq!(sheet.process_type(), ProcessType::HeadOn);
    assert_eq!(sheet.rows().len(), 1);
    assert_eq!(sheet.rows()[0].box_count, 0);
}

// ============================================================================
// Mixed-Unit Aggregation Scenario
// ============================================================================

#[test]
fn test_two_row_amount_example() {
    let mut sheet = empty_sheet();
    sheet.update_row(0, |row| {
        row.box_count = 2;
        row.weight_per_box = dec("5");
        row.weight_unit = WeightUnit::Lb;
        row.price_per_pound = dec("3");
    });
    sheet.add_row();
    sheet.update_row(1, |row| {
        row.box_count = 1;
        row.weight_per_box = dec("2.2");
        row.weight_unit = WeightUnit::Kg;
        row.price_per_pound = dec("2");
    });

    // 2x5x3 + 1x(2.2x2.20462)x2 = 30 + 9.700328 -> 39.70
    assert_eq!(sheet.totals().overall.amount, dec("39.70"));
    // Derived processed weight: 10 + 4.850164 -> 14.85
    assert_eq!(sheet.processed_weight(), dec("14.85"));
}
