//! Aggregation of classification rows into per-type and grand totals
//!
//! Box counts, pound-equivalent weights and monetary amounts are summed
//! exactly; rounding to 2 decimals happens only here, at the aggregation
//! boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ClassificationDetail, ProcessType};
use crate::types::round2;

/// Totals over a scope of rows (all rows, or one process type)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub boxes: u64,
    /// Pound-equivalent weight, rounded to 2 decimals
    pub pounds: Decimal,
    /// Monetary amount, rounded to 2 decimals
    pub amount: Decimal,
}

impl Totals {
    /// Totals over all given rows
    pub fn of(rows: &[ClassificationDetail]) -> Self {
        Self::sum(rows.iter())
    }

    /// Totals over the rows of one process type
    pub fn of_type(rows: &[ClassificationDetail], process_type: ProcessType) -> Self {
        Self::sum(rows.iter().filter(|r| r.process_type == process_type))
    }

    fn sum<'a>(rows: impl Iterator<Item = &'a ClassificationDetail>) -> Self {
        let mut boxes: u64 = 0;
        let mut pounds = Decimal::ZERO;
        let mut amount = Decimal::ZERO;
        for row in rows {
            boxes += u64::from(row.box_count);
            pounds += row.total_pounds();
            amount += row.line_amount();
        }
        Self {
            boxes,
            pounds: round2(pounds),
            amount: round2(amount),
        }
    }
}

/// Exact (unrounded) pound-equivalent sum over all rows.
///
/// The sheet rounds this once when it writes the derived processed weight,
/// so per-type and grand totals never disagree by accumulated rounding.
pub fn grand_total_pounds(rows: &[ClassificationDetail]) -> Decimal {
    rows.iter().map(|r| r.total_pounds()).sum()
}

/// Per-type and overall totals of a classification sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SheetTotals {
    pub head_on: Totals,
    pub shell_on: Totals,
    pub overall: Totals,
}

impl SheetTotals {
    pub fn of(rows: &[ClassificationDetail]) -> Self {
        Self {
            head_on: Totals::of_type(rows, ProcessType::HeadOn),
            shell_on: Totals::of_type(rows, ProcessType::ShellOn),
            overall: Totals::of(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeightUnit;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(
        process_type: ProcessType,
        boxes: u32,
        weight: &str,
        unit: WeightUnit,
        price: &str,
    ) -> ClassificationDetail {
        let mut r = ClassificationDetail::new(process_type);
        r.box_count = boxes;
        r.weight_per_box = dec(weight);
        r.weight_unit = unit;
        r.price_per_pound = dec(price);
        r
    }

    #[test]
    fn test_total_boxes_sums_counts() {
        let rows = vec![
            row(ProcessType::ShellOn, 2, "5", WeightUnit::Lb, "0"),
            row(ProcessType::ShellOn, 3, "5", WeightUnit::Lb, "0"),
        ];
        assert_eq!(Totals::of(&rows).boxes, 5);
    }

    #[test]
    fn test_mixed_unit_amount_example() {
        // (2 boxes x 5 lb @ 3) + (1 box x 2.2 kg -> 4.850164 lb @ 2)
        let rows = vec![
            row(ProcessType::ShellOn, 2, "5", WeightUnit::Lb, "3"),
            row(ProcessType::ShellOn, 1, "2.2", WeightUnit::Kg, "2"),
        ];
        let totals = Totals::of(&rows);
        // 30 + 9.700328 = 39.700328 -> 39.70
        assert_eq!(totals.amount, dec("39.70"));
        // 10 + 4.850164 = 14.850164 -> 14.85
        assert_eq!(totals.pounds, dec("14.85"));
    }

    #[test]
    fn test_per_type_scope() {
        let rows = vec![
            row(ProcessType::HeadOn, 1, "10", WeightUnit::Lb, "1"),
            row(ProcessType::ShellOn, 2, "5", WeightUnit::Lb, "2"),
        ];
        let totals = SheetTotals::of(&rows);
        assert_eq!(totals.head_on.pounds, dec("10.00"));
        assert_eq!(totals.shell_on.pounds, dec("10.00"));
        assert_eq!(totals.overall.pounds, dec("20.00"));
        assert_eq!(totals.overall.amount, dec("30.00"));
    }

    #[test]
    fn test_empty_scope_is_zero() {
        let rows: Vec<ClassificationDetail> = vec![];
        let totals = Totals::of(&rows);
        assert_eq!(totals.boxes, 0);
        assert_eq!(totals.pounds, Decimal::ZERO);
        assert_eq!(totals.amount, Decimal::ZERO);
        assert_eq!(grand_total_pounds(&rows), Decimal::ZERO);
    }

    #[test]
    fn test_zero_weight_rows_sum_as_zero() {
        let rows = vec![row(ProcessType::ShellOn, 4, "0", WeightUnit::Lb, "3")];
        let totals = Totals::of(&rows);
        assert_eq!(totals.boxes, 4);
        assert_eq!(totals.pounds, Decimal::ZERO);
        assert_eq!(totals.amount, Decimal::ZERO);
    }
}
