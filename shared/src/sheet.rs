//! Classification sheet: the row store and its derived state
//!
//! [`ClassificationSheet`] owns the header, the ordered row collection, the
//! derived processed weight and the validation flags. Every mutating method
//! ends in a synchronous [`recompute`](ClassificationSheet::recompute), so
//! callers never subscribe to anything: mutate, then read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{grand_total_pounds, SheetTotals};
use crate::classifier::classify_product_name;
use crate::models::{find_brand, ClassificationDetail, ClassificationHeader, ProcessType};
use crate::types::round2;
use crate::validation::{apply_output_bound, totals_exceed_output, SheetErrors};

/// A processing-order classification: header, rows and derived state.
///
/// The derived processed weight is not a header field: it is owned here and
/// overwritten on every recompute, so user-editable and derived values cannot
/// be mixed up. The row store always keeps at least one row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationSheet {
    header: ClassificationHeader,
    process_type: ProcessType,
    rows: Vec<ClassificationDetail>,
    /// Derived: `round2` of the pound-equivalent sum over all rows
    processed_weight: Decimal,
    errors: SheetErrors,
}

impl ClassificationSheet {
    /// New sheet with exactly one default row of the given process type
    pub fn new(header: ClassificationHeader, process_type: ProcessType) -> Self {
        let mut sheet = Self {
            header,
            process_type,
            rows: vec![ClassificationDetail::new(process_type)],
            processed_weight: Decimal::ZERO,
            errors: SheetErrors::default(),
        };
        sheet.recompute();
        sheet
    }

    /// Rebuild a sheet from stored parts. An empty row list gets the default
    /// single row, preserving the store invariant.
    pub fn from_rows(
        header: ClassificationHeader,
        process_type: ProcessType,
        rows: Vec<ClassificationDetail>,
    ) -> Self {
        let mut sheet = Self {
            header,
            process_type,
            rows,
            processed_weight: Decimal::ZERO,
            errors: SheetErrors::default(),
        };
        if sheet.rows.is_empty() {
            sheet.rows.push(ClassificationDetail::new(process_type));
        }
        sheet.recompute();
        sheet
    }

    pub fn header(&self) -> &ClassificationHeader {
        &self.header
    }

    pub fn process_type(&self) -> ProcessType {
        self.process_type
    }

    pub fn rows(&self) -> &[ClassificationDetail] {
        &self.rows
    }

    /// Derived processed weight in pounds, rounded to 2 decimals
    pub fn processed_weight(&self) -> Decimal {
        self.processed_weight
    }

    pub fn errors(&self) -> &SheetErrors {
        &self.errors
    }

    /// The owning form may merge its own flags (required fields etc.) into
    /// the error state; recompute preserves them.
    pub fn errors_mut(&mut self) -> &mut SheetErrors {
        &mut self.errors
    }

    /// Append a default row of the current process type
    pub fn add_row(&mut self) {
        self.rows.push(ClassificationDetail::new(self.process_type));
        self.recompute();
    }

    /// Remove the row at `index`. Refuses to remove the last remaining row
    /// or an out-of-range index; returns whether a row was removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        self.recompute();
        true
    }

    /// Edit the row at `index` in place, then recompute. Returns false for
    /// an out-of-range index.
    pub fn update_row(&mut self, index: usize, edit: impl FnOnce(&mut ClassificationDetail)) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        edit(row);
        self.recompute();
        true
    }

    /// Edit the header in place, then recompute
    pub fn update_header(&mut self, edit: impl FnOnce(&mut ClassificationHeader)) {
        edit(&mut self.header);
        self.recompute();
    }

    /// Copy a brand's canonical box weight and unit into the row at `index`
    pub fn apply_brand(&mut self, index: usize, brand_code: &str) -> Result<(), &'static str> {
        let brand = find_brand(brand_code).ok_or("Unknown brand")?;
        let row = self.rows.get_mut(index).ok_or("Row index out of range")?;
        row.brand = Some(brand.code.to_string());
        row.weight_per_box = brand.weight_per_box;
        row.weight_unit = brand.weight_unit;
        self.recompute();
        Ok(())
    }

    /// Switch the sheet to a new process type.
    ///
    /// When every existing row already has the new type this only updates
    /// the current type (idempotent, no data loss). Otherwise all rows are
    /// discarded and replaced by one default row of the new type. Callers
    /// presenting this to a user should warn about the data loss first.
    pub fn set_process_type(&mut self, new_type: ProcessType) {
        self.process_type = new_type;
        let all_match = !self.rows.is_empty()
            && self.rows.iter().all(|r| r.process_type == new_type);
        if !all_match {
            self.rows.clear();
            self.rows.push(ClassificationDetail::new(new_type));
        }
        self.recompute();
    }

    /// Feed the upstream semi-product name through the classifier and apply
    /// the inferred process type (see [`set_process_type`] for the data-loss
    /// caveat).
    ///
    /// [`set_process_type`]: ClassificationSheet::set_process_type
    pub fn apply_product_name(&mut self, name: Option<&str>) {
        self.set_process_type(classify_product_name(name));
    }

    /// Per-type and overall totals over the current rows
    pub fn totals(&self) -> SheetTotals {
        SheetTotals::of(&self.rows)
    }

    /// Read-only output-bound query for rendering; mutates nothing
    pub fn totals_exceed_output(&self) -> bool {
        totals_exceed_output(
            Some(self.processed_weight),
            Some(self.header.rejected_weight),
            Some(self.header.waste_weight),
            Some(self.header.total_output_quantity),
        )
    }

    /// Recompute derived state from the rows, then re-run the output-bound
    /// check against the header
    fn recompute(&mut self) {
        self.processed_weight = round2(grand_total_pounds(&self.rows));
        apply_output_bound(
            &mut self.errors,
            self.processed_weight,
            self.header.rejected_weight,
            self.header.waste_weight,
            self.header.total_output_quantity,
        );
    }
}
