//! Excel (.xlsx) workbook source adapter.
//!
//! Workbook parsing itself is delegated to the `calamine` crate; this
//! module wraps it to present worksheets and named ranges as uniform
//! region-row sequences. Spreadsheet cells have no merging concept, so
//! every cell is distinct.

mod reference;
mod workbook;

pub use workbook::{NamedRange, RegionRows, Workbook};
