//! The uniform rows-of-cells view shared by both pipelines.
//!
//! A *region* is a rectangular grid of cells: the unifying abstraction over
//! a Word table and a worksheet or named range. Source adapters produce
//! regions as finite, lazy, non-restartable sequences of [`SourceRow`]s so
//! that memory use stays proportional to one row, not the whole sheet.

/// Types of data that can be stored in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
    /// Date/time value (stored as serial number)
    DateTime(f64),
}

impl CellValue {
    /// Whether this value counts as blank for blank-row decisions.
    ///
    /// Blank means falsy: empty, empty string, numeric zero, or `false`.
    /// Date/time values are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Bool(b) => !b,
            CellValue::Int(i) => *i == 0,
            CellValue::Float(f) => *f == 0.0,
            CellValue::String(s) => s.is_empty(),
            CellValue::DateTime(_) => false,
        }
    }

    /// Render the value as a CSV field.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::DateTime(serial) => serial.to_string(),
        }
    }
}

/// Opaque token shared by all grid positions that belong to one merged span.
///
/// Equality, not value, determines span membership: two adjacent cells
/// carrying the same token are one merged cell covering both positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeId(pub(crate) u32);

/// One grid position: a raw value plus its merge identity.
///
/// Spreadsheet cells have no merging concept and carry `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCell {
    /// Raw content of the cell.
    pub value: CellValue,
    /// Merge identity, shared across a merged span.
    pub merge: Option<MergeId>,
}

impl SourceCell {
    /// A cell with no merge identity.
    pub fn plain(value: CellValue) -> Self {
        Self { value, merge: None }
    }
}

/// One raw row of a region, in left-to-right column order.
pub type SourceRow = Vec<SourceCell>;

/// Whether every cell of a raw row is blank.
///
/// A zero-length row counts as blank.
pub fn row_is_blank(row: &[SourceCell]) -> bool {
    row.iter().all(|cell| cell.value.is_blank())
}
