//! Workbook wrapper exposing worksheets and named ranges as regions.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::error::Result;
use crate::region::{CellValue, SourceCell, SourceRow};
use crate::xlsx::reference::parse_destination;

/// An Excel workbook opened for extraction.
///
/// Wraps the `calamine` reader and presents each worksheet's used range
/// and each defined name's destination as a [`RegionRows`] sequence.
pub struct Workbook {
    inner: Xlsx<BufReader<File>>,
}

/// A workbook-level defined name and its destination reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRange {
    /// The defined name as stored in the workbook
    pub name: String,
    /// Destination formula, e.g. `Sheet1!$A$1:$B$5`
    pub reference: String,
}

impl Workbook {
    /// Open an .xlsx workbook from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner: Xlsx<_> = open_workbook(path)?;
        Ok(Self { inner })
    }

    /// Get the worksheet names, in workbook order.
    pub fn worksheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    /// Get the used range of a worksheet as region rows.
    pub fn worksheet_rows(&mut self, name: &str) -> Result<RegionRows> {
        let range = self.inner.worksheet_range(name)?;
        Ok(RegionRows::over(range))
    }

    /// Get the workbook-level defined names.
    pub fn named_ranges(&self) -> Vec<NamedRange> {
        self.inner
            .defined_names()
            .iter()
            .map(|(name, reference)| NamedRange {
                name: name.clone(),
                reference: reference.clone(),
            })
            .collect()
    }

    /// Resolve a defined name to the region rows of its destination.
    ///
    /// A name that does not resolve to one rectangular area on one known
    /// sheet — a bare cell reference, a multi-area destination, an unknown
    /// sheet — yields an empty region rather than an error, so one
    /// malformed name never aborts the surrounding run. Names containing
    /// `!` are skipped outright; that filter conflates "cell reference"
    /// with "any name containing the separator" but is kept as field
    /// behavior.
    pub fn named_range_rows(&mut self, named: &NamedRange) -> Result<RegionRows> {
        if named.name.contains('!') {
            return Ok(RegionRows::empty());
        }

        let Some(region) = parse_destination(&named.reference) else {
            return Ok(RegionRows::empty());
        };

        let Ok(sheet) = self.inner.worksheet_range(&region.sheet) else {
            return Ok(RegionRows::empty());
        };

        Ok(RegionRows::over(sheet.range(region.start, region.end)))
    }
}

/// Lazy row sequence over one rectangular workbook region.
///
/// Yields one [`SourceRow`] per grid row; cells are converted row by row,
/// so only the current row's values are materialized. Finite and not
/// restartable.
pub struct RegionRows {
    range: Range<Data>,
    next_row: usize,
}

impl RegionRows {
    fn over(range: Range<Data>) -> Self {
        Self { range, next_row: 0 }
    }

    fn empty() -> Self {
        Self::over(Range::empty())
    }
}

impl Iterator for RegionRows {
    type Item = SourceRow;

    fn next(&mut self) -> Option<SourceRow> {
        if self.next_row >= self.range.height() {
            return None;
        }

        let row = self.next_row;
        self.next_row += 1;

        let width = self.range.width();
        Some(
            (0..width)
                .map(|col| {
                    let value = self
                        .range
                        .get((row, col))
                        .map(convert)
                        .unwrap_or(CellValue::Empty);
                    SourceCell::plain(value)
                })
                .collect(),
        )
    }
}

/// Map a calamine cell onto the region value model.
///
/// Date/time cells pass through as their serial number; ISO-formatted
/// date and duration cells, and error cells, pass through as text.
fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}
