//! Per-region extraction: header resolution, skip, stream.
//!
//! Three phases, strictly sequential, no backtracking. The header
//! decision happens once up front; rows are then pulled lazily from the
//! source, normalized, and collected.

use crate::docx::TableGrid;
use crate::extract::header::{TableHeader, resolve_table_header, skip_leading_blanks};
use crate::extract::normalize::normalize_row;
use crate::extract::{ExtractOptions, HeaderRule};
use crate::region::{CellValue, SourceRow};

/// Extract the finalized rows of a Word table.
///
/// Word tables are never terminated early: blank rows inside a table are
/// ordinary data.
pub fn extract_table(grid: &TableGrid, options: &ExtractOptions) -> Vec<Vec<CellValue>> {
    let skip = match resolve_table_header(grid, options) {
        TableHeader::EmptyRegion => return Vec::new(),
        TableHeader::Skip(count) => count,
    };

    grid.source_rows()
        .skip(skip)
        .map(|row| normalize_row(&row, options.keep_newlines))
        .collect()
}

/// Extract the finalized rows of a workbook region.
///
/// Leading fully-blank rows are consumed unconditionally while locating
/// the header context; the header skip itself applies only when headers
/// are not kept, with the auto-detect rule resolving to a single row on
/// this path. Collection stops at the first fully-blank row, which is
/// not included.
pub fn extract_region<I>(rows: I, options: &ExtractOptions) -> Vec<Vec<CellValue>>
where
    I: Iterator<Item = SourceRow>,
{
    let mut rows = rows.peekable();

    if !skip_leading_blanks(&mut rows) {
        return Vec::new();
    }

    if !options.keep_header {
        let skip = match options.header_rule {
            HeaderRule::Detect => 1,
            HeaderRule::Rows(count) => count,
        };
        for _ in 0..skip {
            if rows.next().is_none() {
                break;
            }
        }
    }

    let mut result = Vec::new();
    for row in rows {
        let values = normalize_row(&row, options.keep_newlines);
        if values.iter().all(CellValue::is_blank) {
            break;
        }
        result.push(values);
    }
    result
}
