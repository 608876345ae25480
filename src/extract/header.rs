//! Header-size resolution.
//!
//! The header decision is made once per region, before any data row is
//! produced, and is never re-evaluated per row.

use std::iter::Peekable;

use crate::docx::TableGrid;
use crate::extract::ExtractOptions;
use crate::region::{SourceRow, row_is_blank};

/// Header rows assumed when auto-detection finds a merged leading column.
pub const TBL_HEADER_MAX_SIZE: usize = 2;

/// Upper bound on the leading blank rows consumed while looking for the
/// first non-blank row of a workbook region. Scanning past it degrades
/// the whole region to an empty result.
pub const BLANK_SCAN_LIMIT: usize = 200;

/// How many leading rows count as header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    /// Detect the header size from the region's structure.
    Detect,
    /// Use exactly this many rows.
    Rows(usize),
}

impl HeaderRule {
    /// Interpret the conventional CLI sentinel: `-1` means detect, any
    /// non-negative count is explicit.
    pub fn from_sentinel(size: i64) -> Self {
        if size < 0 {
            HeaderRule::Detect
        } else {
            HeaderRule::Rows(size as usize)
        }
    }
}

/// Outcome of the header decision for a Word table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableHeader {
    /// Skip this many leading rows before data begins.
    Skip(usize),
    /// The region degrades to an empty result.
    EmptyRegion,
}

/// Resolve the header size of a Word table.
///
/// With `keep_header` nothing is skipped. An explicit rule skips exactly
/// the requested count. Auto-detection needs at least two rows to inspect
/// — a shorter table yields an empty result — and assumes a taller header
/// when the first cells of the first two rows belong to one vertically
/// merged span.
pub(crate) fn resolve_table_header(grid: &TableGrid, options: &ExtractOptions) -> TableHeader {
    if options.keep_header {
        return TableHeader::Skip(0);
    }

    match options.header_rule {
        HeaderRule::Rows(count) => TableHeader::Skip(count),
        HeaderRule::Detect => {
            if grid.row_count() < 2 {
                return TableHeader::EmptyRegion;
            }

            let first = grid.rows()[0].first();
            let second = grid.rows()[1].first();
            match (first, second) {
                (Some(a), Some(b)) if a.merge == b.merge => {
                    TableHeader::Skip(TBL_HEADER_MAX_SIZE)
                },
                _ => TableHeader::Skip(1),
            }
        },
    }
}

/// Consume the leading fully-blank rows of a workbook region.
///
/// Runs regardless of the keep-header flag; only the header skip itself
/// is conditional. Returns `false` when the scan limit is exhausted
/// without finding a non-blank row, in which case the caller must treat
/// the region as empty.
pub(crate) fn skip_leading_blanks<I>(rows: &mut Peekable<I>) -> bool
where
    I: Iterator<Item = SourceRow>,
{
    let mut scanned = 0usize;
    loop {
        match rows.peek() {
            None => return true,
            Some(row) if row_is_blank(row) => {
                if scanned >= BLANK_SCAN_LIMIT {
                    return false;
                }
                rows.next();
                scanned += 1;
            },
            Some(_) => return true,
        }
    }
}
