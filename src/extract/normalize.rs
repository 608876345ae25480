//! Row normalization: merged-span collapse and newline folding.

use crate::region::{CellValue, SourceRow};

/// Flatten one raw row into its normalized values.
///
/// A cell whose merge identity equals the previous cell's identity in the
/// same row is the continuation of a merged span and is dropped; the span
/// contributes exactly one value, from its first position. Unless
/// `keep_newlines` is set, `\r\n` and `\n` sequences in text values are
/// each folded to a single space. Non-text scalars pass through
/// unchanged, and column order is preserved.
pub fn normalize_row(row: &SourceRow, keep_newlines: bool) -> Vec<CellValue> {
    let mut values = Vec::with_capacity(row.len());
    let mut last_merge = None;

    for cell in row {
        let continuation = cell.merge.is_some() && cell.merge == last_merge;
        if !continuation {
            let value = match &cell.value {
                CellValue::String(text) if !keep_newlines => {
                    CellValue::String(fold_newlines(text))
                },
                other => other.clone(),
            };
            values.push(value);
        }
        last_merge = cell.merge;
    }

    values
}

/// Replace both line-break forms with a single space.
fn fold_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}
