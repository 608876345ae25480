//! Word (.docx) table source adapter.
//!
//! This module provides just enough of the WordprocessingML document model
//! for table extraction: opening the OPC container, scanning the document
//! body for `<w:tbl>` elements, and resolving each table's merged-cell
//! structure into a rectangular grid.

mod document;
mod package;
mod table;

pub use document::Document;
pub use package::Package;
pub use table::{GridCell, Table, TableGrid, VMergeState};
