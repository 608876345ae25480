//! Tabella - extract tables from Office documents into CSV files
//!
//! This library turns the tables of Word documents (.docx) and the
//! worksheets and named ranges of Excel workbooks (.xlsx) into standalone
//! CSV files, one per table or region.
//!
//! # Features
//!
//! - **Word tables**: merged cells collapse to a single value, captions
//!   name the output files
//! - **Workbook regions**: every worksheet plus, on request, every
//!   rectangular defined name
//! - **Header handling**: skip a detected or explicit number of header
//!   rows, or keep everything
//! - **Lazy row streaming**: regions are consumed row by row, so memory
//!   stays proportional to one row
//!
//! # Example - extracting one document's tables
//!
//! ```no_run
//! use tabella::docx::Package;
//! use tabella::{ExtractOptions, extract_table, write_csv};
//!
//! # fn main() -> tabella::Result<()> {
//! let pkg = Package::open("report.docx")?;
//! let doc = pkg.document();
//!
//! for (index, table) in doc.tables()?.iter().enumerate() {
//!     let grid = table.grid()?;
//!     let rows = extract_table(&grid, &ExtractOptions::default());
//!     write_csv(std::path::Path::new(&format!("{index}.csv")), &rows)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - a whole run
//!
//! ```no_run
//! use tabella::{ExtractOptions, RunConfig, run};
//!
//! # fn main() -> tabella::Result<()> {
//! let summary = run(&RunConfig {
//!     input: "reports/".into(),
//!     output_dir: None,
//!     use_captions: true,
//!     named_ranges: false,
//!     extract: ExtractOptions::default(),
//! })?;
//! println!("{} CSV files written", summary.outputs);
//! # Ok(())
//! # }
//! ```

mod csv_out;
mod error;
mod extract;
mod region;
mod run;

/// Word (.docx) table source adapter
pub mod docx;

/// Excel (.xlsx) workbook source adapter
pub mod xlsx;

// Re-export commonly used types for convenience
pub use csv_out::write_csv;
pub use error::{Error, Result};
pub use extract::{
    BLANK_SCAN_LIMIT, ExtractOptions, HeaderRule, TBL_HEADER_MAX_SIZE, extract_region,
    extract_table, normalize_row,
};
pub use region::{CellValue, MergeId, SourceCell, SourceRow, row_is_blank};
pub use run::{RunConfig, RunSummary, run};
