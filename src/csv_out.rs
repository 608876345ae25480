//! CSV serialization of extracted rows.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::region::CellValue;

/// Write extracted rows to a CSV file.
///
/// Parent directories are created as needed (an existing directory is
/// fine) and an existing file at the path is overwritten. Quoting follows
/// RFC 4180: fields containing the delimiter, the quote character or line
/// breaks are quoted, inner quotes are doubled.
pub fn write_csv(path: &Path, rows: &[Vec<CellValue>]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    // merged-span collapse makes rows ragged, which strict mode rejects
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    for row in rows {
        writer.write_record(row.iter().map(CellValue::to_field))?;
    }
    writer.flush()?;
    Ok(())
}
