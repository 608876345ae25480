//! The end-to-end run: scan inputs, extract every table and region,
//! write one CSV per result.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::csv_out::write_csv;
use crate::docx;
use crate::error::{Error, Result};
use crate::extract::{ExtractOptions, extract_region, extract_table};
use crate::xlsx;

/// Subdirectory created beside the input when no output directory is
/// given.
const DEFAULT_OUT_DIR: &str = "out";

/// Configuration of one extraction run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input file or directory. Directories are scanned recursively for
    /// the two supported extensions.
    pub input: PathBuf,
    /// Output root; defaults to an `out` subdirectory beside the input.
    pub output_dir: Option<PathBuf>,
    /// Name Word-table output files after their captions when available.
    pub use_captions: bool,
    /// Also extract workbook defined names.
    pub named_ranges: bool,
    /// Extraction policy shared by every table and region.
    pub extract: ExtractOptions,
}

/// What a completed run processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Source files processed
    pub files: usize,
    /// CSV files written
    pub outputs: usize,
}

/// Execute a full extraction run.
///
/// A missing input path aborts before any processing. Each source file
/// gets its own subdirectory under the output root, mirroring its
/// relative path, with one CSV per extracted table, worksheet or named
/// range.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    if !config.input.exists() {
        return Err(Error::InputNotFound(config.input.clone()));
    }

    let out_root = output_root(config);
    let mut summary = RunSummary::default();

    for (path, relative) in collect_inputs(&config.input) {
        let out_dir = out_root.join(&relative);
        match classify(&path) {
            Some(InputKind::Document) => {
                summary.files += 1;
                summary.outputs += process_document(&path, &out_dir, config)?;
            },
            Some(InputKind::Workbook) => {
                summary.files += 1;
                summary.outputs += process_workbook(&path, &out_dir, config)?;
            },
            None => warn!("skipping unsupported input {}", path.display()),
        }
    }

    Ok(summary)
}

enum InputKind {
    Document,
    Workbook,
}

fn classify(path: &Path) -> Option<InputKind> {
    match path.extension()?.to_str()? {
        ext if ext.eq_ignore_ascii_case("docx") => Some(InputKind::Document),
        ext if ext.eq_ignore_ascii_case("xlsx") => Some(InputKind::Workbook),
        _ => None,
    }
}

fn output_root(config: &RunConfig) -> PathBuf {
    if let Some(dir) = &config.output_dir {
        return dir.clone();
    }
    if config.input.is_dir() {
        config.input.join(DEFAULT_OUT_DIR)
    } else {
        config
            .input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_OUT_DIR)
    }
}

/// Enumerate input files with the relative path that names their output
/// subdirectory. A single-file input contributes its file name.
fn collect_inputs(input: &Path) -> Vec<(PathBuf, PathBuf)> {
    if input.is_file() {
        let name = input
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("input"));
        return vec![(input.to_path_buf(), name)];
    }

    WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| classify(entry.path()).is_some())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(input)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            (entry.path().to_path_buf(), relative)
        })
        .collect()
}

/// Extract every table of one Word document.
fn process_document(path: &Path, out_dir: &Path, config: &RunConfig) -> Result<usize> {
    info!("processing {}", path.display());

    let package = docx::Package::open(path)?;
    let document = package.document();
    let tables = document.tables()?;

    fs::create_dir_all(out_dir)?;

    let mut written = 0usize;
    for (index, table) in tables.iter().enumerate() {
        let caption = if config.use_captions {
            table.caption()?
        } else {
            None
        };
        let out_file = match caption {
            Some(name) => {
                let file = out_dir.join(format!("{name}.csv"));
                info!("found table {name}, saving as {}", file.display());
                file
            },
            None => {
                let file = out_dir.join(format!("{index}.csv"));
                info!("found table #{index}, saving as {}", file.display());
                file
            },
        };

        let grid = table.grid()?;
        let rows = extract_table(&grid, &config.extract);
        write_csv(&out_file, &rows)?;
        written += 1;
    }

    Ok(written)
}

/// Extract every named range (when enabled) and worksheet of one
/// workbook.
fn process_workbook(path: &Path, out_dir: &Path, config: &RunConfig) -> Result<usize> {
    info!("processing {}", path.display());

    let mut workbook = xlsx::Workbook::open(path)?;

    fs::create_dir_all(out_dir)?;

    let mut written = 0usize;

    if config.named_ranges {
        for named in workbook.named_ranges() {
            let out_file = out_dir.join(format!("{}.csv", named.name));
            info!("found named range {}, saving as {}", named.name, out_file.display());
            let rows = extract_region(workbook.named_range_rows(&named)?, &config.extract);
            if rows.is_empty() {
                warn!("named range {} resolved to an empty region", named.name);
            }
            write_csv(&out_file, &rows)?;
            written += 1;
        }
    }

    for name in workbook.worksheet_names() {
        let out_file = out_dir.join(format!("{name}.csv"));
        info!("found worksheet {name}, saving as {}", out_file.display());
        let rows = extract_region(workbook.worksheet_rows(&name)?, &config.extract);
        write_csv(&out_file, &rows)?;
        written += 1;
    }

    Ok(written)
}
