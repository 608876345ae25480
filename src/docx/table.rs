/// Table parsing and merged-cell grid resolution for Word documents.
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::region::{CellValue, MergeId, SourceCell, SourceRow};

/// Vertical merge state for table cells.
///
/// In WordprocessingML, vertical merging uses the `<w:vMerge>` element:
/// - `restart`: starts a new vertical merge (first cell in the merge)
/// - `continue`: continues the merge from the cell above (no `val`
///   attribute or `val="continue"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMergeState {
    /// Starts a vertical merge (`<w:vMerge w:val="restart"/>`)
    Restart,
    /// Continues a vertical merge from above (`<w:vMerge/>`)
    Continue,
}

/// A table in a Word document.
///
/// Represents a `<w:tbl>` element, holding the raw XML window for the
/// table. The window is parsed on demand: once for the caption, once for
/// the resolved grid.
#[derive(Debug, Clone)]
pub struct Table {
    /// The raw XML bytes for this table
    xml_bytes: Vec<u8>,
}

/// One resolved grid position.
///
/// Merged spans are expanded the way a word processor presents them: every
/// covered position repeats the span's text and carries the same
/// [`MergeId`], so adjacent positions of one span compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Text content of the originating cell
    pub text: String,
    /// Identity of the originating `<w:tc>` element
    pub merge: MergeId,
}

/// Row storage for resolved grids.
pub type GridRow = SmallVec<[GridCell; 8]>;

/// A table resolved into a rectangular grid of [`GridCell`]s.
#[derive(Debug, Clone, Default)]
pub struct TableGrid {
    rows: Vec<GridRow>,
}

/// Raw `<w:tc>` content before grid resolution.
#[derive(Debug, Default)]
struct RawCell {
    text: String,
    grid_span: usize,
    vmerge: Option<VMergeState>,
}

impl Table {
    /// Create a new Table from an XML window.
    pub(crate) fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Get the caption of this table, if one is set.
    ///
    /// Reads `<w:tblPr>/<w:tblCaption w:val="…"/>`. An absent or empty
    /// caption resolves to `None`; nested tables' properties are ignored.
    pub fn caption(&self) -> Result<Option<String>> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        let mut in_tbl_pr = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    if depth == 2 && e.local_name().as_ref() == b"tblPr" {
                        in_tbl_pr = true;
                    }
                },
                Ok(Event::Empty(e)) => {
                    let name = e.local_name();
                    if in_tbl_pr && name.as_ref() == b"tblCaption" {
                        let caption = attr_val(&e)?.unwrap_or_default();
                        return Ok((!caption.is_empty()).then_some(caption));
                    }
                },
                Ok(Event::End(e)) => {
                    if depth == 2 && e.local_name().as_ref() == b"tblPr" {
                        in_tbl_pr = false;
                    }
                    depth = depth.saturating_sub(1);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(None)
    }

    /// Resolve this table into a rectangular grid.
    ///
    /// `<w:gridSpan>` repeats a cell across its covered columns and
    /// `<w:vMerge/>` continuation cells inherit text and identity from the
    /// cell directly above, so every position of one merged span shares a
    /// single [`MergeId`].
    pub fn grid(&self) -> Result<TableGrid> {
        let raw_rows = self.parse_raw_rows()?;

        let mut rows: Vec<GridRow> = Vec::with_capacity(raw_rows.len());
        let mut next_id = 0u32;

        for raw_row in raw_rows {
            let mut row: GridRow = SmallVec::new();
            for cell in raw_row {
                let span = cell.grid_span.max(1);
                if matches!(cell.vmerge, Some(VMergeState::Continue)) {
                    // Continuation: take over whatever spans the previous
                    // row resolved at the covered columns. A continuation
                    // with no row above degrades to a fresh cell.
                    let mut fallback = None;
                    for _ in 0..span {
                        let col = row.len();
                        let above = rows.last().and_then(|prev| prev.get(col)).cloned();
                        match above {
                            Some(inherited) => row.push(inherited),
                            None => {
                                let id = match fallback {
                                    Some(id) => id,
                                    None => {
                                        let id = MergeId(next_id);
                                        next_id += 1;
                                        fallback = Some(id);
                                        id
                                    },
                                };
                                row.push(GridCell {
                                    text: cell.text.clone(),
                                    merge: id,
                                });
                            },
                        }
                    }
                } else {
                    let id = MergeId(next_id);
                    next_id += 1;
                    for _ in 0..span {
                        row.push(GridCell {
                            text: cell.text.clone(),
                            merge: id,
                        });
                    }
                }
            }
            rows.push(row);
        }

        Ok(TableGrid { rows })
    }

    /// Parse the raw row/cell structure of the table window.
    ///
    /// Only `<w:tr>`/`<w:tc>` elements that are direct structure of this
    /// table count; rows of nested tables are part of their enclosing
    /// cell's text.
    fn parse_raw_rows(&self) -> Result<Vec<Vec<RawCell>>> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        let mut rows: Vec<Vec<RawCell>> = Vec::new();
        let mut current_row: Vec<RawCell> = Vec::new();
        let mut current_cell = RawCell::default();

        let mut depth = 0usize;
        let mut in_row = false;
        let mut in_cell = false;
        let mut in_tc_pr = false;
        let mut in_text = false;
        let mut paragraphs = 0usize;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    let name = e.local_name();
                    match name.as_ref() {
                        b"tr" if depth == 2 => {
                            in_row = true;
                            current_row = Vec::new();
                        },
                        b"tc" if depth == 3 && in_row => {
                            in_cell = true;
                            current_cell = RawCell::default();
                            paragraphs = 0;
                        },
                        b"tcPr" if depth == 4 && in_cell => in_tc_pr = true,
                        b"p" if depth == 4 && in_cell => {
                            if paragraphs > 0 {
                                current_cell.text.push('\n');
                            }
                            paragraphs += 1;
                        },
                        b"t" if in_cell => in_text = true,
                        _ => {},
                    }
                },
                Ok(Event::Empty(e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"gridSpan" if in_tc_pr => {
                            current_cell.grid_span = attr_val(&e)?
                                .and_then(|v| v.parse::<usize>().ok())
                                .unwrap_or(1);
                        },
                        b"vMerge" if in_tc_pr => {
                            current_cell.vmerge = Some(match attr_val(&e)?.as_deref() {
                                Some("restart") => VMergeState::Restart,
                                _ => VMergeState::Continue,
                            });
                        },
                        b"br" | b"cr" if in_cell && !in_tc_pr => {
                            current_cell.text.push('\n');
                        },
                        // an empty paragraph still separates its neighbors
                        b"p" if in_cell && depth == 3 => {
                            if paragraphs > 0 {
                                current_cell.text.push('\n');
                            }
                            paragraphs += 1;
                        },
                        _ => {},
                    }
                },
                Ok(Event::Text(e)) if in_text => {
                    let text = std::str::from_utf8(e.as_ref()).unwrap_or("");
                    current_cell.text.push_str(text);
                },
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"t" if in_text => in_text = false,
                        b"tcPr" if depth == 4 => in_tc_pr = false,
                        b"tc" if depth == 3 && in_cell => {
                            in_cell = false;
                            current_row.push(std::mem::take(&mut current_cell));
                        },
                        b"tr" if depth == 2 && in_row => {
                            in_row = false;
                            rows.push(std::mem::take(&mut current_row));
                        },
                        _ => {},
                    }
                    depth = depth.saturating_sub(1);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(rows)
    }
}

impl TableGrid {
    /// Get the number of rows in the grid.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the resolved rows.
    #[inline]
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// View the grid as region rows for the extraction pipeline.
    pub fn source_rows(&self) -> impl Iterator<Item = SourceRow> + '_ {
        self.rows.iter().map(|row| {
            row.iter()
                .map(|cell| SourceCell {
                    value: CellValue::String(cell.text.clone()),
                    merge: Some(cell.merge),
                })
                .collect()
        })
    }
}

/// Extract the `w:val` attribute of an element, if present.
fn attr_val(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"val" {
            let val = std::str::from_utf8(&attr.value)
                .map_err(|e| Error::Xml(e.to_string()))?
                .to_string();
            return Ok(Some(val));
        }
    }
    Ok(None)
}
