/// Document - access to the body content of a Word document.
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

use crate::docx::table::Table;
use crate::error::{Error, Result};

/// A Word document body.
///
/// Borrows the raw XML of the main document part and scans it for tables.
pub struct Document<'a> {
    /// Raw bytes of the document part XML
    xml_bytes: &'a [u8],
}

impl<'a> Document<'a> {
    /// Create a new Document over document-part XML.
    #[inline]
    pub(crate) fn new(xml_bytes: &'a [u8]) -> Self {
        Self { xml_bytes }
    }

    /// Get all tables in the document body, in document order.
    ///
    /// Each `<w:tbl>` element becomes one [`Table`] holding its own XML
    /// window. Nested tables stay embedded in their outer table's window
    /// and are not reported separately.
    pub fn tables(&self) -> Result<SmallVec<[Table; 8]>> {
        let mut reader = Reader::from_reader(self.xml_bytes);
        reader.config_mut().trim_text(true);

        let mut tables = SmallVec::new();
        let mut current_table_xml: Vec<u8> = Vec::with_capacity(8192);
        let mut in_table = false;
        let mut depth = 0usize;
        let mut buf = Vec::with_capacity(2048);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if e.local_name().as_ref() == b"tbl" && !in_table {
                        in_table = true;
                        depth = 1;
                        current_table_xml.clear();
                        write_start_tag(&mut current_table_xml, b"w:tbl", &e);
                    } else if in_table {
                        depth += 1;
                        write_start_tag(&mut current_table_xml, e.name().as_ref(), &e);
                    }
                },
                Ok(Event::End(e)) => {
                    if in_table {
                        current_table_xml.extend_from_slice(b"</");
                        current_table_xml.extend_from_slice(e.name().as_ref());
                        current_table_xml.push(b'>');

                        depth -= 1;
                        if depth == 0 && e.local_name().as_ref() == b"tbl" {
                            tables.push(Table::new(std::mem::take(&mut current_table_xml)));
                            in_table = false;
                        }
                    }
                },
                Ok(Event::Text(e)) if in_table => {
                    current_table_xml.extend_from_slice(e.as_ref());
                },
                Ok(Event::Empty(e)) if in_table => {
                    write_empty_tag(&mut current_table_xml, &e);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(tables)
    }

    /// Get the number of tables in the document body.
    pub fn table_count(&self) -> Result<usize> {
        Ok(self.tables()?.len())
    }
}

/// Re-emit a start tag with its attributes into an XML window buffer.
fn write_start_tag(out: &mut Vec<u8>, name: &[u8], e: &quick_xml::events::BytesStart<'_>) {
    out.push(b'<');
    out.extend_from_slice(name);
    write_attributes(out, e);
    out.push(b'>');
}

/// Re-emit a self-closing tag with its attributes into an XML window buffer.
fn write_empty_tag(out: &mut Vec<u8>, e: &quick_xml::events::BytesStart<'_>) {
    out.push(b'<');
    out.extend_from_slice(e.name().as_ref());
    write_attributes(out, e);
    out.extend_from_slice(b"/>");
}

fn write_attributes(out: &mut Vec<u8>, e: &quick_xml::events::BytesStart<'_>) {
    for attr in e.attributes().flatten() {
        out.push(b' ');
        out.extend_from_slice(attr.key.as_ref());
        out.extend_from_slice(b"=\"");
        out.extend_from_slice(&attr.value);
        out.push(b'"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
        <w:body>
            <w:p><w:r><w:t>before</w:t></w:r></w:p>
            <w:tbl>
                <w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc></w:tr>
            </w:tbl>
            <w:tbl>
                <w:tr><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc></w:tr>
            </w:tbl>
        </w:body>
    </w:document>"#;

    #[test]
    fn finds_tables_in_document_order() {
        let doc = Document::new(BODY);
        let tables = doc.tables().unwrap();
        assert_eq!(tables.len(), 2);
        let grid = tables[1].grid().unwrap();
        assert_eq!(grid.rows()[0][0].text, "b");
    }

    #[test]
    fn empty_body_has_no_tables() {
        let doc = Document::new(b"<w:document><w:body/></w:document>");
        assert_eq!(doc.table_count().unwrap(), 0);
    }
}
