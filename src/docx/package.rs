/// Package implementation for Word documents.
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::docx::document::Document;
use crate::error::{Error, Result};

/// Path of the main document part inside the container.
const DOCUMENT_PART: &str = "word/document.xml";

/// A Word (.docx) package.
///
/// This is the entry point for working with Word documents. A `.docx` file
/// is a ZIP container; the package opens it and loads the main document
/// part, which holds the body content including all tables.
///
/// # Examples
///
/// ```rust,no_run
/// use tabella::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let doc = pkg.document();
/// println!("{} tables", doc.tables()?.len());
/// # Ok::<(), tabella::Error>(())
/// ```
pub struct Package {
    /// Raw bytes of `word/document.xml`
    document_xml: Vec<u8>,
}

impl Package {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open a .docx package from a reader (must implement Read + Seek).
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|e| Error::InvalidDocument(format!("not a ZIP container: {e}")))?;

        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| Error::MissingPart(DOCUMENT_PART.to_string()))?;

        let mut document_xml = Vec::with_capacity(part.size() as usize);
        part.read_to_end(&mut document_xml)
            .map_err(|e| Error::Zip(e.to_string()))?;

        Ok(Self { document_xml })
    }

    /// Get the main document.
    #[inline]
    pub fn document(&self) -> Document<'_> {
        Document::new(&self.document_xml)
    }
}
