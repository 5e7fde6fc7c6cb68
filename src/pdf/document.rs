use crate::error::PageError;
use crate::pages::PageCollection;
use anyhow::{Context, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;
use tracing::debug;

/// A page of one of the documents taking part in an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle {
    /// Position of the owning document in the list of sources
    pub source: usize,
    /// The page object inside that document
    pub id: ObjectId,
}

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PageError::FileNotFound(path.to_path_buf()).into());
        }

        let path_str = path.display().to_string();
        let doc =
            Document::load(path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        debug!(path = %path_str, pages = doc.get_pages().len(), "opened PDF");

        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Page object IDs in document order
    pub fn page_ids(&self) -> Vec<ObjectId> {
        // get_pages is keyed by 1-based page number, so values come out in order
        self.doc.get_pages().into_values().collect()
    }

    /// The document's pages, tagged as source number `source`
    pub fn pages(&self, source: usize) -> PageCollection<PageHandle> {
        PageCollection::from_handles(
            self.page_ids()
                .into_iter()
                .map(|id| PageHandle { source, id }),
        )
    }

    /// Serialize `doc` and write it to `path`.
    ///
    /// The file is only created once serialization has succeeded.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        let path = path.as_ref();
        let buffer = Self::serialize(doc, path)?;
        Self::write_bytes(path, &buffer)
    }

    /// Serialize `doc` in memory. `path` is only used to label errors.
    pub fn serialize(doc: &mut Document, path: &Path) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .with_context(|| format!("Failed to serialize PDF: {}", path.display()))?;
        Ok(buffer)
    }

    /// Write an already serialized PDF to `path`.
    pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        debug!(path = %path.display(), "wrote PDF");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{tags, write_test_pdf};

    #[test]
    fn test_open_missing_file() {
        let err = PdfDocument::open("/definitely/not/here.pdf")
            .err()
            .expect("missing file must fail");
        assert!(matches!(
            err.downcast_ref::<PageError>(),
            Some(PageError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_pdf(dir.path(), "in.pdf", 4, "A");
        let doc = PdfDocument::open(&path).unwrap();
        assert_eq!(doc.page_count(), 4);

        let pages = doc.pages(2);
        assert_eq!(pages.len(), 4);
        assert!(pages.iter().all(|p| p.handle().source == 2));
        assert_eq!(tags(&path), vec!["A1", "A2", "A3", "A4"]);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_pdf(dir.path(), "in.pdf", 2, "B");
        let mut doc = PdfDocument::open(&path).unwrap().doc;
        let out = dir.path().join("copy.pdf");
        PdfDocument::save(&mut doc, &out).unwrap();
        assert_eq!(tags(&out), vec!["B1", "B2"]);
    }
}
