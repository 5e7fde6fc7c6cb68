use super::Written;
use crate::error::PageError;
use crate::page_range::{RangeParser, ReversedRange};
use crate::pdf::PdfDocument;
use crate::transform;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Insert `pages` of `source` into `base` before page `position + 1` (0 prepends)
pub fn run<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    base: P,
    source: Q,
    output: R,
    position: i64,
    pages: &str,
    reversed: ReversedRange,
) -> Result<Written> {
    let position = usize::try_from(position).map_err(|_| PageError::InvalidPosition(position))?;

    let base = PdfDocument::open(&base)?;
    let source = PdfDocument::open(&source)?;

    let selected = RangeParser::new(reversed)
        .allow_all(true)
        .list(pages, source.page_count())?;
    let combined = transform::insert(&base.pages(0), &source.pages(1), position, &selected)?;
    info!(
        inserted = selected.len(),
        position = position.min(base.page_count()),
        "inserting pages"
    );

    super::write(&[&base, &source], &combined, output.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{tags, write_test_pdf};

    #[test]
    fn test_insert_in_middle() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_test_pdf(dir.path(), "base.pdf", 3, "A");
        let source = write_test_pdf(dir.path(), "source.pdf", 3, "B");
        let output = dir.path().join("out.pdf");

        let written = run(&base, &source, &output, 2, "3,1", ReversedRange::Empty).unwrap();
        assert_eq!(written.page_count, 5);
        assert_eq!(tags(&output), vec!["A1", "A2", "B3", "B1", "A3"]);
    }

    #[test]
    fn test_prepend_all() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_test_pdf(dir.path(), "base.pdf", 1, "A");
        let source = write_test_pdf(dir.path(), "source.pdf", 2, "B");
        let output = dir.path().join("out.pdf");

        run(&base, &source, &output, 0, "ALL", ReversedRange::Empty).unwrap();
        assert_eq!(tags(&output), vec!["B1", "B2", "A1"]);
    }

    #[test]
    fn test_position_past_end_appends() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_test_pdf(dir.path(), "base.pdf", 2, "A");
        let source = write_test_pdf(dir.path(), "source.pdf", 2, "B");
        let output = dir.path().join("out.pdf");

        run(&base, &source, &output, 40, "2", ReversedRange::Empty).unwrap();
        assert_eq!(tags(&output), vec!["A1", "A2", "B2"]);
    }

    #[test]
    fn test_same_document_as_both_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_test_pdf(dir.path(), "base.pdf", 2, "A");
        let output = dir.path().join("out.pdf");

        run(&base, &base, &output, 1, "1-2", ReversedRange::Empty).unwrap();
        assert_eq!(tags(&output), vec!["A1", "A1", "A2", "A2"]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_test_pdf(dir.path(), "base.pdf", 2, "A");
        let source = write_test_pdf(dir.path(), "source.pdf", 2, "B");
        let output = dir.path().join("out.pdf");

        let err = run(&base, &source, &output, -1, "1", ReversedRange::Empty).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PageError>(),
            Some(&PageError::InvalidPosition(-1))
        );

        let err = run(&base, &source, &output, 0, "3", ReversedRange::Empty).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PageError>(),
            Some(&PageError::OutOfRange { page: 3, total: 2 })
        );

        let missing = dir.path().join("missing.pdf");
        let err = run(&base, &missing, &output, 0, "1", ReversedRange::Empty).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PageError>(),
            Some(PageError::FileNotFound(_))
        ));

        assert!(!output.exists());
    }
}
