use super::Written;
use crate::page_range::{RangeParser, ReversedRange};
use crate::pdf::PdfDocument;
use crate::transform;
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    pages: &str,
    reversed: ReversedRange,
) -> Result<Written> {
    let doc = PdfDocument::open(&input)?;
    let total = doc.page_count();

    let selected = RangeParser::new(reversed).set(pages, total)?;
    let kept = transform::delete(&doc.pages(0), &selected)?;
    info!(deleted = total - kept.len(), remaining = kept.len(), "deleting pages");

    super::write(&[&doc], &kept, output.as_ref())
}
