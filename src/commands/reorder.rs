use super::Written;
use crate::page_range::{RangeParser, ReversedRange};
use crate::pdf::PdfDocument;
use crate::transform;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Write the pages named in `order`, in that order. Pages not named are left out.
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    order: &str,
    reversed: ReversedRange,
) -> Result<Written> {
    let doc = PdfDocument::open(&input)?;
    let total = doc.page_count();

    let order = RangeParser::new(reversed).list(order, total)?;
    let projected = transform::project(&doc.pages(0), &order)?;
    if projected.len() < total {
        info!(
            kept = projected.len(),
            total, "pages missing from the order are dropped"
        );
    }

    super::write(&[&doc], &projected, output.as_ref())
}
