use super::Written;
use crate::page_range::{RangeParser, ReversedRange};
use crate::pages::Angle;
use crate::pdf::PdfDocument;
use crate::transform;
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    pages: &str,
    angle: i64,
    reversed: ReversedRange,
) -> Result<Written> {
    let angle = Angle::try_from(angle)?;

    let doc = PdfDocument::open(&input)?;
    let selected = RangeParser::new(reversed)
        .allow_all(true)
        .set(pages, doc.page_count())?;
    let rotated = transform::rotate(&doc.pages(0), &selected, angle)?;
    info!(pages = selected.len(), %angle, "rotating pages");

    super::write(&[&doc], &rotated, output.as_ref())
}
