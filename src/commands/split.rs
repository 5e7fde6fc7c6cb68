use super::Written;
use crate::page_range::{RangeParser, ReversedRange};
use crate::pdf::PdfDocument;
use crate::transform::{self, SplitMode};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Split `input` into `output_dir` according to `spec`: "single", ranges like "1-3,4-6", or a page count
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    spec: &str,
    reversed: ReversedRange,
) -> Result<Vec<Written>> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let doc = PdfDocument::open(input)?;
    let mode = SplitMode::from_spec(spec, &RangeParser::new(reversed).allow_all(true))?;
    let parts = transform::split(&doc.pages(0), &mode, reversed)?;
    info!(parts = parts.len(), ?mode, "splitting document");

    // Get the base name of the input file
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let label = match mode {
        SplitMode::Single => "page",
        SplitMode::Ranges(_) | SplitMode::Every(_) => "part",
    };

    // Every part is serialized before the first file is written
    let mut rendered = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            warn!(part = i + 1, "range selects no pages, writing an empty part");
        }
        let output_path = output_dir.join(format!("{}_{}_{}.pdf", stem, label, i + 1));
        rendered.push(super::render(&[&doc], part, &output_path)?);
    }

    // Create output directory if it doesn't exist
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let written = rendered
        .into_iter()
        .map(super::Rendered::flush)
        .collect::<Result<Vec<_>>>()?;

    Ok(written)
}
