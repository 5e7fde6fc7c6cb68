use super::Written;
use crate::error::PageError;
use crate::pdf::PdfDocument;
use crate::transform;
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(inputs: &[P], output: Q) -> Result<Written> {
    if inputs.len() < 2 {
        return Err(PageError::Usage("At least two input files are required".to_string()).into());
    }

    let docs = inputs
        .iter()
        .map(PdfDocument::open)
        .collect::<Result<Vec<_>>>()?;
    let collections: Vec<_> = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| doc.pages(i))
        .collect();

    let merged = transform::merge(&collections);
    info!(files = docs.len(), pages = merged.len(), "merging documents");

    let sources: Vec<&PdfDocument> = docs.iter().collect();
    super::write(&sources, &merged, output.as_ref())
}
