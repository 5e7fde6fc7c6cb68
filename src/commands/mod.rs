pub mod delete;
pub mod insert;
pub mod merge;
pub mod reorder;
pub mod rotate;
pub mod split;

use crate::pages::PageCollection;
use crate::pdf::{assemble, PageHandle, PdfDocument};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// An output file produced by a command
#[derive(Debug, Clone)]
pub struct Written {
    pub path: PathBuf,
    pub page_count: usize,
}

/// An assembled and serialized output that has not been written yet
struct Rendered {
    written: Written,
    bytes: Vec<u8>,
}

impl Rendered {
    fn flush(self) -> Result<Written> {
        PdfDocument::write_bytes(&self.written.path, &self.bytes)?;
        Ok(self.written)
    }
}

fn render(
    sources: &[&PdfDocument],
    pages: &PageCollection<PageHandle>,
    output: &Path,
) -> Result<Rendered> {
    let mut doc = assemble(sources, pages)?;
    let bytes = PdfDocument::serialize(&mut doc, output)?;
    Ok(Rendered {
        written: Written {
            path: output.to_path_buf(),
            page_count: pages.len(),
        },
        bytes,
    })
}

fn write(
    sources: &[&PdfDocument],
    pages: &PageCollection<PageHandle>,
    output: &Path,
) -> Result<Written> {
    let mut doc = assemble(sources, pages)?;
    PdfDocument::save(&mut doc, output)?;
    Ok(Written {
        path: output.to_path_buf(),
        page_count: pages.len(),
    })
}
