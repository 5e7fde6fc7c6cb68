//! Structural page operations over [`PageCollection`].
//!
//! Every operation checks its indices against the source document first and then
//! builds a fresh collection, so a failure never leaves partial output behind.

use crate::error::PageError;
use crate::page_range::{parse_count, PageRange, RangeParser, ReversedRange};
use crate::pages::{Angle, PageCollection};
use crate::validate::{validate, Bounds};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

/// Drop every page whose index is in `pages`
pub fn delete<H: Clone>(
    doc: &PageCollection<H>,
    pages: &BTreeSet<usize>,
) -> Result<PageCollection<H>, PageError> {
    validate(pages, doc.len())?;

    Ok(doc
        .iter()
        .enumerate()
        .filter(|(i, _)| !pages.contains(i))
        .map(|(_, page)| page.clone())
        .collect())
}

/// Place `pages` of `source`, in the given order, before `base[position]`.
///
/// A position past the end of `base` appends.
pub fn insert<H: Clone>(
    base: &PageCollection<H>,
    source: &PageCollection<H>,
    position: usize,
    pages: &[usize],
) -> Result<PageCollection<H>, PageError> {
    let pages = Bounds::Strict.apply(pages.to_vec(), source.len())?;

    let at = position.min(base.len());
    let mut out = PageCollection::new();
    out.extend(base.iter().take(at).cloned());
    out.extend(pages.iter().filter_map(|&i| source.get(i)).cloned());
    out.extend(base.iter().skip(at).cloned());
    Ok(out)
}

/// Concatenate whole documents in order
pub fn merge<'a, H, I>(docs: I) -> PageCollection<H>
where
    H: Clone + 'a,
    I: IntoIterator<Item = &'a PageCollection<H>>,
{
    docs.into_iter()
        .flat_map(|doc| doc.iter().cloned())
        .collect()
}

/// Build a document from `order`, one output page per entry.
///
/// Pages not named in `order` are left out and repeated indices repeat the page.
pub fn project<H: Clone>(
    doc: &PageCollection<H>,
    order: &[usize],
) -> Result<PageCollection<H>, PageError> {
    let order = Bounds::Strict.apply(order.to_vec(), doc.len())?;

    Ok(order
        .iter()
        .filter_map(|&i| doc.get(i))
        .cloned()
        .collect())
}

/// Turn the pages in `pages` by `angle`, keeping document order and length
pub fn rotate<H: Clone>(
    doc: &PageCollection<H>,
    pages: &BTreeSet<usize>,
    angle: Angle,
) -> Result<PageCollection<H>, PageError> {
    validate(pages, doc.len())?;

    Ok(doc
        .iter()
        .enumerate()
        .map(|(i, page)| {
            if pages.contains(&i) {
                page.clone().rotated(angle)
            } else {
                page.clone()
            }
        })
        .collect())
}

/// How `split_pdf` divides a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// One part per page
    Single,
    /// One part per comma-separated range
    Ranges(Vec<PageRange>),
    /// Consecutive parts of this many pages
    Every(NonZeroUsize),
}

impl SplitMode {
    /// Choose the split mode from the raw argument.
    ///
    /// Anything containing a comma or hyphen is a list of ranges; otherwise it is a
    /// page count, so "5" means parts of five pages and never "just page 5".
    pub fn from_spec(spec: &str, parser: &RangeParser) -> Result<Self, PageError> {
        if spec == "single" {
            Ok(SplitMode::Single)
        } else if spec.contains(',') || spec.contains('-') {
            Ok(SplitMode::Ranges(parser.ranges(spec)?))
        } else {
            Ok(SplitMode::Every(parse_count(spec)?))
        }
    }
}

pub fn split<H: Clone>(
    doc: &PageCollection<H>,
    mode: &SplitMode,
    reversed: ReversedRange,
) -> Result<Vec<PageCollection<H>>, PageError> {
    match mode {
        SplitMode::Single => Ok(split_single(doc)),
        SplitMode::Ranges(ranges) => split_ranges(doc, ranges, reversed),
        SplitMode::Every(n) => Ok(split_every(doc, *n)),
    }
}

pub fn split_single<H: Clone>(doc: &PageCollection<H>) -> Vec<PageCollection<H>> {
    doc.iter()
        .map(|page| std::iter::once(page.clone()).collect())
        .collect()
}

/// One part per range. Pages past the end of the document are skipped, not rejected.
pub fn split_ranges<H: Clone>(
    doc: &PageCollection<H>,
    ranges: &[PageRange],
    reversed: ReversedRange,
) -> Result<Vec<PageCollection<H>>, PageError> {
    let total = doc.len();

    // Expand every range before producing any part
    let mut selections = Vec::with_capacity(ranges.len());
    for range in ranges {
        selections.push(Bounds::Clip.apply(range.indices(total, reversed)?, total)?);
    }

    Ok(selections
        .into_iter()
        .map(|indices| indices.iter().filter_map(|&i| doc.get(i)).cloned().collect())
        .collect())
}

pub fn split_every<H: Clone>(doc: &PageCollection<H>, n: NonZeroUsize) -> Vec<PageCollection<H>> {
    doc.as_slice()
        .chunks(n.get())
        .map(|chunk| chunk.iter().cloned().collect())
        .collect()
}
