use crate::error::PageError;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

/// How a range whose start comes after its end (e.g. "5-2") is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReversedRange {
    /// Selects no pages
    #[default]
    Empty,
    /// Selects the pages walking backwards, "5-2" is 5,4,3,2
    Reverse,
    /// Rejects the expression
    Error,
}

/// One comma-separated token of a page-range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRange {
    All,
    /// 1-based and inclusive, as the user wrote it. A single page has `first == last`.
    Span { first: usize, last: usize },
}

impl PageRange {
    /// Parse a page range token like "5", "2-4" or "all"
    pub fn parse(s: &str) -> Result<Self, PageError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PageError::malformed(s, "empty page range"));
        }

        if s.eq_ignore_ascii_case("all") {
            return Ok(PageRange::All);
        }

        if let Some((first, last)) = s.split_once('-') {
            let first = parse_page_number(first)
                .ok_or_else(|| PageError::malformed(s, "expected a range like 2-4"))?;
            let last = parse_page_number(last)
                .ok_or_else(|| PageError::malformed(s, "expected a range like 2-4"))?;
            Ok(PageRange::Span { first, last })
        } else {
            let page =
                parse_page_number(s).ok_or_else(|| PageError::malformed(s, "not a page number"))?;
            Ok(PageRange::Span {
                first: page,
                last: page,
            })
        }
    }

    /// Expand this token into zero-based page indices, in the order they are selected.
    ///
    /// Expansion stops at the first index past the end of the document. That index is
    /// kept so bounds checking can report it; every index after it is out of range too.
    pub fn indices(&self, total: usize, reversed: ReversedRange) -> Result<Vec<usize>, PageError> {
        let (first, last) = match *self {
            PageRange::All => return Ok((0..total).collect()),
            PageRange::Span { first, last } => (first, last),
        };

        if first == 0 || last == 0 {
            return Err(PageError::OutOfRange { page: 0, total });
        }

        let (start, end) = (first - 1, last - 1);
        if start <= end {
            return Ok(ascending(start, end, total));
        }

        match reversed {
            ReversedRange::Empty => Ok(Vec::new()),
            ReversedRange::Reverse => Ok(descending(start, end, total)),
            ReversedRange::Error => Err(PageError::MalformedRange {
                token: format!("{}-{}", first, last),
                reason: "start page comes after end page",
            }),
        }
    }
}

fn ascending(start: usize, end: usize, total: usize) -> Vec<usize> {
    if end < total {
        (start..=end).collect()
    } else {
        (start..total).chain(std::iter::once(start.max(total))).collect()
    }
}

fn descending(start: usize, end: usize, total: usize) -> Vec<usize> {
    if start < total {
        (end..=start).rev().collect()
    } else {
        std::iter::once(start).chain((end..total).rev()).collect()
    }
}

fn parse_page_number(s: &str) -> Option<usize> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a comma-separated list of page ranges like "1-5,10,all"
pub fn parse_page_ranges(s: &str) -> Result<Vec<PageRange>, PageError> {
    if s.trim().is_empty() {
        return Err(PageError::malformed(s, "no pages specified"));
    }
    s.split(',').map(PageRange::parse).collect()
}

/// Parse the group size used by split-every-n
pub fn parse_count(s: &str) -> Result<NonZeroUsize, PageError> {
    let s = s.trim();
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PageError::malformed(s, "expected a number of pages per part"));
    }
    if s.starts_with('-') {
        return Err(PageError::InvalidCount(s.to_string()));
    }
    // Too large for usize is still a count, just not a usable one
    s.parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| PageError::InvalidCount(s.to_string()))
}

/// Turns page-range expressions into zero-based indices for one kind of operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeParser {
    allow_all: bool,
    reversed: ReversedRange,
}

impl RangeParser {
    pub fn new(reversed: ReversedRange) -> Self {
        RangeParser {
            allow_all: false,
            reversed,
        }
    }

    /// Accept the `all` token
    pub fn allow_all(mut self, allow: bool) -> Self {
        self.allow_all = allow;
        self
    }

    /// Parse into tokens, rejecting `all` unless it is allowed
    pub fn ranges(&self, s: &str) -> Result<Vec<PageRange>, PageError> {
        let ranges = parse_page_ranges(s)?;
        if !self.allow_all && ranges.contains(&PageRange::All) {
            return Err(PageError::malformed("all", "'all' is not accepted here"));
        }
        Ok(ranges)
    }

    /// Expand in written order, keeping repeats
    pub fn list(&self, s: &str, total: usize) -> Result<Vec<usize>, PageError> {
        let mut pages = Vec::new();
        for range in self.ranges(s)? {
            pages.extend(range.indices(total, self.reversed)?);
        }
        Ok(pages)
    }

    /// Expand into a membership set
    pub fn set(&self, s: &str, total: usize) -> Result<BTreeSet<usize>, PageError> {
        Ok(self.list(s, total)?.into_iter().collect())
    }
}
