use crate::error::PageError;
use std::fmt;

/// A relative rotation applied to a page's current orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Angle {
    Cw90,
    Cw180,
    Cw270,
    Ccw90,
}

impl Angle {
    pub fn degrees(self) -> i64 {
        match self {
            Angle::Cw90 => 90,
            Angle::Cw180 => 180,
            Angle::Cw270 => 270,
            Angle::Ccw90 => -90,
        }
    }
}

impl TryFrom<i64> for Angle {
    type Error = PageError;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        match degrees {
            90 => Ok(Angle::Cw90),
            180 => Ok(Angle::Cw180),
            270 => Ok(Angle::Cw270),
            -90 => Ok(Angle::Ccw90),
            other => Err(PageError::InvalidAngle(other)),
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// An opaque page plus the rotation to add to it when it is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<H> {
    handle: H,
    rotation: u16,
}

impl<H> Page<H> {
    pub fn new(handle: H) -> Self {
        Page {
            handle,
            rotation: 0,
        }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Clockwise rotation delta in degrees, always in `0..360`
    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn rotated(self, angle: Angle) -> Self {
        let rotation = (i64::from(self.rotation) + angle.degrees()).rem_euclid(360) as u16;
        Page { rotation, ..self }
    }
}

/// An ordered sequence of pages. Transforms never edit one in place; they build a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCollection<H> {
    pages: Vec<Page<H>>,
}

impl<H> Default for PageCollection<H> {
    fn default() -> Self {
        PageCollection { pages: Vec::new() }
    }
}

impl<H> PageCollection<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_handles<I: IntoIterator<Item = H>>(handles: I) -> Self {
        handles.into_iter().map(Page::new).collect()
    }

    pub fn push(&mut self, page: Page<H>) {
        self.pages.push(page);
    }

    pub fn get(&self, index: usize) -> Option<&Page<H>> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page<H>> {
        self.pages.iter()
    }

    pub fn as_slice(&self) -> &[Page<H>] {
        &self.pages
    }
}

impl<H> FromIterator<Page<H>> for PageCollection<H> {
    fn from_iter<I: IntoIterator<Item = Page<H>>>(iter: I) -> Self {
        PageCollection {
            pages: iter.into_iter().collect(),
        }
    }
}

impl<H> Extend<Page<H>> for PageCollection<H> {
    fn extend<I: IntoIterator<Item = Page<H>>>(&mut self, iter: I) {
        self.pages.extend(iter);
    }
}

impl<'a, H> IntoIterator for &'a PageCollection<H> {
    type Item = &'a Page<H>;
    type IntoIter = std::slice::Iter<'a, Page<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
