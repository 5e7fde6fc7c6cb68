use crate::error::PageError;

/// Bounds checking applied to indices before they are used against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// Any index outside the document fails the whole operation
    Strict,
    /// Indices outside the document are dropped
    Clip,
}

impl Bounds {
    pub fn apply(self, indices: Vec<usize>, total: usize) -> Result<Vec<usize>, PageError> {
        match self {
            Bounds::Strict => {
                validate(&indices, total)?;
                Ok(indices)
            }
            Bounds::Clip => Ok(indices.into_iter().filter(|&i| i < total).collect()),
        }
    }
}

/// Check that every index refers to an existing page, reporting the first one that doesn't
pub fn validate<'a, I>(indices: I, total: usize) -> Result<(), PageError>
where
    I: IntoIterator<Item = &'a usize>,
{
    match indices.into_iter().find(|&&i| i >= total) {
        Some(&i) => Err(PageError::OutOfRange { page: i + 1, total }),
        None => Ok(()),
    }
}
