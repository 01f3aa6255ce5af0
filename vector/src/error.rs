/// Errors returned by [`Vector`](crate::Vector) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cannot pop from an empty vector")]
    EmptyVector,
    /// The index is in range, but its path doesn't end at a stored element.
    #[error("no element found at index {index}")]
    NotFound { index: usize },
    #[error("index {index} is out of bounds for a vector of size {size}")]
    OutOfBounds { index: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
