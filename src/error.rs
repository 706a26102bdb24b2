use thiserror::Error;

/// Errors raised by catalogue and loan operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// No catalogue item has the given title or ISBN
    #[error("Item with title or ISBN '{0}' not found in the catalogue")]
    ItemNotFound(String),
    /// The item exists but has no copy left to lend
    #[error("No copies available for item with title or ISBN '{0}'")]
    NoCopyAvailable(String),
    /// The loan was already closed by an earlier return
    #[error("Item has already been returned")]
    ItemAlreadyReturned,
    /// A full name did not contain at least a first and a last name
    #[error("Invalid full name format: '{0}'")]
    InvalidNameFormat(String),
    /// A negative number of copies was supplied at construction
    #[error("Invalid copy count: {0}")]
    InvalidCopyCount(i64),
    /// No loan is recorded under the given id
    #[error("No loan recorded with id {0}")]
    LoanNotFound(usize),
    /// Due-date arithmetic left the representable calendar range
    #[error("Date arithmetic out of range: {0}")]
    DateOutOfRange(String),
    /// A bibtex entry was missing a field or had a malformed value
    #[error("Invalid BibTeX entry: {0}")]
    InvalidBibtex(String),
}

/// Result alias used across the crate
pub type LibraryResult<T> = Result<T, LibraryError>;
