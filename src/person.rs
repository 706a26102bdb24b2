use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, LibraryResult};

/// A borrower or an author
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Person {
    /// Given name, possibly several space-separated names
    first_name: String,
    /// Family name
    last_name: String,
}

impl Person {
    /// Create a person from an explicit first and last name
    #[must_use]
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self { first_name: first_name.to_string(), last_name: last_name.to_string() }
    }

    /// Parse a `"<first> <last>"` full name.
    ///
    /// The name is split on single spaces and trailing empty tokens are
    /// dropped. Only the first two tokens are kept, so `"Jane Ann Doe"`
    /// becomes first name `Jane` and last name `Ann`.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidNameFormat` if fewer than two tokens remain
    pub fn parse(full_name: &str) -> LibraryResult<Self> {
        let mut tokens: Vec<&str> = full_name.split(' ').collect();
        while tokens.last().is_some_and(|token| token.is_empty()) {
            tokens.pop();
        }

        match tokens.as_slice() {
            [first, last, ..] => Ok(Self::new(first, last)),
            _ => Err(LibraryError::InvalidNameFormat(full_name.to_string())),
        }
    }

    /// Given name
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `"<first> <last>"`, as printed on loans and receipts
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First space-separated token of the first name
    #[must_use]
    pub fn first_given_name(&self) -> &str {
        self.first_name.split(' ').next().unwrap_or_default()
    }
}

// Catalogue rendering uses "<last>, <first>"
impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}
