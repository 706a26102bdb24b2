use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{
    error::{LibraryError, LibraryResult},
    person::Person,
};

/// ISBN recorded for items that were created without one
pub const PLACEHOLDER_ISBN: &str = "0000000000000";

/// A catalogue item shared between the catalogue and the loans that point at it
pub type SharedItem = Rc<RefCell<CatalogueItem>>;

/// Renders the one-line summary used by the reports
pub trait Summary {
    /// One-line, type-specific rendering
    fn summary(&self) -> String;
}

/// Book genre
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    /// No genre recorded
    #[default]
    Unspecified,
    /// Non-fiction
    Nonfiction,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "UNSPECIFIED"),
            Self::Nonfiction => write!(f, "NONFICTION"),
        }
    }
}

/// Variant-specific payload of a catalogue item
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// A book with an author and a genre
    Book {
        /// Author of the book
        author: Person,
        /// Genre, `Unspecified` unless set
        #[serde(default)]
        genre: Genre,
    },
    /// A magazine issue
    Magazine {
        /// Issue number
        number: i32,
    },
}

/// Serde default for a missing ISBN
fn placeholder_isbn() -> String {
    PLACEHOLDER_ISBN.to_string()
}

/// A titled item in the catalogue with its available copy count
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogueItem {
    /// Display and lookup key
    title: String,
    /// Alternate lookup key
    #[serde(default = "placeholder_isbn")]
    isbn: String,
    /// Publication year
    #[serde(default)]
    year: i32,
    /// Physical units currently tracked as available
    #[serde(default)]
    copies: u32,
    /// Book or magazine payload
    #[serde(flatten)]
    kind: ItemKind,
}

impl CatalogueItem {
    /// Create a book with placeholder ISBN, year 0, unspecified genre and no copies
    #[must_use]
    pub fn book(title: &str, author: Person) -> Self {
        Self::with_kind(title, 0, ItemKind::Book { author, genre: Genre::default() })
    }

    /// Create a magazine issue with no copies
    #[must_use]
    pub fn magazine(title: &str, year: i32, number: i32) -> Self {
        Self::with_kind(title, year, ItemKind::Magazine { number })
    }

    /// Shared constructor for both variants
    fn with_kind(title: &str, year: i32, kind: ItemKind) -> Self {
        Self { title: title.to_string(), isbn: placeholder_isbn(), year, copies: 0, kind }
    }

    /// Set the ISBN
    #[must_use]
    pub fn with_isbn(mut self, isbn: &str) -> Self {
        self.isbn = isbn.to_string();
        self
    }

    /// Set the publication year
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Set the genre. Magazines carry no genre and are returned unchanged.
    #[must_use]
    pub fn with_genre(mut self, genre: Genre) -> Self {
        if let ItemKind::Book { genre: current, .. } = &mut self.kind {
            *current = genre;
        }
        self
    }

    /// Set the initial copy count
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidCopyCount` if `copies` is negative or
    /// does not fit the copy counter
    pub fn with_copies(mut self, copies: i64) -> LibraryResult<Self> {
        self.copies = u32::try_from(copies).map_err(|_| LibraryError::InvalidCopyCount(copies))?;
        Ok(self)
    }

    /// Wrap the item for sharing between the catalogue and loans
    #[must_use]
    pub fn into_shared(self) -> SharedItem {
        Rc::new(RefCell::new(self))
    }

    /// Title of the item
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// ISBN, or the placeholder when none was given
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Publication year
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Copies currently tracked as available
    #[must_use]
    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Variant payload
    #[must_use]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Author, for books
    #[must_use]
    pub fn author(&self) -> Option<&Person> {
        match &self.kind {
            ItemKind::Book { author, .. } => Some(author),
            ItemKind::Magazine { .. } => None,
        }
    }

    /// Genre, for books
    #[must_use]
    pub fn genre(&self) -> Option<Genre> {
        match &self.kind {
            ItemKind::Book { genre, .. } => Some(*genre),
            ItemKind::Magazine { .. } => None,
        }
    }

    /// Issue number, for magazines
    #[must_use]
    pub fn issue_number(&self) -> Option<i32> {
        match &self.kind {
            ItemKind::Magazine { number } => Some(*number),
            ItemKind::Book { .. } => None,
        }
    }

    /// Whether `key` equals the title or the ISBN exactly
    #[must_use]
    pub fn is_keyed_by(&self, key: &str) -> bool {
        self.title == key || self.isbn == key
    }

    /// Add `n` copies
    pub fn add_copies(&mut self, n: u32) {
        self.copies = self.copies.saturating_add(n);
    }

    /// Add a single copy
    pub fn add_copy(&mut self) {
        self.add_copies(1);
    }

    /// Remove a single copy. At zero copies this only logs.
    pub fn decrement_copies(&mut self) {
        if self.copies > 0 {
            self.copies = self.copies.saturating_sub(1);
        } else {
            tracing::info!(title = %self.title, "No more copies available to decrement");
        }
    }

    /// Whether at least one copy is available
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.copies > 0
    }

    /// Relaxed book matching.
    ///
    /// Two books match when one title is a prefix of the other, the first
    /// tokens of the authors' first names agree and the authors' last names
    /// are equal. Anything that is not a book never matches.
    #[must_use]
    pub fn matches_book(&self, other: &Self) -> bool {
        let (ItemKind::Book { author: ours, .. }, ItemKind::Book { author: theirs, .. }) =
            (&self.kind, &other.kind)
        else {
            return false;
        };

        let titles_overlap =
            self.title.starts_with(other.title.as_str()) || other.title.starts_with(self.title.as_str());

        titles_overlap
            && ours.first_given_name() == theirs.first_given_name()
            && ours.last_name() == theirs.last_name()
    }
}

impl Summary for CatalogueItem {
    fn summary(&self) -> String {
        match &self.kind {
            ItemKind::Book { author, genre } => format!(
                "Book: Title={}; Author={author}; ISBN={}; Genre={genre}",
                self.title, self.isbn
            ),
            ItemKind::Magazine { number } => format!(
                "Magazine: title={}; year={}; number={number}; copies={}",
                self.title, self.year, self.copies
            ),
        }
    }
}

impl fmt::Display for CatalogueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
