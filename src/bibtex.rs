//! Import of single bibtex book entries.

use crate::{
    catalogue::CatalogueItem,
    error::{LibraryError, LibraryResult},
    person::Person,
};

impl CatalogueItem {
    /// Build a book from a bibtex entry.
    ///
    /// Reads the `title`, `author`, `isbn` and `year` fields. Values may be
    /// brace-delimited (`title={Clean Code}`) or bare (`year=2008,`). The
    /// author must be exactly `"<first> <last>"`. The book gets an
    /// unspecified genre and no copies.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidBibtex` if a field is missing or the year
    /// is not a number, and `LibraryError::InvalidNameFormat` if the author is
    /// not two space-separated names
    pub fn from_bibtex(entry: &str) -> LibraryResult<Self> {
        let title = required_field(entry, "title")?;
        let author = required_field(entry, "author")?;
        let isbn = required_field(entry, "isbn")?;
        let year = required_field(entry, "year")?;

        let year: i32 = year
            .parse()
            .map_err(|_| LibraryError::InvalidBibtex(format!("invalid year '{year}'")))?;

        let author = match author.split(' ').collect::<Vec<_>>().as_slice() {
            [first, last] => Person::new(first, last),
            _ => return Err(LibraryError::InvalidNameFormat(author.to_string())),
        };

        Ok(Self::book(title, author).with_isbn(isbn).with_year(year))
    }
}

/// Look up a field, failing if it is absent
fn required_field<'a>(entry: &'a str, name: &str) -> LibraryResult<&'a str> {
    extract_field(entry, name)
        .ok_or_else(|| LibraryError::InvalidBibtex(format!("missing field '{name}'")))
}

/// Value of `name=` in `entry`, trimmed, without its braces.
/// `name` must not be the tail of a longer key (`booktitle=` is not `title=`).
fn extract_field<'a>(entry: &'a str, name: &str) -> Option<&'a str> {
    let key = format!("{name}=");
    let (at, _) = entry.match_indices(key.as_str()).find(|(at, _)| {
        entry
            .get(..*at)
            .and_then(|before| before.chars().next_back())
            .is_none_or(|c| !c.is_alphanumeric())
    })?;
    let rest = entry.get(at.checked_add(key.len())?..)?.trim_start();

    let value = rest.strip_prefix('{').map_or_else(
        || rest.split([',', '}', '\n']).next().unwrap_or_default(),
        |braced| braced.split_once('}').map_or(braced, |(value, _)| value),
    );
    Some(value.trim())
}
