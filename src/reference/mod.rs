//! Book references: which book, which pages and which recipe on those pages.
//!
//! A [`Book`] has two canonical text forms. The identifier form lives in a
//! recipe's `id` field:
//!
//! ```text
//! urn:isbn:9783161484100#pages=52-56&recipe=2
//! ```
//!
//! The annotation form is embedded in free-form notes:
//!
//! ```text
//! _9783161484100, p.52-56, 2nd_
//! ```

mod isbn;
mod pages;

use std::fmt;
use std::str::FromStr;

use crate::error::ReferenceError;

pub use self::isbn::{validate as validate_isbn, Isbn13};
pub use self::pages::{PageRange, Pages};

const URN_PREFIX: &str = "urn:isbn:";

/// A reference to a recipe printed in a book
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Book {
    isbn13: Isbn13,
    pages: Option<Pages>,
    recipe_index: u64,
}

impl Book {
    /// Build a reference from already-validated parts.
    ///
    /// A recipe index only means something next to a page reference, so it
    /// is reset to 0 when `pages` is absent or empty.
    pub fn new(isbn13: Isbn13, pages: Option<Pages>, recipe_index: u64) -> Self {
        let pages = pages.filter(|p| !p.is_empty());
        let recipe_index = if pages.is_some() { recipe_index } else { 0 };

        Book {
            isbn13,
            pages,
            recipe_index,
        }
    }

    /// Build a reference from caller-supplied values, validating the ISBN
    pub fn from_parts(
        isbn10or13: &str,
        pages: Option<Pages>,
        recipe_index: u64,
    ) -> Result<Self, ReferenceError> {
        let isbn13 = validate_isbn(isbn10or13)?;
        Ok(Book::new(isbn13, pages, recipe_index))
    }

    /// Decode the `urn:isbn:` identifier form.
    ///
    /// Unknown fragment keys are ignored. A `pages` or `recipe` value that
    /// fails to parse fails the whole reference.
    pub fn parse_identifier(id: &str) -> Result<Self, ReferenceError> {
        let (name, fragment) = match id.split_once('#') {
            Some((name, fragment)) => (name, Some(fragment)),
            None => (id, None),
        };

        let isbn = name
            .strip_prefix(URN_PREFIX)
            .ok_or_else(|| ReferenceError::NotAnIsbnUrn(id.to_string()))?;
        let isbn13 = validate_isbn(isbn)?;

        let mut pages = None;
        let mut recipe_index = 0;

        // Fragment values are not URL-decoded as a whole; page tokens carry
        // their own escaping.
        for pair in fragment.into_iter().flat_map(|f| f.split('&')) {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };

            match key {
                "pages" => pages = Some(Pages::parse(value)?),
                "recipe" => recipe_index = parse_recipe_index(value)?,
                _ => {}
            }
        }

        Ok(Book::new(isbn13, pages, recipe_index))
    }

    pub fn isbn13(&self) -> &Isbn13 {
        &self.isbn13
    }

    pub fn pages(&self) -> Option<&Pages> {
        self.pages.as_ref()
    }

    /// Position of the recipe among those on the cited pages; 0 when unset
    pub fn recipe_index(&self) -> u64 {
        self.recipe_index
    }

    /// The `urn:isbn:<isbn>[#pages=<pages>[&recipe=<n>]]` form
    pub fn identifier(&self) -> String {
        let mut id = format!("{}{}", URN_PREFIX, self.isbn13);
        if let Some(pages) = &self.pages {
            id.push_str(&format!("#pages={}", pages));
            if self.recipe_index > 0 {
                id.push_str(&format!("&recipe={}", self.recipe_index));
            }
        }
        id
    }

    /// The `_<isbn>[, p.<pages>[, <ordinal>]]_` form used inside notes
    pub fn annotation(&self) -> String {
        let mut annotation = format!("_{}", self.isbn13);
        if let Some(pages) = &self.pages {
            annotation.push_str(&format!(", p.{}", pages));
            if self.recipe_index > 0 {
                annotation.push_str(&format!(", {}", ordinal(self.recipe_index)));
            }
        }
        annotation.push('_');
        annotation
    }

    /// Same reference with contracted page spans written out in full
    pub fn expand_contractions(&self) -> Book {
        Book {
            isbn13: self.isbn13.clone(),
            pages: self.pages.as_ref().map(Pages::expand_contractions),
            recipe_index: self.recipe_index,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

impl FromStr for Book {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Book::parse_identifier(s)
    }
}

pub(crate) fn parse_recipe_index(value: &str) -> Result<u64, ReferenceError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReferenceError::InvalidRecipeIndex(value.to_string()));
    }
    value
        .parse()
        .map_err(|_| ReferenceError::InvalidRecipeIndex(value.to_string()))
}

/// English ordinal for a recipe index, picked from the last digit alone.
///
/// 11, 12 and 13 render as "11st", "12nd" and "13rd"; existing annotations
/// are written this way, so it is kept.
pub fn ordinal(n: u64) -> String {
    match n % 10 {
        1 => format!("{}st", n),
        2 => format!("{}nd", n),
        3 => format!("{}rd", n),
        _ => format!("{}th", n),
    }
}
