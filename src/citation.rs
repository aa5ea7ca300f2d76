//! Finds a book citation inside free-form recipe notes.
//!
//! Notes written by hand tend to look like
//!
//! ```text
//! Lovely with rice.
//! ISBN: 978-3-16-148410-0
//! pages: 52
//! recipe: 2
//! ```
//!
//! while notes that were already standardized end in an annotation such as
//! `_9783161484100, p.52, 2nd_`. Both shapes are recognized by the same
//! small grammar; only the first phrase in the notes is used and all other
//! text is left alone.

use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1, take_while_m_n},
    character::complete::{char, digit1},
    combinator::{opt, value, verify},
    error::{Error, ErrorKind},
    sequence::tuple,
    IResult,
};

use crate::error::{CitationError, ReferenceError};
use crate::reference::{self, Book, Pages};

/// The parts of a citation phrase, as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase<'a> {
    IsbnOnly {
        isbn: &'a str,
    },
    IsbnAndPages {
        isbn: &'a str,
        pages: &'a str,
    },
    IsbnPagesRecipe {
        isbn: &'a str,
        pages: &'a str,
        recipe: &'a str,
    },
}

impl<'a> Phrase<'a> {
    pub fn isbn(&self) -> &'a str {
        match *self {
            Phrase::IsbnOnly { isbn }
            | Phrase::IsbnAndPages { isbn, .. }
            | Phrase::IsbnPagesRecipe { isbn, .. } => isbn,
        }
    }

    /// Validate every embedded value and assemble the reference
    pub fn to_book(&self) -> Result<Book, ReferenceError> {
        let isbn13 = reference::validate_isbn(self.isbn())?;

        let (pages, recipe_index) = match *self {
            Phrase::IsbnOnly { .. } => (None, 0),
            Phrase::IsbnAndPages { pages, .. } => (Some(Pages::parse(pages)?), 0),
            Phrase::IsbnPagesRecipe { pages, recipe, .. } => (
                Some(Pages::parse(pages)?),
                reference::parse_recipe_index(recipe)?,
            ),
        };

        Ok(Book::new(isbn13, pages, recipe_index))
    }
}

/// Result of scanning notes for a citation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Citation<'a> {
    NoCitation,
    Found {
        /// Text before the phrase, without the whitespace that led into it
        before: &'a str,
        phrase: Phrase<'a>,
        /// Text after the phrase, without the whitespace that followed it
        after: &'a str,
    },
}

/// A citation recovered from notes, with the notes rewritten around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub book: Book,
    pub notes: String,
}

/// Locate the first citation phrase in `notes`
pub fn find(notes: &str) -> Citation<'_> {
    for (start, c) in notes.char_indices() {
        if !matches!(c, 'i' | 'I' | '_') {
            continue;
        }

        let Ok((rest, parsed)) = phrase(&notes[start..]) else {
            continue;
        };

        let end = notes.len() - rest.len();
        let before = notes[..start].trim_end_matches(is_space);
        let after = notes[end..].trim_start_matches(is_space);
        return Citation::Found {
            before,
            phrase: parsed,
            after,
        };
    }

    Citation::NoCitation
}

/// Recover the book cited in `notes` and rebuild the notes around it.
///
/// The phrase is removed, the remaining text is kept (separated by a blank
/// line when there is text on both sides) and the canonical annotation is
/// appended after another blank line. Returns `Ok(None)` when there is no
/// citation. If the phrase matched but its ISBN, pages or recipe index is
/// invalid, nothing is rewritten and the cause is returned.
pub fn extract(notes: &str) -> Result<Option<Extracted>, CitationError> {
    extract_with(notes, |book| book)
}

/// Like [`extract`], but passes the recovered book through `adjust` before
/// it is written back into the notes
pub fn extract_with<F>(notes: &str, adjust: F) -> Result<Option<Extracted>, CitationError>
where
    F: FnOnce(Book) -> Book,
{
    let (before, phrase, after) = match find(notes) {
        Citation::NoCitation => return Ok(None),
        Citation::Found {
            before,
            phrase,
            after,
        } => (before, phrase, after),
    };

    debug!("Found citation in notes: {:?}", phrase);
    let book = adjust(phrase.to_book().map_err(CitationError::CitationMalformed)?);
    let notes = reconstitute(before, after, &book.annotation());

    Ok(Some(Extracted { book, notes }))
}

fn reconstitute(before: &str, after: &str, annotation: &str) -> String {
    let after = after.trim_end_matches(is_space);

    let mut notes = String::with_capacity(before.len() + after.len() + annotation.len() + 4);
    for part in [before, after] {
        if !part.is_empty() {
            notes.push_str(part);
            notes.push_str("\n\n");
        }
    }
    notes.push_str(annotation);
    notes
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn is_isbn_char(c: char) -> bool {
    c.is_ascii_digit() || c == 'X' || c == 'x' || c == '-'
}

/// Shorter runs such as the "-10" of "ISBN-10" are prose, not an ISBN
fn has_isbn_digits(isbn: &str) -> bool {
    isbn.chars().filter(|c| *c != '-').count() >= 10
}

fn is_page_char(c: char) -> bool {
    !is_space(c) && c != '_' && c != ','
}

// Grammar, one phrase:
//
//   phrase  = ("isbn" [":"] [" "] isbn | "_" isbn) eol [pages] ["_"]
//   pages   = (", p." | "pages" | "page" | "p.") [":"] [" "] page-string eol [recipe]
//   recipe  = ["recipe" [":"] [" "] | ", "] digits [2 letters] eol
//   eol     = ["\r"] ["\n"]
//
// The underscore form must also close with "_", and the isbn run must hold
// at least ten digits or Xs.

fn phrase(input: &str) -> IResult<&str, Phrase<'_>> {
    let (input, underscored) = alt((value(false, isbn_keyword), value(true, tag("_"))))(input)?;
    let (input, isbn) = verify(take_while1(is_isbn_char), has_isbn_digits)(input)?;
    let (input, _) = eol(input)?;
    let (input, pages) = opt(pages_part)(input)?;
    let (input, closed) = opt(char('_'))(input)?;

    if underscored && closed.is_none() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
    }

    let phrase = match pages {
        None => Phrase::IsbnOnly { isbn },
        Some((pages, None)) => Phrase::IsbnAndPages { isbn, pages },
        Some((pages, Some(recipe))) => Phrase::IsbnPagesRecipe {
            isbn,
            pages,
            recipe,
        },
    };
    Ok((input, phrase))
}

fn isbn_keyword(input: &str) -> IResult<&str, ()> {
    value((), tuple((tag_no_case("isbn"), opt(char(':')), opt(char(' ')))))(input)
}

fn eol(input: &str) -> IResult<&str, ()> {
    value((), tuple((opt(char('\r')), opt(char('\n')))))(input)
}

fn pages_part(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = alt((
        tag_no_case(", p."),
        tag_no_case("pages"),
        tag_no_case("page"),
        tag_no_case("p."),
    ))(input)?;
    let (input, _) = opt(char(':'))(input)?;
    let (input, _) = opt(char(' '))(input)?;
    let (input, pages) = page_string(input)?;
    let (input, _) = eol(input)?;
    let (input, recipe) = opt(recipe_part)(input)?;
    Ok((input, (pages, recipe)))
}

/// Page characters, where a comma only counts when another page character
/// follows it. `p.42,52-56, 3rd` reads as pages `42,52-56` then `, 3rd`.
fn page_string(input: &str) -> IResult<&str, &str> {
    let mut end = 0;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let continues = if c == ',' {
            end > 0 && chars.peek().is_some_and(|&(_, next)| is_page_char(next))
        } else {
            is_page_char(c)
        };
        if !continues {
            break;
        }
        end = i + c.len_utf8();
    }

    if end == 0 {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::TakeWhile1)));
    }
    Ok((&input[end..], &input[..end]))
}

fn recipe_part(input: &str) -> IResult<&str, &str> {
    let recipe_keyword = tuple((tag_no_case("recipe"), opt(char(':')), opt(char(' '))));
    let (input, _) = opt(alt((value((), recipe_keyword), value((), tag(", ")))))(input)?;
    let (input, recipe) = digit1(input)?;
    let (input, _) = opt(take_while_m_n(2, 2, |c: char| c.is_ascii_alphabetic()))(input)?;
    let (input, _) = eol(input)?;
    Ok((input, recipe))
}
