use std::fmt;

use crate::error::IsbnError;

/// A validated, canonical 13-digit ISBN
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Isbn13(String);

impl Isbn13 {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn13 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isbn13 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Isbn13 {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Validate an ISBN-10 or ISBN-13, returning it in ISBN-13 form.
///
/// Spaces and hyphens are ignored and a lowercase `x` check character is
/// accepted. ISBN-10s are converted by prefixing `978` and recomputing the
/// check digit.
pub fn validate(isbn10or13: &str) -> Result<Isbn13, IsbnError> {
    let normalized: Vec<char> = isbn10or13
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_uppercase)
        .collect();

    match normalized.len() {
        10 => {
            validate_isbn10(&normalized)?;
            Ok(isbn10_to_13(&normalized))
        }
        13 => {
            validate_isbn13(&normalized)?;
            Ok(Isbn13(normalized.into_iter().collect()))
        }
        other => Err(IsbnError::InvalidLength(other)),
    }
}

fn validate_isbn10(isbn10: &[char]) -> Result<(), IsbnError> {
    let check = isbn10_check_character(&isbn10[..9]).ok_or(IsbnError::MalformedDigits)?;
    if isbn10[9] != check {
        return Err(IsbnError::IncorrectCheckDigit10);
    }
    Ok(())
}

fn validate_isbn13(isbn13: &[char]) -> Result<(), IsbnError> {
    let check = isbn13_check_digit(&isbn13[..12]).ok_or(IsbnError::MalformedDigits)?;
    if isbn13[12] != check {
        return Err(IsbnError::IncorrectCheckDigit13);
    }
    Ok(())
}

/// Check character for the first nine characters of an ISBN-10.
/// `None` when any of them is not a digit.
fn isbn10_check_character(body: &[char]) -> Option<char> {
    let mut total = 0;
    for (i, c) in body.iter().take(9).enumerate() {
        total += c.to_digit(10)? * (10 - i as u32);
    }

    match 11 - (total % 11) {
        11 => Some('0'),
        10 => Some('X'),
        n => char::from_digit(n, 10),
    }
}

/// Check digit for the first twelve digits of an ISBN-13.
/// `None` when any of them is not a digit.
fn isbn13_check_digit(body: &[char]) -> Option<char> {
    let mut total = 0;
    for (i, c) in body.iter().take(12).enumerate() {
        let weight = if i % 2 == 0 { 1 } else { 3 };
        total += c.to_digit(10)? * weight;
    }

    match 10 - (total % 10) {
        10 => Some('0'),
        n => char::from_digit(n, 10),
    }
}

fn isbn10_to_13(isbn10: &[char]) -> Isbn13 {
    let mut isbn: Vec<char> = "978".chars().chain(isbn10[..9].iter().copied()).collect();
    // The body is already known to be digits
    if let Some(check) = isbn13_check_digit(&isbn) {
        isbn.push(check);
    }
    Isbn13(isbn.into_iter().collect())
}
