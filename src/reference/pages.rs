use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::PageError;

/// Bytes escaped inside a page token. Keeps `-`, `,`, `_`, `&`, `#`, `=` and
/// whitespace out of serialized tokens so ranges, fragments and note
/// annotations can be split unambiguously.
const PAGE_TOKEN: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'~');

/// One cited page or span of pages. Tokens are labels, not numbers:
/// "vii" or "3-2" are legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRange {
    start: String,
    end: Option<String>,
}

impl PageRange {
    /// A single page
    pub fn page(start: impl Into<String>) -> Self {
        PageRange {
            start: start.into(),
            end: None,
        }
    }

    /// A span from `start` to `end`
    pub fn span(start: impl Into<String>, end: impl Into<String>) -> Self {
        PageRange {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    fn parse(range: &str) -> Result<Self, PageError> {
        let tokens: Vec<&str> = range.split('-').collect();
        if tokens.len() > 2 {
            return Err(PageError::InvalidRange(range.to_string()));
        }

        let mut decoded = tokens.into_iter().map(decode_token);
        let start = match decoded.next() {
            Some(token) => token?,
            None => return Err(PageError::InvalidRange(range.to_string())),
        };
        let end = decoded.next().transpose()?;

        Ok(PageRange { start, end })
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", utf8_percent_encode(&self.start, PAGE_TOKEN))?;
        if let Some(end) = &self.end {
            write!(f, "-{}", utf8_percent_encode(end, PAGE_TOKEN))?;
        }
        Ok(())
    }
}

fn decode_token(token: &str) -> Result<String, PageError> {
    if token.is_empty() {
        return Err(PageError::InvalidRange(token.to_string()));
    }

    let bytes = token.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
        {
            return Err(PageError::InvalidPageEncoding(token.to_string()));
        }
    }

    percent_decode_str(token)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| PageError::InvalidPageEncoding(token.to_string()))
}

/// Ordered page references, in citation order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pages(Vec<PageRange>);

impl Pages {
    pub fn new(ranges: Vec<PageRange>) -> Self {
        Pages(ranges)
    }

    /// Parse a comma-separated list of `<token>[-<token>]` ranges
    pub fn parse(pages: &str) -> Result<Self, PageError> {
        pages
            .split(',')
            .map(PageRange::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Pages)
    }

    pub fn ranges(&self) -> &[PageRange] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageRange> {
        self.0.iter()
    }

    /// Expand contracted spans such as "145-6" into "145-146".
    ///
    /// Only spans of two plain integers whose end is smaller than the start
    /// are touched; everything else is kept as written.
    pub fn expand_contractions(&self) -> Pages {
        Pages(self.0.iter().map(expand_range).collect())
    }
}

fn expand_range(range: &PageRange) -> PageRange {
    let Some(end) = range.end() else {
        return range.clone();
    };
    let (Some(start_n), Some(end_n)) = (plain_integer(range.start()), plain_integer(end)) else {
        return range.clone();
    };
    if end_n >= start_n {
        return range.clone();
    }

    match contracted_end(start_n, end_n) {
        Some(expanded) => PageRange::span(range.start(), expanded.to_string()),
        None => range.clone(),
    }
}

/// The full end page, or `None` when it does not fit in a `u64`
fn contracted_end(start: u64, end: u64) -> Option<u64> {
    let divisor = 10u64.checked_pow(decimal_digits(end))?;
    (start / divisor).checked_mul(divisor)?.checked_add(end)
}

fn plain_integer(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn decimal_digits(mut n: u64) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

impl FromStr for Pages {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pages::parse(s)
    }
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

impl From<Vec<PageRange>> for Pages {
    fn from(ranges: Vec<PageRange>) -> Self {
        Pages(ranges)
    }
}

impl<'a> IntoIterator for &'a Pages {
    type Item = &'a PageRange;
    type IntoIter = std::slice::Iter<'a, PageRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
