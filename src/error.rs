use thiserror::Error;

/// Errors raised while validating an ISBN-10 or ISBN-13
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsbnError {
    /// Neither 10 nor 13 characters once spaces and hyphens are removed
    #[error("An ISBN must have 10 or 13 characters, found {0}")]
    InvalidLength(usize),

    /// A weighted position holds something other than a digit
    #[error("The ISBN contains non-digit characters where digits are required")]
    MalformedDigits,

    /// Well-formed ISBN-10 whose check character does not match
    #[error("The given ISBN-10 has an incorrect check digit")]
    IncorrectCheckDigit10,

    /// Well-formed ISBN-13 whose check digit does not match
    #[error("The given ISBN-13 has an incorrect check digit")]
    IncorrectCheckDigit13,
}

/// Errors raised while parsing a page reference string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Empty page token, or more than two tokens in one range
    #[error("Invalid page range: {0:?}")]
    InvalidRange(String),

    /// Bad percent escape, or escaped bytes that are not UTF-8
    #[error("Invalid page encoding: {0:?}")]
    InvalidPageEncoding(String),
}

/// Errors raised while decoding a book reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The identifier does not start with `urn:isbn:`
    #[error("Not an ISBN URN: {0:?}")]
    NotAnIsbnUrn(String),

    #[error(transparent)]
    Isbn(#[from] IsbnError),

    #[error(transparent)]
    Pages(#[from] PageError),

    /// Recipe index that is not a non-negative integer
    #[error("Invalid recipe index: {0:?}")]
    InvalidRecipeIndex(String),
}

/// Errors raised by the note citation extractor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CitationError {
    /// The citation grammar matched, but an embedded value failed to validate
    #[error("Citation in notes is malformed: {0}")]
    CitationMalformed(#[source] ReferenceError),
}

impl CitationError {
    /// The validation failure underneath the citation
    pub fn cause(&self) -> &ReferenceError {
        match self {
            CitationError::CitationMalformed(cause) => cause,
        }
    }
}

/// Errors raised while reading loosely formatted recipe fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Invalid yield: {0:?}")]
    InvalidYield(String),

    #[error("Invalid duration: {0:?}")]
    InvalidDuration(String),
}

/// Errors that can occur while standardizing recipes
#[derive(Error, Debug)]
pub enum StandardizeError {
    /// Notes carry a citation that could not be recovered
    #[error(transparent)]
    Citation(#[from] CitationError),

    /// The recipe record could not be read or written as JSON
    #[error("Recipe JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
