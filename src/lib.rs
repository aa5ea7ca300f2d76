pub mod citation;
pub mod config;
pub mod duration;
pub mod error;
pub mod filename;
pub mod model;
pub mod reference;
pub mod standardize;

pub use crate::config::StandardizeConfig;
pub use error::{
    CitationError, FieldError, IsbnError, PageError, ReferenceError, StandardizeError,
};
pub use model::{MaybeDuration, PeopleCount, Recipe, Section, SectionedSequence};
pub use reference::{ordinal, validate_isbn, Book, Isbn13, PageRange, Pages};
pub use standardize::{standardize, Standardized, Standardizer};

/// Standardize a single `.melarecipe` JSON document, returning the updated JSON
pub fn standardize_json(json: &str, config: &StandardizeConfig) -> Result<String, StandardizeError> {
    let recipe = Recipe::from_json(json)?;
    let standardized = Standardizer::new(config.clone()).standardize(&recipe)?;
    Ok(standardized.recipe.to_json()?)
}
