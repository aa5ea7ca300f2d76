use log::{debug, info};

use crate::citation;
use crate::config::StandardizeConfig;
use crate::error::StandardizeError;
use crate::filename;
use crate::model::Recipe;
use crate::reference::Book;

/// A standardized copy of a recipe, and the book found in its notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standardized {
    pub recipe: Recipe,
    pub book: Option<Book>,
}

/// Rewrites recipes into their normalized form.
///
/// Standardizing is idempotent: feeding a standardized recipe back in
/// returns it unchanged.
#[derive(Debug, Clone, Default)]
pub struct Standardizer {
    config: StandardizeConfig,
}

impl Standardizer {
    pub fn new(config: StandardizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StandardizeConfig {
        &self.config
    }

    /// Standardize one recipe.
    ///
    /// The input is never modified. When the notes hold a malformed citation
    /// the error is returned and no standardized copy is produced, so the
    /// identifier and notes are never updated separately.
    pub fn standardize(&self, recipe: &Recipe) -> Result<Standardized, StandardizeError> {
        let mut standardized = recipe.clone();

        if self.config.derive_filename {
            standardized.filename = filename::from_title(&recipe.title);
        }

        let extracted = if self.config.expand_contractions {
            citation::extract_with(&recipe.notes, |book| book.expand_contractions())?
        } else {
            citation::extract(&recipe.notes)?
        };

        let Some(citation::Extracted { book, notes }) = extracted else {
            debug!("No book citation in the notes of '{}'", recipe.title);
            return Ok(Standardized {
                recipe: standardized,
                book: None,
            });
        };

        if recipe.id != book.identifier() {
            info!("Recipe '{}' now identified by {}", recipe.title, book.identifier());
        }

        standardized = standardized.with_book(&book);
        standardized.notes = notes;

        Ok(Standardized {
            recipe: standardized,
            book: Some(book),
        })
    }

    /// Standardize every recipe, leaving it to the caller whether one failure
    /// should stop the batch
    pub fn standardize_all(&self, recipes: &[Recipe]) -> Vec<Result<Standardized, StandardizeError>> {
        recipes.iter().map(|r| self.standardize(r)).collect()
    }
}

/// Standardize a recipe with the default configuration
pub fn standardize(recipe: &Recipe) -> Result<Standardized, StandardizeError> {
    Standardizer::default().standardize(recipe)
}
