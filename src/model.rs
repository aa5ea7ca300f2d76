use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::duration::guess_duration;
use crate::error::{FieldError, ReferenceError};
use crate::reference::{Book, Pages};

/// One `.melarecipe` record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recipe {
    /// File stem the record is stored under; not part of the JSON
    #[serde(skip)]
    pub filename: String,
    pub id: String,
    pub title: String,
    pub link: String,
    pub text: String,
    pub ingredients: SectionedSequence,
    pub instructions: SectionedSequence,
    pub nutrition: String,
    pub categories: Vec<String>,
    pub notes: String,
    /// Base64 encoded images, passed through untouched
    pub images: Vec<String>,
    #[serde(rename = "yield")]
    pub yield_: PeopleCount,
    pub prep_time: MaybeDuration,
    pub cook_time: MaybeDuration,
    pub total_time: MaybeDuration,
}

impl Recipe {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The book this recipe is identified by, if its `id` is an ISBN URN
    pub fn book(&self) -> Option<Book> {
        match Book::parse_identifier(&self.id) {
            Ok(book) => Some(book),
            Err(ReferenceError::NotAnIsbnUrn(_)) => None,
            Err(e) => {
                warn!("Recipe '{}' has an unreadable book identifier: {}", self.title, e);
                None
            }
        }
    }

    /// A copy of this recipe identified by `book`
    pub fn with_book(&self, book: &Book) -> Recipe {
        let id = book.identifier();
        debug!("Identifying '{}' as {}", self.title, id);
        Recipe {
            id,
            ..self.clone()
        }
    }

    /// A copy of this recipe identified by a book built from caller values
    pub fn set_book(
        &self,
        isbn10or13: &str,
        pages: Option<Pages>,
        recipe_index: u64,
    ) -> Result<Recipe, ReferenceError> {
        let book = Book::from_parts(isbn10or13, pages, recipe_index)?;
        Ok(self.with_book(&book))
    }
}

/// A run of lines split into sections by markdown-style `# Heading` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionedSequence(pub String);

/// Lines under one heading. The first section has no heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: Option<String>,
    pub lines: Vec<String>,
}

impl SectionedSequence {
    pub fn sections(&self) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();

        for line in self.0.split('\n') {
            if let Some(heading) = heading(line) {
                sections.push(Section {
                    heading: Some(heading.to_string()),
                    lines: Vec::new(),
                });
                continue;
            }

            match sections.last_mut() {
                Some(section) => section.lines.push(line.to_string()),
                None => sections.push(Section {
                    heading: None,
                    lines: vec![line.to_string()],
                }),
            }
        }

        sections
    }
}

fn heading(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = trimmed.trim_start_matches('#');
    if rest.len() == trimmed.len() || !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let title = rest.trim();
    (!title.is_empty()).then_some(title)
}

/// Number of people a recipe serves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeopleCount(pub String);

impl PeopleCount {
    pub fn parse(&self) -> Result<u64, FieldError> {
        self.0
            .trim()
            .parse()
            .map_err(|_| FieldError::InvalidYield(self.0.clone()))
    }
}

/// A free-text duration, possibly empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaybeDuration(pub String);

impl MaybeDuration {
    pub fn parse(&self) -> Result<Option<Duration>, FieldError> {
        guess_duration(&self.0)
    }
}
