use mela_recipes::{
    standardize, standardize_json, Book, CitationError, IsbnError, Pages, Recipe,
    ReferenceError, StandardizeConfig, StandardizeError,
};

fn recipe_with_notes(notes: &str) -> Recipe {
    Recipe {
        notes: notes.to_string(),
        ..Default::default()
    }
}

fn book(isbn: &str, pages: Option<&str>, index: u64) -> Book {
    Book::from_parts(isbn, pages.map(|p| Pages::parse(p).unwrap()), index).unwrap()
}

#[test]
fn test_standardize_notes() {
    let cases = [
        (
            "Just ISBN",
            "ISBN: 9782019453411",
            "_9782019453411_",
            Some(book("9782019453411", None, 0)),
        ),
        (
            "ISBN and pages",
            "isbn: 978-3-16-148410-0\npages: 52",
            "_9783161484100, p.52_",
            Some(book("9783161484100", Some("52"), 0)),
        ),
        (
            "Page",
            "isbn 978-3-16-148410-0\npage 52",
            "_9783161484100, p.52_",
            Some(book("9783161484100", Some("52"), 0)),
        ),
        (
            "ISBN, pages, recipe",
            "ISBN 978-3-16-148410-0\nPages 52\nRecipe 2",
            "_9783161484100, p.52, 2nd_",
            Some(book("9783161484100", Some("52"), 2)),
        ),
        (
            "Recipe, no pages",
            "ISBN: 978-3-16-148410-0\nRecipe: 2",
            "Recipe: 2\n\n_9783161484100_",
            Some(book("9783161484100", None, 0)),
        ),
        (
            "Text before",
            "Some other note.\n\nISBN: 9782019453411",
            "Some other note.\n\n_9782019453411_",
            Some(book("9782019453411", None, 0)),
        ),
        (
            "Text after",
            "ISBN: 9782019453411\n\nSome other note.",
            "Some other note.\n\n_9782019453411_",
            Some(book("9782019453411", None, 0)),
        ),
        (
            "Text both sides",
            "Something before.\n\nISBN: 9782019453411\n\n\nSomething after.",
            "Something before.\n\nSomething after.\n\n_9782019453411_",
            Some(book("9782019453411", None, 0)),
        ),
        (
            "Multiple page ranges",
            "ISBN 9783161484100\npages 42,52-56\nrecipe 3",
            "_9783161484100, p.42,52-56, 3rd_",
            Some(book("9783161484100", Some("42,52-56"), 3)),
        ),
        (
            "Hyphenated page label",
            "ISBN 9783161484100\np. 3%2D2",
            "_9783161484100, p.3%2D2_",
            Some(book("9783161484100", Some("3%2D2"), 0)),
        ),
        (
            "Already standardized",
            "Serve cold.\n\n_9783161484100, p.52, 2nd_",
            "Serve cold.\n\n_9783161484100, p.52, 2nd_",
            Some(book("9783161484100", Some("52"), 2)),
        ),
        (
            "No details",
            "Some note mentioning an ISBN and pages and recipe.",
            "Some note mentioning an ISBN and pages and recipe.",
            None,
        ),
    ];

    for (name, notes, want_notes, want_book) in cases {
        let out = standardize(&recipe_with_notes(notes)).unwrap();

        assert_eq!(out.recipe.notes, want_notes, "{}", name);
        assert_eq!(out.book, want_book, "{}", name);
        assert_eq!(out.recipe.book(), want_book, "{}", name);
    }
}

#[test]
fn test_standardize_twice_is_the_same_as_once() {
    for notes in [
        "ISBN: 9782019453411",
        "C Notes\nISBN: 0198526636\npage 42\nrecipe: 3",
        "Something before.\n\nISBN: 9782019453411\n\n\nSomething after.\n\n",
        "ISBN: 978-3-16-148410-0\nRecipe: 2",
        "isbn 019852661x\npages 3%2D2-3%2D4,vii",
        "ISBN 9783161484100\n\nThe ISBN-10 edition differs.",
        "The ISBN-10 printing.\nisbn: 0198526636\npage 42",
        "No citation at all",
    ] {
        let once = standardize(&recipe_with_notes(notes)).unwrap();
        let twice = standardize(&once.recipe).unwrap();

        assert_eq!(twice.recipe.id, once.recipe.id, "notes {:?}", notes);
        assert_eq!(twice.recipe.notes, once.recipe.notes, "notes {:?}", notes);
        assert_eq!(twice.book, once.book, "notes {:?}", notes);
    }
}

#[test]
fn test_malformed_citation_leaves_recipe_untouched() {
    let original = Recipe {
        id: "urn:isbn:9782019453411".to_string(),
        notes: "Lovely.\nISBN 9783161484100\npages 52-56-60".to_string(),
        ..Default::default()
    };

    let err = standardize(&original).unwrap_err();
    assert!(matches!(
        err,
        StandardizeError::Citation(CitationError::CitationMalformed(ReferenceError::Pages(_)))
    ));
    assert_eq!(original.id, "urn:isbn:9782019453411");
    assert_eq!(original.notes, "Lovely.\nISBN 9783161484100\npages 52-56-60");
}

#[test]
fn test_error_source_reaches_the_isbn_layer() {
    use std::error::Error;

    let err = standardize(&recipe_with_notes("ISBN 0198526637")).unwrap_err();
    let source = err
        .source()
        .and_then(|e| e.downcast_ref::<ReferenceError>())
        .unwrap();
    assert_eq!(source, &ReferenceError::Isbn(IsbnError::IncorrectCheckDigit10));
}

#[test]
fn test_standardize_fixture_json() {
    let json = r#"{
        "id": "c",
        "title": "C title",
        "link": "Fresh & Easy",
        "text": "C text",
        "ingredients": "C ingredients",
        "instructions": "C instructions",
        "nutrition": "C nutrition",
        "categories": ["c", "cc"],
        "notes": "C Notes\nISBN: 0714863602\npage 42\nrecipe: 3",
        "images": [],
        "yield": "3",
        "prepTime": "3 hours",
        "cookTime": "30 mins",
        "totalTime": ""
    }"#;

    let output = standardize_json(json, &StandardizeConfig::default()).unwrap();
    let recipe = Recipe::from_json(&output).unwrap();

    assert_eq!(recipe.id, "urn:isbn:9780714863603#pages=42&recipe=3");
    assert_eq!(recipe.notes, "C Notes\n\n_9780714863603, p.42, 3rd_");
    assert_eq!(recipe.title, "C title");
    assert_eq!(recipe.link, "Fresh & Easy");
    assert_eq!(recipe.categories, vec!["c", "cc"]);
    assert_eq!(recipe.yield_.parse(), Ok(3));
    assert_eq!(
        recipe.prep_time.parse(),
        Ok(Some(std::time::Duration::from_secs(3 * 3600)))
    );
    assert_eq!(
        recipe.cook_time.parse(),
        Ok(Some(std::time::Duration::from_secs(30 * 60)))
    );
    assert_eq!(recipe.total_time.parse(), Ok(None));
}

#[test]
fn test_standardize_json_rejects_invalid_json() {
    let err = standardize_json("{not json", &StandardizeConfig::default()).unwrap_err();
    assert!(matches!(err, StandardizeError::Json(_)));
}
