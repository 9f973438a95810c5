//! Integration tests for conditional constraints and structured declaration blocks.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use scrutiny::prelude::*;
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

fn reported(violations: &ConstraintViolationSet) -> Vec<(String, String)> {
    violations
        .iter()
        .map(|v| (v.path.to_string(), v.message.clone()))
        .collect()
}

#[derive(Debug)]
struct Registration {
    handle: String,
}

struct UserRepository {
    taken: Vec<&'static str>,
}

impl UserRepository {
    fn exists_by_handle(&self, handle: &str) -> bool {
        self.taken.contains(&handle)
    }
}

fn registration_validator() -> Validator<UserRepository, Registration> {
    Validator::with_context(|repository: &UserRepository, root: &Validatable<&Registration>| {
        let handle = root.field("handle", |r| r.handle.as_str());
        let is_valid_handle = handle.has_length_at_least(5).satisfied();
        if is_valid_handle {
            handle
                .constrain(|h| !repository.exists_by_handle(h))
                .otherwise(|| "This handle is already taken");
        }
    })
}

fn repository() -> UserRepository {
    UserRepository {
        taken: vec!["n", "steve"],
    }
}

#[test]
fn test_short_handle_skips_repository_check() {
    let runner = registration_validator().bind(repository());

    let violations = unwrap_failure(runner.validate(Registration {
        handle: "n".into(),
    }));
    assert_eq!(
        reported(&violations),
        vec![(
            "handle".to_string(),
            "Must contain at least 5 characters".to_string()
        )]
    );
}

#[test]
fn test_taken_handle_is_reported() {
    let runner = registration_validator().bind(repository());

    let violations = unwrap_failure(runner.validate(Registration {
        handle: "steve".into(),
    }));
    assert_eq!(
        reported(&violations),
        vec![(
            "handle".to_string(),
            "This handle is already taken".to_string()
        )]
    );
}

#[test]
fn test_free_handle_passes() {
    let runner = registration_validator().bind(repository());
    let result = runner.validate(Registration {
        handle: "ada_lovelace".into(),
    });

    assert_eq!(result.into_result().unwrap().handle, "ada_lovelace");
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Book {
    title: String,
}

#[derive(Debug)]
struct Library {
    books: BTreeSet<Book>,
    maximum_capacity: usize,
}

fn library_validator() -> Validator<(), Library> {
    Validator::new(|root: &Validatable<&Library>| {
        let books = root.field("books", |l| &l.books);

        for book in books.iter() {
            book.field("title", |b| b.title.as_str()).is_not_empty();
        }
        books.each(|book| {
            book.field("title", |b| b.title.as_str()).is_not_empty();
        });

        let max = root.field("maximum_capacity", |l| l.maximum_capacity).get();
        if max > 0 {
            books.has_length_at_most(max);
        }
    })
}

#[test]
fn test_library_with_zero_capacity_only_checks_titles() {
    let library = Library {
        books: [Book {
            title: String::new(),
        }]
        .into_iter()
        .collect(),
        maximum_capacity: 0,
    };

    let violations = unwrap_failure(library_validator().validate(library));
    assert_eq!(
        reported(&violations),
        vec![("books.title".to_string(), "Must not be empty".to_string())]
    );
}

#[test]
fn test_builder_repeated_across_loops_reports_once() {
    let library = Library {
        books: ["", "Emma"]
            .into_iter()
            .map(|title| Book {
                title: title.into(),
            })
            .collect(),
        maximum_capacity: 0,
    };

    let violations = unwrap_failure(library_validator().validate(library));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.first().path.to_string(), "books.title");
}

#[test]
fn test_library_over_capacity() {
    let library = Library {
        books: ["Dune", "Emma", "Ulysses"]
            .into_iter()
            .map(|title| Book {
                title: title.into(),
            })
            .collect(),
        maximum_capacity: 2,
    };

    let violations = unwrap_failure(library_validator().validate(library));
    assert_eq!(
        reported(&violations),
        vec![(
            "books".to_string(),
            "The number of items must be lower than or equal to 2".to_string()
        )]
    );
}

#[test]
fn test_constrain_if_present() {
    #[derive(Debug)]
    struct Profile {
        website: Option<String>,
    }

    let validator = Validator::new(|root: &Validatable<&Profile>| {
        root.field("website", |p| p.website.as_deref())
            .constrain_if_present(|url| url.starts_with("https://"))
            .otherwise(|| "Must use https");
    });

    assert!(validator.validate(Profile { website: None }).is_success());
    assert!(validator
        .validate(Profile {
            website: Some("https://example.org".into())
        })
        .is_success());

    let violations = unwrap_failure(validator.validate(Profile {
        website: Some("http://example.org".into()),
    }));
    assert_eq!(
        reported(&violations),
        vec![("website".to_string(), "Must use https".to_string())]
    );
}
