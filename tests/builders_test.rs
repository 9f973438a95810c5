//! Integration tests for the constraint builders.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use regex::Regex;
use scrutiny::prelude::*;
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

#[derive(Debug)]
struct Product {
    sku: String,
    name: String,
    tags: Vec<String>,
    attributes: HashMap<String, String>,
    price: f64,
    stock: i32,
    discount: Option<u8>,
    status: String,
}

fn product() -> Product {
    Product {
        sku: "SKU-0042".into(),
        name: "Teapot".into(),
        tags: vec!["kitchen".into()],
        attributes: HashMap::from([("color".to_string(), "white".to_string())]),
        price: 19.5,
        stock: 3,
        discount: None,
        status: "active".into(),
    }
}

fn product_validator() -> Validator<(), Product> {
    Validator::new(|root: &Validatable<&Product>| {
        let sku_pattern = Regex::new(r"^SKU-\d{4}$").unwrap();

        let sku = root.field("sku", |p| p.sku.as_str());
        sku.matches(&sku_pattern);
        sku.starts_with("SKU-");

        root.field("name", |p| &p.name).has_length_between(2..=40);
        root.field("tags", |p| &p.tags).is_not_empty();
        root.field("tags", |p| &p.tags).has_length_at_most(5);
        root.field("attributes", |p| &p.attributes).has_length_lower_than(10);
        root.field("price", |p| p.price).is_positive();
        root.field("stock", |p| p.stock).is_greater_than_or_equal_to(0);
        root.field("discount", |p| p.discount).is_between(1..=90);
        root.field("status", |p| p.status.as_str())
            .is_not_equal_to("deleted");
    })
}

#[test]
fn test_valid_product() {
    assert!(product_validator().validate(product()).is_success());
}

#[test]
fn test_every_builder_reports_its_message() {
    let broken = Product {
        sku: "0042".into(),
        name: "T".into(),
        tags: Vec::new(),
        attributes: (0..12).map(|i| (i.to_string(), String::new())).collect(),
        price: 0.0,
        stock: -4,
        discount: Some(95),
        status: "deleted".into(),
    };

    let violations = unwrap_failure(product_validator().validate(broken));
    let reported: Vec<(String, &str)> = violations
        .iter()
        .map(|v| (v.path.to_string(), v.message.as_str()))
        .collect();

    assert_eq!(
        reported,
        vec![
            ("sku".to_string(), r"Must match the following pattern: ^SKU-\d{4}$"),
            ("sku".to_string(), "Must start with \"SKU-\""),
            ("name".to_string(), "Must contain between 2 and 40 characters"),
            ("tags".to_string(), "Must not be empty"),
            ("attributes".to_string(), "The number of items must be lower than 10"),
            ("price".to_string(), "Must be positive"),
            ("stock".to_string(), "Must be greater than or equal to 0"),
            ("discount".to_string(), "Must be between 1 and 90"),
            ("status".to_string(), "Must be different from \"deleted\""),
        ]
    );
}

#[test]
fn test_builder_outcome_is_usable_as_condition() {
    let validator = Validator::new(|root: &Validatable<&Product>| {
        let tags = root.field("tags", |p| &p.tags);
        if tags.is_not_empty().satisfied() {
            tags.iter().for_each(|tag| {
                tag.map(|t| t.as_str()).has_length_at_least(3);
            });
        }
    });

    let mut short_tag = product();
    short_tag.tags = vec!["ok".into(), "kitchen".into()];

    let violations = unwrap_failure(validator.validate(short_tag));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.first().path.to_string(), "tags");
    assert_eq!(violations.first().message, "Must contain at least 3 characters");
}
