//! Integration tests for generated accessors and nested traversal.

use pretty_assertions::assert_eq;
use scrutiny::accessors;
use scrutiny::prelude::*;
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

#[derive(Debug)]
struct Country {
    code: String,
}

#[derive(Debug)]
struct Address {
    street: String,
    country: Option<Country>,
}

#[derive(Debug)]
struct Company {
    name: String,
    headquarters: Option<Address>,
    offices: Vec<Address>,
}

accessors! {
    pub trait CompanyAccessors, NullableCompanyAccessors for Company {
        name: String,
        headquarters: Option<Address>,
        offices: Vec<Address>,
    }
}

accessors! {
    pub trait AddressAccessors, NullableAddressAccessors for Address {
        street: String,
        country: Option<Country>,
    }
}

accessors! {
    pub trait CountryAccessors, NullableCountryAccessors for Country {
        code: String,
    }
}

fn company_validator() -> Validator<(), Company> {
    Validator::new(|root: &Validatable<&Company>| {
        root.name().is_not_blank();

        let headquarters = root.headquarters().as_option();
        headquarters.street().is_not_blank();
        headquarters
            .country()
            .as_option()
            .code()
            .has_length_equal_to(2);

        root.offices().each(|office| {
            office.street().is_not_blank();
        });
    })
}

fn address(street: &str, code: Option<&str>) -> Address {
    Address {
        street: street.into(),
        country: code.map(|code| Country { code: code.into() }),
    }
}

#[test]
fn test_deeply_nested_paths() {
    let company = Company {
        name: "Initech".into(),
        headquarters: Some(address("", Some("USA"))),
        offices: vec![address("Main St", None), address(" ", None)],
    };

    let violations = unwrap_failure(company_validator().validate(company));
    let reported: Vec<(String, &str)> = violations
        .iter()
        .map(|v| (v.path.to_string(), v.message.as_str()))
        .collect();

    assert_eq!(
        reported,
        vec![
            ("headquarters.street".to_string(), "Must not be blank"),
            (
                "headquarters.country.code".to_string(),
                "Must contain exactly 2 characters"
            ),
            ("offices.street".to_string(), "Must not be blank"),
        ]
    );
}

#[test]
fn test_absent_branches_are_skipped() {
    let company = Company {
        name: "Initech".into(),
        headquarters: None,
        offices: Vec::new(),
    };

    assert!(company_validator().validate(company).is_success());
}
