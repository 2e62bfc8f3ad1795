#![allow(dead_code)]

use docschema::{Config, Document, Error, Marshaller};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Document, Serialize, Deserialize)]
struct Category {
    id: u32,
    name: String,
    parent: Option<Box<Parent>>,
}

#[derive(Debug, Document, Serialize, Deserialize)]
#[document(embedded)]
struct Parent {
    name: String,
    parent: Option<Box<Parent>>,
}

fn chain(depth: usize) -> Option<Box<Parent>> {
    (0..depth).fold(None, |parent, level| {
        Some(Box::new(Parent {
            name: format!("level {level}"),
            parent,
        }))
    })
}

fn marshaller(max_depth: usize) -> Marshaller {
    Marshaller::builder()
        .register::<Category>()
        .register::<Parent>()
        .config(Config {
            max_depth,
            ..Config::default()
        })
        .build()
}

#[test]
fn converts_documents_within_the_limit() {
    let category = Category {
        id: 1,
        name: "Rust".to_string(),
        parent: chain(3),
    };

    let data = marshaller(3).dump(&category).unwrap();
    assert_eq!(
        data["parent"]["parent"]["parent"],
        json!({ "name": "level 0", "parent": null })
    );
    assert!(marshaller(3).load::<Category>(&data).is_ok());
}

#[test]
fn refuses_to_go_deeper_than_the_limit() {
    let category = Category {
        id: 1,
        name: "Rust".to_string(),
        parent: chain(2),
    };

    let Err(Error::Validation(errors)) = marshaller(1).dump(&category) else {
        panic!("expected a validation error");
    };

    assert_eq!(
        errors.to_json(),
        json!({
            "parent": {
                "parent": ["Documents are nested deeper than the limit of 1."]
            }
        })
    );
}
