#![allow(dead_code)]

use docschema::{Config, Document, Error, Marshaller, Options, Unknown};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Document, Serialize, Deserialize)]
struct Product {
    id: u64,
    name: String,
    price: f64,
    #[document(skip)]
    #[serde(default)]
    cached_html: String,
}

fn product(id: u64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: 9.5,
        cached_html: "<p>cached</p>".to_string(),
    }
}

#[test]
fn reuses_generated_schemas() {
    let marshaller = Marshaller::builder().register::<Product>().build();

    let first = marshaller.schema("Product").unwrap();
    let second = marshaller.schema("Product").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        first.field_names().collect::<Vec<_>>(),
        vec!["id", "name", "price", "cached_html"]
    );
}

#[test]
fn fails_for_unregistered_documents() {
    let marshaller = Marshaller::builder().build();

    assert!(matches!(
        marshaller.dump(&product(1, "Pen")),
        Err(Error::UnknownDocument(name)) if name == "Product"
    ));
    assert!(matches!(
        marshaller.schema("Product"),
        Err(Error::UnknownDocument(_))
    ));
}

#[test]
fn dumps_many_documents_and_reports_failures_by_position() {
    let marshaller = Marshaller::builder().register::<Product>().build();

    let dumped = marshaller
        .dump_many(&[product(1, "Pen"), product(2, "Ink")])
        .unwrap();
    assert_eq!(
        dumped,
        vec![
            json!({ "id": 1, "name": "Pen", "price": 9.5 }),
            json!({ "id": 2, "name": "Ink", "price": 9.5 }),
        ]
    );

    let mut broken = product(3, "Nib");
    broken.price = f64::NAN;

    let Err(Error::Validation(errors)) =
        marshaller.dump_many(&[product(1, "Pen"), broken])
    else {
        panic!("expected a validation error");
    };

    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(
        errors.to_json(),
        json!({ "1": { "price": ["Not a valid number."] } })
    );
}

#[test]
fn restricts_schemas_with_options() {
    let marshaller = Marshaller::builder().register::<Product>().build();
    let schema = marshaller
        .schema_with("Product", &Options::exclude(["price"]))
        .unwrap();

    let data = schema
        .dump(
            &docschema::value::to_native(&product(1, "Pen")).unwrap(),
            &mut marshaller.context(),
        )
        .unwrap();

    assert_eq!(data, json!({ "id": 1, "name": "Pen" }));
}

#[test]
fn loads_with_the_configured_unknown_field_policy() {
    let data = json!({ "id": 1, "name": "Pen", "price": 2, "color": "blue" });

    let lenient = Marshaller::builder().register::<Product>().build();
    assert_eq!(
        lenient.load::<Product>(&data).unwrap(),
        Product {
            id: 1,
            name: "Pen".to_string(),
            price: 2.0,
            cached_html: String::new(),
        }
    );

    let strict = Marshaller::builder()
        .register::<Product>()
        .config(Config {
            unknown: Unknown::Raise,
            ..Config::default()
        })
        .build();
    assert_eq!(
        strict.load::<Product>(&data).unwrap_err().to_string(),
        "color: Unknown field."
    );
}

#[test]
fn config_can_be_deserialized() {
    let config: Config =
        serde_json::from_value(json!({ "max_depth": 4, "unknown": "raise" })).unwrap();

    assert_eq!(config.max_depth, 4);
    assert_eq!(config.unknown, Unknown::Raise);
    assert!(!config.skip_null);
}
