#![allow(dead_code)]

use docschema::{types::ObjectId, Document, Error, Marshaller};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Document, Serialize, Deserialize)]
#[document(embedded)]
struct Translation {
    title: String,
    body: Option<String>,
}

#[derive(Debug, PartialEq, Document, Serialize, Deserialize)]
struct Article {
    id: ObjectId,
    translations: BTreeMap<String, Translation>,
    counters: BTreeMap<String, u32>,
}

fn marshaller() -> Marshaller {
    Marshaller::builder()
        .register::<Translation>()
        .register::<Article>()
        .build()
}

#[test]
fn round_trips_maps_of_embedded_documents() {
    let marshaller = marshaller();
    let article = Article {
        id: ObjectId::new(),
        translations: BTreeMap::from([
            (
                "en".to_string(),
                Translation {
                    title: "Hello".to_string(),
                    body: None,
                },
            ),
            (
                "es".to_string(),
                Translation {
                    title: "Hola".to_string(),
                    body: Some("Qué tal".to_string()),
                },
            ),
        ]),
        counters: BTreeMap::from([("views".to_string(), 3)]),
    };

    let data = marshaller.dump(&article).unwrap();
    assert_eq!(
        data,
        json!({
            "id": article.id.to_string(),
            "translations": {
                "en": { "title": "Hello", "body": null },
                "es": { "title": "Hola", "body": "Qué tal" },
            },
            "counters": { "views": 3 },
        })
    );

    assert_eq!(marshaller.load::<Article>(&data).unwrap(), article);
}

#[test]
fn reports_every_failing_key() {
    let marshaller = marshaller();

    let Err(Error::Validation(errors)) = marshaller.load::<Article>(&json!({
        "id": ObjectId::new().to_string(),
        "translations": {
            "en": { "title": "Hello" },
            "fr": { "body": "Bonjour" },
            "de": "Hallo",
        },
        "counters": { "views": 1 },
    })) else {
        panic!("expected a validation error");
    };

    assert_eq!(
        errors.to_json(),
        json!({
            "translations": {
                "de": { "_schema": ["Not a valid mapping."] },
                "fr": { "title": ["Missing data for required field."] },
            }
        })
    );
}

#[test]
fn rejects_values_that_are_not_maps() {
    let marshaller = marshaller();

    let Err(Error::Validation(errors)) = marshaller.load::<Article>(&json!({
        "id": ObjectId::new().to_string(),
        "translations": {},
        "counters": [1, 2],
    })) else {
        panic!("expected a validation error");
    };

    assert!(matches!(errors.get("counters"), Some(Error::Invalid("mapping"))));
}
