#![allow(dead_code)]

use docschema::{
    store::MemoryStore,
    types::{ObjectId, Reference},
    Document, Error, Marshaller,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Document, Serialize, Deserialize)]
struct User {
    id: ObjectId,
    name: String,
}

#[derive(Debug, Document, Serialize, Deserialize)]
struct Post {
    id: u64,
    title: String,
    author: Reference<User>,
    editor: Option<Reference<User>>,
}

fn setup() -> (Marshaller, User) {
    let user = User {
        id: ObjectId::new(),
        name: "Miguel".to_string(),
    };

    let store = Arc::new(MemoryStore::new());
    store.insert(&user).unwrap();

    let marshaller = Marshaller::builder()
        .register::<User>()
        .register::<Post>()
        .store(store)
        .build();

    (marshaller, user)
}

#[test]
fn dumps_references_as_their_key() {
    let (marshaller, user) = setup();
    let post = Post {
        id: 1,
        title: "Hello".to_string(),
        author: Reference::from(user.clone()),
        editor: None,
    };

    assert_eq!(
        marshaller.dump(&post).unwrap(),
        json!({
            "id": 1,
            "title": "Hello",
            "author": user.id.to_string(),
            "editor": null,
        })
    );
}

#[test]
fn loads_references_from_the_store() {
    let (marshaller, user) = setup();

    let post: Post = marshaller
        .load(&json!({ "id": 1, "title": "Hello", "author": user.id.to_string() }))
        .unwrap();

    assert_eq!(post.author.key(), &user.id);
    assert_eq!(post.author.document(), Some(&user));
    assert!(post.editor.is_none());
}

#[test]
fn reports_missing_and_malformed_references() {
    let (marshaller, _) = setup();
    let missing = ObjectId::new().to_string();

    let Err(Error::Validation(errors)) = marshaller.load::<Post>(&json!({
        "id": 1,
        "title": "Hello",
        "author": missing,
        "editor": "not-an-id",
    })) else {
        panic!("expected a validation error");
    };

    assert_eq!(
        errors.to_json(),
        json!({
            "author": [format!("unknown `User` document with id `{missing}`")],
            "editor": ["invalid id `not-an-id`"],
        })
    );
}

#[test]
fn requires_the_reference_when_not_optional() {
    let (marshaller, _) = setup();

    let Err(Error::Validation(errors)) =
        marshaller.load::<Post>(&json!({ "id": 1, "title": "Hello", "author": null }))
    else {
        panic!("expected a validation error");
    };

    assert!(matches!(errors.get("author"), Some(Error::Null)));
}
