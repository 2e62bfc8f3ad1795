#![allow(dead_code)]

use docschema::{
    types::{GenericEmbedded, GenericReference, ObjectId, Reference},
    Document, FieldKind, FieldSpec, FieldType, TypeRef,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Document, Serialize, Deserialize)]
struct Author {
    id: ObjectId,
    name: String,
}

#[derive(Debug, Document, Serialize, Deserialize)]
#[document(embedded)]
struct Comment {
    body: String,
}

#[test]
fn describes_every_field_in_order() {
    #[derive(Debug, Document, Serialize, Deserialize)]
    struct Post {
        id: ObjectId,
        title: String,
        views: u64,
        rating: Option<f32>,
        published: bool,
        tags: Vec<String>,
        metadata: serde_json::Value,
        token: uuid::Uuid,
    }

    let descriptor = Post::descriptor();

    assert_eq!(
        descriptor.fields,
        vec![
            FieldSpec::new("id", FieldKind::ObjectId, true),
            FieldSpec::new("title", FieldKind::String, true),
            FieldSpec::new("views", FieldKind::Integer, true),
            FieldSpec::new("rating", FieldKind::Float, false),
            FieldSpec::new("published", FieldKind::Boolean, true),
            FieldSpec::new("tags", FieldKind::List(Box::new(FieldKind::String)), true),
            FieldSpec::new("metadata", FieldKind::Dict, true),
            FieldSpec::new("token", FieldKind::Uuid, true),
        ]
    );
    assert_eq!(descriptor.key_kind(), Some(&FieldKind::ObjectId));
}

#[test]
fn describes_mapper_field_types() {
    #[derive(Debug, Document, Serialize, Deserialize)]
    struct Post {
        id: ObjectId,
        author: Reference<Author>,
        pinned: Option<GenericReference>,
        attachment: Option<GenericEmbedded>,
        comments: HashMap<String, Comment>,
        first: Comment,
    }

    let descriptor = Post::descriptor();
    let kind = |name: &str| descriptor.get(name).map(|field| field.kind.clone());

    assert_eq!(kind("author"), Some(FieldKind::Reference(TypeRef::named("Author"))));
    assert_eq!(kind("pinned"), Some(FieldKind::GenericReference));
    assert_eq!(kind("attachment"), Some(FieldKind::GenericEmbedded));
    assert_eq!(
        kind("comments"),
        Some(FieldKind::Map(Box::new(FieldKind::Embedded(TypeRef::named("Comment")))))
    );
    assert_eq!(kind("first"), Some(FieldKind::Embedded(TypeRef::named("Comment"))));
    assert!(!descriptor.get("pinned").unwrap().required);
}

#[test]
fn skipped_fields_are_described_but_never_required() {
    #[derive(Debug, Document, Serialize, Deserialize)]
    struct Session {
        id: u32,
        #[document(skip)]
        #[serde(default)]
        secret: String,
    }

    assert_eq!(
        Session::descriptor().get("secret"),
        Some(&FieldSpec::skip("secret"))
    );
}

#[test]
fn raw_identifiers_are_unescaped() {
    #[derive(Debug, Document, Serialize, Deserialize)]
    struct Token {
        id: u32,
        r#type: String,
    }

    assert!(Token::descriptor().get("type").is_some());
}

#[test]
fn documents_can_be_embedded_in_other_documents() {
    assert_eq!(
        <Comment as FieldType>::kind(),
        FieldKind::Embedded(TypeRef::named("Comment"))
    );
    assert_eq!(
        <Vec<Author> as FieldType>::kind(),
        FieldKind::List(Box::new(FieldKind::Embedded(TypeRef::named("Author"))))
    );
}
