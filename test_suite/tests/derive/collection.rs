#![allow(dead_code)]

use docschema::{Document, Stored};
use serde::{Deserialize, Serialize};

#[test]
fn derives_collection_from_document_name() {
    #[derive(Debug, Document, Serialize, Deserialize)]
    struct User {
        id: u8,
    }

    #[derive(Debug, Document, Serialize, Deserialize)]
    struct Music {
        id: u8,
    }

    #[derive(Debug, Document, Serialize, Deserialize)]
    struct BlogPost {
        id: u8,
    }

    assert_eq!(User::COLLECTION, "users");
    assert_eq!(Music::COLLECTION, "music");
    assert_eq!(BlogPost::COLLECTION, "blog_posts");
    assert_eq!(BlogPost::descriptor().collection, "blog_posts");
}

#[test]
fn derived_names_can_be_overriden_with_attributes() {
    #[derive(Debug, Document, Serialize, Deserialize)]
    #[document(name = "Person", collection = "people_archive")]
    struct LegacyUser {
        id: u8,
    }

    assert_eq!(LegacyUser::NAME, "Person");
    assert_eq!(LegacyUser::COLLECTION, "people_archive");

    let descriptor = LegacyUser::descriptor();
    assert_eq!(descriptor.name, "Person");
    assert_eq!(descriptor.collection, "people_archive");
}
