use docschema::{types::ObjectId, Document, Stored};
use serde::{Deserialize, Serialize};

#[derive(Debug, Document, Serialize, Deserialize)]
#[document(collection = "accounts")]
struct r#User {
    #[document(primary)]
    handle: String,
    id: ObjectId,
    r#type: String,
}

fn main() {
    let user = User {
        handle: "miguel".to_string(),
        id: ObjectId::new(),
        r#type: "admin".to_string(),
    };

    assert_eq!(user.primary_key(), "miguel");
    assert_eq!(User::NAME, "User");
    assert_eq!(User::COLLECTION, "accounts");
}
