#![allow(dead_code)]

use docschema::{store::MemoryStore, types::Reference, Document, Marshaller};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Document, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    #[document(primary)]
    account_id: u64,
    display_name: String,
}

#[derive(Debug, PartialEq, Document, Serialize, Deserialize)]
struct Profile {
    id: u64,
    #[serde(rename = "displayName")]
    display_name: String,
    owner: Option<Reference<Account>>,
}

fn marshaller() -> (Marshaller, Account) {
    let account = Account {
        account_id: 7,
        display_name: "Miguel".to_string(),
    };

    let store = Arc::new(MemoryStore::new());
    store.insert(&account).unwrap();

    let marshaller = Marshaller::builder()
        .register::<Account>()
        .register::<Profile>()
        .store(store)
        .build();

    (marshaller, account)
}

#[test]
fn renamed_fields_dump_and_load_under_their_serialized_name() {
    let (marshaller, _) = marshaller();
    let profile = Profile {
        id: 1,
        display_name: "x".to_string(),
        owner: None,
    };

    let dumped = marshaller.dump(&profile).unwrap();
    assert_eq!(dumped, json!({ "id": 1, "displayName": "x", "owner": null }));
    assert_eq!(marshaller.load::<Profile>(&dumped).unwrap(), profile);

    assert!(marshaller
        .load::<Profile>(&json!({ "id": 1, "display_name": "x" }))
        .is_err());
}

#[test]
fn references_use_the_renamed_primary_key() {
    let (marshaller, account) = marshaller();
    let profile = Profile {
        id: 1,
        display_name: "x".to_string(),
        owner: Some(Reference::from(account.clone())),
    };

    let dumped = marshaller.dump(&profile).unwrap();
    assert_eq!(dumped["owner"], json!(7));

    let loaded = marshaller.load::<Profile>(&dumped).unwrap();
    assert_eq!(loaded.owner.as_ref().and_then(Reference::document), Some(&account));
    assert_eq!(
        marshaller.dump(&account).unwrap(),
        json!({ "accountId": 7, "displayName": "Miguel" })
    );
}
