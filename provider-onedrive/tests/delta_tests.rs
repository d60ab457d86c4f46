//! Integration tests for delta enumeration
//!
//! These tests verify:
//! - A multi-page pass yields every item and then exposes the sync token
//! - Tombstones are yielded alongside live items
//! - A saved token starts an incremental pass
//! - Malformed tokens are rejected before any request

mod common;

use common::{ScriptedDrive, BASE};
use futures::TryStreamExt;
use provider_onedrive::{ErrorKind, Folder, ItemMetadata, OneDriveError};

const TOKEN: &str = "https://graph.microsoft.com/v1.0/me/drive/root/delta?token=aTE09NjM2";

fn delta_url() -> String {
    format!("{}/drive/root/delta?$top=200", BASE)
}

#[tokio::test]
async fn test_three_page_pass_exposes_token_last() {
    let first = delta_url();
    let last = format!(
        r#"{{"value":[{{"id":"5"}}],"@odata.deltaLink":"{}"}}"#,
        TOKEN
    );
    let drive = ScriptedDrive::new(&[
        (
            first.as_str(),
            r#"{"value":[
                {"id":"root","root":{},"folder":{"childCount":2}},
                {"id":"2"}
            ],"@odata.nextLink":"https://host/delta?p=2"}"#,
        ),
        (
            "https://host/delta?p=2",
            r#"{"value":[{"id":"3"},{"id":"4"}],"@odata.nextLink":"https://host/delta?p=3"}"#,
        ),
        ("https://host/delta?p=3", last.as_str()),
    ]);

    let mut delta = Folder::root(drive.connection.clone()).delta();
    let mut seen = Vec::new();
    while let Some(item) = delta.try_next().await.unwrap() {
        if seen.len() < 4 {
            assert_eq!(delta.delta_link(), None);
        }
        seen.push(item.id().to_string());
    }

    assert_eq!(seen, ["root", "2", "3", "4", "5"]);
    assert!(delta.is_exhausted());
    assert_eq!(delta.delta_link(), Some(TOKEN));
}

#[tokio::test]
async fn test_empty_final_page_still_exposes_token() {
    let first = delta_url();
    let last = format!(r#"{{"value":[],"@odata.deltaLink":"{}"}}"#, TOKEN);
    let drive = ScriptedDrive::new(&[
        (
            first.as_str(),
            r#"{"value":[{"id":"root","root":{}}],"@odata.nextLink":"https://host/delta?p=2"}"#,
        ),
        ("https://host/delta?p=2", last.as_str()),
    ]);

    let mut delta = Folder::root(drive.connection.clone()).delta();

    let first_item = delta.try_next().await.unwrap().unwrap();
    assert_eq!(first_item.id(), "root");
    assert!(delta.try_next().await.unwrap().is_none());
    assert!(delta.is_exhausted());
    assert_eq!(delta.delta_link(), Some(TOKEN));
    assert_eq!(drive.requests().len(), 2);
}

#[tokio::test]
async fn test_token_only_pass_yields_nothing() {
    let first = delta_url();
    let body = format!(r#"{{"value":[],"@odata.deltaLink":"{}"}}"#, TOKEN);
    let drive = ScriptedDrive::new(&[(first.as_str(), body.as_str())]);

    let (items, token) = Folder::root(drive.connection.clone()).delta().drain().await.unwrap();

    assert!(items.is_empty());
    assert_eq!(token.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_tombstones_are_yielded() {
    let first = delta_url();
    let drive = ScriptedDrive::new(&[(
        first.as_str(),
        r#"{"value":[
            {"id":"kept","name":"a.txt","file":{}},
            {"id":"gone","deleted":{"state":"deleted"},"parentReference":{"id":"root"}}
        ],"@odata.deltaLink":"https://host/token"}"#,
    )]);

    let (items, token) = Folder::root(drive.connection.clone()).delta().drain().await.unwrap();

    let deleted: Vec<&str> = items
        .iter()
        .filter(|item| item.is_deleted())
        .map(ItemMetadata::id)
        .collect();
    assert_eq!(deleted, ["gone"]);
    assert_eq!(items.len(), 2);
    assert_eq!(token.as_deref(), Some("https://host/token"));
}

#[tokio::test]
async fn test_incremental_pass_from_saved_token() {
    let drive = ScriptedDrive::new(&[(
        TOKEN,
        r#"{"value":[{"id":"changed","file":{}}],"@odata.deltaLink":"https://host/token-2"}"#,
    )]);

    let delta = Folder::root(drive.connection.clone()).delta_from(TOKEN).unwrap();
    let items: Vec<ItemMetadata> = delta.into_stream().try_collect().await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(drive.requests(), [TOKEN.to_string()]);
}

#[tokio::test]
async fn test_malformed_token_is_rejected() {
    let drive = ScriptedDrive::new(&[]);

    let error = Folder::root(drive.connection.clone())
        .delta_from("aTE09NjM2")
        .unwrap_err();

    assert!(matches!(error, OneDriveError::InvalidLink(ref link) if link == "aTE09NjM2"));
    assert_eq!(error.kind(), ErrorKind::Api);
    assert!(error.to_string().starts_with("Wrong link"));
    assert!(drive.requests().is_empty());
}
