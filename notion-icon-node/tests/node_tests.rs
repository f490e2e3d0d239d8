mod common;

use common::{credentials, host, test_config, url_item, FakeTransport, OTHER_PAGE_ID, PAGE_ID};
use notion_icon_core::{IconError, Stage};
use notion_icon_node::{
    ItemError, MemoryHost, MemoryItem, NodeError, NotionSetIconNode, CREDENTIAL_NAME,
};
use notion_icon_types::{BinaryPayload, Credentials, IconResult};
use pretty_assertions::assert_eq;
use serde_json::json;

fn node() -> NotionSetIconNode {
    NotionSetIconNode::new(test_config())
}

fn commit_args(transport: &FakeTransport, index: usize) -> serde_json::Value {
    let requests = transport.requests();
    requests[index].json().unwrap()["transactions"][0]["operations"][0]["args"].clone()
}

// ── Success ─────────────────────────────────────────────────────

#[tokio::test]
async fn url_item_produces_success_output() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(url_item(PAGE_ID, "https://example.com/icon.png"));

    let outputs = node().execute(&host).await.unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].paired_item.item, 0);
    assert_eq!(
        outputs[0].json,
        IconResult {
            success: true,
            page_id: Some(PAGE_ID.to_string()),
            icon_url: Some("https://example.com/icon.png".to_string()),
            message: Some("Page icon updated successfully".to_string()),
            error: None,
        }
    );
    assert_eq!(
        transport.urls(),
        vec!["https://notion.test/api/v3/saveTransactionsFanout"]
    );
}

#[tokio::test]
async fn page_url_is_normalized() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(url_item(
        "https://www.notion.so/My-Page-278c413b2a6880e4bcc3f1fcee4839ca",
        "🚀",
    ));

    let outputs = node().execute(&host).await.unwrap();

    assert_eq!(outputs[0].json.page_id.as_deref(), Some(PAGE_ID));
    assert_eq!(commit_args(&transport, 0), json!("🚀"));
}

#[tokio::test]
async fn upload_item_uses_binary_property() {
    let transport = FakeTransport::new()
        .respond(
            200,
            json!({
                "signedUploadPostUrl": "https://storage.test/upload",
                "fields": { "key": "k" },
                "url": "https://files.test/logo.png"
            }),
        )
        .respond(204, json!({}));
    let payload = BinaryPayload::new(b"PNG".to_vec(), Some("logo.png".into()), None);
    let host = host(&transport).with_item(
        MemoryItem::new()
            .parameter("pageId", PAGE_ID)
            .parameter("iconSource", "upload")
            .parameter("binaryPropertyName", "image")
            .binary("image", payload),
    );

    let outputs = node().execute(&host).await.unwrap();

    assert_eq!(outputs[0].json.icon_url.as_deref(), Some("https://files.test/logo.png"));
    assert_eq!(
        transport.urls(),
        vec![
            "https://notion.test/api/v3/getUploadFileUrl",
            "https://storage.test/upload",
            "https://notion.test/api/v3/saveTransactionsFanout",
        ]
    );
    assert_eq!(commit_args(&transport, 2), json!("https://files.test/logo.png"));
}

#[tokio::test]
async fn upload_defaults_to_data_property() {
    let transport = FakeTransport::new().respond(
        200,
        json!({ "signedUploadPostUrl": "https://storage.test/upload", "url": "https://files.test/x" }),
    );
    let host = host(&transport).with_item(
        MemoryItem::new()
            .parameter("pageId", PAGE_ID)
            .parameter("iconSource", "upload")
            .binary("data", BinaryPayload::new(b"x".to_vec(), None, None)),
    );

    let outputs = node().execute(&host).await.unwrap();

    assert!(outputs[0].json.success);
    let requests = transport.requests();
    let slot = requests[0].json().unwrap();
    assert_eq!(slot["name"], json!("icon.png"));
    assert_eq!(slot["contentType"], json!("image/png"));
}

#[tokio::test]
async fn each_item_gets_its_own_transaction() {
    let transport = FakeTransport::new();
    let host = host(&transport)
        .with_item(url_item(PAGE_ID, "🚀"))
        .with_item(url_item(OTHER_PAGE_ID, "🎯"));

    let outputs = node().execute(&host).await.unwrap();
    assert_eq!(outputs.len(), 2);

    let requests = transport.requests();
    let first = requests[0].json().unwrap();
    let second = requests[1].json().unwrap();
    assert_ne!(first["requestId"], second["requestId"]);
    assert_ne!(first["transactions"][0]["id"], second["transactions"][0]["id"]);
}

#[tokio::test]
async fn empty_batch_makes_no_calls() {
    let transport = FakeTransport::new();
    let host = host(&transport);

    let outputs = node().execute(&host).await.unwrap();

    assert!(outputs.is_empty());
    assert!(transport.requests().is_empty());
}

// ── Lenient mode ────────────────────────────────────────────────

#[tokio::test]
async fn lenient_batch_keeps_order_around_failure() {
    let transport = FakeTransport::new();
    let host = host(&transport)
        .continue_on_fail(true)
        .with_item(url_item(PAGE_ID, "🚀"))
        .with_item(url_item("not-a-page", "🚀"))
        .with_item(url_item(OTHER_PAGE_ID, "🎯"));

    let outputs = node().execute(&host).await.unwrap();

    assert_eq!(outputs.len(), 3);
    let paired: Vec<usize> = outputs.iter().map(|o| o.paired_item.item).collect();
    assert_eq!(paired, vec![0, 1, 2]);

    assert!(outputs[0].json.success);
    assert_eq!(
        outputs[1].json,
        IconResult::failed("invalid page ID: not-a-page")
    );
    assert_eq!(outputs[2].json.page_id.as_deref(), Some(OTHER_PAGE_ID));

    // The invalid record never reaches the network.
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn lenient_batch_reports_remote_failure() {
    let transport = FakeTransport::new().respond(500, json!({ "message": "boom" }));
    let host = host(&transport)
        .continue_on_fail(true)
        .with_item(url_item(PAGE_ID, "🚀"))
        .with_item(url_item(OTHER_PAGE_ID, "🎯"));

    let outputs = node().execute(&host).await.unwrap();

    assert!(!outputs[0].json.success);
    let error = outputs[0].json.error.as_deref().unwrap();
    assert!(error.starts_with("failed to update page icon: HTTP 500"));
    assert!(outputs[1].json.success);
}

#[tokio::test]
async fn failed_output_serializes_with_paired_item() {
    let transport = FakeTransport::new();
    let host = host(&transport)
        .continue_on_fail(true)
        .with_item(url_item("bad", "🚀"));

    let outputs = node().execute(&host).await.unwrap();

    assert_eq!(
        serde_json::to_value(&outputs[0]).unwrap(),
        json!({
            "json": { "success": false, "error": "invalid page ID: bad" },
            "pairedItem": { "item": 0 }
        })
    );
}

// ── Strict mode ─────────────────────────────────────────────────

#[tokio::test]
async fn strict_mode_aborts_on_first_failure() {
    let transport = FakeTransport::new();
    let host = host(&transport)
        .with_item(url_item(PAGE_ID, "🚀"))
        .with_item(url_item("not-a-page", "🚀"))
        .with_item(url_item(OTHER_PAGE_ID, "🎯"));

    let err = node().execute(&host).await.unwrap_err();

    assert_eq!(err.item_index(), Some(1));
    assert_eq!(
        err,
        NodeError::Item {
            index: 1,
            source: ItemError::Icon(IconError::InvalidIdentifier {
                input: "not-a-page".to_string()
            }),
        }
    );
    // The first record's commit is not rolled back; the third never runs.
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn strict_mode_surfaces_stage_of_remote_failure() {
    let transport = FakeTransport::new().respond(403, json!({}));
    let host = host(&transport).with_item(url_item(PAGE_ID, "🚀"));

    let err = node().execute(&host).await.unwrap_err();

    match err {
        NodeError::Item {
            index: 0,
            source: ItemError::Icon(icon),
        } => {
            assert_eq!(icon.stage(), Stage::Commit);
            assert_eq!(icon.status(), Some(403));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── Parameters ──────────────────────────────────────────────────

#[tokio::test]
async fn missing_binary_makes_no_calls() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(
        MemoryItem::new()
            .parameter("pageId", PAGE_ID)
            .parameter("iconSource", "upload")
            .parameter("binaryPropertyName", "image"),
    );

    let err = node().execute(&host).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "item 0: no binary data found in property 'image'"
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn missing_page_id_is_rejected() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(MemoryItem::new().parameter("iconUrl", "🚀"));

    let err = node().execute(&host).await.unwrap_err();

    assert_eq!(
        err,
        NodeError::Item {
            index: 0,
            source: ItemError::MissingParameter("pageId".to_string()),
        }
    );
}

#[tokio::test]
async fn blank_icon_url_is_rejected_locally() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(MemoryItem::new().parameter("pageId", PAGE_ID));

    let err = node().execute(&host).await.unwrap_err();

    assert_eq!(
        err,
        NodeError::Item {
            index: 0,
            source: ItemError::Icon(IconError::MissingIconUrl),
        }
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn unknown_icon_source_is_invalid() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(
        url_item(PAGE_ID, "🚀").parameter("iconSource", "clipboard"),
    );

    let err = node().execute(&host).await.unwrap_err();

    assert!(matches!(
        err,
        NodeError::Item { source: ItemError::InvalidParameter { ref name, .. }, .. } if name == "iconSource"
    ));
}

#[tokio::test]
async fn non_string_parameter_is_invalid() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(
        MemoryItem::new()
            .parameter("pageId", 42)
            .parameter("iconUrl", "🚀"),
    );

    let err = node().execute(&host).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "item 0: invalid value for parameter 'pageId': expected a string, got 42"
    );
}

#[tokio::test]
async fn unsupported_operation_is_item_error() {
    let transport = FakeTransport::new();
    let host = host(&transport)
        .continue_on_fail(true)
        .with_item(url_item(PAGE_ID, "🚀").parameter("operation", "setCover"));

    let outputs = node().execute(&host).await.unwrap();

    assert_eq!(
        outputs[0].json.error.as_deref(),
        Some("unsupported operation 'setCover' on resource 'page'")
    );
    assert!(transport.requests().is_empty());
}

// ── Credentials ─────────────────────────────────────────────────

#[tokio::test]
async fn missing_credentials_abort_before_any_item() {
    let transport = FakeTransport::new();
    let host = MemoryHost::new(&transport)
        .continue_on_fail(true)
        .with_item(url_item(PAGE_ID, "🚀"));

    let err = node().execute(&host).await.unwrap_err();

    assert!(matches!(err, NodeError::Credentials { ref name, .. } if name == CREDENTIAL_NAME));
    assert_eq!(err.item_index(), None);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn incomplete_credentials_are_rejected() {
    let transport = FakeTransport::new();
    let host = MemoryHost::new(&transport)
        .with_credentials(CREDENTIAL_NAME, Credentials::new("token", " ", "user"))
        .with_item(url_item(PAGE_ID, "🚀"));

    let err = node().execute(&host).await.unwrap_err();

    assert!(err.to_string().contains("space_id"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn credentials_drive_request_headers() {
    let transport = FakeTransport::new();
    let host = host(&transport).with_item(url_item(PAGE_ID, "🚀"));

    node().execute(&host).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].header("cookie"), Some("token_v2=secret-token;"));
    assert_eq!(
        requests[0].header("x-notion-active-user-header"),
        Some(credentials().user_id.as_str())
    );
}
