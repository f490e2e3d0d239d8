//! Shared fakes for node tests.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_icon_core::{HttpRequest, HttpResponse, HttpTransport, NotionConfig, TransportError};
use notion_icon_node::{MemoryHost, MemoryItem, CREDENTIAL_NAME};
use notion_icon_types::Credentials;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const PAGE_ID: &str = "278c413b-2a68-80e4-bcc3-f1fcee4839ca";
pub const OTHER_PAGE_ID: &str = "214c413b-2a68-800f-9f9a-d234e37d1380";

pub fn credentials() -> Credentials {
    Credentials::new("secret-token", "space-123", "user-456")
}

pub fn test_config() -> NotionConfig {
    NotionConfig {
        api_base_url: "https://notion.test/api/v3".to_string(),
        ..Default::default()
    }
}

/// Records every request and answers from a queue; an empty queue answers `200 {}`.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, "{}")))
    }
}

pub fn url_item(page: &str, icon: &str) -> MemoryItem {
    MemoryItem::new()
        .parameter("pageId", page)
        .parameter("iconUrl", icon)
}

pub fn host(transport: &FakeTransport) -> MemoryHost<&FakeTransport> {
    MemoryHost::new(transport).with_credentials(CREDENTIAL_NAME, credentials())
}
