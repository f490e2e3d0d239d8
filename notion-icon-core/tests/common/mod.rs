//! Shared fakes for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_icon_core::{
    Clock, HttpRequest, HttpResponse, HttpTransport, IconSetter, IdGenerator, NotionApi,
    NotionConfig, TransportError,
};
use notion_icon_types::Credentials;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub const PAGE_ID: &str = "278c413b-2a68-80e4-bcc3-f1fcee4839ca";
pub const EDITED_AT: i64 = 1_700_000_000_000;

pub fn credentials() -> Credentials {
    Credentials::new("secret-token", "space-123", "user-456")
}

/// Records every request and answers from a queue; an empty queue answers `200 {}`.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
        self
    }

    pub fn respond_text(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_string())));
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
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

/// Ids 1, 2, 3, ...
#[derive(Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub fn test_config() -> NotionConfig {
    NotionConfig {
        api_base_url: "https://notion.test/api/v3".to_string(),
        ..Default::default()
    }
}

pub fn setter(transport: &FakeTransport) -> IconSetter<&FakeTransport, SequentialIds, FixedClock> {
    IconSetter::with_parts(
        NotionApi::new(test_config(), transport),
        SequentialIds::default(),
        FixedClock(EDITED_AT),
    )
}
