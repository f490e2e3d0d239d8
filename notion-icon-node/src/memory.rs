//! In-process [`NodeHost`] for the CLI and tests.

use crate::error::HostError;
use crate::host::NodeHost;
use async_trait::async_trait;
use notion_icon_core::HttpTransport;
use notion_icon_types::{BinaryPayload, Credentials};
use serde_json::Value;
use std::collections::HashMap;

/// One input record: its parameter values and binary attachments.
#[derive(Debug, Clone, Default)]
pub struct MemoryItem {
    parameters: HashMap<String, Value>,
    binaries: HashMap<String, BinaryPayload>,
}

impl MemoryItem {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn binary(mut self, property: impl Into<String>, payload: BinaryPayload) -> Self {
        self.binaries.insert(property.into(), payload);
        self
    }
}

/// Host whose records, credentials and flags all live in memory.
pub struct MemoryHost<T> {
    items: Vec<MemoryItem>,
    credentials: HashMap<String, Credentials>,
    continue_on_fail: bool,
    http: T,
}

impl<T: HttpTransport> MemoryHost<T> {
    pub fn new(http: T) -> Self {
        Self {
            items: Vec::new(),
            credentials: HashMap::new(),
            continue_on_fail: false,
            http,
        }
    }

    #[must_use]
    pub fn with_item(mut self, item: MemoryItem) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, name: impl Into<String>, credentials: Credentials) -> Self {
        self.credentials.insert(name.into(), credentials);
        self
    }

    #[must_use]
    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

#[async_trait]
impl<T: HttpTransport> NodeHost for MemoryHost<T> {
    type Http = T;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn parameter(&self, index: usize, name: &str) -> Option<Value> {
        self.items.get(index)?.parameters.get(name).cloned()
    }

    async fn credentials(&self, name: &str) -> Result<Credentials, HostError> {
        self.credentials
            .get(name)
            .cloned()
            .ok_or_else(|| HostError(format!("no credentials named '{name}'")))
    }

    fn binary_input(&self, index: usize, property: &str) -> Option<BinaryPayload> {
        self.items.get(index)?.binaries.get(property).cloned()
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    fn http(&self) -> &T {
        &self.http
    }
}
