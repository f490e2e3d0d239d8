use crate::description::{
    node_description, NodeDescription, CREDENTIAL_NAME, OPERATION_SET_ICON, PARAM_BINARY_PROPERTY,
    PARAM_ICON_SOURCE, PARAM_ICON_URL, PARAM_OPERATION, PARAM_PAGE_ID, PARAM_RESOURCE,
    RESOURCE_PAGE,
};
use crate::error::{ItemError, NodeError, NodeResult};
use crate::host::NodeHost;
use notion_icon_core::{HttpTransport, IconError, IconSetter, NotionApi, NotionConfig};
use notion_icon_types::{Credentials, IconRequest, IconResult, IconSource};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Links an output record to the input record it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    pub json: IconResult,
    pub paired_item: PairedItem,
}

impl OutputItem {
    fn new(index: usize, json: IconResult) -> Self {
        Self {
            json,
            paired_item: PairedItem { item: index },
        }
    }
}

/// The `setIcon` node.
#[derive(Debug, Clone)]
pub struct NotionSetIconNode {
    config: NotionConfig,
    description: NodeDescription,
}

impl Default for NotionSetIconNode {
    fn default() -> Self {
        Self::new(NotionConfig::default())
    }
}

impl NotionSetIconNode {
    pub fn new(config: NotionConfig) -> Self {
        Self {
            config,
            description: node_description(),
        }
    }

    #[must_use]
    pub fn description(&self) -> &NodeDescription {
        &self.description
    }

    #[must_use]
    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// Processes every input record in order.
    ///
    /// Returns one output per record. In strict mode the first failing
    /// record aborts the run and nothing is returned for the records
    /// already processed; their remote changes stay in place.
    pub async fn execute<H: NodeHost>(&self, host: &H) -> NodeResult<Vec<OutputItem>> {
        let credentials = load_credentials(host).await?;
        let setter = IconSetter::new(NotionApi::new(self.config.clone(), host.http()));
        let lenient = host.continue_on_fail();
        let count = host.item_count();
        debug!(items = count, lenient, "executing setIcon");

        let mut outputs = Vec::with_capacity(count);
        for index in 0..count {
            match self.run_item(host, &setter, &credentials, index).await {
                Ok(result) => outputs.push(OutputItem::new(index, result)),
                Err(err) if lenient => {
                    warn!(item = index, error = %err, "item failed, continuing");
                    outputs.push(OutputItem::new(index, IconResult::failed(err.to_string())));
                }
                Err(source) => return Err(NodeError::Item { index, source }),
            }
        }

        info!(items = outputs.len(), "setIcon finished");
        Ok(outputs)
    }

    async fn run_item<H, T>(
        &self,
        host: &H,
        setter: &IconSetter<T>,
        credentials: &Credentials,
        index: usize,
    ) -> Result<IconResult, ItemError>
    where
        H: NodeHost,
        T: HttpTransport,
    {
        let request = self.build_request(host, index)?;
        let update = setter.apply(&request, credentials).await?;
        Ok(update.into())
    }

    /// Reads one record's parameters into a pipeline request.
    fn build_request<H: NodeHost>(&self, host: &H, index: usize) -> Result<IconRequest, ItemError> {
        let resource = self.string_param(host, index, PARAM_RESOURCE)?.unwrap_or_default();
        let operation = self.string_param(host, index, PARAM_OPERATION)?.unwrap_or_default();
        if resource != RESOURCE_PAGE || operation != OPERATION_SET_ICON {
            return Err(ItemError::UnsupportedOperation { resource, operation });
        }

        let page_ref = self
            .string_param(host, index, PARAM_PAGE_ID)?
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ItemError::MissingParameter(PARAM_PAGE_ID.to_string()))?;

        let source = match self.string_param(host, index, PARAM_ICON_SOURCE)? {
            Some(raw) => raw
                .parse::<IconSource>()
                .map_err(|e| ItemError::InvalidParameter {
                    name: PARAM_ICON_SOURCE.to_string(),
                    reason: e.to_string(),
                })?,
            None => IconSource::default(),
        };

        match source {
            // A blank URL is rejected by the pipeline itself.
            IconSource::Url => {
                let url = self.string_param(host, index, PARAM_ICON_URL)?.unwrap_or_default();
                Ok(IconRequest::from_url(page_ref, url))
            }
            IconSource::Upload => {
                let property = self
                    .string_param(host, index, PARAM_BINARY_PROPERTY)?
                    .ok_or_else(|| ItemError::MissingParameter(PARAM_BINARY_PROPERTY.to_string()))?;
                let payload = host
                    .binary_input(index, &property)
                    .ok_or(IconError::MissingBinaryInput { property })?;
                Ok(IconRequest::from_upload(page_ref, payload))
            }
        }
    }

    /// A string parameter, or its description default when unset.
    fn string_param<H: NodeHost>(
        &self,
        host: &H,
        index: usize,
        name: &str,
    ) -> Result<Option<String>, ItemError> {
        match host.parameter(index, name) {
            Some(Value::String(value)) => Ok(Some(value)),
            None | Some(Value::Null) => Ok(self.description.default_str(name).map(str::to_string)),
            Some(other) => Err(ItemError::InvalidParameter {
                name: name.to_string(),
                reason: format!("expected a string, got {other}"),
            }),
        }
    }
}

async fn load_credentials<H: NodeHost>(host: &H) -> NodeResult<Credentials> {
    let credentials = host
        .credentials(CREDENTIAL_NAME)
        .await
        .map_err(|e| NodeError::Credentials {
            name: CREDENTIAL_NAME.to_string(),
            reason: e.to_string(),
        })?;
    credentials.validate().map_err(|e| NodeError::Credentials {
        name: CREDENTIAL_NAME.to_string(),
        reason: e.to_string(),
    })?;
    Ok(credentials)
}
