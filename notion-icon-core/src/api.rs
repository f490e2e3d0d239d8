//! Client for the service's internal API and its signed storage uploads.

use crate::config::NotionConfig;
use crate::error::{IconError, PipelineResult, RemoteFailure};
use crate::transport::{FilePart, HttpBody, HttpRequest, HttpResponse, HttpTransport, MultipartForm};
use crate::wire::{SaveTransactionsRequest, UploadFileUrlRequest, UploadFileUrlResponse, UploadSlot};
use notion_icon_types::{BinaryPayload, Credentials};
use serde::Serialize;
use tracing::debug;

/// Form field name of the uploaded file.
const FILE_FIELD: &str = "file";

/// Thin typed wrapper over the three API methods and the storage upload.
///
/// Holds no state besides configuration; every call is independent.
#[derive(Debug, Clone)]
pub struct NotionApi<T> {
    config: NotionConfig,
    transport: T,
}

impl<T: HttpTransport> NotionApi<T> {
    pub fn new(config: NotionConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// Headers the service requires on every API call.
    fn service_headers(&self, credentials: &Credentials) -> Vec<(String, String)> {
        vec![
            ("Cookie".into(), format!("token_v2={};", credentials.token_v2)),
            ("Accept".into(), "*/*".into()),
            ("User-Agent".into(), self.config.user_agent.clone()),
            ("Content-Type".into(), "application/json".into()),
            ("notion-client-version".into(), self.config.client_version.clone()),
            ("x-notion-active-user-header".into(), credentials.user_id.clone()),
            ("Referer".into(), self.config.referer.clone()),
        ]
    }

    /// Posts `body` to an API method and returns the successful response.
    async fn call<B: Serialize>(
        &self,
        method: &str,
        credentials: &Credentials,
        body: &B,
    ) -> Result<HttpResponse, RemoteFailure> {
        let body = serde_json::to_value(body)
            .map_err(|e| RemoteFailure::other(format!("failed to encode {method} body: {e}")))?;
        let request = HttpRequest {
            url: self.config.endpoint(method),
            headers: self.service_headers(credentials),
            body: HttpBody::Json(body),
        };

        debug!(method, "calling service API");
        let response = self.transport.post(request).await?;
        if !response.is_success() {
            return Err(RemoteFailure::http(response.status, response.text()));
        }
        Ok(response)
    }

    /// Requests a signed upload slot for a file attached to a page.
    pub async fn get_upload_file_url(
        &self,
        credentials: &Credentials,
        request: &UploadFileUrlRequest,
    ) -> PipelineResult<UploadSlot> {
        let response = self
            .call("getUploadFileUrl", credentials, request)
            .await
            .map_err(IconError::UploadSlot)?;

        let parsed: UploadFileUrlResponse = response.json().map_err(|e| {
            IconError::UploadSlot(RemoteFailure::other(format!(
                "failed to parse upload URL response: {e}"
            )))
        })?;

        parsed.into_slot().ok_or_else(|| {
            IconError::UploadSlot(RemoteFailure::other(
                "response is missing signedUploadPostUrl or url",
            ))
        })
    }

    /// Posts the payload to the slot's signed storage endpoint.
    ///
    /// The slot's fields go first in the order received, the file last.
    pub async fn upload_to_storage(
        &self,
        slot: &UploadSlot,
        payload: &BinaryPayload,
    ) -> PipelineResult<()> {
        let form = MultipartForm {
            fields: slot
                .upload_fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            file: FilePart {
                name: FILE_FIELD.to_string(),
                file_name: payload.file_name.clone(),
                mime_type: payload.mime_type.clone(),
                data: payload.data.clone(),
            },
        };
        let request = HttpRequest {
            url: slot.signed_upload_url.clone(),
            headers: Vec::new(),
            body: HttpBody::Multipart(form),
        };

        debug!(bytes = payload.len(), fields = slot.upload_fields.len(), "uploading to storage");
        let response = self
            .transport
            .post(request)
            .await
            .map_err(|e| IconError::StorageUpload(e.into()))?;
        if !response.is_success() {
            return Err(IconError::StorageUpload(RemoteFailure::http(
                response.status,
                response.text(),
            )));
        }
        Ok(())
    }

    /// Submits a transaction envelope.
    pub async fn save_transactions(
        &self,
        credentials: &Credentials,
        envelope: &SaveTransactionsRequest,
    ) -> PipelineResult<()> {
        self.call("saveTransactionsFanout", credentials, envelope)
            .await
            .map_err(IconError::Commit)?;
        Ok(())
    }

    /// Checks that the service accepts the credentials.
    pub async fn verify_credentials(&self, credentials: &Credentials) -> PipelineResult<()> {
        self.call("loadUserContent", credentials, &serde_json::json!({}))
            .await
            .map_err(IconError::VerifyCredentials)?;
        Ok(())
    }
}
