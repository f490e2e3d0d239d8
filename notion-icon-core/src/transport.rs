//! HTTP capability used by the pipeline.
//!
//! Every call the pipeline makes is a `POST`, either with a JSON body (the
//! service API) or a multipart form (the signed storage endpoint). The
//! [`HttpTransport`] trait is the only way the pipeline touches the network;
//! hosts inject their own implementation and tests inject fakes.

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// An outgoing `POST` request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    /// Header name/value pairs, sent in order.
    pub headers: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpRequest {
    /// Returns the first header with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the JSON body, if this is a JSON request.
    #[must_use]
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            HttpBody::Json(value) => Some(value),
            HttpBody::Multipart(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// A `multipart/form-data` body: text fields in order, then one file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: FilePart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name of the part.
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A received response, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, lossily.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Performs HTTP requests on behalf of the pipeline.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a `POST` and returns the response whatever its status.
    ///
    /// Only failures to obtain a response are errors.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).post(request).await
    }
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).post(request).await
    }
}

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest { url, headers, body } = request;

        let mut builder = self.client.post(&url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match body {
            HttpBody::Json(value) => builder.json(&value),
            HttpBody::Multipart(form) => builder.multipart(into_reqwest_form(form)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(format!("request to {url} failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("failed to read response from {url}: {e}")))?;

        debug!(%url, status, bytes = body.len(), "received response");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

fn into_reqwest_form(form: MultipartForm) -> Result<Form, TransportError> {
    let mut out = Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    let FilePart {
        name,
        file_name,
        mime_type,
        data,
    } = form.file;
    let part = Part::bytes(data)
        .file_name(file_name)
        .mime_str(&mime_type)
        .map_err(|e| TransportError(format!("invalid mime type '{mime_type}': {e}")))?;
    Ok(out.part(name, part))
}
