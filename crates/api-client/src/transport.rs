//! HTTP transport
//!
//! [`ApiClient`](crate::ApiClient) builds fully-resolved [`ApiRequest`]s and
//! hands them to a [`Transport`]. Production code uses [`ReqwestTransport`];
//! tests plug in an in-process fake.

use crate::error::{ApiError, ApiResult};
use crate::payload::{IMAGE_FIELD, MultipartForm};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// Request correlation ID header
pub const X_REQUEST_ID: &str = "X-Request-ID";

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// Multipart form with an optional file
    Multipart(MultipartForm),
}

/// A request ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, without a leading slash
    pub path: String,
    /// Query parameters (encoded by the transport)
    pub query: Vec<(String, String)>,
    /// Bearer token, when one is stored
    pub bearer: Option<String>,
    /// Correlation id sent as `X-Request-ID`
    pub request_id: String,
    /// Body
    pub body: RequestBody,
}

impl ApiRequest {
    /// Value of a query parameter
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status plus body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text (may be empty)
    pub body: String,
}

impl RawResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;
}

/// `reqwest`-backed transport with JSON defaults and a fixed timeout
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport for `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("searchdish-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn multipart(form: MultipartForm) -> ApiResult<Form> {
        let mut multipart = Form::new();
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        if let Some(file) = form.file {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)?;
            multipart = multipart.part(IMAGE_FIELD, part);
        }
        Ok(multipart)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let mut builder = self
            .inner
            .request(request.method, self.url_for(&request.path))
            .header(X_REQUEST_ID, &request.request_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(Self::multipart(form)?),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout)
            } else {
                ApiError::Request(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let transport =
            ReqwestTransport::new("http://localhost:3001/api/v1/", Duration::from_secs(10)).unwrap();
        assert_eq!(
            transport.url_for("/restaurant/paginate"),
            "http://localhost:3001/api/v1/restaurant/paginate"
        );
        assert_eq!(
            transport.url_for("auth/me"),
            "http://localhost:3001/api/v1/auth/me"
        );
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(401, "").is_success());
    }
}
