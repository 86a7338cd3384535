//! HTTP plumbing behind [`crate::SessionGateway::request`].

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::Serialize;
use serde_json::Value;
use shared::error::ApiErrorBody;
use tracing::debug;

use crate::error::{RequestError, DEFAULT_ERROR_MESSAGE};

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn post<T: Serialize>(body: &T) -> Result<Self, RequestError> {
        let body = serde_json::to_value(body)
            .map_err(|err| RequestError::new(format!("failed to encode request body: {err}")))?;
        Ok(Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: Some(body),
        })
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

pub struct ApiTransport {
    http: Client,
    api_base: String,
}

impl ApiTransport {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_base)
        } else {
            format!("{}/{path}", self.api_base)
        }
    }

    pub async fn send(
        &self,
        path: &str,
        options: RequestOptions,
        credential: Option<&str>,
    ) -> Result<Value, RequestError> {
        let headers = build_headers(credential, &options.headers)?;
        let url = self.url(path);

        let mut request = self
            .http
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body).map_err(|err| {
                RequestError::new(format!("failed to encode request body: {err}"))
            })?;
            request = request.body(bytes);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(method = %options.method, %url, status = status.as_u16(), "api response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            return Err(RequestError::with_status(message, status.as_u16()));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            RequestError::with_status(format!("malformed response body: {err}"), status.as_u16())
        })
    }
}

/// Defaults first, caller headers last so they win.
pub(crate) fn build_headers(
    credential: Option<&str>,
    overrides: &HeaderMap,
) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(credential) = credential {
        let value = HeaderValue::from_str(&format!("Bearer {credential}"))
            .map_err(|_| RequestError::new("stored credential is not a valid header value"))?;
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in overrides {
        headers.insert(name.clone(), value.clone());
    }

    Ok(headers)
}
