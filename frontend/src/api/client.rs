use log::{debug, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::{sample::SampleFallback, types::*},
    config,
};

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The only component that talks to the backend. Every operation makes a
/// single attempt and reports failures as [`ApiError`] values.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    sample_fallback: SampleFallback,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Client whose base URL and sample fallback come from the runtime config.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            sample_fallback: SampleFallback::FromConfig,
        }
    }

    /// Client bound to an explicit base URL. The sample fallback is disabled.
    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(config::normalize_base_url(&base_url.into())),
            sample_fallback: SampleFallback::Disabled,
        }
    }

    pub fn with_sample_fallback(mut self, fallback: SampleFallback) -> Self {
        self.sample_fallback = fallback;
        self
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn sample_fallback(&self) -> &SampleFallback {
        &self.sample_fallback
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_config().await.api_base_url
        }
    }

    pub(crate) async fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    /// Sends the request once. Transport failures and non-2xx statuses both
    /// come back as errors.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Response, ApiError> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("{}: {}", context, e)))?;

        let status = response.status();
        debug!("{} -> {}", response.url().path(), status);
        if status.is_success() {
            Ok(response)
        } else {
            let error = error_from_response(response, context).await;
            warn!("{} failed: {} ({})", context, error.error, status);
            Err(error)
        }
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(format!("{}: {}", context, e)))?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse(format!("Failed to parse response: {}", e)))
    }
}

/// Builds the error for a non-2xx response. Structured field errors become
/// `VALIDATION_ERROR` with the raw payload kept in `details`.
pub(crate) async fn error_from_response(response: Response, context: &str) -> ApiError {
    let status = response.status();
    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    let payload = serde_json::from_str::<Value>(&body).ok();

    let message = payload.as_ref().and_then(extract_error_message);
    match (message, payload) {
        (Some(message), Some(payload)) if has_field_errors(&payload) => {
            ApiError::validation(message)
                .with_status(code)
                .with_details(payload)
        }
        (Some(message), _) => ApiError::http_status(code, message),
        (None, _) => ApiError::http_status(code, format!("{}: {}", context, status)),
    }
}

/// Best-effort message extraction from an error payload.
///
/// `detail`, `message` and `error` win in that order. Otherwise the first
/// array-valued field (in map iteration order) is reported as
/// `"{field}: {first entry}"`. The result depends on key order and is not a
/// stable contract.
pub fn extract_error_message(payload: &Value) -> Option<String> {
    let map = payload.as_object()?;
    for key in ["detail", "message", "error"] {
        if let Some(text) = map.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }
    map.iter().find_map(|(key, value)| {
        let first = value.as_array()?.first()?;
        let text = first
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| first.to_string());
        Some(format!("{}: {}", key, text))
    })
}

fn has_field_errors(payload: &Value) -> bool {
    payload
        .as_object()
        .map(|map| {
            map.values()
                .any(|value| value.as_array().map(|a| !a.is_empty()).unwrap_or(false))
        })
        .unwrap_or(false)
}

pub(crate) fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}
