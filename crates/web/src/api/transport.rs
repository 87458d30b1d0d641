// =============================================================================
// Storedesk Web - HTTP Transport
// =============================================================================
// Table of Contents:
// 1. Request Descriptor
// 2. Prepared Request / Response
// 3. Transport Trait
// 4. Fetch Transport (gloo-net)
// =============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

use super::ApiError;

// -----------------------------------------------------------------------------
// 1. Request Descriptor
// -----------------------------------------------------------------------------

/// HTTP method of a backend operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One file (or field) of a multipart upload.
#[derive(Clone, Debug, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FormPart {
    /// A file part named `name`.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            bytes,
        }
    }
}

/// Request body.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// Description of a single backend call, relative to a client's base path.
///
/// Serialization problems are kept on the descriptor and reported when the
/// request is sent, so call sites can chain builders without `?`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
    build_error: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            build_error: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter. Order is preserved.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = RequestBody::Json(value),
            Err(e) => self.build_error = Some(e.to_string()),
        }
        self
    }

    /// Attach a multipart body.
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Override a header for this request only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub(crate) fn build_error(&self) -> Option<&str> {
        self.build_error.as_deref()
    }
}

// -----------------------------------------------------------------------------
// 2. Prepared Request / Response
// -----------------------------------------------------------------------------

/// A request resolved against a client: absolute URL and merged headers.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub with_credentials: bool,
}

impl PreparedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as seen by the client, whatever its status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Parse a response body: empty means `Null`, non-JSON text is kept as a string.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

// -----------------------------------------------------------------------------
// 3. Transport Trait
// -----------------------------------------------------------------------------

/// Sends prepared requests over the wire.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status, and `Err(ApiError::Network)` only when no response was received.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError>;

    /// Transport name for logging
    fn name(&self) -> &str;
}

// -----------------------------------------------------------------------------
// 4. Fetch Transport (gloo-net)
// -----------------------------------------------------------------------------

/// Browser `fetch` transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
            with_credentials,
        } = request;

        let mut builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };

        if with_credentials {
            builder = builder.credentials(RequestCredentials::Include);
        }

        let multipart = matches!(body, RequestBody::Multipart(_));
        for (name, value) in &headers {
            // fetch writes the multipart boundary itself
            if multipart && name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            builder = builder.header(name, value);
        }

        let request = match body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(parts) => builder.body(form_data(&parts)?),
        }
        .map_err(|e| ApiError::Build(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .entries()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(ApiResponse {
            status,
            headers,
            body: parse_body(&text),
        })
    }

    fn name(&self) -> &str {
        "fetch"
    }
}

fn form_data(parts: &[FormPart]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        let bytes = js_sys::Uint8Array::from(part.bytes.as_slice());
        let sequence = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        if let Some(content_type) = &part.content_type {
            options.set_type(content_type);
        }
        let blob = Blob::new_with_u8_array_sequence_and_options(&sequence, &options)
            .map_err(js_error)?;
        match &part.file_name {
            Some(file_name) => form.append_with_blob_and_filename(&part.name, &blob, file_name),
            None => form.append_with_blob(&part.name, &blob),
        }
        .map_err(js_error)?;
    }
    Ok(form)
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Build(format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_builder_keeps_query_order() {
        let request = ApiRequest::get("/category/getList")
            .query("page", 0)
            .query("size", 10)
            .query("keyword", "커피");
        let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["page", "size", "keyword"]);
    }

    #[test]
    fn json_body_is_serialized_eagerly() {
        let request = ApiRequest::post("/category/register").json(&json!({ "name": "Drinks" }));
        assert_eq!(request.body, RequestBody::Json(json!({ "name": "Drinks" })));
        assert!(request.build_error().is_none());
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let response = ApiResponse::new(403, Value::Null).with_header("Error-Code", "NO_STORE_ID");
        assert_eq!(response.header("error-code"), Some("NO_STORE_ID"));
        assert!(!response.is_success());
    }

    #[test]
    fn parse_body_handles_empty_and_plain_text() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  "), Value::Null);
        assert_eq!(parse_body("{\"code\":200}"), json!({ "code": 200 }));
        assert_eq!(parse_body("Bad Gateway"), json!("Bad Gateway"));
    }
}
