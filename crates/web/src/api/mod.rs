// =============================================================================
// Storedesk Web - API Client Module
// =============================================================================
// Table of Contents:
// 1. Submodules
// 2. Re-exports
// 3. Error Types
// 4. API Client
// 5. Gateway
// =============================================================================

pub mod envelope;
pub mod interceptor;
pub mod market;
pub mod menu;
pub mod transport;
pub mod user;

pub use envelope::{Envelope, Lookup, Normalized, Outcome, ResponseContract};
pub use interceptor::{needs_redirect, Navigator, RedirectInterceptor, RouterNavigator};
pub use transport::{
    ApiRequest, ApiResponse, FetchTransport, FormPart, Method, PreparedRequest, RequestBody,
    Transport,
};

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::ApiConfig;
use interceptor::ERROR_CODE_HEADER;

// -----------------------------------------------------------------------------
// 3. Error Types
// -----------------------------------------------------------------------------

/// API error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived with a non-2xx HTTP status.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        error_code: Option<String>,
        body: Value,
    },

    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// The backend answered with a non-success envelope code.
    #[error("{message}")]
    Application { code: i64, message: String },

    #[error("Request build error: {0}")]
    Build(String),
}

impl ApiError {
    fn from_response(response: ApiResponse) -> Self {
        ApiError::Status {
            status: response.status,
            error_code: response.header(ERROR_CODE_HEADER).map(str::to_string),
            body: response.body,
        }
    }

    /// HTTP status of the failed response, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Value of the `error-code` response header.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Status { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// Body of the failed response, if one arrived.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// `message` field of the failed response body.
    pub fn response_message(&self) -> Option<String> {
        self.response_body()?
            .get("message")?
            .as_str()
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    }
}

// -----------------------------------------------------------------------------
// 4. API Client
// -----------------------------------------------------------------------------

/// HTTP client for one functional area of the backend.
///
/// Every client sends JSON by default, includes session cookies and runs
/// failures through the [`RedirectInterceptor`]. There is no retry and no
/// timeout: a failed request is reported once.
#[derive(Clone)]
pub struct ApiClient {
    area: &'static str,
    base_url: String,
    default_headers: Vec<(String, String)>,
    with_credentials: bool,
    transport: Arc<dyn Transport>,
    interceptor: RedirectInterceptor,
}

impl ApiClient {
    /// Build the client for a functional area.
    pub fn for_area(
        area: &'static str,
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            area,
            base_url: config.base_url(),
            default_headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            with_credentials: true,
            transport,
            interceptor: RedirectInterceptor::new(navigator),
        }
    }

    pub fn area(&self) -> &str {
        self.area
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join base URL, path and query: exactly one `/` between base and path,
    /// query values percent-encoded.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        for (index, (key, value)) in query.iter().enumerate() {
            url.push(if index == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Resolve a descriptor: defaults first, per-call overrides replace them.
    pub fn prepare(&self, request: ApiRequest) -> PreparedRequest {
        let ApiRequest {
            method,
            path,
            query,
            body,
            headers: overrides,
            ..
        } = request;

        let mut headers: Vec<(String, String)> = self
            .default_headers
            .iter()
            .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
            .cloned()
            .collect();
        headers.extend(overrides);

        PreparedRequest {
            method,
            url: self.url_for(&path, &query),
            headers,
            body,
            with_credentials: self.with_credentials,
        }
    }

    /// Send a request. Non-2xx responses and transport errors are failures;
    /// both pass through the interceptor before being returned.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Some(reason) = request.build_error() {
            return Err(ApiError::Build(reason.to_string()));
        }

        let prepared = self.prepare(request);
        log::debug!(
            "[{}] {} {} via {}",
            self.area,
            prepared.method.as_str(),
            prepared.url,
            self.transport.name()
        );

        let result = match self.transport.send(prepared).await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => Err(ApiError::from_response(response)),
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            self.interceptor.inspect(err);
        }
        result
    }

    /// Send a request and return the response body (`res.data`).
    pub async fn body(&self, request: ApiRequest) -> Result<Value, ApiError> {
        Ok(self.send(request).await?.body)
    }
}

// -----------------------------------------------------------------------------
// 5. Gateway
// -----------------------------------------------------------------------------

/// The three independent area clients, built by the same factory.
#[derive(Clone)]
pub struct Gateway {
    /// Accounts, orders and sales analytics.
    pub user: ApiClient,
    /// Categories, options, menus and inventory.
    pub menu: ApiClient,
    /// Ingredient market between stores.
    pub market: ApiClient,
}

impl Gateway {
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            user: ApiClient::for_area("user", config, transport.clone(), navigator.clone()),
            menu: ApiClient::for_area("menu", config, transport.clone(), navigator.clone()),
            market: ApiClient::for_area("market", config, transport, navigator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::NamedRoute;
    use crate::test_support::{block_on, MockTransport, RecordingNavigator};
    use serde_json::json;

    fn client(transport: &Arc<MockTransport>, navigator: &Arc<RecordingNavigator>) -> ApiClient {
        ApiClient::for_area(
            "menu",
            &ApiConfig::default(),
            transport.clone(),
            navigator.clone(),
        )
    }

    #[test]
    fn url_joins_with_single_slash() {
        let transport = MockTransport::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let client = client(&transport, &navigator);

        assert_eq!(client.url_for("/menu/register", &[]), "/api/menu/register");
        assert_eq!(client.url_for("menu/register", &[]), "/api/menu/register");
        assert_eq!(
            client.url_for(
                "/category/getList",
                &[
                    ("page".into(), "0".into()),
                    ("keyword".into(), "아이스 커피".into())
                ]
            ),
            "/api/category/getList?page=0&keyword=%EC%95%84%EC%9D%B4%EC%8A%A4%20%EC%BB%A4%ED%94%BC"
        );
    }

    #[test]
    fn prepare_applies_defaults_and_overrides() {
        let transport = MockTransport::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let client = client(&transport, &navigator);

        let plain = client.prepare(ApiRequest::get("/menu/list"));
        assert_eq!(plain.header("content-type"), Some("application/json"));
        assert!(plain.with_credentials);

        let upload = client.prepare(
            ApiRequest::post("/market/images/upload").header("Content-Type", "multipart/form-data"),
        );
        assert_eq!(upload.header("content-type"), Some("multipart/form-data"));
        assert_eq!(upload.headers.len(), 1);

        // the override did not leak into the shared defaults
        let again = client.prepare(ApiRequest::get("/menu/list"));
        assert_eq!(again.header("content-type"), Some("application/json"));
    }

    #[test]
    fn missing_store_rejection_redirects_once_and_propagates() {
        let transport = MockTransport::new();
        transport.respond_with_header(
            Method::Get,
            "/api/menu/list",
            400,
            "error-code",
            "NO_STORE_ID",
            json!({ "code": 400 }),
        );
        let navigator = Arc::new(RecordingNavigator::default());
        let client = client(&transport, &navigator);

        let result = block_on(client.send(ApiRequest::get("/menu/list")));

        assert_eq!(navigator.visits(), vec![NamedRoute::StoreRegister]);
        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.error_code(), Some("NO_STORE_ID"));
    }

    #[test]
    fn unauthorized_rejection_redirects_to_login_and_propagates() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/user/isLogin", 401, json!({ "code": 401 }));
        let navigator = Arc::new(RecordingNavigator::default());
        let client = client(&transport, &navigator);

        let result = block_on(client.send(ApiRequest::get("/user/isLogin")));

        assert_eq!(navigator.visits(), vec![NamedRoute::Login]);
        assert_eq!(result.unwrap_err().status(), Some(401));
    }

    #[test]
    fn success_passes_through_untouched() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/menu/list", 200, json!({ "code": 200, "data": [1] }));
        let navigator = Arc::new(RecordingNavigator::default());
        let client = client(&transport, &navigator);

        let body = block_on(client.body(ApiRequest::get("/menu/list"))).unwrap();

        assert_eq!(body, json!({ "code": 200, "data": [1] }));
        assert!(navigator.visits().is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn build_errors_never_reach_the_transport() {
        let transport = MockTransport::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let client = client(&transport, &navigator);

        let mut broken = std::collections::HashMap::new();
        broken.insert(vec![1u8], "non-string keys do not serialize");
        let result = block_on(client.send(ApiRequest::post("/menu/register").json(&broken)));

        assert!(matches!(result, Err(ApiError::Build(_))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn response_message_reads_body() {
        let err = ApiError::Status {
            status: 400,
            error_code: None,
            body: json!({ "code": 400, "message": "dup" }),
        };
        assert_eq!(err.response_message(), Some("dup".to_string()));
        assert_eq!(ApiError::Network("x".into()).response_message(), None);
    }
}
