// =============================================================================
// Storedesk Web - Response Envelope & Normalization
// =============================================================================
// Table of Contents:
// 1. Constants
// 2. Envelope
// 3. Response Contracts
// 4. Caller-Facing Results (Outcome, Lookup)
// 5. Normalizing Helpers on ApiClient
// =============================================================================
//
// Endpoint functions do not share one result shape. Each declares how its
// response is read and which sentinel its callers expect on failure; the
// helpers at the bottom of this file implement those conventions once.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ApiError, ApiRequest};

// -----------------------------------------------------------------------------
// 1. Constants
// -----------------------------------------------------------------------------

/// Envelope code meaning success, independent of the HTTP status.
pub const SUCCESS_CODE: i64 = 200;

/// Sentinel returned by search-style operations on any failure.
pub const NOT_FOUND_SENTINEL: u16 = 404;

/// Generic failure message shown when the server gave none.
pub const SERVER_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다.";

// -----------------------------------------------------------------------------
// 2. Envelope
// -----------------------------------------------------------------------------

/// `{code, message, data}` wrapper used by most backend responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Server message, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        serde_json::from_value(value).map_err(|e| ApiError::Deserialize(e.to_string()))
    }
}

// -----------------------------------------------------------------------------
// 3. Response Contracts
// -----------------------------------------------------------------------------

/// How an operation reads a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseContract {
    /// The body is returned as-is, envelope or not.
    RawPassthrough,
    /// `data` is returned when `code == 200`.
    EnvelopeUnwrap,
    /// Only `code == 200` matters.
    BooleanFromCode,
}

/// Result of applying a [`ResponseContract`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Payload(Value),
    Flag(bool),
    Failed,
}

impl ResponseContract {
    /// Apply the contract. Transport and application failures are not told
    /// apart: both end up as `Failed` (or `Flag(false)`).
    pub fn normalize(self, result: Result<Value, ApiError>) -> Normalized {
        let body = match result {
            Ok(body) => body,
            Err(_) if self == ResponseContract::BooleanFromCode => return Normalized::Flag(false),
            Err(_) => return Normalized::Failed,
        };

        match self {
            ResponseContract::RawPassthrough => Normalized::Payload(body),
            ResponseContract::EnvelopeUnwrap => match Envelope::<Value>::from_value(body) {
                Ok(envelope) if envelope.is_success() => {
                    Normalized::Payload(envelope.data.unwrap_or(Value::Null))
                }
                _ => Normalized::Failed,
            },
            ResponseContract::BooleanFromCode => Normalized::Flag(
                Envelope::<Value>::from_value(body)
                    .map(|envelope| envelope.is_success())
                    .unwrap_or(false),
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// 4. Caller-Facing Results
// -----------------------------------------------------------------------------

/// Result of a mutation that reports failures as a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = Value> {
    Success(Option<T>),
    Failure { message: String },
}

impl<T> Outcome<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Failure { message } => Some(message),
            Outcome::Success(_) => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => data.as_ref(),
            Outcome::Failure { .. } => None,
        }
    }

    /// Drop the payload of a success, for operations that report only `success`.
    pub fn without_data(self) -> Self {
        match self {
            Outcome::Success(_) => Outcome::Success(None),
            failure => failure,
        }
    }
}

/// Result of a search-style operation.
///
/// `NotFound` stands for the literal sentinel `404` and covers both
/// "no such record" and "request failed". The two are deliberately not split.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T = Value> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// `Some(404)` when nothing was found.
    pub fn sentinel(&self) -> Option<u16> {
        match self {
            Lookup::Found(_) => None,
            Lookup::NotFound => Some(NOT_FOUND_SENTINEL),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// Fallback messages of a structured mutation.
#[derive(Debug, Clone, Copy)]
pub struct FailureMessages {
    /// Used when the server answered with a non-200 code and no message.
    pub rejected: &'static str,
    /// Used when the request failed and the response carried no message.
    pub failed: &'static str,
}

// -----------------------------------------------------------------------------
// 5. Normalizing Helpers on ApiClient
// -----------------------------------------------------------------------------

impl ApiClient {
    async fn exchange(&self, op: &str, request: ApiRequest) -> Result<Value, ApiError> {
        let result = self.body(request).await;
        match &result {
            Ok(body) => log::debug!("{} response: {}", op, body),
            Err(err) => log::error!("Error in {}: {}", op, err),
        }
        result
    }

    /// `true` iff the envelope code is 200.
    pub async fn flag(&self, op: &str, request: ApiRequest) -> bool {
        match ResponseContract::BooleanFromCode.normalize(self.exchange(op, request).await) {
            Normalized::Flag(flag) => flag,
            _ => false,
        }
    }

    /// `data` on code 200, `None` otherwise.
    pub async fn fetch(&self, op: &str, request: ApiRequest) -> Option<Value> {
        match ResponseContract::EnvelopeUnwrap.normalize(self.exchange(op, request).await) {
            Normalized::Payload(data) => Some(data),
            _ => None,
        }
    }

    /// `data` on code 200, the 404 sentinel on anything else.
    pub async fn lookup(&self, op: &str, request: ApiRequest) -> Lookup {
        match ResponseContract::EnvelopeUnwrap.normalize(self.exchange(op, request).await) {
            Normalized::Payload(data) => Lookup::Found(data),
            _ => Lookup::NotFound,
        }
    }

    /// The whole body on success, `None` on failure.
    pub async fn passthrough(&self, op: &str, request: ApiRequest) -> Option<Value> {
        match ResponseContract::RawPassthrough.normalize(self.exchange(op, request).await) {
            Normalized::Payload(body) => Some(body),
            _ => None,
        }
    }

    /// The whole body on success; the rejected response's body on HTTP
    /// failure. Only failures without a response are returned as errors.
    pub async fn settle(&self, op: &str, request: ApiRequest) -> Result<Value, ApiError> {
        match self.exchange(op, request).await {
            Ok(body) => Ok(body),
            Err(ApiError::Status { body, .. }) => Ok(body),
            Err(err) => Err(err),
        }
    }

    /// The whole body; failures are returned for the caller to handle.
    pub async fn raw(&self, op: &str, request: ApiRequest) -> Result<Value, ApiError> {
        self.exchange(op, request).await
    }

    /// Full envelope on code 200, `None` otherwise.
    pub async fn envelope(&self, op: &str, request: ApiRequest) -> Option<Envelope> {
        let body = self.exchange(op, request).await.ok()?;
        Envelope::from_value(body)
            .ok()
            .filter(|envelope| envelope.is_success())
    }

    /// `Success(data)` on code 200, otherwise a failure message preferring
    /// whatever the server said.
    pub async fn mutate(
        &self,
        op: &str,
        request: ApiRequest,
        messages: FailureMessages,
    ) -> Outcome {
        match self.exchange(op, request).await {
            Ok(body) => match Envelope::<Value>::from_value(body) {
                Ok(envelope) if envelope.is_success() => Outcome::Success(envelope.data),
                Ok(envelope) => {
                    Outcome::failure(envelope.message().unwrap_or(messages.rejected))
                }
                Err(_) => Outcome::failure(messages.rejected),
            },
            Err(err) => Outcome::failure(
                err.response_message()
                    .unwrap_or_else(|| messages.failed.to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn network() -> Result<Value, ApiError> {
        Err(ApiError::Network("connection refused".into()))
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let envelope = Envelope::<Value>::from_value(json!({ "code": 200 })).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.message, None);
        assert_eq!(envelope.data, None);

        let envelope = Envelope::<Value>::from_value(json!({ "code": 1016, "message": "" })).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), None);
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct StoreRef {
        #[serde(rename = "storeId")]
        store_id: i64,
    }

    #[test]
    fn typed_envelope_needs_no_default_payload() {
        let envelope =
            Envelope::<StoreRef>::from_value(json!({ "code": 200, "data": { "storeId": 7 } }))
                .unwrap();
        assert_eq!(envelope.data, Some(StoreRef { store_id: 7 }));

        let empty = Envelope::<StoreRef>::from_value(json!({ "code": 200 })).unwrap();
        assert_eq!(empty.data, None);
    }

    #[test]
    fn envelope_without_code_is_rejected() {
        assert!(matches!(
            Envelope::<Value>::from_value(json!({ "data": 1 })),
            Err(ApiError::Deserialize(_))
        ));
    }

    #[test]
    fn boolean_contract() {
        let contract = ResponseContract::BooleanFromCode;
        assert_eq!(contract.normalize(Ok(json!({ "code": 200 }))), Normalized::Flag(true));
        assert_eq!(contract.normalize(Ok(json!({ "code": 500 }))), Normalized::Flag(false));
        assert_eq!(contract.normalize(Ok(json!("not an envelope"))), Normalized::Flag(false));
        assert_eq!(contract.normalize(network()), Normalized::Flag(false));
    }

    #[test]
    fn unwrap_contract_returns_data_untouched() {
        let contract = ResponseContract::EnvelopeUnwrap;
        let data = json!({ "content": [{ "id": 1, "name": "Drinks" }], "totalPages": 3 });
        assert_eq!(
            contract.normalize(Ok(json!({ "code": 200, "data": data.clone() }))),
            Normalized::Payload(data)
        );
        assert_eq!(contract.normalize(Ok(json!({ "code": 1 }))), Normalized::Failed);
        assert_eq!(contract.normalize(network()), Normalized::Failed);
    }

    #[test]
    fn passthrough_contract_keeps_body() {
        let body = json!({ "code": 400, "message": "nope" });
        assert_eq!(
            ResponseContract::RawPassthrough.normalize(Ok(body.clone())),
            Normalized::Payload(body)
        );
        assert_eq!(ResponseContract::RawPassthrough.normalize(network()), Normalized::Failed);
    }

    #[test]
    fn lookup_sentinel_is_404() {
        assert_eq!(Lookup::<Value>::NotFound.sentinel(), Some(404));
        assert_eq!(Lookup::Found(json!(1)).sentinel(), None);
        assert_eq!(Lookup::Found(json!(1)).into_option(), Some(json!(1)));
    }

    #[test]
    fn outcome_without_data_keeps_failures() {
        let success: Outcome = Outcome::Success(Some(json!(1)));
        assert_eq!(success.without_data(), Outcome::Success(None));
        let failure: Outcome = Outcome::failure("dup");
        assert_eq!(failure.clone().without_data(), failure);
        assert_eq!(failure.message(), Some("dup"));
    }
}
