//! Classified responses from the Hex API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{GatewayError, GatewayResult};

/// The error object carried in a Hex API error body.
///
/// Wire shape: `{"error": {"code": "...", "message": "...", ...}}`.
/// Fields other than `code` and `message` are kept in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

/// Outcome of a request that reached the Hex API and produced a decodable body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// The body had the expected shape.
    Success(T),
    /// The body was an `error` object.
    ApiError(ApiErrorBody),
}

impl<T> ApiResponse<T> {
    /// Turn the ApiError branch into `GatewayError::Api`.
    pub fn into_result(self) -> GatewayResult<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::ApiError(body) => Err(GatewayError::Api {
                code: body.code,
                message: body.message,
                details: body.details,
            }),
        }
    }

    /// Map the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success(value) => ApiResponse::Success(f(value)),
            Self::ApiError(body) => ApiResponse::ApiError(body),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// True iff `value` is an object whose `error` field is an object holding
/// both `code` and `message`.
pub fn is_api_error(value: &Value) -> bool {
    value
        .get("error")
        .and_then(Value::as_object)
        .is_some_and(|error| error.contains_key("code") && error.contains_key("message"))
}

/// Extract the error body from a value that satisfies [`is_api_error`].
///
/// Non-string `code`/`message` values are rendered as JSON text.
fn api_error_body(value: &Value) -> Option<ApiErrorBody> {
    if !is_api_error(value) {
        return None;
    }
    let error = value.get("error")?.as_object()?;

    let text = |field: &str| match error.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let details: Map<String, Value> = error
        .iter()
        .filter(|(key, _)| key.as_str() != "code" && key.as_str() != "message")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Some(ApiErrorBody {
        code: text("code"),
        message: text("message"),
        details: (!details.is_empty()).then_some(details),
    })
}

/// Classify a decoded body: the error predicate wins over any other shape.
pub fn classify(value: Value) -> ApiResponse<Value> {
    match api_error_body(&value) {
        Some(body) => ApiResponse::ApiError(body),
        None => ApiResponse::Success(value),
    }
}

/// Convert a classified JSON payload into the caller's expected type.
pub fn decode<T: DeserializeOwned>(response: ApiResponse<Value>) -> GatewayResult<ApiResponse<T>> {
    match response {
        ApiResponse::Success(value) => serde_json::from_value(value)
            .map(ApiResponse::Success)
            .map_err(|e| GatewayError::transport(format!("Unexpected response shape: {}", e))),
        ApiResponse::ApiError(body) => Ok(ApiResponse::ApiError(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_api_error_accepts_code_and_message() {
        assert!(is_api_error(&json!({
            "error": { "code": "NOT_FOUND", "message": "Project not found" }
        })));
        assert!(is_api_error(&json!({
            "error": { "code": 42, "message": null, "traceId": "abc" },
            "data": []
        })));
    }

    #[test]
    fn test_is_api_error_rejects_other_shapes() {
        assert!(!is_api_error(&Value::Null));
        assert!(!is_api_error(&json!([{ "error": { "code": "X", "message": "Y" } }])));
        assert!(!is_api_error(&json!("error")));
        assert!(!is_api_error(&json!(17)));
        assert!(!is_api_error(&json!({})));
        assert!(!is_api_error(&json!({ "error": "boom" })));
        assert!(!is_api_error(&json!({ "error": null })));
        assert!(!is_api_error(&json!({ "error": { "code": "X" } })));
        assert!(!is_api_error(&json!({ "error": { "message": "Y" } })));
        assert!(!is_api_error(&json!({ "code": "X", "message": "Y" })));
    }

    #[test]
    fn test_classify_keeps_details() {
        let response = classify(json!({
            "error": { "code": "INVALID", "message": "bad input", "field": "limit" }
        }));
        let ApiResponse::ApiError(body) = response else {
            panic!("expected ApiError branch");
        };
        assert_eq!(body.code, "INVALID");
        assert_eq!(body.message, "bad input");
        assert_eq!(body.details.unwrap().get("field"), Some(&json!("limit")));
    }

    #[test]
    fn test_classify_success() {
        let response = classify(json!({ "id": "p1" }));
        assert_eq!(response, ApiResponse::Success(json!({ "id": "p1" })));
    }

    #[test]
    fn test_decode_mismatched_shape_is_transport_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Project {
            id: String,
        }

        let result = decode::<Project>(ApiResponse::Success(json!({ "title": "no id" })));
        assert!(matches!(result, Err(GatewayError::Transport(_))));
    }

    #[test]
    fn test_into_result_maps_api_error() {
        let response: ApiResponse<Value> = ApiResponse::ApiError(ApiErrorBody {
            code: "NOT_FOUND".to_string(),
            message: "missing".to_string(),
            details: None,
        });
        let err = response.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Hex API error [NOT_FOUND]: missing");
    }
}
