//! Hex API gateway.
//!
//! - `client.rs` - the authenticated [`HexGateway`] and the [`ApiClient`] seam
//! - `response.rs` - classified responses and the error-body predicate
//! - `pagination.rs` - lazy cursor walks over paged collections
//! - `error.rs` - the gateway error taxonomy

mod client;
mod error;
pub mod pagination;
mod response;

pub use client::{ApiClient, ApiRequest, HexGateway, HttpMethod, PROBE_ENDPOINT, request_as};
pub use error::{GatewayError, GatewayResult, RATE_LIMIT_PER_MINUTE};
pub use pagination::{Page, PageEnvelope, collect_all, collect_up_to, fetch_page, pages};
pub use response::{ApiErrorBody, ApiResponse, classify, is_api_error};

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`ApiClient`] for handler tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::{ApiClient, ApiRequest, ApiResponse, GatewayError, GatewayResult, classify};

    /// Replays queued responses and records every request it receives.
    #[derive(Default)]
    pub struct StubClient {
        responses: Mutex<VecDeque<GatewayResult<ApiResponse<Value>>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl StubClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_response(&self, response: GatewayResult<ApiResponse<Value>>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub fn push_success(&self, body: Value) {
            self.push_response(Ok(classify(body)));
        }

        pub fn push_api_error(&self, code: &str, message: &str) {
            self.push_success(json!({ "error": { "code": code, "message": message } }));
        }

        pub fn push_error(&self, error: GatewayError) {
            self.push_response(Err(error));
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiClient for StubClient {
        async fn send(&self, request: ApiRequest) -> GatewayResult<ApiResponse<Value>> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::transport("no stubbed response queued")))
        }
    }
}
