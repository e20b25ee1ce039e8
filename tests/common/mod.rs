use async_trait::async_trait;
use dish_console::api::RequestSender;
use dish_console::errors::AppResult;
use dish_console::models::{ApiRequest, ApiResponse};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and records every request.
#[derive(Default)]
pub struct RecordingApi {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingApi {
    pub fn new(responses: Vec<ApiResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl RequestSender for RecordingApi {
    async fn send_request(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.requests.lock().expect("requests lock").push(request);
        let next = self.responses.lock().expect("responses lock").pop_front();
        Ok(next.unwrap_or(ApiResponse {
            status: 200,
            data: serde_json::Value::Null,
        }))
    }
}

pub fn ok(data: serde_json::Value) -> ApiResponse {
    ApiResponse { status: 200, data }
}

pub fn status(status: u16) -> ApiResponse {
    ApiResponse {
        status,
        data: serde_json::Value::Null,
    }
}
