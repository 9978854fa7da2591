//! In-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;

use crate::clients::{HttpError, HttpRequest, HttpResponse, Transport};

/// Records every request and replays queued responses in order.
///
/// When the queue is empty it answers `200` with an empty body.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, code: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(code, HashMap::new(), body)));
    }

    pub fn fail(&self, error: HttpError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, HashMap::new(), Value::Null)))
    }
}
