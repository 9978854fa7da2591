//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use attestation_client::clients::{HttpError, HttpRequest, HttpResponse, HttpResponseError, Transport};
use attestation_client::{IdentityClient, ResourceId};
use serde_json::Value;

/// In-memory transport that records requests and replays queued answers.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    sent: Mutex<Vec<HttpRequest>>,
    answers: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
}

impl ScriptedTransport {
    pub fn ok(&self, body: Value) -> &Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(200, HashMap::new(), body)));
        self
    }

    pub fn status(&self, code: u16, message: &str) -> &Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Err(HttpError::Response(HttpResponseError {
                code,
                message: message.to_string(),
                error_reference: Some(format!("req-{code}")),
            })));
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.sent.lock().unwrap().push(request);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(204, HashMap::new(), Value::Null)))
    }
}

/// A client over a fresh scripted transport.
pub fn scripted_client(user_id: Option<&str>) -> IdentityClient<ScriptedTransport> {
    IdentityClient::with_transport(ScriptedTransport::default(), user_id.map(ResourceId::from))
}
