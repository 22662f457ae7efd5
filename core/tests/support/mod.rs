//! Scripted in-memory `Transport` shared by the controller tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use student_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, StudentApi, StudentClient, SyncController, Transport};
use tokio::sync::oneshot;

pub const BASE_URL: &str = "http://backend.test";

enum Reply {
    Ready(Result<HttpResponse, ApiError>),
    Pending(oneshot::Receiver<HttpResponse>),
}

/// Answers requests in FIFO order from a queue of scripted replies and
/// records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    requests: RefCell<Vec<HttpRequest>>,
    replies: RefCell<VecDeque<Reply>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .push_back(Reply::Ready(Ok(HttpResponse::new(status, body))));
    }

    pub fn unreachable(&self) {
        self.replies
            .borrow_mut()
            .push_back(Reply::Ready(Err(ApiError::Transport("connection refused".to_string()))));
    }

    /// Queue a reply that only resolves once the returned sender fires.
    pub fn deferred(&self) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Pending(rx));
        tx
    }

    pub fn requests(&self) -> Vec<(HttpMethod, String)> {
        self.requests
            .borrow()
            .iter()
            .map(|r| (r.method, r.path.trim_start_matches(BASE_URL).to_string()))
            .collect()
    }

    pub fn bodies(&self) -> Vec<Option<serde_json::Value>> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.body.as_deref().map(|b| serde_json::from_str(b).unwrap()))
            .collect()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Pending(rx)) => rx
                .await
                .map_err(|_| ApiError::Transport("reply dropped".to_string())),
            None => Err(ApiError::Transport("no scripted reply".to_string())),
        }
    }
}

pub fn controller() -> SyncController<ScriptedTransport> {
    let api = StudentApi::new(StudentClient::new(BASE_URL), ScriptedTransport::default());
    SyncController::new(api)
}

pub fn roster_json(ids_and_names: &[(i64, &str)]) -> String {
    let records: Vec<serde_json::Value> = ids_and_names
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "id": id,
                "name": name,
                "email": format!("{}@uni.edu", name.to_lowercase()),
                "course": "Physics",
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}
