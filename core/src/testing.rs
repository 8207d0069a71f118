//! In-memory transports for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub(crate) fn todo_json(id: i64, title: &str, completed: bool) -> String {
    format!(
        r#"{{"id":{id},"title":"{title}","description":"","completed":{completed},"createdAt":"2024-01-15T10:30:00"}}"#
    )
}

pub(crate) fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

/// Answers requests in order from a queue of canned replies and records
/// every request it sees. Clones share state.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, ApiError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(response(status, body)));
    }

    pub(crate) fn fail(&self, reason: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::Transport(reason.to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left"))
    }
}

type Gate = oneshot::Sender<Result<HttpResponse, ApiError>>;

/// Holds every request open until the test releases it, so tests choose the
/// order in which concurrent operations resolve.
#[derive(Clone, Default)]
pub(crate) struct GatedTransport {
    pending: Rc<RefCell<Vec<(HttpRequest, Option<Gate>)>>>,
}

impl GatedTransport {
    /// Yield until at least `n` requests have arrived.
    pub(crate) async fn wait_for(&self, n: usize) {
        while self.pending.borrow().len() < n {
            tokio::task::yield_now().await;
        }
    }

    pub(crate) fn request(&self, index: usize) -> HttpRequest {
        self.pending.borrow()[index].0.clone()
    }

    /// Release the `index`-th request (arrival order) with a response.
    pub(crate) fn release(&self, index: usize, status: u16, body: &str) {
        let gate = self.pending.borrow_mut()[index]
            .1
            .take()
            .unwrap_or_else(|| panic!("request {index} already released"));
        let _ = gate.send(Ok(response(status, body)));
    }
}

impl Transport for GatedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push((request, Some(tx)));
        rx.await
            .unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".to_string())))
    }
}
