//! Shared mock HTTP client for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock HTTP client that returns a scripted sequence of responses and
/// captures every request it receives.
#[derive(Debug)]
pub(crate) struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub(crate) fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Mock that answers every call with `200 OK` and the given JSON bodies,
    /// in order.
    pub(crate) fn json_sequence(bodies: Vec<serde_json::Value>) -> Self {
        Self::new(bodies.into_iter().map(|b| Ok(ok_json(&b))).collect())
    }

    pub(crate) fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub(crate) fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "mock ran out of scripted responses");
        responses.remove(0)
    }
}

impl HttpClient for &MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Mock HTTP client whose requests never complete.
///
/// Exercises the deadline path under `tokio::test(start_paused = true)`.
#[derive(Debug)]
pub(crate) struct PendingClient;

impl HttpClient for PendingClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        std::future::pending().await
    }
}

/// A `200 OK` response carrying the given JSON body.
pub(crate) fn ok_json(body: &serde_json::Value) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::OK,
        http::HeaderMap::new(),
        serde_json::to_vec(body).unwrap(),
    )
}
