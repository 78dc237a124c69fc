//! In-memory transport for tests.

use super::types::{RawResponse, Transport};
use crate::tools::types::{Failure, FailureKind};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub(crate) struct MockReply {
    pub delay: Duration,
    pub result: Result<RawResponse, Failure>,
}

impl MockReply {
    pub fn content(content_type: &str, body: &[u8]) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(RawResponse {
                status: 200,
                final_url: String::new(),
                content_type: Some(content_type.to_string()),
                body: body.to_vec(),
            }),
        }
    }

    pub fn html(body: &str) -> Self {
        Self::content("text/html; charset=utf-8", body.as_bytes())
    }

    pub fn status(status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(RawResponse {
                status,
                final_url: String::new(),
                content_type: Some("text/html".to_string()),
                body: Vec::new(),
            }),
        }
    }

    pub fn failure(kind: FailureKind) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(Failure::new(kind, "mock failure")),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Decrements the in-flight counter on every exit path, cancellation included.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Scripted transport.
///
/// Each route holds a queue of replies; replies are consumed in order and the
/// last one repeats. Unrouted URLs get the default reply.
pub(crate) struct MockTransport {
    default: MockReply,
    routes: Mutex<HashMap<String, VecDeque<MockReply>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new(default: MockReply) -> Self {
        Self {
            default,
            routes: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn route(self, address: &str, reply: MockReply) -> Self {
        let key = Url::parse(address)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| address.to_string());
        self.routes
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self, url: &Url) -> MockReply {
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(url.as_str()) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| self.default.clone()),
            None => self.default.clone(),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get(&self, url: &Url, _timeout: Duration) -> Result<RawResponse, Failure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let reply = self.next_reply(url);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }

        reply.result.map(|mut response| {
            response.final_url = url.to_string();
            response
        })
    }
}
