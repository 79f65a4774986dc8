//! In-memory transport for tests.
//!
//! Routes match on the URL path (the part before `?`). Every request is
//! recorded so tests can assert how many calls a render issued.

use crate::error::{ApiError, Result};
use crate::transport::{HttpReply, HttpTransport};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

#[derive(Clone)]
enum Route {
    Reply(HttpReply),
    Fail(String),
}

#[derive(Default)]
pub struct FakeTransport {
    routes: RefCell<HashMap<String, Route>>,
    delays: HashMap<String, usize>,
    requests: RefCell<Vec<String>>,
    posted: RefCell<Vec<(String, String)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .borrow_mut()
            .insert(path.to_string(), Route::Reply(HttpReply::new(status, body)));
        self
    }

    pub fn fail(self, path: &str, reason: &str) -> Self {
        self.routes
            .borrow_mut()
            .insert(path.to_string(), Route::Fail(reason.to_string()));
        self
    }

    /// Make requests to `path` yield to the executor `polls` times before answering.
    pub fn delay(mut self, path: &str, polls: usize) -> Self {
        self.delays.insert(path.to_string(), polls);
        self
    }

    /// Swap the reply for `path` after construction.
    pub fn set_reply(&self, path: &str, status: u16, body: &str) {
        self.routes
            .borrow_mut()
            .insert(path.to_string(), Route::Reply(HttpReply::new(status, body)));
    }

    /// Every URL requested so far, GETs and POSTs alike.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter(|url| path_of(url) == path)
            .cloned()
            .collect()
    }

    /// `(url, form label)` for every POST.
    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.borrow().clone()
    }

    async fn answer(&self, url: &str) -> Result<HttpReply> {
        self.requests.borrow_mut().push(url.to_string());
        let path = path_of(url);
        let polls = self.delays.get(path).copied().unwrap_or(0);
        YieldPolls(polls).await;
        let route = self.routes.borrow().get(path).cloned();
        match route {
            Some(Route::Reply(reply)) => Ok(reply),
            Some(Route::Fail(reason)) => Err(ApiError::Transport {
                url: url.to_string(),
                reason,
            }),
            None => Ok(HttpReply::new(404, r#"{"detail": "Not Found"}"#)),
        }
    }
}

fn path_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    /// A label standing in for the multipart body.
    type Form = String;

    async fn get(&self, url: &str) -> Result<HttpReply> {
        self.answer(url).await
    }

    async fn post_form(&self, url: &str, form: Self::Form) -> Result<HttpReply> {
        self.posted.borrow_mut().push((url.to_string(), form));
        self.answer(url).await
    }
}

/// Returns `Pending` (waking itself) the given number of times.
struct YieldPolls(usize);

impl Future for YieldPolls {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            return Poll::Ready(());
        }
        self.0 -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
