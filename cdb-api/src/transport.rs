//! The network seam.

use crate::error::Result;
use async_trait::async_trait;

/// Raw HTTP reply: status code plus the body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform GETs and multipart POSTs.
///
/// Futures are not required to be `Send`: the browser event loop is
/// single-threaded and `web-sys` handles are `!Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// The multipart payload this transport knows how to post.
    type Form;

    /// Only transport-level failures are errors here; any HTTP status is `Ok`.
    async fn get(&self, url: &str) -> Result<HttpReply>;

    async fn post_form(&self, url: &str, form: Self::Form) -> Result<HttpReply>;
}
