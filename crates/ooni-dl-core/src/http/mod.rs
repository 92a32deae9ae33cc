//! Single-request HTTP seam.
//!
//! The fetch loop only needs "GET this URL, give me status and body"; the
//! [`Transport`] trait keeps libcurl out of the retry logic and lets tests
//! script responses.

mod curl;

pub use self::curl::CurlTransport;

use std::borrow::Cow;

/// Status and raw body of one completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u32, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any status below 300 counts as success.
    pub fn is_success(&self) -> bool {
        self.status < 300
    }

    /// Body decoded as UTF-8 (lossy).
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Failure before any HTTP status was received (DNS, connect, reset, ...).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("curl: {0}")]
    Curl(#[from] ::curl::Error),
}

/// Performs blocking HTTP GET requests.
pub trait Transport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError>;
}
