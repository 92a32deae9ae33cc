//! Blocking GET over libcurl's easy interface.

use curl::easy::Easy;

use super::{HttpResponse, Transport, TransportError};

/// Reuses one easy handle for the whole run so keep-alive connections to the
/// API host survive between requests.
///
/// Only redirects are configured; connect and transfer timeouts stay at
/// libcurl's defaults.
pub struct CurlTransport {
    easy: Easy,
}

impl CurlTransport {
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let mut easy = Easy::new();
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(user_agent)?;
        Ok(Self { easy })
    }
}

impl Transport for CurlTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut body = Vec::new();
        self.easy.url(url)?;
        self.easy.get(true)?;
        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        let status = self.easy.response_code()?;
        tracing::trace!(url, status, bytes = body.len(), "GET finished");
        Ok(HttpResponse { status, body })
    }
}
