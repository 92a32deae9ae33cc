//! Backoff-governed fetcher: one GET, retried until success or the attempt
//! budget runs out.

mod error;

pub use error::{FetchExhausted, LastFailure};

use crate::backoff::{BackoffController, BackoffPolicy, Sleeper, ThreadSleeper};
use crate::http::{HttpResponse, Transport};
use crate::progress::{Progress, ProgressEvent};

/// Owns the transport and the run-wide [`BackoffController`]. Create one per
/// run and route every request through it.
pub struct Fetcher<T, S = ThreadSleeper> {
    transport: T,
    backoff: BackoffController,
    sleeper: S,
}

impl<T: Transport> Fetcher<T, ThreadSleeper> {
    pub fn new(transport: T, policy: BackoffPolicy) -> Self {
        Self::with_sleeper(transport, policy, ThreadSleeper)
    }
}

impl<T: Transport, S: Sleeper> Fetcher<T, S> {
    pub fn with_sleeper(transport: T, policy: BackoffPolicy, sleeper: S) -> Self {
        Self {
            transport,
            backoff: BackoffController::new(policy),
            sleeper,
        }
    }

    pub fn backoff(&self) -> &BackoffController {
        &self.backoff
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// GET `url`, sleeping for the current delay before every attempt
    /// (including the first).
    ///
    /// A status below 300 returns the response and shrinks the delay; anything
    /// else (including a transport error) grows the delay and tries again.
    /// After `max_attempts` failures returns [`FetchExhausted`].
    pub fn fetch(
        &mut self,
        url: &str,
        progress: &mut dyn Progress,
    ) -> Result<HttpResponse, FetchExhausted> {
        let max_attempts = self.backoff.policy().max_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            let delay = self.backoff.current_delay_duration();
            self.sleeper.sleep(delay);
            progress.report(ProgressEvent::Delay(delay));
            tracing::debug!(url, attempt, delay_secs = delay.as_secs_f64(), "GET");

            let failure = match self.transport.get(url) {
                Ok(resp) if resp.is_success() => {
                    self.backoff.record_success();
                    return Ok(resp);
                }
                Ok(resp) => LastFailure::Status(resp.status),
                Err(e) => LastFailure::Transport(e.to_string()),
            };
            self.backoff.record_failure();
            tracing::warn!(
                url,
                attempt,
                failure = %failure,
                next_delay_secs = self.backoff.current_delay(),
                "request failed"
            );

            if attempt >= max_attempts {
                return Err(FetchExhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    last_failure: failure,
                });
            }
            attempt += 1;
        }
    }
}
