//! Scripted transport, recording sleeper and recording progress for unit tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::backoff::Sleeper;
use crate::http::{HttpResponse, Transport, TransportError};
use crate::progress::{Progress, ProgressEvent};

#[derive(Debug, Clone)]
pub(crate) enum Step {
    Respond(u32, Vec<u8>),
    /// curl error code (e.g. 7 = couldn't connect).
    Fail(u32),
}

/// Per-URL queue of responses. The last step of a queue repeats forever.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    routes: HashMap<String, VecDeque<Step>>,
    pub requests: Vec<String>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: &str, step: Step) -> &mut Self {
        self.routes.entry(url.to_string()).or_default().push_back(step);
        self
    }

    pub fn ok(&mut self, url: &str, body: &str) -> &mut Self {
        self.push(url, Step::Respond(200, body.as_bytes().to_vec()))
    }

    pub fn status(&mut self, url: &str, status: u32) -> &mut Self {
        self.push(url, Step::Respond(status, Vec::new()))
    }

    pub fn hits(&self, url: &str) -> usize {
        self.requests.iter().filter(|u| u.as_str() == url).count()
    }
}

impl Transport for ScriptedTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.push(url.to_string());
        let queue = self
            .routes
            .get_mut(url)
            .unwrap_or_else(|| panic!("no scripted response for {url}"));
        let step = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };
        match step {
            Step::Respond(status, body) => Ok(HttpResponse::new(status, body)),
            Step::Fail(code) => Err(TransportError::Curl(curl::Error::new(code))),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSleeper {
    pub sleeps: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, delay: Duration) {
        self.sleeps.push(delay);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingProgress {
    pub lines: Vec<String>,
}

impl Progress for RecordingProgress {
    fn report(&mut self, event: ProgressEvent<'_>) {
        self.lines.push(event.to_string());
    }
}

/// Minimal listing page body.
pub(crate) fn page_json(current: u64, pages: u64, count: u64, next: Option<&str>, items: &[(&str, &str)]) -> String {
    let next = match next {
        Some(u) => format!("\"{u}\""),
        None => "null".to_string(),
    };
    let results: Vec<String> = items
        .iter()
        .map(|(index, url)| format!("{{\"index\": \"{index}\", \"download_url\": \"{url}\"}}"))
        .collect();
    format!(
        "{{\"metadata\": {{\"current_page\": {current}, \"pages\": {pages}, \"count\": {count}, \"next_url\": {next}}}, \"results\": [{}]}}",
        results.join(", ")
    )
}
