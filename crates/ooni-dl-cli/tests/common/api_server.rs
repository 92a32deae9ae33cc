//! Minimal HTTP/1.1 server for end-to-end tests.
//!
//! Serves fixed responses keyed by request target (path plus query, trailing
//! `?` ignored). `{base}` in a body is replaced with the server's base URL so
//! listing pages can link to each other. Every request target is recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u32,
    pub body: String,
}

impl Route {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u32) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

pub struct ApiServer {
    /// e.g. "http://127.0.0.1:12345" (no trailing slash).
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl ApiServer {
    pub fn url(&self, target: &str) -> String {
        format!("{}{}", self.base, target)
    }

    /// Request targets in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self, target: &str) -> usize {
        let key = normalize(target);
        self.hits().iter().filter(|h| **h == *key).count()
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}", port);
    let routes: HashMap<String, Route> = routes
        .into_iter()
        .map(|(target, mut route)| {
            route.body = route.body.replace("{base}", &base);
            (normalize(target), route)
        })
        .collect();
    let routes = Arc::new(routes);
    let hits = Arc::new(Mutex::new(Vec::new()));
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    ApiServer { base, hits }
}

fn normalize(target: &str) -> String {
    target.trim_end_matches('?').to_string()
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = normalize(parts.next().unwrap_or(""));
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    hits.lock().unwrap().push(target.clone());

    let route = routes.get(&target).cloned().unwrap_or_else(|| Route::status(404));
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(route.body.as_bytes());
}
