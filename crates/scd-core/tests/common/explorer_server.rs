//! Minimal HTTP/1.1 server standing in for the explorer's `getsourcecode` API.
//!
//! Routes on the `address` query parameter (case-insensitive) and records the
//! address of every request so tests can count hops.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Canned reply for one address.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    /// Sleep before answering (to trip client timeouts).
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }
}

pub struct ExplorerServer {
    /// Base API URL, e.g. "http://127.0.0.1:12345/api".
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ExplorerServer {
    /// Addresses requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Unknown addresses get a `NOTOK`
/// explorer response. The server runs until the process exits.
pub fn start(replies: Vec<(&str, Reply)>) -> ExplorerServer {
    let replies: Arc<HashMap<String, Reply>> = Arc::new(
        replies
            .into_iter()
            .map(|(a, r)| (a.to_ascii_lowercase(), r))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let replies = Arc::clone(&replies);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &replies, &log));
        }
    });
    ExplorerServer {
        url: format!("http://127.0.0.1:{}/api", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    replies: &HashMap<String, Reply>,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
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
    let address = request_address(request).unwrap_or_default();
    log.lock().unwrap().push(address.clone());

    let reply = replies
        .get(&address.to_ascii_lowercase())
        .cloned()
        .unwrap_or_else(|| Reply::ok(r#"{"status":"0","message":"NOTOK","result":"Invalid address format"}"#));
    if let Some(d) = reply.delay {
        thread::sleep(d);
    }
    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
}

/// `address` query parameter of the request line, if any.
fn request_address(request: &str) -> Option<String> {
    let target = request.lines().next()?.split_whitespace().nth(1)?;
    let url = url::Url::parse(&format!("http://localhost{target}")).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "address")
        .map(|(_, v)| v.into_owned())
}
