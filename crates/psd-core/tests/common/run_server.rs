//! Minimal HTTP/1.1 server for the POST /run endpoint, for integration tests.
//!
//! Serves a canned response chosen by `ServerMode` and records every
//! request it receives so tests can assert on method, path, headers, and
//! the form-encoded body. Echoes the client's X-Request-ID header back.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Canned response behavior for one test server.
#[derive(Debug, Clone)]
pub enum ServerMode {
    Ok {
        content_disposition: Option<String>,
        body: Vec<u8>,
    },
    NotFound,
    BadRequest,
    ServerError,
    /// First request gets a 302 to /run carrying misleading headers;
    /// the follow-up gets the real 200.
    RedirectThenOk {
        content_disposition: Option<String>,
        body: Vec<u8>,
    },
}

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

/// Starts the server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345") and the shared request log.
/// The server runs until the process exits.
pub fn start(mode: ServerMode) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let log: Arc<Mutex<Vec<CapturedRequest>>> = Arc::default();
    let log_srv = Arc::clone(&log);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let mode = mode.clone();
            let log = Arc::clone(&log_srv);
            thread::spawn(move || handle(stream, &mode, &log));
        }
    });
    (format!("http://127.0.0.1:{}", port), log)
}

fn handle(mut stream: std::net::TcpStream, mode: &ServerMode, log: &Mutex<Vec<CapturedRequest>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    let echo_rid = request.header("X-Request-ID").map(str::to_string);
    let index = {
        let mut requests = log.lock().unwrap();
        requests.push(request);
        requests.len() - 1
    };

    let (status_line, extra_headers, body, echo): (&str, Vec<String>, Vec<u8>, bool) = match mode {
        ServerMode::Ok {
            content_disposition,
            body,
        } => {
            let mut extra = Vec::new();
            if let Some(cd) = content_disposition {
                extra.push(format!("Content-Disposition: {}", cd));
            }
            ("200 OK", extra, body.clone(), true)
        }
        ServerMode::NotFound => (
            "404 Not Found",
            Vec::new(),
            b"No payslips found or login failed.".to_vec(),
            true,
        ),
        ServerMode::BadRequest => (
            "400 Bad Request",
            Vec::new(),
            b"Username and password are required.".to_vec(),
            true,
        ),
        ServerMode::ServerError => (
            "500 Internal Server Error",
            Vec::new(),
            b"Unexpected error while fetching payslips.".to_vec(),
            true,
        ),
        ServerMode::RedirectThenOk {
            content_disposition,
            body,
        } => {
            if index == 0 {
                (
                    "302 Found",
                    vec![
                        "Location: /run".to_string(),
                        "Content-Disposition: attachment; filename=\"interim.zip\"".to_string(),
                        "X-Request-ID: interim-hop".to_string(),
                    ],
                    Vec::new(),
                    false,
                )
            } else {
                let mut extra = Vec::new();
                if let Some(cd) = content_disposition {
                    extra.push(format!("Content-Disposition: {}", cd));
                }
                ("200 OK", extra, body.clone(), true)
            }
        }
    };

    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status_line,
        body.len()
    );
    for h in &extra_headers {
        response.push_str(h);
        response.push_str("\r\n");
    }
    if echo {
        if let Some(rid) = echo_rid {
            response.push_str(&format!("X-Request-ID: {}\r\n", rid));
        }
    }
    response.push_str("\r\n");
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&body);
}

/// Reads one request: header block, then Content-Length bytes of body.
fn read_request(stream: &mut std::net::TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return None;
        }
    };

    let head = std::str::from_utf8(&buf[..header_end]).ok()?;
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();
    let headers: Vec<String> = lines.map(str::to_string).collect();

    let content_length: usize = headers
        .iter()
        .find_map(|l| {
            let (n, v) = l.split_once(':')?;
            if n.trim().eq_ignore_ascii_case("content-length") {
                v.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Some(CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
