//! Classification of the `/run` response into a terminal outcome.
//!
//! The transport hands back the raw status code, header lines, and body;
//! this module decides which of the four terminal outcomes applies and,
//! for success, which filename the download should be saved under.

mod content_disposition;
mod sanitize;

pub use content_disposition::filename_from_content_disposition;
pub use sanitize::safe_filename;

use crate::request_id::REQUEST_ID_HEADER;

/// Filename used when the response carries no usable Content-Disposition.
pub const DEFAULT_FILENAME: &str = "payslips.zip";

/// Raw response as collected by the transport: status code, header lines
/// (one per line, `Name: value`), and body bytes.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u32,
    pub header_lines: Vec<String>,
    pub body: Vec<u8>,
}

/// Terminal outcome of one submission. Every variant maps to exactly one
/// status-line message; none is retried.
#[derive(Debug)]
pub enum Outcome {
    /// 2xx: the body is the downloadable file content.
    Success { filename: String, body: Vec<u8> },
    /// 404: no payslips found, or the login failed server-side.
    NotFound,
    /// 400: the server rejected the request as missing required fields.
    BadRequest,
    /// Any other non-2xx status. Detail is logged, not shown.
    ServerError { status: u32 },
}

impl RawResponse {
    /// Case-insensitive header lookup over the collected lines.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_lines.iter().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            if n.trim().eq_ignore_ascii_case(name) {
                Some(v.trim())
            } else {
                None
            }
        })
    }

    /// Server-echoed correlation id, if any.
    pub fn echoed_request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// Filename the download should be saved under: parsed from
    /// Content-Disposition when present, sanitized, `payslips.zip` otherwise.
    pub fn download_filename(&self) -> String {
        let parsed = self
            .header("content-disposition")
            .and_then(filename_from_content_disposition);
        match parsed {
            Some(name) => {
                let safe = safe_filename(&name);
                if safe.is_empty() {
                    DEFAULT_FILENAME.to_string()
                } else {
                    safe
                }
            }
            None => DEFAULT_FILENAME.to_string(),
        }
    }

    /// Classifies the response per the status table. Diagnostic detail for
    /// unexpected statuses is logged here so callers only see the outcome.
    pub fn into_outcome(self) -> Outcome {
        match self.status {
            200..=299 => {
                let filename = self.download_filename();
                Outcome::Success {
                    filename,
                    body: self.body,
                }
            }
            404 => Outcome::NotFound,
            400 => Outcome::BadRequest,
            status => {
                let body_text = String::from_utf8_lossy(&self.body);
                tracing::error!(status, body = %body_text, "submission failed");
                Outcome::ServerError { status }
            }
        }
    }
}
