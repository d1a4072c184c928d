//! Submission transport: one form-encoded POST to the `/run` endpoint.
//!
//! Uses the curl crate (libcurl). The transfer is blocking; call from
//! `spawn_blocking` when driving it from async code. No retries: every
//! outcome, including transport failure, is terminal for the submission.

use std::str;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::credentials::Credentials;
use crate::request_id::{RequestId, REQUEST_ID_HEADER};
use crate::response::RawResponse;

/// Request could not complete at the network level (connect failure,
/// timeout, TLS error, ...). Maps to the "Network error." status; kept
/// separate from HTTP statuses, which always produce a `RawResponse`.
#[derive(Debug, Error)]
#[error("network failure: {0}")]
pub struct TransportError(#[from] curl::Error);

/// Transport timeouts. The total timeout is generous: the server runs the
/// payslip retrieval synchronously and may take minutes.
#[derive(Debug, Clone, Copy)]
pub struct SubmitTimeouts {
    pub connect: Duration,
    pub total: Duration,
}

impl Default for SubmitTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            total: Duration::from_secs(900),
        }
    }
}

/// Resolves the fixed `/run` endpoint against the configured server URL.
pub fn run_endpoint(server_url: &str) -> anyhow::Result<Url> {
    let base = Url::parse(server_url.trim())
        .map_err(|e| anyhow::anyhow!("invalid server URL {:?}: {}", server_url, e))?;
    if base.cannot_be_a_base() {
        anyhow::bail!("invalid server URL {:?}: not an HTTP base", server_url);
    }
    // Preserve any base path prefix (e.g. behind a reverse proxy).
    let joined = if base.path().ends_with('/') {
        base.join("run")
    } else {
        let with_slash = format!("{}/", base.path());
        let mut base = base;
        base.set_path(&with_slash);
        base.join("run")
    };
    joined.map_err(|e| anyhow::anyhow!("cannot build /run endpoint: {}", e))
}

/// Sends exactly one POST carrying the credential pair, form-encoded, and
/// collects the status code, header lines, and body bytes.
///
/// A non-2xx status is not an error here; classification happens in
/// [`RawResponse::into_outcome`](crate::response::RawResponse::into_outcome).
pub fn submit(
    endpoint: &Url,
    credentials: &Credentials,
    request_id: &RequestId,
    timeouts: SubmitTimeouts,
) -> Result<RawResponse, TransportError> {
    let body = credentials.form_body();

    let mut header_lines: Vec<String> = Vec::new();
    let mut response_body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(endpoint.as_str())?;
    easy.post(true)?;
    easy.post_fields_copy(body.as_bytes())?;
    easy.follow_location(true)?;
    easy.max_redirections(5)?;
    easy.connect_timeout(timeouts.connect)?;
    easy.timeout(timeouts.total)?;

    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/x-www-form-urlencoded")?;
    list.append(&format!("{}: {}", REQUEST_ID_HEADER, request_id))?;
    easy.http_headers(list)?;

    tracing::debug!(rid = %request_id, endpoint = %endpoint, "starting run");

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                let line = s.trim_end();
                // A status line starts the headers of a new hop (redirect);
                // only the final response's headers may be kept.
                if line.starts_with("HTTP/") {
                    header_lines.clear();
                } else if !line.is_empty() {
                    header_lines.push(line.to_string());
                }
            }
            true
        })?;
        transfer.write_function(|data| {
            response_body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(rid = %request_id, status, bytes = response_body.len(), "run completed");

    Ok(RawResponse {
        status,
        header_lines,
        body: response_body,
    })
}
