//! Credential pair collected from the dialog at submit time.
//!
//! Never persisted and never logged; memory is wiped on drop.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Username/password pair, trimmed on construction.
///
/// Holding a value proves both fields were non-empty after trimming;
/// the submission transport takes `&Credentials`, so no request can be
/// built from blank input.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Builds credentials from raw dialog input, trimming both fields.
    ///
    /// Returns `None` when either field is empty after trimming. That is
    /// the silent no-op guard: the caller sends no request and leaves the
    /// status line untouched.
    pub fn from_input(username: &str, password: &str) -> Option<Self> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Form-encoded request body: `username=...&password=...` with
    /// reserved characters percent-encoded.
    pub fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("username", &self.username)
            .append_pair("password", &self.password)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
