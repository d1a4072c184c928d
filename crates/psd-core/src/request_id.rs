//! Correlation request ids.
//!
//! One id is generated per submission and attached as the `X-Request-ID`
//! header so a client-side status line can be matched against server logs.
//! If the server echoes an id back, the echoed value wins for display.

use std::fmt;
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Client-generated correlation id; lifetime = one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefers the server-echoed id over the locally generated one.
    pub fn or_echoed(&self, echoed: Option<&str>) -> String {
        match echoed {
            Some(rid) if !rid.trim().is_empty() => rid.trim().to_string(),
            _ => self.0.clone(),
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }

    #[test]
    fn echoed_id_takes_precedence() {
        let rid = RequestId::generate();
        assert_eq!(rid.or_echoed(Some("srv-1")), "srv-1");
    }

    #[test]
    fn blank_echo_falls_back_to_generated() {
        let rid = RequestId::generate();
        assert_eq!(rid.or_echoed(Some("   ")), rid.as_str());
        assert_eq!(rid.or_echoed(None), rid.as_str());
    }
}
