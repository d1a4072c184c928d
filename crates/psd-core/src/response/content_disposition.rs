//! Filename extraction from a Content-Disposition header value.

/// Extracts the suggested filename from a raw header value such as
/// `attachment; filename="payslips.zip"`.
///
/// Handles the quoted and bare-token forms of `filename=`, plus the
/// RFC 5987 `filename*=UTF-8''...` form, which wins when both appear.
/// Returns `None` when no non-empty filename parameter is present.
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for part in value.split(';').map(str::trim) {
        let Some((key, raw)) = part.split_once('=') else {
            continue;
        };
        let raw = raw.trim();
        match key.trim() {
            k if k.eq_ignore_ascii_case("filename*") => {
                if let Some(name) = decode_ext_value(raw) {
                    if !name.is_empty() {
                        return Some(name);
                    }
                }
            }
            k if k.eq_ignore_ascii_case("filename") => {
                let name = unquote(raw);
                if !name.is_empty() {
                    plain = Some(name);
                }
            }
            _ => {}
        }
    }

    plain
}

/// Strips surrounding double quotes and resolves `\"` / `\\` escapes.
/// A bare token is returned as-is.
fn unquote(raw: &str) -> String {
    let inner = match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => inner,
        None => return raw.to_string(),
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            if c != '"' && c != '\\' {
                out.push('\\');
            }
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    if escaped {
        out.push('\\');
    }
    out
}

/// Decodes an RFC 5987 extended value: `UTF-8''percent%20encoded`.
/// Only the UTF-8 charset is accepted; the optional language tag is ignored.
fn decode_ext_value(raw: &str) -> Option<String> {
    let (charset, rest) = raw.split_once('\'')?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    let (_lang, encoded) = rest.split_once('\'')?;
    Some(percent_decode(encoded))
}

fn percent_decode(input: &str) -> String {
    fn hex(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
