//! Sanitization of server-suggested filenames.
//!
//! The download filename comes from an untrusted response header; it must
//! never escape the download directory or produce an unusable name.

/// Linux NAME_MAX.
const MAX_LEN: usize = 255;

/// Makes an untrusted filename safe for use as a single path component.
///
/// - path separators, NUL, and control characters become `_`
/// - leading dots and surrounding whitespace are stripped (no hidden
///   files, no `..`)
/// - the result is capped at 255 bytes on a char boundary
///
/// May return an empty string; callers fall back to a default name.
pub fn safe_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '/' || c == '\\' || c == '\0' || c.is_control() {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim().trim_start_matches('.').trim();
    if trimmed.len() <= MAX_LEN {
        return trimmed.to_string();
    }

    let mut cut = MAX_LEN;
    while cut > 0 && !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    trimmed[..cut].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_are_replaced() {
        assert_eq!(safe_filename("a/b\\c.zip"), "a_b_c.zip");
    }

    #[test]
    fn traversal_prefix_is_stripped() {
        let s = safe_filename("../../etc/passwd");
        assert!(!s.starts_with('.'));
        assert!(!s.contains('/'));
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(safe_filename("pay\x00slips\x07.zip"), "pay_slips_.zip");
    }

    #[test]
    fn plain_name_passes_through() {
        assert_eq!(safe_filename("payslips_2024.zip"), "payslips_2024.zip");
    }

    #[test]
    fn long_name_is_capped_on_char_boundary() {
        let long = "é".repeat(300);
        let s = safe_filename(&long);
        assert!(s.len() <= 255);
        assert!(s.is_char_boundary(s.len()));
        assert!(!s.is_empty());
    }

    #[test]
    fn dot_only_name_becomes_empty() {
        assert_eq!(safe_filename("..."), "");
    }
}
