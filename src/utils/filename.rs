//! Filesystem-safe title handling

use regex::Regex;

/// Longest title fragment used in a directory name
const MAX_TITLE_LEN: usize = 100;

/// Strip characters that are invalid in directory names on common
/// filesystems and cap the length. Empty results collapse to `"video"`.
pub fn sanitize_title(title: &str) -> String {
    let invalid = Regex::new(r#"[\\/:*?"<>|]"#).unwrap();
    let cleaned = invalid.replace_all(title, "");
    let cleaned = cleaned.trim();

    let truncated: String = cleaned.chars().take(MAX_TITLE_LEN).collect();
    let truncated = truncated.trim_end().to_string();

    if truncated.is_empty() {
        "video".to_string()
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_invalid_chars() {
        assert_eq!(sanitize_title("What? A *Video*: Part 1/2"), "What A Video Part 12");
        assert_eq!(sanitize_title(r#"a\b/c:d*e?f"g<h>i|j"#), "abcdefghij");
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_title("  spaced out  "), "spaced out");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_title(""), "video");
        assert_eq!(sanitize_title("???"), "video");
        assert_eq!(sanitize_title("   "), "video");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_title(&long).chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        // Multi-byte characters must not be split
        let title = "é".repeat(200);
        let out = sanitize_title(&title);
        assert_eq!(out.chars().count(), MAX_TITLE_LEN);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_sanitize_keeps_ordinary_titles() {
        assert_eq!(sanitize_title("Plain Title 42"), "Plain Title 42");
    }
}
