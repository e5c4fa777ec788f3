//! Dot-delimited path handling.
//!
//! Paths are split on [`DELIMITER`] and nothing else: empty segments are kept
//! and matched literally, and there is no escaping or wildcard syntax.

/// Separator between path segments.
pub const DELIMITER: char = '.';

/// Segment that means "append" when writing into a list.
pub const APPEND: &str = "-1";

/// Splits `path` into its segments.
///
/// ```
/// # use treepath::tree::path::split_path;
/// assert_eq!(split_path("a.b.2"), vec!["a", "b", "2"]);
/// assert_eq!(split_path("a..b"), vec!["a", "", "b"]);
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(DELIMITER).collect()
}

/// Splits a write target into its parent path and final key.
///
/// Returns `None` when the target addresses the root container directly: the
/// path has no delimiter, or its only delimiter-bearing prefix starts at 0.
pub fn parent_and_key(path: &str) -> Option<(&str, &str)> {
    match path.rfind(DELIMITER) {
        Some(at) if at > 0 => Some((&path[..at], &path[at + 1..])),
        _ => None,
    }
}

/// Returns true if `segment` is a non-empty run of ASCII digits.
pub fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a list write key: a digit run or the append sentinel.
///
/// Digit runs too large for an `i64` saturate, so they surface as out of
/// bounds rather than as malformed keys.
pub fn parse_write_index(segment: &str) -> Option<i64> {
    if segment == APPEND {
        Some(-1)
    } else if is_index(segment) {
        Some(segment.parse().unwrap_or(i64::MAX))
    } else {
        None
    }
}

/// Joins segments back into a path.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            path.push(DELIMITER);
        }
        path.push_str(segment.as_ref());
    }
    path
}
