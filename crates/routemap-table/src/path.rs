//! Request path normalization and matching.
//!
//! Request paths arrive as browser locations and may carry a query string,
//! a fragment, percent-encoding, or sloppy slashes. [`normalize_path`] maps
//! them to a canonical form before any entry is compared:
//!
//! - `?query` and `#fragment` are dropped
//! - backslashes become slashes, repeated slashes collapse
//! - percent-encoded bytes are decoded per segment; a segment whose decoded
//!   form would contain a separator (`%2F`, `%5C`) is kept encoded
//! - the trailing slash is removed (except for `/`)
//!
//! Canonical input is returned borrowed without allocation.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Drop the query string and fragment.
fn strip_query(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |end| &path[..end])
}

/// Whether a path is already canonical.
fn is_canonical(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains("//")
        && !path.contains(['\\', '%'])
        && (path == "/" || !path.ends_with('/'))
}

/// Percent-decode one path segment.
fn decode_segment(segment: &str) -> Cow<'_, str> {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    if decoded.contains(['/', '\\']) {
        Cow::Borrowed(segment)
    } else {
        decoded
    }
}

/// Whether a path ends with a slash (root excluded).
pub(crate) fn has_trailing_slash(path: &str) -> bool {
    let path = strip_query(path);
    path.len() > 1 && (path.ends_with('/') || path.ends_with('\\'))
}

/// Normalize a path to canonical form.
///
/// # Examples
///
/// ```
/// use routemap_table::path::normalize_path;
///
/// assert_eq!(normalize_path("/docs/intro"), "/docs/intro");
/// assert_eq!(normalize_path("/docs//intro/"), "/docs/intro");
/// assert_eq!(normalize_path("/docs/intro?tab=1#setup"), "/docs/intro");
/// assert_eq!(normalize_path("/docs/my%20page"), "/docs/my page");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let path = strip_query(path);
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }

    let segments: Vec<Cow<'_, str>> = path
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .map(decode_segment)
        .collect();
    Cow::Owned(format!("/{}", segments.join("/")))
}

/// Compare two canonical paths.
pub(crate) fn same_path(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

/// Whether `prefix` covers `path` on a segment boundary.
///
/// Both paths must be canonical. `/docs` covers `/docs` and `/docs/intro`
/// but not `/docsite`.
pub(crate) fn has_prefix(path: &str, prefix: &str, case_sensitive: bool) -> bool {
    if prefix == "/" {
        return true;
    }
    let Some(head) = path.get(..prefix.len()) else {
        return false;
    };
    same_path(head, prefix, case_sensitive)
        && (path.len() == prefix.len() || path.as_bytes()[prefix.len()] == b'/')
}
