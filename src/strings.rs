//! Byte-level string primitives used to canonicalize untrusted input
//!
//! Both functions are pure and hold no shared state, so they can be called
//! from any number of threads without synchronization.

use std::borrow::Cow;

/// Lowercase ASCII `A`–`Z` and copy every other byte unchanged
///
/// Multi-byte UTF-8 sequences never contain bytes in the ASCII range, so
/// non-ASCII scripts (and locale-sensitive pairs such as Turkish `İ`/`ı`)
/// pass through untouched. The output always has the same byte length as
/// the input.
///
/// Returns the input borrowed when there is nothing to fold, otherwise a
/// single freshly allocated buffer.
pub fn ascii_to_lower(s: &str) -> Cow<'_, str> {
    match s.bytes().position(|b| b.is_ascii_uppercase()) {
        None => Cow::Borrowed(s),
        Some(first) => {
            let mut out = s.to_owned();
            // `first` indexes an ASCII byte, so it is a char boundary
            out[first..].make_ascii_lowercase();
            Cow::Owned(out)
        }
    }
}

/// Strip one matching pair of outer quotes (`"..."` or `'...'`)
///
/// No escape processing is done: backslashes and inner quotes are kept
/// verbatim. Inputs shorter than two bytes, or whose first and last bytes
/// are not the same quote character, are returned as-is.
pub fn maybe_remove_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return s;
    }
    let first = bytes[0];
    if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
