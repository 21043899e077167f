//! Built-in transformations

use super::{transform_error, Transformation, Transformed};
use crate::error::Result;
use crate::strings::{ascii_to_lower, maybe_remove_quotes};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::borrow::Cow;

/// ASCII-only lowercasing (`lowercase`)
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCase;

impl Transformation for LowerCase {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn transform(&self, input: &str) -> Result<Transformed> {
        Ok(Transformed::compare(input, ascii_to_lower(input)))
    }
}

/// Strip one matching pair of outer quotes (`removeQuotes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveQuotes;

impl Transformation for RemoveQuotes {
    fn name(&self) -> &str {
        "removeQuotes"
    }

    fn transform(&self, input: &str) -> Result<Transformed> {
        Ok(Transformed::compare(
            input,
            Cow::Borrowed(maybe_remove_quotes(input)),
        ))
    }
}

/// Remove leading and trailing whitespace (`trim`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Trim;

impl Transformation for Trim {
    fn name(&self) -> &str {
        "trim"
    }

    fn transform(&self, input: &str) -> Result<Transformed> {
        Ok(Transformed::compare(input, Cow::Borrowed(input.trim())))
    }
}

/// Collapse every whitespace run into a single space (`compressWhitespace`)
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressWhitespace;

impl Transformation for CompressWhitespace {
    fn name(&self) -> &str {
        "compressWhitespace"
    }

    fn transform(&self, input: &str) -> Result<Transformed> {
        let mut out = String::with_capacity(input.len());
        let mut in_space = false;
        for c in input.chars() {
            if c.is_whitespace() {
                if !in_space {
                    out.push(' ');
                }
                in_space = true;
            } else {
                out.push(c);
                in_space = false;
            }
        }
        Ok(Transformed::compare(input, Cow::Owned(out)))
    }
}

/// Strict standard-alphabet base64 decoding (`base64Decode`)
///
/// Fails on malformed input or when the decoded bytes are not UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Decode;

impl Transformation for Base64Decode {
    fn name(&self) -> &str {
        "base64Decode"
    }

    fn transform(&self, input: &str) -> Result<Transformed> {
        let bytes = BASE64
            .decode(input.as_bytes())
            .map_err(|e| transform_error(self.name(), e))?;
        let decoded = String::from_utf8(bytes).map_err(|e| transform_error(self.name(), e))?;
        Ok(Transformed::compare(input, Cow::Owned(decoded)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InspectError;

    #[test]
    fn test_lowercase() {
        let out = LowerCase.transform("SELECT * FROM Users").unwrap();
        assert_eq!(out.output, "select * from users");
        assert!(out.changed);

        let out = LowerCase.transform("select 1").unwrap();
        assert_eq!(out.output, "select 1");
        assert!(!out.changed);
    }

    #[test]
    fn test_lowercase_non_ascii_unchanged() {
        let out = LowerCase.transform("ΣΕΛΕΚΤ İ").unwrap();
        assert_eq!(out.output, "ΣΕΛΕΚΤ İ");
        assert!(!out.changed);
    }

    #[test]
    fn test_remove_quotes() {
        let out = RemoveQuotes.transform("'1' OR '1'='1'").unwrap();
        assert_eq!(out.output, "1' OR '1'='1");
        assert!(out.changed);

        let out = RemoveQuotes.transform("\"abc'").unwrap();
        assert_eq!(out.output, "\"abc'");
        assert!(!out.changed);

        let out = RemoveQuotes.transform("\"\"").unwrap();
        assert_eq!(out.output, "");
        assert!(out.changed);
    }

    #[test]
    fn test_trim() {
        let out = Trim.transform("\t admin \n").unwrap();
        assert_eq!(out.output, "admin");
        assert!(out.changed);
        assert!(!Trim.transform("admin").unwrap().changed);
    }

    #[test]
    fn test_compress_whitespace() {
        let out = CompressWhitespace.transform("union \t\n  select").unwrap();
        assert_eq!(out.output, "union select");
        assert!(out.changed);

        let out = CompressWhitespace.transform("union select").unwrap();
        assert!(!out.changed);

        let out = CompressWhitespace.transform("a\tb").unwrap();
        assert_eq!(out.output, "a b");
        assert!(out.changed);
    }

    #[test]
    fn test_base64_decode() {
        let out = Base64Decode.transform("PHNjcmlwdD4=").unwrap();
        assert_eq!(out.output, "<script>");
        assert!(out.changed);
        assert_eq!(Base64Decode.transform("").unwrap(), Transformed::unchanged(""));
    }

    #[test]
    fn test_base64_decode_rejects_malformed_input() {
        let err = Base64Decode.transform("PHNjcmlwdD4").unwrap_err();
        assert!(matches!(err, InspectError::Transform { ref name, .. } if name == "base64Decode"));

        // 0xff 0xfe is not valid UTF-8
        let err = Base64Decode.transform("//4=").unwrap_err();
        assert!(matches!(err, InspectError::Transform { .. }));
    }
}
