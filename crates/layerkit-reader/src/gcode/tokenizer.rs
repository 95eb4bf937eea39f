//! Parameter extraction from raw G-code lines.
//!
//! Lookups are tolerant: a key that is missing and a key whose value does not
//! parse both come back as `None`. Vendor-specific trailing tokens therefore
//! never abort a parse.

use regex::Regex;
use std::sync::OnceLock;

/// Comment delimiter
pub const COMMENT_CHAR: char = ';';

fn value_terminator() -> &'static Regex {
    static TERMINATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    TERMINATOR_REGEX.get_or_init(|| Regex::new(r"[;\s]").expect("invalid regex pattern"))
}

/// A single G-code line split into its command part and trailing comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine<'a> {
    raw: &'a str,
    code: &'a str,
}

impl<'a> CommandLine<'a> {
    pub fn new(raw: &'a str) -> Self {
        let code = match raw.find(COMMENT_CHAR) {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        Self { raw, code }
    }

    /// The line as given
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The part of the line before any comment
    pub fn code(&self) -> &'a str {
        self.code
    }

    /// True when the whole line is a comment
    pub fn is_comment(&self) -> bool {
        self.raw.starts_with(COMMENT_CHAR)
    }

    /// Text following the first occurrence of `key`, up to the next
    /// whitespace or comment delimiter.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        let start = self.code.find(key)? + key.len();
        let rest = &self.code[start..];
        let end = value_terminator()
            .find(rest)
            .map_or(rest.len(), |m| m.start());
        Some(&rest[..end])
    }

    /// Integer value of `key`; malformed text yields `None`
    pub fn int(&self, key: &str) -> Option<i64> {
        self.value(key)?.parse().ok()
    }

    /// Float value of `key`; malformed text yields `None`
    pub fn float(&self, key: &str) -> Option<f64> {
        self.value(key)?.parse().ok()
    }
}
