//! Argument tokenization.
//!
//! Two disciplines are supported:
//!
//! - **Pipes**: `a | b\|c | d` → `["a", "b|c", "d"]`. Every segment is
//!   trimmed and empty segments are kept.
//! - **Spaces**: `a "b c" d` → `["a", "b c", "d"]`. Quoted runs are kept
//!   verbatim, everything else is split on whitespace.
//!
//! A backslash escapes the delimiter in both (`\|`, `\"`). [`ArgType::Auto`]
//! picks pipes when an unescaped `|` is present.

use super::entry::ArgType;
use regex::Regex;
use std::sync::LazyLock;

static PIPES: LazyLock<DelimiterSplitter> = LazyLock::new(|| DelimiterSplitter::new('|'));
static QUOTES: LazyLock<DelimiterSplitter> = LazyLock::new(|| DelimiterSplitter::new('"'));

/// Splits on a single separator character unless it is preceded by `\`.
#[derive(Debug, Clone)]
pub struct DelimiterSplitter {
    sep: char,
    escaped: String,
    pattern: Regex,
}

impl DelimiterSplitter {
    pub fn new(sep: char) -> Self {
        // An escaped separator matches as a two-char unit and is skipped;
        // a bare separator is a split point.
        let pattern = format!(r"\\?{}", regex::escape(&sep.to_string()));
        Self {
            sep,
            escaped: format!("\\{sep}"),
            pattern: Regex::new(&pattern).expect("escaped single-character pattern is valid"),
        }
    }

    pub fn sep(&self) -> char {
        self.sep
    }

    /// Split `input` on unescaped separators. Escapes are left in place.
    pub fn split<'a>(&self, input: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut start = 0;
        for m in self.pattern.find_iter(input) {
            if m.as_str().starts_with('\\') {
                continue;
            }
            segments.push(&input[start..m.start()]);
            start = m.end();
        }
        segments.push(&input[start..]);
        segments
    }

    /// Replace every escaped separator with the bare separator.
    pub fn unescape(&self, segment: &str) -> String {
        segment.replace(&self.escaped, &self.sep.to_string())
    }

    /// Whether `input` contains a separator that isn't escaped.
    pub fn has_unescaped(&self, input: &str) -> bool {
        input.replace(&self.escaped, "").contains(self.sep)
    }
}

/// Pipe-delimited arguments.
pub fn parse_args(input: &str) -> Vec<String> {
    PIPES
        .split(input)
        .into_iter()
        .map(|segment| PIPES.unescape(segment).trim().to_string())
        .collect()
}

/// Space-delimited arguments with `"quoted strings"`.
///
/// Escaped pipes are unescaped first, since auto mode only sends strings
/// here after deciding their pipes were all escaped. Unbalanced quotes are
/// not an error.
pub fn parse_args_spaces(input: &str) -> Vec<String> {
    let input = PIPES.unescape(input);
    let mut args = Vec::new();

    for (i, segment) in QUOTES.split(&input).into_iter().enumerate() {
        let segment = QUOTES.unescape(segment);
        if i % 2 == 0 {
            args.extend(segment.split_whitespace().map(str::to_string));
        } else {
            // Quoted: keep exact whitespace.
            args.push(segment);
        }
    }

    args
}

/// Tokenize `input` according to `arg_type`.
pub fn tokenize(input: &str, arg_type: ArgType) -> Vec<String> {
    match arg_type {
        ArgType::Pipes => parse_args(input),
        ArgType::Spaces => parse_args_spaces(input),
        ArgType::One => vec![input.to_string()],
        ArgType::Auto if PIPES.has_unescaped(input) => parse_args(input),
        ArgType::Auto => parse_args_spaces(input),
    }
}
