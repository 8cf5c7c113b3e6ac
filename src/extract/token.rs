//! Continuation-token extraction
//!
//! The search endpoint streams result pages; the cursor for the next page is
//! buried in the response body as a `\42`-delimited field (carrying a `:S:`
//! marker) inside a single-quoted bracketed literal. The pattern is
//! inherently fragile — it matches vendor-internal response structure — so
//! it lives behind this one type and can be swapped without touching the
//! pagination loop.

use crate::codec::decode_escaped;
use fancy_regex::Regex;

/// Default token pattern.
///
/// Breakdown:
/// - `'\[` … `\]\\n'` — a single-quoted string holding a bracketed literal
///   that ends with an escaped newline
/// - `\\42` … `\\42` — the escaped-quote delimiters around the token field
/// - `(?:.(?!\\42))*:S:.*?` — the captured token: content free of further
///   escaped quotes up to the `:S:` marker, then lazily up to the closing
///   delimiter (the leading part needs a negative lookahead, which is why
///   this is a fancy-regex pattern)
const TOKEN_PATTERN: &str = r"'\[.*\\42((?:.(?!\\42))*:S:.*?)\\42.*\]\\n'";

/// Locates and decodes the continuation token in a search response body
#[derive(Debug)]
pub struct TokenExtractor {
    pattern: Regex,
}

impl TokenExtractor {
    /// Creates an extractor using the default vendor pattern
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TOKEN_PATTERN).expect("TOKEN_PATTERN: hardcoded regex is valid"),
        }
    }

    /// Creates an extractor with a replacement pattern.
    ///
    /// The pattern must expose the raw token text as capture group 1.
    pub fn with_pattern(pattern: &str) -> Result<Self, Box<fancy_regex::Error>> {
        Ok(Self {
            pattern: Regex::new(pattern).map_err(Box::new)?,
        })
    }

    /// Extracts the continuation token from `body`.
    ///
    /// Only the first match is used. The captured text sits inside an
    /// enclosing string literal and is therefore escaped once more than
    /// normal, so it is run through the double-escaped decode before being
    /// returned. `None` means no token — end of stream for this keyword,
    /// not an error.
    pub fn extract(&self, body: &str) -> Option<String> {
        let captures = match self.pattern.captures(body) {
            Ok(found) => found?,
            Err(e) => {
                tracing::warn!("Token pattern failed on response body: {}", e);
                return None;
            }
        };

        captures
            .get(1)
            .map(|token| decode_escaped(token.as_str(), true))
    }
}

impl Default for TokenExtractor {
    fn default() -> Self {
        Self::new()
    }
}
