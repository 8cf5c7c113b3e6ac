//! Escaped-Unicode codec for vendor response fragments
//!
//! The store embeds non-ASCII text in its responses as `\uXXXX` escapes, and
//! text captured out of an enclosing string literal carries a doubled
//! backslash (`\\uXXXX`). This module decodes both variants back to plain
//! text and provides the inverse, encoding non-ASCII characters to the
//! escaped form when a payload must survive transport as ASCII-safe text.
//!
//! Pure functions, no I/O. Escapes are UTF-16 code units: adjacent decoded
//! units are combined, so surrogate pairs come back as single characters and
//! `decode_escaped(encode_non_ascii(s), false) == s` holds for any `s`.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a single-backslash escape: `\u` followed by 4 hex digits.
static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").expect("ESCAPE: hardcoded regex is valid"));

/// Matches a double-backslash escape: `\\u` followed by 4 hex digits.
static DOUBLE_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\\u([0-9a-fA-F]{4})").expect("DOUBLE_ESCAPE: hardcoded regex is valid")
});

/// Decodes escaped-Unicode sequences in `input` back to plain text.
///
/// With `double_escaped` set, the `\\uXXXX` form is decoded instead of
/// `\uXXXX` — continuation tokens are captured out of an enclosing string
/// literal and arrive escaped once more than normal.
///
/// The matching pattern only ever presents valid hex groups, so the hex
/// parse cannot fail; lone surrogate units that form no valid character are
/// replaced rather than dropped.
///
/// # Example
///
/// ```
/// use playscout::codec::decode_escaped;
///
/// assert_eq!(decode_escaped(r"caf\u00e9", false), "café");
/// assert_eq!(decode_escaped(r"a\\u0026b", true), "a&b");
/// ```
pub fn decode_escaped(input: &str, double_escaped: bool) -> String {
    let pattern = if double_escaped { &DOUBLE_ESCAPE } else { &ESCAPE };

    let mut out = String::with_capacity(input.len());
    // Pending UTF-16 code units from a run of adjacent escapes
    let mut units: Vec<u16> = Vec::new();
    let mut last = 0;

    for caps in pattern.captures_iter(input) {
        let (Some(whole), Some(hex)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if whole.start() > last {
            flush_units(&mut out, &mut units);
            out.push_str(&input[last..whole.start()]);
        }

        let unit = u16::from_str_radix(hex.as_str(), 16).unwrap_or(0xFFFD);
        units.push(unit);
        last = whole.end();
    }

    flush_units(&mut out, &mut units);
    out.push_str(&input[last..]);
    out
}

/// Encodes every non-ASCII character in `input` as `\uXXXX`, one escape per
/// UTF-16 code unit. ASCII characters pass through unchanged.
///
/// # Example
///
/// ```
/// use playscout::codec::encode_non_ascii;
///
/// assert_eq!(encode_non_ascii("café"), r"caf\u00e9");
/// assert_eq!(encode_non_ascii("plain ascii"), "plain ascii");
/// ```
pub fn encode_non_ascii(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut buf = [0u16; 2];

    for c in input.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }

    out
}

/// Converts accumulated UTF-16 code units to text and appends them
fn flush_units(out: &mut String, units: &mut Vec<u16>) {
    if !units.is_empty() {
        out.push_str(&String::from_utf16_lossy(units));
        units.clear();
    }
}
