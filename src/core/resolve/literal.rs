//! Literal extraction: class tokens with exact raw-source spans.
//!
//! Class attribute values are whitespace-separated token lists, but the span
//! of a token cannot be computed from the decoded string: escape sequences
//! (`\x20`, `\u0041`, line continuations) make raw and decoded lengths
//! differ. The scanner therefore walks the raw literal text, decoding one
//! escape at a time, and records each token's byte range in the raw source.

use swc_ecma_ast::{Str, TplElement};

use crate::core::resolve::occurrence::ClassOccurrence;

/// A whitespace-delimited token inside one literal, positioned relative to
/// the start of the raw literal text (quotes excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub offset: u32,
    pub length: u32,
}

/// Extract class occurrences from a string literal node.
///
/// Spans point at the token inside the quotes. When swc did not preserve the
/// raw text the decoded value is scanned instead, which is only correct for
/// escape-free literals; parsed modules always carry raw text.
pub fn from_str_lit(lit: &Str) -> Vec<ClassOccurrence> {
    let base = lit.span.lo.0 + 1; // skip the opening quote
    match &lit.raw {
        Some(raw) if raw.len() >= 2 => {
            let inner = &raw[1..raw.len() - 1];
            tokens_to_occurrences(scan_raw_tokens(inner), base)
        }
        _ => match lit.value.as_str() {
            Some(value) => tokens_to_occurrences(scan_raw_tokens(value), base),
            None => Vec::new(),
        },
    }
}

/// Extract class occurrences from one template literal segment.
pub fn from_tpl_element(quasi: &TplElement) -> Vec<ClassOccurrence> {
    let base = quasi.span.lo.0;
    tokens_to_occurrences(scan_raw_tokens(quasi.raw.as_str()), base)
}

fn tokens_to_occurrences(tokens: Vec<RawToken>, base: u32) -> Vec<ClassOccurrence> {
    tokens
        .into_iter()
        .map(|t| ClassOccurrence::new(t.text, base + t.offset, t.length))
        .collect()
}

/// Split raw literal text into whitespace-separated tokens, decoding escape
/// sequences and keeping byte offsets into the raw text.
pub fn scan_raw_tokens(raw: &str) -> Vec<RawToken> {
    let chars: Vec<(usize, char)> = raw.char_indices().collect();
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut start = 0usize;
    let mut end = 0usize;

    let mut flush = |text: &mut String, start: usize, end: usize, out: &mut Vec<RawToken>| {
        if !text.is_empty() {
            out.push(RawToken {
                text: std::mem::take(text),
                offset: start as u32,
                length: (end - start) as u32,
            });
        }
    };

    let mut i = 0;
    while i < chars.len() {
        let (off, ch) = chars[i];
        let (decoded, next) = if ch == '\\' && i + 1 < chars.len() {
            decode_escape(raw, &chars, i)
        } else {
            (Some(ch), i + 1)
        };
        let next_off = chars.get(next).map_or(raw.len(), |&(o, _)| o);

        match decoded {
            Some(c) if c.is_whitespace() => flush(&mut text, start, end, &mut tokens),
            Some(c) => {
                if text.is_empty() {
                    start = off;
                }
                text.push(c);
                end = next_off;
            }
            // Line continuation: contributes nothing, does not split a token.
            None => {
                if !text.is_empty() {
                    end = next_off;
                }
            }
        }
        i = next;
    }
    flush(&mut text, start, end, &mut tokens);
    tokens
}

/// Decode the escape sequence starting at `chars[i]` (a backslash).
///
/// Returns the decoded character (None for line continuations) and the index
/// of the first character after the escape. Malformed escapes decode to their
/// trailing character, matching how engines treat unknown escapes.
fn decode_escape(raw: &str, chars: &[(usize, char)], i: usize) -> (Option<char>, usize) {
    let (_, esc) = chars[i + 1];
    match esc {
        'n' => (Some('\n'), i + 2),
        't' => (Some('\t'), i + 2),
        'r' => (Some('\r'), i + 2),
        'b' => (Some('\u{0008}'), i + 2),
        'f' => (Some('\u{000C}'), i + 2),
        'v' => (Some('\u{000B}'), i + 2),
        '0' => (Some('\0'), i + 2),
        '\r' => {
            // CRLF line continuation consumes both characters.
            if chars.get(i + 2).map(|&(_, c)| c) == Some('\n') {
                (None, i + 3)
            } else {
                (None, i + 2)
            }
        }
        '\n' | '\u{2028}' | '\u{2029}' => (None, i + 2),
        'x' => decode_hex(raw, chars, i, 2),
        'u' => {
            if chars.get(i + 2).map(|&(_, c)| c) == Some('{') {
                decode_braced_unicode(raw, chars, i)
            } else {
                decode_hex(raw, chars, i, 4)
            }
        }
        other => (Some(other), i + 2),
    }
}

fn decode_hex(raw: &str, chars: &[(usize, char)], i: usize, digits: usize) -> (Option<char>, usize) {
    let first = i + 2;
    let last = first + digits;
    if last > chars.len() {
        return (Some(chars[i + 1].1), i + 2);
    }
    let lo = chars[first].0;
    let hi = chars.get(last).map_or(raw.len(), |&(o, _)| o);
    match u32::from_str_radix(&raw[lo..hi], 16).ok().and_then(char::from_u32) {
        Some(c) => (Some(c), last),
        None => (Some(chars[i + 1].1), i + 2),
    }
}

fn decode_braced_unicode(raw: &str, chars: &[(usize, char)], i: usize) -> (Option<char>, usize) {
    // chars[i + 2] is '{'; find the matching '}'.
    let mut j = i + 3;
    while j < chars.len() && chars[j].1 != '}' {
        j += 1;
    }
    if j >= chars.len() {
        return (Some('u'), i + 2);
    }
    let lo = chars[i + 3].0;
    let hi = chars[j].0;
    match u32::from_str_radix(&raw[lo..hi], 16).ok().and_then(char::from_u32) {
        Some(c) => (Some(c), j + 1),
        None => (Some('u'), i + 2),
    }
}

#[cfg(test)]
mod tests {
    use crate::core::resolve::literal::*;

    fn token(text: &str, offset: u32, length: u32) -> RawToken {
        RawToken {
            text: text.to_string(),
            offset,
            length,
        }
    }

    #[test]
    fn test_simple_split() {
        assert_eq!(
            scan_raw_tokens("flex items-center"),
            vec![token("flex", 0, 4), token("items-center", 5, 12)]
        );
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        assert_eq!(scan_raw_tokens("  p-4  "), vec![token("p-4", 2, 3)]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(scan_raw_tokens("").is_empty());
        assert!(scan_raw_tokens("   ").is_empty());
    }

    #[test]
    fn test_escaped_tab_splits_tokens() {
        // Raw "a\tb" is four bytes; the tab escape separates two tokens.
        assert_eq!(
            scan_raw_tokens(r"a\tb"),
            vec![token("a", 0, 1), token("b", 3, 1)]
        );
    }

    #[test]
    fn test_hex_escape_keeps_raw_length() {
        // \x41 decodes to "A" but occupies four raw bytes.
        assert_eq!(scan_raw_tokens(r"\x41bc"), vec![token("Abc", 0, 6)]);
    }

    #[test]
    fn test_hex_escape_whitespace_splits() {
        // \x20 is a space.
        assert_eq!(
            scan_raw_tokens(r"a\x20b"),
            vec![token("a", 0, 1), token("b", 5, 1)]
        );
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(scan_raw_tokens(r"\u0041x"), vec![token("Ax", 0, 7)]);
        assert_eq!(scan_raw_tokens(r"\u{41}x"), vec![token("Ax", 0, 7)]);
    }

    #[test]
    fn test_line_continuation_joins_token() {
        // A backslash-newline contributes no character and does not split.
        assert_eq!(scan_raw_tokens("ab\\\ncd"), vec![token("abcd", 0, 6)]);
    }

    #[test]
    fn test_unknown_escape_decodes_to_char() {
        assert_eq!(scan_raw_tokens(r"\q"), vec![token("q", 0, 2)]);
    }
}
