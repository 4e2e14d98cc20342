// SPDX-License-Identifier: MIT
//
// Tolerant parsing of pasted color lists.
//
// Users paste whatever their last tool produced: one hex per line, CSS
// `rgb(...)` calls, Python tuples, JSON-ish arrays, with or without trailing
// commas or semicolons. The adapter turns that into a clean list of colors
// and quietly drops anything it cannot read.
//
// Token boundaries are exactly:
//
//   "\n"     bare newline
//   ",\n"    comma + newline
//   ";\n"    semicolon + newline
//
// A comma that is NOT followed by a newline is never a boundary. It belongs
// to the component list inside one RGB token, which is why splitting the
// whole input on commas cannot work:
//
//   rgb(0.157, 0.549, 0.922),     ← one token (trailing "," is the boundary)
//   rgb(0.655, 0.471, 0.682)      ← one token
//
// Each token is then trimmed, loses one trailing `,`/`;`, loses a matching
// pair of `()`, `[]` or `{}` together with an optional case-insensitive
// `rgb` prefix, and goes to the normalizer in `cg-color`.
//
// The RGB scale is never guessed. `(1, 1, 1)` is white in 0–1 and almost
// black in 0–255, so the caller always says which one it means.

use std::sync::LazyLock;

use cg_color::{ColorValue, Notation, ParseError, parse_token};
use regex::Regex;

/// Matches one token boundary: newline, optionally preceded by `,` or `;`.
static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]?\r?\n").expect("valid regex"));

/// Which numeric range RGB components are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RgbScale {
    /// Components in 0.0–1.0.
    Unit,
    /// Integer components in 0–255.
    Byte,
}

impl RgbScale {
    /// Map the classic `is_rgb256` flag onto a scale.
    #[must_use]
    pub const fn from_is_rgb256(is_rgb256: bool) -> Self {
        if is_rgb256 { Self::Byte } else { Self::Unit }
    }

    /// The notation RGB tokens in this scale are parsed with.
    #[must_use]
    pub const fn notation(self) -> Notation {
        match self {
            Self::Unit => Notation::Rgb01,
            Self::Byte => Notation::Rgb256,
        }
    }
}

// ─── Segmentation ────────────────────────────────────────────────────────────

/// Split pasted text into cleaned candidate tokens, in input order.
///
/// Blank lines produce no token. Brackets and `rgb` prefixes are removed.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    BOUNDARY
        .split(text)
        .map(clean_segment)
        .filter(|t| !t.is_empty())
        .map(unwrap_brackets)
}

/// Trim whitespace and one trailing delimiter character.
fn clean_segment(segment: &str) -> &str {
    let s = segment.trim();
    s.strip_suffix([',', ';']).unwrap_or(s).trim_end()
}

/// Strip `rgb(` … `)` style wrapping. Mismatched pairs are left alone so
/// the token fails normalization instead of being misread.
fn unwrap_brackets(token: &str) -> &str {
    let body = match token.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("rgb") => token[3..].trim_start(),
        _ => token,
    };

    let mut chars = body.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if closing_bracket(open) == Some(close) => chars.as_str().trim(),
        _ => token,
    }
}

const fn closing_bracket(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

/// Whether a cleaned token reads as hex: leading `#`, or exactly six hex digits.
fn looks_like_hex(token: &str) -> bool {
    token.starts_with('#') || (token.len() == 6 && token.bytes().all(|b| b.is_ascii_hexdigit()))
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Parse every token in `text` as `notation`, skipping the ones that fail.
#[must_use]
pub fn parse_input(text: &str, notation: Notation) -> Vec<ColorValue> {
    tokens(text)
        .filter_map(|token| keep(token, parse_token(token, notation)))
        .collect()
}

/// Parse a mixed list: hex-looking tokens as hex, the rest as RGB in `scale`.
#[must_use]
pub fn parse_mixed_input(text: &str, scale: RgbScale) -> Vec<ColorValue> {
    tokens(text)
        .filter_map(|token| {
            let notation = if looks_like_hex(token) {
                Notation::Hex
            } else {
                scale.notation()
            };
            keep(token, parse_token(token, notation))
        })
        .collect()
}

/// Parse pasted hex colors into normalized lowercase `#rrggbb` strings.
#[must_use]
pub fn parse_hex_input(text: &str) -> Vec<String> {
    parse_input(text, Notation::Hex)
        .iter()
        .map(ColorValue::to_hex)
        .collect()
}

/// Parse pasted RGB colors into component triples in the requested scale.
///
/// [`RgbScale::Unit`] yields the floats as written; [`RgbScale::Byte`]
/// yields whole numbers in 0–255.
#[must_use]
pub fn parse_rgb_input(text: &str, scale: RgbScale) -> Vec<(f64, f64, f64)> {
    parse_input(text, scale.notation())
        .iter()
        .map(|value| match scale {
            RgbScale::Unit => {
                let [r, g, b] = value.coords();
                (r, g, b)
            }
            RgbScale::Byte => {
                let (r, g, b) = value.rgb8_components();
                (f64::from(r), f64::from(g), f64::from(b))
            }
        })
        .collect()
}

/// Log and drop a token that failed to normalize.
fn keep(token: &str, result: Result<ColorValue, ParseError>) -> Option<ColorValue> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(token, error = %err, "skipping unreadable color token");
            None
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEX_EXPECTED: [&str; 3] = ["#288ceb", "#a778ae", "#e15e1e"];
    const RGB01_EXPECTED: [(f64, f64, f64); 3] = [
        (0.157, 0.549, 0.922),
        (0.655, 0.471, 0.682),
        (0.882, 0.369, 0.118),
    ];
    const RGB256_EXPECTED: [(f64, f64, f64); 3] = [
        (40.0, 140.0, 235.0),
        (167.0, 120.0, 174.0),
        (225.0, 94.0, 30.0),
    ];

    // ── Segmentation ─────────────────────────────────────────────────────

    #[test]
    fn bare_comma_never_splits_a_token() {
        let toks: Vec<&str> = tokens("0.1,0.2,0.3").collect();
        assert_eq!(toks, vec!["0.1,0.2,0.3"]);
        assert_eq!(parse_rgb_input("0.1,0.2,0.3", RgbScale::Unit), vec![(0.1, 0.2, 0.3)]);
    }

    #[test]
    fn all_three_boundaries_split() {
        let toks: Vec<&str> = tokens("a\nb,\nc;\nd").collect();
        assert_eq!(toks, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn blank_lines_and_crlf_are_ignored() {
        let toks: Vec<&str> = tokens("\r\n#288ceb\r\n\r\n  \n#a778ae;\r\n").collect();
        assert_eq!(toks, vec!["#288ceb", "#a778ae"]);
    }

    #[test]
    fn trailing_delimiter_on_last_token_is_dropped() {
        let toks: Vec<&str> = tokens("rgb(1, 2, 3);").collect();
        assert_eq!(toks, vec!["1, 2, 3"]);
    }

    #[test]
    fn brackets_and_prefix_are_stripped() {
        for wrapped in [
            "(1, 2, 3)",
            "[1, 2, 3]",
            "{1, 2, 3}",
            "rgb(1, 2, 3)",
            "RGB[1, 2, 3]",
            "Rgb{1, 2, 3}",
            "rgb (1, 2, 3)",
            "1, 2, 3",
        ] {
            assert_eq!(unwrap_brackets(wrapped), "1, 2, 3", "input {wrapped:?}");
        }
    }

    #[test]
    fn mismatched_brackets_are_left_alone() {
        assert_eq!(unwrap_brackets("(1, 2, 3]"), "(1, 2, 3]");
        assert_eq!(unwrap_brackets("rgb(1, 2, 3"), "rgb(1, 2, 3");
        assert!(parse_rgb_input("(1, 2, 3]", RgbScale::Byte).is_empty());
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_newline_delimited() {
        assert_eq!(parse_hex_input("#288ceb\n#a778ae\n#e15e1e"), HEX_EXPECTED);
    }

    #[test]
    fn hex_comma_and_semicolon_delimited() {
        assert_eq!(parse_hex_input("#288ceb,\n#a778ae,\n#e15e1e"), HEX_EXPECTED);
        assert_eq!(parse_hex_input("#288ceb;\n#a778ae;\n#e15e1e"), HEX_EXPECTED);
    }

    #[test]
    fn hex_without_prefix_and_mixed() {
        assert_eq!(parse_hex_input("288ceb,\na778ae,\ne15e1e"), HEX_EXPECTED);
        assert_eq!(parse_hex_input("#288ceb\na778ae\n#e15e1e"), HEX_EXPECTED);
    }

    #[test]
    fn hex_mixed_delimiters_and_case() {
        assert_eq!(parse_hex_input("#288CEB,\nA778ae;\n#e15e1e"), HEX_EXPECTED);
    }

    #[test]
    fn invalid_hex_lines_are_skipped_not_fatal() {
        let text = "#288ceb\n#fff\nnot a color\n#a778ae\n#12345g\n#e15e1e";
        assert_eq!(parse_hex_input(text), HEX_EXPECTED);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(parse_hex_input("").is_empty());
        assert!(parse_hex_input("\n\n  \n").is_empty());
        assert!(parse_rgb_input("", RgbScale::Unit).is_empty());
    }

    // ── RGB 0–1 ──────────────────────────────────────────────────────────

    #[test]
    fn rgb01_every_wrapping_style() {
        for (open, close, prefix) in [
            ("", "", ""),
            ("(", ")", ""),
            ("[", "]", ""),
            ("{", "}", ""),
            ("(", ")", "rgb"),
            ("{", "}", "rgb"),
            ("[", "]", "rgb"),
            ("(", ")", "RGB"),
            ("(", ")", "rGB"),
        ] {
            let text = RGB01_EXPECTED
                .iter()
                .map(|(r, g, b)| format!("{prefix}{open}{r}, {g}, {b}{close}"))
                .collect::<Vec<_>>()
                .join("\n");
            assert_eq!(parse_rgb_input(&text, RgbScale::Unit), RGB01_EXPECTED, "input {text:?}");
        }
    }

    #[test]
    fn rgb01_function_calls_with_comma_newline() {
        let text = "rgb(0.157, 0.549, 0.922),\nrgb(0.655, 0.471, 0.682),\nrgb(0.882, 0.369, 0.118)";
        assert_eq!(parse_rgb_input(text, RgbScale::Unit), RGB01_EXPECTED);
    }

    #[test]
    fn rgb01_function_calls_with_semicolon_newline() {
        let text = "rgb(0.157, 0.549, 0.922);\nrgb(0.655, 0.471, 0.682);\nrgb(0.882, 0.369, 0.118)";
        assert_eq!(parse_rgb_input(text, RgbScale::Unit), RGB01_EXPECTED);
    }

    #[test]
    fn rgb01_out_of_range_is_rejected_not_clamped() {
        assert!(parse_rgb_input("1.5, 0.2, 0.2", RgbScale::Unit).is_empty());
    }

    #[test]
    fn rgb01_bad_line_does_not_stop_the_batch() {
        let text = "0.157, 0.549, 0.922\n0.1, 0.2\n0.655, 0.471, 0.682\n2, 0, 0\n0.882, 0.369, 0.118";
        assert_eq!(parse_rgb_input(text, RgbScale::Unit), RGB01_EXPECTED);
    }

    // ── RGB 0–255 ────────────────────────────────────────────────────────

    #[test]
    fn rgb256_function_calls() {
        let text = "rgb(40, 140, 235)\nrgb(167, 120, 174)";
        assert_eq!(
            parse_rgb_input(text, RgbScale::Byte),
            vec![(40.0, 140.0, 235.0), (167.0, 120.0, 174.0)]
        );
    }

    #[test]
    fn rgb256_bare_and_semicolon() {
        assert_eq!(
            parse_rgb_input("40, 140, 235\n167, 120, 174\n225, 94, 30", RgbScale::Byte),
            RGB256_EXPECTED
        );
        assert_eq!(
            parse_rgb_input("rgb(40, 140, 235);\nrgb(167, 120, 174);\nrgb(225, 94, 30)", RgbScale::Byte),
            RGB256_EXPECTED
        );
    }

    #[test]
    fn scale_is_never_guessed() {
        let unit = parse_input("(1, 1, 1)", RgbScale::Unit.notation());
        let byte = parse_input("(1, 1, 1)", RgbScale::Byte.notation());
        assert_eq!(unit[0].to_hex(), "#ffffff");
        assert_eq!(byte[0].to_hex(), "#010101");
    }

    #[test]
    fn from_is_rgb256_flag() {
        assert_eq!(RgbScale::from_is_rgb256(true), RgbScale::Byte);
        assert_eq!(RgbScale::from_is_rgb256(false), RgbScale::Unit);
    }

    // ── Mixed ────────────────────────────────────────────────────────────

    #[test]
    fn mixed_input_routes_hex_and_rgb() {
        let text = "#288ceb\nrgb(167, 120, 174);\ne15e1e\n123456\nnonsense";
        let hexes: Vec<String> = parse_mixed_input(text, RgbScale::Byte)
            .iter()
            .map(ColorValue::to_hex)
            .collect();
        assert_eq!(hexes, vec!["#288ceb", "#a778ae", "#e15e1e", "#123456"]);
    }

    #[test]
    fn parsed_values_remember_their_notation() {
        let values = parse_mixed_input("#288ceb\n0.5, 0.5, 0.5", RgbScale::Unit);
        assert_eq!(values[0].notation(), Some(Notation::Hex));
        assert_eq!(values[1].notation(), Some(Notation::Rgb01));
    }
}
