// SPDX-License-Identifier: MIT
//
// Textual color notations: parsing a single token into a `ColorValue` and
// rendering a value back out.
//
// Three notations are supported:
//
//   Hex      #rrggbb (the `#` is optional on input)
//   Rgb01    three floats in [0, 1]
//   Rgb256   three integers in [0, 255]
//
// A token here is already cut out of the surrounding text and stripped of
// brackets and any `rgb` prefix; segmentation lives in `cg-input`.
//
// Conversions: rgb01 → rgb256 rounds to nearest, hex ↔ rgb256 is exact,
// rgb01 → hex loses anything finer than 1/255.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, UnknownName};
use crate::value::ColorValue;

/// How a color is written as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    Hex,
    /// `r, g, b` with each component in 0.0–1.0.
    Rgb01,
    /// `r, g, b` with each component an integer in 0–255.
    Rgb256,
}

impl Notation {
    pub const ALL: [Self; 3] = [Self::Hex, Self::Rgb256, Self::Rgb01];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb01 => "rgb01",
            Self::Rgb256 => "rgb256",
        }
    }

    /// Human-facing name shown in pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hex => "Hex",
            Self::Rgb01 => "RGB 0-1",
            Self::Rgb256 => "RGB 256",
        }
    }

    /// Parse one token in this notation. See [`parse_token`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first problem found.
    pub fn parse(self, token: &str) -> Result<ColorValue, ParseError> {
        parse_token(token, self)
    }

    /// Render in the form used when exporting a gradient.
    ///
    /// `#288ceb`, `rgb(0.157, 0.549, 0.922)`, `rgb(40, 140, 235)`.
    #[must_use]
    pub fn render(self, value: &ColorValue) -> String {
        match self {
            Self::Hex => value.to_hex(),
            Self::Rgb01 => {
                let (r, g, b) = value.rgb01();
                format!("rgb({r:.3}, {g:.3}, {b:.3})")
            }
            Self::Rgb256 => {
                let (r, g, b) = value.rgb8_components();
                format!("rgb({r}, {g}, {b})")
            }
        }
    }

    /// Render in the bare converter form.
    ///
    /// `#288ceb`, `0.15686, 0.54902, 0.92157`, `40, 140, 235`. Floats keep up
    /// to five decimals with trailing zeros trimmed.
    #[must_use]
    pub fn render_bare(self, value: &ColorValue) -> String {
        match self {
            Self::Hex => value.to_hex(),
            Self::Rgb01 => {
                let (r, g, b) = value.rgb01();
                format!("{}, {}, {}", trim_float(r), trim_float(g), trim_float(b))
            }
            Self::Rgb256 => {
                let (r, g, b) = value.rgb8_components();
                format!("{r}, {g}, {b}")
            }
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Notation {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgb01" | "rgb 0-1" | "rgb-0-1" | "rgb0-1" => Ok(Self::Rgb01),
            "rgb256" | "rgb 256" | "rgb-256" | "rgb255" => Ok(Self::Rgb256),
            _ => Err(UnknownName::new("notation", s)),
        }
    }
}

// ─── Normalizer ──────────────────────────────────────────────────────────────

/// Normalize one color token in `notation` into a device sRGB value.
///
/// The returned value carries `notation` as its presentation hint. Pure: no
/// clamping, no guessing, and the first problem found is reported.
///
/// # Errors
///
/// - Hex: [`ParseError::InvalidLength`] unless exactly 6 digits remain after
///   an optional `#`; [`ParseError::InvalidHexDigit`] for any non-hex digit.
/// - RGB: [`ParseError::WrongArity`] unless there are exactly 3 components;
///   [`ParseError::NotANumber`] / [`ParseError::NotAnInteger`] for
///   unparsable components; [`ParseError::OutOfRange`] outside the range.
pub fn parse_token(token: &str, notation: Notation) -> Result<ColorValue, ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }

    let value = match notation {
        Notation::Hex => parse_hex(token)?,
        Notation::Rgb01 => {
            let [r, g, b] = split_components(token)?.map(parse_unit);
            ColorValue::srgb(r?, g?, b?)
        }
        Notation::Rgb256 => {
            let [r, g, b] = split_components(token)?.map(parse_byte);
            ColorValue::rgb8(r?, g?, b?)
        }
    };

    Ok(value.with_notation(notation))
}

/// Parse `#rrggbb` / `rrggbb`.
fn parse_hex(s: &str) -> Result<ColorValue, ParseError> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();
    if bytes.len() != 6 {
        return Err(ParseError::InvalidLength(s.chars().count()));
    }

    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Ok(ColorValue::rgb8(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Result<u8, ParseError> {
    let hi = parse_hex_digit(bytes[0]).ok_or(ParseError::InvalidHexDigit)?;
    let lo = parse_hex_digit(bytes[1]).ok_or(ParseError::InvalidHexDigit)?;
    Ok(hi << 4 | lo)
}

/// Split on bare commas into exactly three trimmed components.
fn split_components(s: &str) -> Result<[&str; 3], ParseError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [r, g, b] => Ok([r, g, b]),
        _ => Err(ParseError::WrongArity(parts.len())),
    }
}

fn parse_unit(s: &str) -> Result<f64, ParseError> {
    let v: f64 = s.parse().map_err(|_| ParseError::NotANumber(s.to_string()))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(ParseError::OutOfRange(s.to_string()))
    }
}

fn parse_byte(s: &str) -> Result<u8, ParseError> {
    let v: i64 = s.parse().map_err(|_| {
        if s.parse::<f64>().is_ok() {
            ParseError::NotAnInteger(s.to_string())
        } else {
            ParseError::NotANumber(s.to_string())
        }
    })?;
    u8::try_from(v).map_err(|_| ParseError::OutOfRange(s.to_string()))
}

/// Up to five decimals, trailing zeros and a dangling `.` removed.
fn trim_float(v: f64) -> String {
    let s = format!("{v:.5}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
