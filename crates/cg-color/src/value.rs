// SPDX-License-Identifier: MIT
//
// The canonical color value shared by the parser, converter, and gradient
// engine.
//
// A `ColorValue` is three coordinates tagged with the color space they are
// expressed in. Values produced by parsing are always device sRGB with
// components in [0, 1]; the gradient engine creates short-lived values in
// its working space while blending and converts them back before emitting.
//
// The optional notation hint remembers how a value was typed (hex, rgb01,
// rgb256) so it can be echoed back in the same form. It never affects the
// stored coordinates.

use std::fmt;

use crate::notation::Notation;
use crate::space::{ColorMath, ColorSpace, PaletteMath};

/// Immutable color coordinates in a tagged color space.
#[derive(Clone, Copy)]
pub struct ColorValue {
    coords: [f64; 3],
    space: ColorSpace,
    notation: Option<Notation>,
}

impl ColorValue {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a value from raw coordinates in `space`.
    #[inline]
    #[must_use]
    pub const fn new(coords: [f64; 3], space: ColorSpace) -> Self {
        Self {
            coords,
            space,
            notation: None,
        }
    }

    /// Create a device sRGB value from components in 0.0–1.0.
    #[inline]
    #[must_use]
    pub const fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self::new([r, g, b], ColorSpace::Srgb)
    }

    /// Create a device sRGB value from 8-bit components.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Return a copy carrying `notation` as its presentation hint.
    #[inline]
    #[must_use]
    pub const fn with_notation(self, notation: Notation) -> Self {
        Self {
            notation: Some(notation),
            ..self
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn coords(&self) -> [f64; 3] {
        self.coords
    }

    #[inline]
    #[must_use]
    pub const fn space(&self) -> ColorSpace {
        self.space
    }

    /// How this value was originally written, if it came from text.
    #[inline]
    #[must_use]
    pub const fn notation(&self) -> Option<Notation> {
        self.notation
    }

    // ─── Device RGB ──────────────────────────────────────────────────────

    // Rendering (`rgb01`, `rgb8_components`, `to_hex`, and the notation
    // renderers built on them) reads device sRGB. Parsed values and engine
    // output are already sRGB; anything else goes through `PaletteMath`.
    // Callers with their own backend convert first with `to_srgb_with`.

    /// This value as device sRGB via the default `PaletteMath` backend.
    ///
    /// Values already in sRGB are returned as-is (hint included).
    #[must_use]
    pub fn to_srgb(&self) -> Self {
        self.to_srgb_with(&PaletteMath)
    }

    /// This value as device sRGB via `math`, gamut-mapped by that backend.
    #[must_use]
    pub fn to_srgb_with<M: ColorMath + ?Sized>(&self, math: &M) -> Self {
        if self.space == ColorSpace::Srgb {
            *self
        } else {
            math.convert(self, ColorSpace::Srgb)
        }
    }

    /// Device sRGB components in 0.0–1.0.
    #[must_use]
    pub fn rgb01(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.to_srgb().coords;
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Device sRGB components rounded to 0–255.
    #[must_use]
    pub fn rgb8_components(&self) -> (u8, u8, u8) {
        let (r, g, b) = self.rgb01();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.rgb8_components();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Debug for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.coords;
        write!(f, "{}({x:.5}, {y:.5}, {z:.5})", self.space.key())
    }
}

impl fmt::Display for ColorValue {
    /// Renders in the notation the value was typed in, hex otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation.unwrap_or(Notation::Hex).render(self))
    }
}

impl PartialEq for ColorValue {
    /// Same space and coordinates within a small epsilon. The notation hint
    /// is presentation only and does not take part.
    fn eq(&self, other: &Self) -> bool {
        const EPS: f64 = 1e-9;
        self.space == other.space
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(a, b)| (a - b).abs() < EPS)
    }
}

/// Convert a float (0.0–1.0) to a u8 (0–255), rounding to nearest.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_u8(v: f64) -> u8 {
    // Clamp first so the cast never truncates.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
