// SPDX-License-Identifier: MIT
//
// Working color spaces and the conversion/blend capability.
//
// The gradient engine never does colorimetry itself. It asks a `ColorMath`
// implementation to move a value into the working space, blend two values
// there, and move the result back to device sRGB. `PaletteMath` is the
// default backend, built on the `palette` crate:
//
//   sRGB ↔ Linear sRGB ↔ (Oklab ↔ OKLCH | XYZ ↔ Lab ↔ LCh)
//   sRGB ↔ HSL / HWB
//
// Coordinate layout per space (index 0, 1, 2):
//
//   srgb, srgb-gamma    r, g, b        0–1 (srgb is linear light)
//   oklab               L, a, b        L 0–1
//   oklch               L, C, h        h in degrees
//   lab                 L, a, b        L 0–100 (D65)
//   lch                 L, C, h        h in degrees (D65)
//   hsl                 h, s, l        s, l 0–1
//   hwb                 h, w, b        w, b 0–1
//
// Cylindrical spaces blend hue along the shortest arc. When one side is
// achromatic (its hue is meaningless) the other side's hue is used, so a
// sweep to white or black does not swing through unrelated hues.

use std::fmt;
use std::str::FromStr;

use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{Hsl, Hwb, Lab, Lch, LinSrgb, Oklab, Oklch, Srgb, encoding};
use serde::{Deserialize, Serialize};

use crate::error::UnknownName;
use crate::value::ColorValue;

// ─── ColorSpace ──────────────────────────────────────────────────────────────

/// The coordinate system a blend is performed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSpace {
    /// Gamma-encoded device sRGB. Also the canonical storage space.
    #[serde(rename = "srgb-gamma", alias = "gamma-srgb")]
    Srgb,
    /// Linear-light sRGB (physically additive mixing). This is what the
    /// `srgb` / `rgb` working space means.
    #[serde(
        rename = "srgb",
        alias = "rgb",
        alias = "linear-srgb",
        alias = "srgb-linear",
        alias = "linear",
        alias = "linear-rgb"
    )]
    LinearSrgb,
    Oklab,
    #[default]
    Oklch,
    /// CIE L*a*b* (D65).
    Lab,
    /// CIE LCh(ab) (D65).
    Lch,
    Hsl,
    Hwb,
}

impl ColorSpace {
    /// Every space, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Oklch,
        Self::Lch,
        Self::Oklab,
        Self::Lab,
        Self::Hwb,
        Self::Hsl,
        Self::LinearSrgb,
        Self::Srgb,
    ];

    /// Stable identifier used in settings and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Srgb => "srgb-gamma",
            Self::LinearSrgb => "srgb",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
            Self::Lab => "lab",
            Self::Lch => "lch",
            Self::Hsl => "hsl",
            Self::Hwb => "hwb",
        }
    }

    /// Human-facing name shown in pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Srgb => "sRGB (gamma-encoded)",
            Self::LinearSrgb => "sRGB",
            Self::Oklab => "OKLab",
            Self::Oklch => "OKLCH (OKLab LCh)",
            Self::Lab => "CIE Lab",
            Self::Lch => "LCh (CIE LCh)",
            Self::Hsl => "HSL (Hue-Saturation-Lightness)",
            Self::Hwb => "HWB (Hue-Whiteness-Blackness)",
        }
    }

    /// Look a space up by its [`label`](Self::label), falling back to the key.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
            .or_else(|| label.parse().ok())
    }

    /// Index of the hue coordinate, for cylindrical spaces.
    #[must_use]
    pub const fn hue_index(self) -> Option<usize> {
        match self {
            Self::Oklch | Self::Lch => Some(2),
            Self::Hsl | Self::Hwb => Some(0),
            Self::Srgb | Self::LinearSrgb | Self::Oklab | Self::Lab => None,
        }
    }

    /// Whether coordinates in this space carry no meaningful hue.
    #[must_use]
    pub fn is_achromatic(self, coords: [f64; 3]) -> bool {
        const EPS: f64 = 1e-6;
        match self {
            Self::Oklch => coords[1] < EPS,
            // Lab chroma runs to ~150, so the threshold scales with it.
            Self::Lch => coords[1] < 1e-4,
            Self::Hsl => coords[1] < EPS || coords[2] < EPS || coords[2] > 1.0 - EPS,
            Self::Hwb => coords[1] + coords[2] > 1.0 - EPS,
            Self::Srgb | Self::LinearSrgb | Self::Oklab | Self::Lab => false,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColorSpace {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb-gamma" | "gamma-srgb" => Ok(Self::Srgb),
            "srgb" | "rgb" | "linear-srgb" | "srgb-linear" | "linear" | "linear-rgb" => {
                Ok(Self::LinearSrgb)
            }
            "oklab" => Ok(Self::Oklab),
            "oklch" => Ok(Self::Oklch),
            "lab" => Ok(Self::Lab),
            "lch" => Ok(Self::Lch),
            "hsl" => Ok(Self::Hsl),
            "hwb" => Ok(Self::Hwb),
            _ => Err(UnknownName::new("color space", s)),
        }
    }
}

// ─── ColorMath ───────────────────────────────────────────────────────────────

/// Color-space conversion and blending, as used by the gradient engine.
///
/// Implementations must be pure: the same inputs always give the same
/// output, and no state is shared between calls.
pub trait ColorMath {
    /// Express `value` in the coordinates of `to`.
    ///
    /// Converting into [`ColorSpace::Srgb`] always yields components in
    /// 0.0–1.0; out-of-gamut colors are mapped into the gamut.
    fn convert(&self, value: &ColorValue, to: ColorSpace) -> ColorValue;

    /// Blend `a` toward `b` by `t` (0.0 = `a`, 1.0 = `b`) inside `space`.
    ///
    /// The result is expressed in `space`.
    fn blend(&self, a: &ColorValue, b: &ColorValue, t: f64, space: ColorSpace) -> ColorValue {
        let from = self.convert(a, space).coords();
        let to = self.convert(b, space).coords();
        ColorValue::new(lerp_coords(space, from, to, t), space)
    }
}

impl<M: ColorMath + ?Sized> ColorMath for &M {
    fn convert(&self, value: &ColorValue, to: ColorSpace) -> ColorValue {
        (**self).convert(value, to)
    }

    fn blend(&self, a: &ColorValue, b: &ColorValue, t: f64, space: ColorSpace) -> ColorValue {
        (**self).blend(a, b, t, space)
    }
}

/// Per-coordinate linear blend with shortest-arc hue handling.
#[must_use]
pub fn lerp_coords(space: ColorSpace, from: [f64; 3], to: [f64; 3], t: f64) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = (to[i] - from[i]).mul_add(t, from[i]);
    }

    if let Some(h) = space.hue_index() {
        out[h] = match (space.is_achromatic(from), space.is_achromatic(to)) {
            (true, true) => 0.0,
            (true, false) => normalize_hue(to[h]),
            (false, true) => normalize_hue(from[h]),
            (false, false) => interpolate_hue(from[h], to[h], t),
        };
    }

    out
}

/// Normalize a hue angle to the range [0, 360).
#[inline]
fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Interpolate between two hue angles taking the shortest path.
#[inline]
fn interpolate_hue(h1: f64, h2: f64, t: f64) -> f64 {
    let diff = h2 - h1;
    let diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    normalize_hue(diff.mul_add(t, h1))
}

// ─── PaletteMath ─────────────────────────────────────────────────────────────

/// [`ColorMath`] backed by the `palette` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteMath;

impl ColorMath for PaletteMath {
    fn convert(&self, value: &ColorValue, to: ColorSpace) -> ColorValue {
        if value.space() == to {
            return *value;
        }
        let rgb = to_srgb_unclamped(value.space(), value.coords());
        let coords = if to == ColorSpace::Srgb {
            fit_srgb(rgb)
        } else {
            from_srgb(rgb, to)
        };
        ColorValue::new(coords, to)
    }
}

/// Coordinates in `space` → unclamped sRGB (may be out of gamut).
fn to_srgb_unclamped(space: ColorSpace, [x, y, z]: [f64; 3]) -> Srgb<f64> {
    match space {
        ColorSpace::Srgb => Srgb::new(x, y, z),
        ColorSpace::LinearSrgb => Srgb::from_color_unclamped(LinSrgb::new(x, y, z)),
        ColorSpace::Oklab => Srgb::from_color_unclamped(Oklab::new(x, y, z)),
        ColorSpace::Oklch => Srgb::from_color_unclamped(Oklch::new(x, y, z)),
        ColorSpace::Lab => Srgb::from_color_unclamped(Lab::<D65, f64>::new(x, y, z)),
        ColorSpace::Lch => Srgb::from_color_unclamped(Lch::<D65, f64>::new(x, y, z)),
        ColorSpace::Hsl => Srgb::from_color_unclamped(Hsl::<encoding::Srgb, f64>::new(x, y, z)),
        ColorSpace::Hwb => Srgb::from_color_unclamped(Hwb::<encoding::Srgb, f64>::new(x, y, z)),
    }
}

/// sRGB → coordinates in `space`.
fn from_srgb(rgb: Srgb<f64>, space: ColorSpace) -> [f64; 3] {
    match space {
        ColorSpace::Srgb => [rgb.red, rgb.green, rgb.blue],
        ColorSpace::LinearSrgb => {
            let c: LinSrgb<f64> = LinSrgb::from_color_unclamped(rgb);
            [c.red, c.green, c.blue]
        }
        ColorSpace::Oklab => {
            let c: Oklab<f64> = Oklab::from_color_unclamped(rgb);
            [c.l, c.a, c.b]
        }
        ColorSpace::Oklch => {
            let c: Oklch<f64> = Oklch::from_color_unclamped(rgb);
            [c.l, c.chroma, c.hue.into_positive_degrees()]
        }
        ColorSpace::Lab => {
            let c: Lab<D65, f64> = Lab::from_color_unclamped(rgb);
            [c.l, c.a, c.b]
        }
        ColorSpace::Lch => {
            let c: Lch<D65, f64> = Lch::from_color_unclamped(rgb);
            [c.l, c.chroma, c.hue.into_positive_degrees()]
        }
        ColorSpace::Hsl => {
            let c: Hsl<encoding::Srgb, f64> = Hsl::from_color_unclamped(rgb);
            [c.hue.into_positive_degrees(), c.saturation, c.lightness]
        }
        ColorSpace::Hwb => {
            let c: Hwb<encoding::Srgb, f64> = Hwb::from_color_unclamped(rgb);
            [c.hue.into_positive_degrees(), c.whiteness, c.blackness]
        }
    }
}

/// Small tolerance so float noise at 0.0 / 1.0 does not count as out of gamut.
const GAMUT_EPS: f64 = 1e-9;

fn in_gamut(rgb: Srgb<f64>) -> bool {
    [rgb.red, rgb.green, rgb.blue]
        .iter()
        .all(|c| (-GAMUT_EPS..=1.0 + GAMUT_EPS).contains(c))
}

/// Map sRGB into the displayable gamut.
///
/// Reduces OKLCH chroma by binary search, keeping lightness and hue, then
/// clamps whatever float noise is left.
fn fit_srgb(rgb: Srgb<f64>) -> [f64; 3] {
    let fitted = if in_gamut(rgb) {
        rgb
    } else {
        let lch: Oklch<f64> = Oklch::from_color_unclamped(rgb);
        let mut lo = 0.0;
        let mut hi = lch.chroma;

        for _ in 0..24 {
            let mid = (lo + hi) * 0.5;
            let candidate = Srgb::from_color_unclamped(Oklch { chroma: mid, ..lch });
            if in_gamut(candidate) {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        tracing::debug!(chroma = lch.chroma, fitted = lo, "gamut-mapped color into sRGB");
        Srgb::from_color_unclamped(Oklch { chroma: lo, ..lch })
    };

    [
        fitted.red.clamp(0.0, 1.0),
        fitted.green.clamp(0.0, 1.0),
        fitted.blue.clamp(0.0, 1.0),
    ]
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn assert_coords_close(actual: [f64; 3], expected: [f64; 3], epsilon: f64) {
        assert!(
            actual
                .iter()
                .zip(expected.iter())
                .all(|(a, e)| approx_eq(*a, *e, epsilon)),
            "coords mismatch: got {actual:?}, expected {expected:?}"
        );
    }

    // ── Identifiers ──────────────────────────────────────────────────────

    #[test]
    fn keys_roundtrip_through_from_str() {
        for space in ColorSpace::ALL {
            assert_eq!(space.key().parse::<ColorSpace>(), Ok(space));
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_aliases() {
        assert_eq!("OKLCH".parse::<ColorSpace>(), Ok(ColorSpace::Oklch));
        assert_eq!("srgb-linear".parse::<ColorSpace>(), Ok(ColorSpace::LinearSrgb));
        assert_eq!("rgb".parse::<ColorSpace>(), Ok(ColorSpace::LinearSrgb));
        assert_eq!("srgb".parse::<ColorSpace>(), Ok(ColorSpace::LinearSrgb));
        assert_eq!("srgb-gamma".parse::<ColorSpace>(), Ok(ColorSpace::Srgb));
        assert_eq!(" Lab ".parse::<ColorSpace>(), Ok(ColorSpace::Lab));
        assert!("cmyk".parse::<ColorSpace>().is_err());
    }

    #[test]
    fn from_label_accepts_labels_and_keys() {
        assert_eq!(ColorSpace::from_label("OKLCH (OKLab LCh)"), Some(ColorSpace::Oklch));
        assert_eq!(ColorSpace::from_label("CIE Lab"), Some(ColorSpace::Lab));
        assert_eq!(ColorSpace::from_label("hwb"), Some(ColorSpace::Hwb));
        assert_eq!(ColorSpace::from_label("sRGB"), Some(ColorSpace::LinearSrgb));
        assert_eq!(
            ColorSpace::from_label("sRGB (gamma-encoded)"),
            Some(ColorSpace::Srgb)
        );
        assert_eq!(ColorSpace::from_label("Pantone"), None);
    }

    // ── Conversion ───────────────────────────────────────────────────────

    #[test]
    fn srgb_roundtrip_through_every_space() {
        let samples = [
            ColorValue::rgb8(0xe3, 0x1b, 0x23),
            ColorValue::rgb8(0x00, 0xb0, 0xe6),
            ColorValue::rgb8(0x28, 0x8c, 0xeb),
            ColorValue::rgb8(0x80, 0x80, 0x80),
            ColorValue::rgb8(0xff, 0xff, 0xff),
        ];
        for space in ColorSpace::ALL {
            for sample in samples {
                let there = PaletteMath.convert(&sample, space);
                assert_eq!(there.space(), space);
                let back = PaletteMath.convert(&there, ColorSpace::Srgb);
                assert_coords_close(back.coords(), sample.coords(), 1e-6);
            }
        }
    }

    #[test]
    fn oklch_of_pure_red_matches_reference() {
        let red = ColorValue::srgb(1.0, 0.0, 0.0);
        let [l, c, h] = PaletteMath.convert(&red, ColorSpace::Oklch).coords();
        assert!(approx_eq(l, 0.628, 0.001), "L = {l}");
        assert!(approx_eq(c, 0.2577, 0.001), "C = {c}");
        assert!(approx_eq(h, 29.23, 0.1), "h = {h}");
    }

    #[test]
    fn converting_to_srgb_fits_out_of_gamut_colors() {
        // Very high chroma, well outside sRGB.
        let vivid = ColorValue::new([0.7, 0.4, 150.0], ColorSpace::Oklch);
        let rgb = PaletteMath.convert(&vivid, ColorSpace::Srgb);
        for c in rgb.coords() {
            assert!((0.0..=1.0).contains(&c), "component {c} out of gamut");
        }
        // Hue survives the chroma reduction.
        let [_, _, h] = PaletteMath.convert(&rgb, ColorSpace::Oklch).coords();
        assert!(approx_eq(h, 150.0, 2.0), "hue drifted to {h}");
    }

    #[test]
    fn convert_to_same_space_is_identity() {
        let v = ColorValue::new([0.5, 0.1, 200.0], ColorSpace::Oklch);
        assert_eq!(PaletteMath.convert(&v, ColorSpace::Oklch), v);
    }

    // ── Blending ─────────────────────────────────────────────────────────

    #[test]
    fn blend_endpoints() {
        let a = ColorValue::rgb8(0xe3, 0x1b, 0x23);
        let b = ColorValue::rgb8(0x00, 0xb0, 0xe6);
        for space in ColorSpace::ALL {
            let start = PaletteMath.convert(&PaletteMath.blend(&a, &b, 0.0, space), ColorSpace::Srgb);
            let end = PaletteMath.convert(&PaletteMath.blend(&a, &b, 1.0, space), ColorSpace::Srgb);
            assert_coords_close(start.coords(), a.coords(), 1e-6);
            assert_coords_close(end.coords(), b.coords(), 1e-6);
        }
    }

    #[test]
    fn linear_blend_of_black_and_white() {
        let black = ColorValue::srgb(0.0, 0.0, 0.0);
        let white = ColorValue::srgb(1.0, 1.0, 1.0);
        let mid = PaletteMath.blend(&black, &white, 0.5, ColorSpace::LinearSrgb);
        assert_coords_close(mid.coords(), [0.5, 0.5, 0.5], 1e-9);
        let rgb = PaletteMath.convert(&mid, ColorSpace::Srgb);
        // Linear 0.5 encodes to ~0.7354 in sRGB.
        assert_coords_close(rgb.coords(), [0.735_356_6; 3], 1e-5);
    }

    #[test]
    fn device_blend_is_plain_average() {
        let a = ColorValue::srgb(0.2, 0.4, 0.6);
        let b = ColorValue::srgb(0.4, 0.8, 0.0);
        let mid = PaletteMath.blend(&a, &b, 0.5, ColorSpace::Srgb);
        assert_coords_close(mid.coords(), [0.3, 0.6, 0.3], 1e-12);
    }

    #[test]
    fn hue_takes_the_shortest_arc() {
        let from = [0.7, 0.1, 350.0];
        let to = [0.7, 0.1, 10.0];
        let mid = lerp_coords(ColorSpace::Oklch, from, to, 0.5);
        assert!(approx_eq(mid[2], 0.0, 1e-9) || approx_eq(mid[2], 360.0, 1e-9));

        let quarter = lerp_coords(ColorSpace::Oklch, to, from, 0.25);
        assert!(approx_eq(quarter[2], 5.0, 1e-9), "hue = {}", quarter[2]);
    }

    #[test]
    fn hsl_hue_lives_at_index_zero() {
        let mid = lerp_coords(ColorSpace::Hsl, [300.0, 1.0, 0.5], [60.0, 1.0, 0.5], 0.5);
        assert!(approx_eq(mid[0], 0.0, 1e-9) || approx_eq(mid[0], 360.0, 1e-9));
        assert!(approx_eq(mid[1], 1.0, 1e-12));
    }

    #[test]
    fn achromatic_endpoint_borrows_the_other_hue() {
        let gray = [0.5, 0.0, 0.0];
        let blue = [0.5, 0.2, 264.0];
        let mid = lerp_coords(ColorSpace::Oklch, gray, blue, 0.5);
        assert!(approx_eq(mid[2], 264.0, 1e-9));
        assert!(approx_eq(mid[1], 0.1, 1e-12));
    }

    #[test]
    fn math_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PaletteMath>();
        assert_send_sync::<ColorValue>();
    }
}
