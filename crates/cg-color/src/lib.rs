// SPDX-License-Identifier: MIT
//
// cg-color — color values, notations, and color-space math for
// color-gradient-tool.
//
// Everything the parser and the gradient engine share lives here:
//
//   value     → ColorValue, the immutable canonical color
//   notation  → Notation (hex / rgb01 / rgb256), per-token parse + render
//   space     → ColorSpace, the ColorMath capability, PaletteMath backend
//   error     → ParseError, UnknownName
//
// Parsed values are always device sRGB in [0, 1]. Interpolation happens in
// whatever space the caller picks, through ColorMath, and is converted back
// before anything is rendered.

// Single-char math variables (r, g, b, l, c, h) are the convention in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma names are inherently similar.
#![allow(clippy::similar_names)]

pub mod error;
pub mod notation;
pub mod space;
pub mod value;

pub use error::{ParseError, UnknownName};
pub use notation::{Notation, parse_token};
pub use space::{ColorMath, ColorSpace, PaletteMath};
pub use value::ColorValue;
