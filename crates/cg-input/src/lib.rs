//! # cg-input — pasted-text color parsing for color-gradient-tool
//!
//! - **[`adapter`]** — splits free-form pasted text into color tokens and
//!   normalizes each one, dropping the ones it cannot read
//! - **[`convert`]** — bulk conversion of a pasted list into hex, RGB 256,
//!   and RGB 0–1 at once
//!
//! Nothing in this crate returns an error for bad input. A list that is
//! entirely unreadable simply comes back empty.

pub mod adapter;
pub mod convert;

pub use adapter::{
    RgbScale, parse_hex_input, parse_input, parse_mixed_input, parse_rgb_input, tokens,
};
pub use convert::{Conversion, convert_text};
