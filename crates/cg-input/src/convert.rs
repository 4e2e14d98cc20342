// SPDX-License-Identifier: MIT
//
// Bulk notation conversion: paste a list in one notation, get it back in
// all three. Drives the converter panel (hex ↔ RGB 256 ↔ RGB 0–1).

use cg_color::{ColorValue, Notation};

use crate::adapter::parse_input;

/// Every parsed color rendered in each notation, in input order.
///
/// The three columns always have the same length; row `i` of each column is
/// the same color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub hex: Vec<String>,
    pub rgb256: Vec<String>,
    pub rgb01: Vec<String>,
}

impl Conversion {
    /// Render already-parsed values in all three notations (bare form).
    #[must_use]
    pub fn from_values(values: &[ColorValue]) -> Self {
        let column = |notation: Notation| -> Vec<String> {
            values.iter().map(|v| notation.render_bare(v)).collect()
        };
        Self {
            hex: column(Notation::Hex),
            rgb256: column(Notation::Rgb256),
            rgb01: column(Notation::Rgb01),
        }
    }

    /// The column for `notation`.
    #[must_use]
    pub fn get(&self, notation: Notation) -> &[String] {
        match notation {
            Notation::Hex => &self.hex,
            Notation::Rgb256 => &self.rgb256,
            Notation::Rgb01 => &self.rgb01,
        }
    }

    /// The column for `notation`, one color per line (clipboard form).
    #[must_use]
    pub fn joined(&self, notation: Notation) -> String {
        self.get(notation).join("\n")
    }

    /// Number of colors converted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hex.len()
    }

    /// True when nothing in the input could be read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }
}

/// Parse `text` as `from` and render every readable color in all notations.
///
/// Unreadable tokens are skipped, exactly as in [`parse_input`].
#[must_use]
pub fn convert_text(text: &str, from: Notation) -> Conversion {
    let values = parse_input(text, from);
    tracing::debug!(from = %from, colors = values.len(), "converted color list");
    Conversion::from_values(&values)
}
