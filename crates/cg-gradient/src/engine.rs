// SPDX-License-Identifier: MIT
//
// The gradient engine.
//
// A gradient is one sweep (A → B) or two sweeps sharing their middle seed
// (A → C, C → B). Every interior stop is computed by the injected
// `ColorMath`: both ends are moved into the working space, blended per
// coordinate, and the result is moved back to device sRGB. Seeds are never
// recomputed. The first, last, and center stops are the seed values
// themselves, so no round-trip drift can creep into them.
//
// Three-color split, n = step_count:
//
//   n odd   C at (n-1)/2      (n-1)/2 stops before C, (n-1)/2 after
//   n even  C at n/2          n/2 stops before C, n/2 - 1 after
//   n = 2   {A, B}            no interior slot, C is dropped
//
//   n = 5   A  ·  C  ·  B
//   n = 6   A  ·  ·  C  ·  B
//
// C is emitted once, as the last stop of the first sweep and the first stop
// of the second, so the total is always exactly n.

use cg_color::{ColorMath, ColorSpace, ColorValue, Notation, PaletteMath};

use crate::request::{GradientRequest, InvalidRequest, Topology};

// ─── Split table ─────────────────────────────────────────────────────────────

/// Where the center seed lands in a 3-color gradient of `step_count` stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Index of C in the output.
    pub center: usize,
    /// Stops before C (A included).
    pub before: usize,
    /// Stops from C to the end (C and B included).
    pub from_center: usize,
}

impl Split {
    /// Resolve the split for `step_count >= 3`.
    ///
    /// The first half is `floor(n/2)` stops and the second half, which
    /// starts with C, is `ceil(n/2)` stops.
    #[must_use]
    pub const fn for_steps(step_count: usize) -> Self {
        match step_count % 2 {
            // Odd: exact middle.
            1 => {
                let side = (step_count - 1) / 2;
                Self {
                    center: side,
                    before: side,
                    from_center: side + 1,
                }
            }
            // Even: C opens the second half.
            _ => {
                let half = step_count / 2;
                Self {
                    center: half,
                    before: half,
                    from_center: half,
                }
            }
        }
    }
}

// ─── Gradient ────────────────────────────────────────────────────────────────

/// An ordered run of colors, first == A, last == B.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    colors: Vec<ColorValue>,
    center: Option<usize>,
}

impl Gradient {
    #[must_use]
    pub fn colors(&self) -> &[ColorValue] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a gradient built by the engine (it has at least 2 stops).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the center seed, in 3-color gradients with room for it.
    #[must_use]
    pub const fn center(&self) -> Option<usize> {
        self.center
    }

    #[must_use]
    pub fn first(&self) -> Option<&ColorValue> {
        self.colors.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ColorValue> {
        self.colors.last()
    }

    /// Render every stop in `notation` (export form).
    #[must_use]
    pub fn render(&self, notation: Notation) -> Vec<String> {
        self.colors.iter().map(|c| notation.render(c)).collect()
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, ColorValue> {
        self.colors.iter()
    }
}

impl<'a> IntoIterator for &'a Gradient {
    type Item = &'a ColorValue;
    type IntoIter = std::slice::Iter<'a, ColorValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Builds gradients from requests using a [`ColorMath`] backend.
///
/// Stateless: a single engine can serve any number of requests, from any
/// number of threads if `M` allows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientEngine<M = PaletteMath> {
    math: M,
}

impl GradientEngine {
    /// An engine on the default `palette`-backed math.
    #[must_use]
    pub const fn new() -> Self {
        Self { math: PaletteMath }
    }
}

impl<M: ColorMath> GradientEngine<M> {
    /// An engine on a custom math backend.
    #[must_use]
    pub const fn with_math(math: M) -> Self {
        Self { math }
    }

    /// Compute the gradient for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequest`] if the request fails
    /// [`GradientRequest::validate`].
    pub fn generate(&self, request: &GradientRequest) -> Result<Gradient, InvalidRequest> {
        let n = request.step_count;
        let space = request.space;

        let gradient = match request.validate()? {
            Topology::Two { a, b } => Gradient {
                colors: self.sweep(a, b, n, space),
                center: None,
            },
            // No interior slot for C.
            Topology::Three { a, b, .. } if n == 2 => Gradient {
                colors: vec![a, b],
                center: None,
            },
            Topology::Three { a, c, b } => {
                let split = Split::for_steps(n);
                let mut colors = self.sweep(a, c, split.before + 1, space);
                colors.truncate(split.before);
                colors.extend(self.sweep(c, b, split.from_center, space));
                Gradient {
                    colors,
                    center: Some(split.center),
                }
            }
        };

        tracing::trace!(
            steps = n,
            space = %space,
            mode = %request.mode,
            "generated gradient"
        );
        Ok(gradient)
    }

    /// Compute the gradient and render it in the request's notation.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn render(&self, request: &GradientRequest) -> Result<Vec<String>, InvalidRequest> {
        Ok(self.generate(request)?.render(request.notation))
    }

    /// A dense version of the request's gradient, for painting a smooth bar.
    ///
    /// Same seeds, space, and topology; `resolution` replaces the step count.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate), with `resolution` as the step count.
    pub fn preview(
        &self,
        request: &GradientRequest,
        resolution: usize,
    ) -> Result<Gradient, InvalidRequest> {
        self.generate(&request.with_step_count(resolution))
    }

    /// `stops` evenly spaced colors from `from` to `to` (both included).
    ///
    /// Callers guarantee `stops >= 2`.
    #[allow(clippy::cast_precision_loss)]
    fn sweep(
        &self,
        from: ColorValue,
        to: ColorValue,
        stops: usize,
        space: ColorSpace,
    ) -> Vec<ColorValue> {
        let last = stops - 1;
        let mut out = Vec::with_capacity(stops);
        out.push(from);
        for i in 1..last {
            let t = i as f64 / last as f64;
            let mixed = self.math.blend(&from, &to, t, space);
            out.push(self.math.convert(&mixed, ColorSpace::Srgb));
        }
        out.push(to);
        out
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
