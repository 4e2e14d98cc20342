// SPDX-License-Identifier: MIT
//
// Gradient requests and their validation.

use cg_color::{ColorSpace, ColorValue, Notation};

use crate::seed::{Mode, Role, SeedSet};

/// Why a gradient request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("a gradient needs at least 2 steps, got {0}")]
    TooFewSteps(usize),

    #[error("seed color {0} is missing")]
    MissingSeed(Role),

    #[error("seed color {present} is set but {mode} mode has no place for it")]
    ModeMismatch { mode: Mode, present: Role },
}

/// Everything needed to compute one gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientRequest {
    pub seeds: SeedSet,
    pub mode: Mode,
    /// Total number of colors emitted, seeds included.
    pub step_count: usize,
    /// Space the blend is computed in.
    pub space: ColorSpace,
    /// Notation the result is rendered in.
    pub notation: Notation,
}

/// Seeds of a request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Topology {
    Two { a: ColorValue, b: ColorValue },
    Three { a: ColorValue, c: ColorValue, b: ColorValue },
}

impl GradientRequest {
    /// A request in the default space (OKLCH) and notation (hex).
    #[must_use]
    pub fn new(seeds: SeedSet, mode: Mode, step_count: usize) -> Self {
        Self {
            seeds,
            mode,
            step_count,
            space: ColorSpace::default(),
            notation: Notation::default(),
        }
    }

    #[must_use]
    pub const fn with_space(self, space: ColorSpace) -> Self {
        Self { space, ..self }
    }

    #[must_use]
    pub const fn with_notation(self, notation: Notation) -> Self {
        Self { notation, ..self }
    }

    #[must_use]
    pub const fn with_step_count(self, step_count: usize) -> Self {
        Self { step_count, ..self }
    }

    /// Check the request and pull out its seeds.
    ///
    /// # Errors
    ///
    /// - [`InvalidRequest::TooFewSteps`] when `step_count < 2`.
    /// - [`InvalidRequest::MissingSeed`] when a seed the mode needs is unset.
    /// - [`InvalidRequest::ModeMismatch`] when a seed is set that the mode
    ///   does not use (a C seed in 2-color mode).
    pub fn validate(&self) -> Result<Topology, InvalidRequest> {
        if self.step_count < 2 {
            return Err(InvalidRequest::TooFewSteps(self.step_count));
        }

        if let Some(&missing) = self
            .mode
            .required()
            .iter()
            .find(|role| self.seeds.get(**role).is_none())
        {
            return Err(InvalidRequest::MissingSeed(missing));
        }

        if let Some(extra) = self
            .seeds
            .roles()
            .into_iter()
            .find(|role| !self.mode.uses(*role))
        {
            return Err(InvalidRequest::ModeMismatch {
                mode: self.mode,
                present: extra,
            });
        }

        let seed = |role| self.seeds.get(role).copied().ok_or(InvalidRequest::MissingSeed(role));
        Ok(match self.mode {
            Mode::TwoColor => Topology::Two {
                a: seed(Role::A)?,
                b: seed(Role::B)?,
            },
            Mode::ThreeColor => Topology::Three {
                a: seed(Role::A)?,
                c: seed(Role::C)?,
                b: seed(Role::B)?,
            },
        })
    }
}
