// SPDX-License-Identifier: MIT
//
// Seed colors and gradient topology.

use std::fmt;

use cg_color::ColorValue;

/// Where a seed sits in the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// First color (left end).
    A,
    /// Last color (right end).
    B,
    /// Center color, 3-color mode only.
    C,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        })
    }
}

/// Two seeds (A → B) or three (A → C → B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    TwoColor,
    ThreeColor,
}

impl Mode {
    /// Seeds that must be present for this mode.
    #[must_use]
    pub const fn required(self) -> &'static [Role] {
        match self {
            Self::TwoColor => &[Role::A, Role::B],
            Self::ThreeColor => &[Role::A, Role::B, Role::C],
        }
    }

    /// Whether `role` is part of this mode's topology.
    #[must_use]
    pub const fn uses(self, role: Role) -> bool {
        match (self, role) {
            (_, Role::A | Role::B) | (Self::ThreeColor, Role::C) => true,
            (Self::TwoColor, Role::C) => false,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TwoColor => "2-color",
            Self::ThreeColor => "3-color",
        })
    }
}

/// The seed colors a user has set, by role.
///
/// A set can be incomplete while the user is still editing; completeness is
/// checked against a [`Mode`] when a gradient is requested.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeedSet {
    a: Option<ColorValue>,
    b: Option<ColorValue>,
    c: Option<ColorValue>,
}

impl SeedSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: None,
            b: None,
            c: None,
        }
    }

    /// A → B.
    #[must_use]
    pub const fn two(a: ColorValue, b: ColorValue) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
            c: None,
        }
    }

    /// A → C → B.
    #[must_use]
    pub const fn three(a: ColorValue, c: ColorValue, b: ColorValue) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
            c: Some(c),
        }
    }

    /// Return a copy with `role` set to `value`.
    #[must_use]
    pub fn with(mut self, role: Role, value: ColorValue) -> Self {
        *self.slot_mut(role) = Some(value);
        self
    }

    /// Return a copy with `role` cleared.
    #[must_use]
    pub fn without(mut self, role: Role) -> Self {
        *self.slot_mut(role) = None;
        self
    }

    #[must_use]
    pub const fn get(&self, role: Role) -> Option<&ColorValue> {
        match role {
            Role::A => self.a.as_ref(),
            Role::B => self.b.as_ref(),
            Role::C => self.c.as_ref(),
        }
    }

    /// Roles that currently hold a color, in A, B, C order.
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        [Role::A, Role::B, Role::C]
            .into_iter()
            .filter(|r| self.get(*r).is_some())
            .collect()
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<ColorValue> {
        match role {
            Role::A => &mut self.a,
            Role::B => &mut self.b,
            Role::C => &mut self.c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn red() -> ColorValue {
        ColorValue::rgb8(255, 0, 0)
    }

    fn blue() -> ColorValue {
        ColorValue::rgb8(0, 0, 255)
    }

    #[test]
    fn two_and_three_constructors() {
        assert_eq!(SeedSet::two(red(), blue()).roles(), vec![Role::A, Role::B]);
        assert_eq!(
            SeedSet::three(red(), blue(), red()).roles(),
            vec![Role::A, Role::B, Role::C]
        );
    }

    #[test]
    fn with_and_without() {
        let seeds = SeedSet::new().with(Role::C, blue()).with(Role::A, red());
        assert_eq!(seeds.roles(), vec![Role::A, Role::C]);
        assert_eq!(seeds.get(Role::C), Some(&blue()));
        assert_eq!(seeds.without(Role::C).roles(), vec![Role::A]);
    }

    #[test]
    fn mode_requirements() {
        assert_eq!(Mode::TwoColor.required(), &[Role::A, Role::B]);
        assert_eq!(Mode::ThreeColor.required(), &[Role::A, Role::B, Role::C]);
        assert!(!Mode::TwoColor.uses(Role::C));
        assert!(Mode::ThreeColor.uses(Role::C));
    }
}
