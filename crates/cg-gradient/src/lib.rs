//! # cg-gradient — gradient generation for color-gradient-tool
//!
//! - **[`seed`]** — seed roles (A, B, C), 2-/3-color modes, the seed set
//! - **[`request`]** — a full gradient request and its validation
//! - **[`engine`]** — the engine: sweeps, the 3-color split, rendering
//!
//! The engine never does color math itself; it drives a
//! [`cg_color::ColorMath`] backend ([`cg_color::PaletteMath`] by default).

pub mod engine;
pub mod request;
pub mod seed;

pub use engine::{Gradient, GradientEngine, Split};
pub use request::{GradientRequest, InvalidRequest, Topology};
pub use seed::{Mode, Role, SeedSet};
