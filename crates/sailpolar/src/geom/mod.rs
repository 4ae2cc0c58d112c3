//! Angle math, grid interpolation and polar convex hulls.
//!
//! Purpose
//! - Keep the numeric building blocks of the engine in one place so the
//!   representations and the diagram facade stay free of index juggling.
//! - Angles are always degrees in [0, 360) once they leave this module.
//!
//! Code cross-refs: `repr::table` (brackets), `repr::cloud` (circular distance),
//! `diagram` (hull slices).

mod angle;
mod hull;
mod interp;

pub use angle::{
    cartesian_to_polar, circular_diff, normalize_deg, polar_to_cartesian, sample_angles,
    MIN_SAMPLE_STEP,
};
pub use hull::{convex_hull, hull_ccw, member_hull, HullEdge, HullVertex, MemberHull};
pub use interp::{bracket, lerp, linspace, Bracket};

#[cfg(test)]
mod tests;
