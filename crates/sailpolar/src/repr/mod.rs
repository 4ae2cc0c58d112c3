//! Representation variants of a polar diagram.
//!
//! - `Table`: dense grid, bilinear queries.
//! - `Curve`: per-wind-speed parametric fits.
//! - `PointCloud`: raw observations, inverse-distance weighted queries.
//!
//! All three are immutable values; transforms return new values.

pub mod cfg;
pub mod cloud;
pub mod curve;
pub mod table;

pub use cfg::{CloudCfg, CurveCfg, Extrapolation, TableCfg};
pub use cloud::PointCloud;
pub use curve::{Curve, CurveDomain, CurveFit, Family};
pub use table::{AngleSpan, Table};

use crate::error::Result;
use crate::triple::Triple;

/// Capabilities shared by every representation.
///
/// Angles passed in are already normalized to [0, 360) and wind speeds are
/// finite and positive; `Diagram` does that before delegating.
pub trait PolarRepr {
    /// Wind speeds the representation stores, ascending.
    fn speeds(&self) -> Vec<f64>;

    /// Stored (Table) or sampled (Curve) angles; `None` without a fixed angle set.
    fn angles(&self) -> Option<Vec<f64>>;

    fn boat_speed_at(&self, ws: f64, wa: f64) -> Result<f64>;

    /// Export as normalized triples.
    fn to_triples(&self) -> Vec<Triple>;

    /// `(angle, boat speed)` pairs for one wind speed, by increasing angle.
    fn slice(&self, ws: f64) -> Result<Vec<(f64, f64)>>;

    /// Largest angle the representation covers.
    fn max_angle(&self) -> f64;

    /// Mirror a half-range representation onto the full circle.
    fn symmetrized(&self) -> Result<Self>
    where
        Self: Sized;
}
