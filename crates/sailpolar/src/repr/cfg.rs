//! Per-representation configuration.
//!
//! All structs deserialize with `#[serde(default)]`, so a partial JSON file
//! only overrides the fields it names.

use serde::{Deserialize, Serialize};

/// Behaviour when a query falls outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Raise `PolarError::Query`.
    #[default]
    Error,
    /// Use the nearest grid edge.
    Clamp,
    /// Extend the boundary segment linearly (results clamped at 0).
    Linear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableCfg {
    pub extrapolation: Extrapolation,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveCfg {
    /// Angular step (degrees) for slices and triple export.
    pub resolution: f64,
}

impl Default for CurveCfg {
    fn default() -> Self {
        Self { resolution: 5.0 }
    }
}

/// Inverse-distance weighting over the `k` nearest observations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudCfg {
    pub k: usize,
    /// Weight is `1 / d^power`; 2.0 is inverse-square.
    pub power: f64,
    /// Multiplies wind-speed differences before mixing them with degrees.
    pub ws_scale: f64,
    /// Slices collect observations with `|ws_i - ws| <= slice_tol`.
    pub slice_tol: f64,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            k: 3,
            power: 2.0,
            ws_scale: 1.0,
            slice_tol: 0.5,
        }
    }
}
