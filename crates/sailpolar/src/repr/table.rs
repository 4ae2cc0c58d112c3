//! Discretized polar table: wind-speed columns × wind-angle rows.
//!
//! Queries are bilinear: first across the two bracketing wind-speed columns,
//! then along the angle rows. Interpolation uses `a·(1−t) + b·t`, so a query
//! on a grid point returns the stored value bit-for-bit.
//!
//! A `Full` table covers the whole circle and interpolates across the
//! 0°/360° seam; a `Half` table only answers inside its stored angle range.

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use serde::Serialize;

use super::cfg::{Extrapolation, TableCfg};
use super::PolarRepr;
use crate::error::{PolarError, Result};
use crate::geom::{bracket, lerp, Bracket};
use crate::triple::Triple;

/// Angular coverage of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AngleSpan {
    /// All angles in [0, 180]; no wrap-around.
    Half,
    /// Circle; neighbours of the largest angle include the smallest one + 360.
    Full,
}

#[derive(Clone, Debug, Serialize)]
pub struct Table {
    speeds: Vec<f64>,
    angles: Vec<f64>,
    /// Rows = angles, columns = speeds.
    grid: DMatrix<f64>,
    span: AngleSpan,
    cfg: TableCfg,
}

fn check_axis(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(PolarError::format(format!("table needs at least one {what}")));
    }
    for w in values.windows(2) {
        if w[0] >= w[1] {
            return Err(PolarError::format(format!(
                "{what}s must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }
    }
    Ok(())
}

impl Table {
    /// Build from explicit axes. `grid` has one row per angle and one column per speed.
    pub fn new(speeds: Vec<f64>, angles: Vec<f64>, grid: DMatrix<f64>, cfg: TableCfg) -> Result<Self> {
        if let Some(ws) = speeds.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(PolarError::value(format!(
                "wind speed must be finite and > 0, got {ws}"
            )));
        }
        if let Some(wa) = angles
            .iter()
            .find(|v| !v.is_finite() || !(0.0..360.0).contains(*v))
        {
            return Err(PolarError::value(format!(
                "wind angle must lie in [0, 360), got {wa}"
            )));
        }
        check_axis(&speeds, "wind speed")?;
        check_axis(&angles, "wind angle")?;
        if grid.nrows() != angles.len() || grid.ncols() != speeds.len() {
            return Err(PolarError::format(format!(
                "grid is {}x{}, expected {}x{} (angles x speeds)",
                grid.nrows(),
                grid.ncols(),
                angles.len(),
                speeds.len()
            )));
        }
        if let Some(bs) = grid.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(PolarError::value(format!(
                "boat speed must be finite and >= 0, got {bs}"
            )));
        }
        let span = if angles.iter().any(|a| *a > 180.0) {
            AngleSpan::Full
        } else {
            AngleSpan::Half
        };
        Ok(Self {
            speeds,
            angles,
            grid,
            span,
            cfg,
        })
    }

    /// Build from per-speed columns: `columns[j][i]` is the boat speed at `speeds[j]`, `angles[i]`.
    pub fn from_columns(
        speeds: Vec<f64>,
        angles: Vec<f64>,
        columns: &[Vec<f64>],
        cfg: TableCfg,
    ) -> Result<Self> {
        if columns.len() != speeds.len() || columns.iter().any(|c| c.len() != angles.len()) {
            return Err(PolarError::format(
                "every wind speed column needs one boat speed per wind angle",
            ));
        }
        let grid = DMatrix::from_fn(angles.len(), speeds.len(), |i, j| columns[j][i]);
        Self::new(speeds, angles, grid, cfg)
    }

    /// Re-grid a triple sequence. Every (speed, angle) combination must be present.
    pub fn from_triples(triples: &[Triple], cfg: TableCfg) -> Result<Self> {
        if triples.is_empty() {
            return Err(PolarError::format("cannot build a table from zero triples"));
        }
        let mut speeds: Vec<f64> = triples.iter().map(Triple::ws).collect();
        let mut angles: Vec<f64> = triples.iter().map(Triple::wa).collect();
        speeds.sort_by(f64::total_cmp);
        speeds.dedup();
        angles.sort_by(f64::total_cmp);
        angles.dedup();

        let mut cells: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for t in triples {
            let i = angles.partition_point(|a| *a < t.wa());
            let j = speeds.partition_point(|s| *s < t.ws());
            if let Some(prev) = cells.insert((i, j), t.bs()) {
                if prev != t.bs() {
                    return Err(PolarError::format(format!(
                        "conflicting boat speeds {prev} and {} at ws={}, wa={}",
                        t.bs(),
                        t.ws(),
                        t.wa()
                    )));
                }
            }
        }
        if cells.len() != speeds.len() * angles.len() {
            let (i, j) = (0..angles.len())
                .flat_map(|i| (0..speeds.len()).map(move |j| (i, j)))
                .find(|k| !cells.contains_key(k))
                .unwrap_or((0, 0));
            return Err(PolarError::format(format!(
                "table is incomplete: no boat speed at ws={}, wa={}",
                speeds[j], angles[i]
            )));
        }
        let grid = DMatrix::from_fn(angles.len(), speeds.len(), |i, j| cells[&(i, j)]);
        tracing::debug!(speeds = speeds.len(), angles = angles.len(), "table built");
        Self::new(speeds, angles, grid, cfg)
    }

    pub fn span(&self) -> AngleSpan {
        self.span
    }

    pub fn grid(&self) -> &DMatrix<f64> {
        &self.grid
    }

    pub fn cfg(&self) -> TableCfg {
        self.cfg
    }

    /// Same table with another extrapolation policy.
    pub fn with_cfg(&self, cfg: TableCfg) -> Self {
        Self {
            cfg,
            ..self.clone()
        }
    }

    /// Boat speed per angle row at wind speed `ws` (interpolated across columns).
    fn column_at(&self, ws: f64) -> Result<Vec<f64>> {
        let n = self.speeds.len();
        let col = |j: usize| self.grid.column(j).iter().copied().collect::<Vec<f64>>();
        let blend = |j0: usize, j1: usize, t: f64| -> Vec<f64> {
            self.grid
                .column(j0)
                .iter()
                .zip(self.grid.column(j1).iter())
                .map(|(a, b)| lerp(*a, *b, t).max(0.0))
                .collect()
        };
        match bracket(&self.speeds, ws) {
            Bracket::Inside { lo, t } => {
                if n == 1 || t == 0.0 {
                    Ok(col(lo))
                } else {
                    Ok(blend(lo, lo + 1, t))
                }
            }
            side => match self.cfg.extrapolation {
                Extrapolation::Error => Err(PolarError::query(format!(
                    "wind speed {ws} outside table range [{}, {}]",
                    self.speeds[0],
                    self.speeds[n - 1]
                ))),
                Extrapolation::Clamp => Ok(col(if side == Bracket::Below { 0 } else { n - 1 })),
                Extrapolation::Linear if n == 1 => Ok(col(0)),
                Extrapolation::Linear => {
                    let (j0, j1) = if side == Bracket::Below { (0, 1) } else { (n - 2, n - 1) };
                    let t = (ws - self.speeds[j0]) / (self.speeds[j1] - self.speeds[j0]);
                    Ok(blend(j0, j1, t))
                }
            },
        }
    }

    /// Interpolate a per-angle column at `wa` (already in [0, 360)).
    fn along_angle(&self, column: &[f64], wa: f64) -> Result<f64> {
        let a = &self.angles;
        let n = a.len();
        if self.span == AngleSpan::Full {
            if n == 1 {
                return Ok(column[0]);
            }
            let (first, last) = (a[0], a[n - 1]);
            if wa < first {
                let t = (wa - (last - 360.0)) / (first - (last - 360.0));
                return Ok(lerp(column[n - 1], column[0], t));
            }
            if wa > last {
                let t = (wa - last) / (first + 360.0 - last);
                return Ok(lerp(column[n - 1], column[0], t));
            }
        }
        match bracket(a, wa) {
            Bracket::Inside { lo, t } => {
                if n == 1 || t == 0.0 {
                    Ok(column[lo])
                } else {
                    Ok(lerp(column[lo], column[lo + 1], t))
                }
            }
            side => match self.cfg.extrapolation {
                Extrapolation::Error => Err(PolarError::query(format!(
                    "wind angle {wa} outside table range [{}, {}]",
                    a[0],
                    a[n - 1]
                ))),
                Extrapolation::Clamp => Ok(if side == Bracket::Below {
                    column[0]
                } else {
                    column[n - 1]
                }),
                Extrapolation::Linear if n == 1 => Ok(column[0]),
                Extrapolation::Linear => {
                    let (i0, i1) = if side == Bracket::Below { (0, 1) } else { (n - 2, n - 1) };
                    let t = (wa - a[i0]) / (a[i1] - a[i0]);
                    Ok(lerp(column[i0], column[i1], t).max(0.0))
                }
            },
        }
    }
}

impl PolarRepr for Table {
    fn speeds(&self) -> Vec<f64> {
        self.speeds.clone()
    }

    fn angles(&self) -> Option<Vec<f64>> {
        Some(self.angles.clone())
    }

    fn boat_speed_at(&self, ws: f64, wa: f64) -> Result<f64> {
        let column = self.column_at(ws)?;
        self.along_angle(&column, wa)
    }

    /// Wind-speed-major: all angles of the first column, then the next column.
    fn to_triples(&self) -> Vec<Triple> {
        let mut out = Vec::with_capacity(self.grid.len());
        for (j, &ws) in self.speeds.iter().enumerate() {
            for (i, &wa) in self.angles.iter().enumerate() {
                out.push(Triple::from_parts(ws, wa, self.grid[(i, j)]));
            }
        }
        out
    }

    fn slice(&self, ws: f64) -> Result<Vec<(f64, f64)>> {
        let column = self.column_at(ws)?;
        Ok(self.angles.iter().copied().zip(column).collect())
    }

    fn max_angle(&self) -> f64 {
        self.angles.last().copied().unwrap_or(0.0)
    }

    fn symmetrized(&self) -> Result<Self> {
        if self.span == AngleSpan::Full {
            return Err(PolarError::domain(format!(
                "table already spans the full circle (max angle {})",
                self.max_angle()
            )));
        }
        let mut triples = self.to_triples();
        let mirrored: Vec<Triple> = triples
            .iter()
            .filter(|t| t.wa() > 0.0 && t.wa() < 180.0)
            .map(Triple::mirrored)
            .collect();
        triples.extend(mirrored);
        let mut table = Table::from_triples(&triples, self.cfg)?;
        table.span = AngleSpan::Full;
        Ok(table)
    }
}
