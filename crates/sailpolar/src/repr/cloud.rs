//! Raw point cloud: no grid, queries interpolate locally at query time.
//!
//! Distance in (wind speed, wind angle) space is
//! `hypot(ws_scale·Δws, min(|Δwa|, 360 − |Δwa|))`. A query returns the
//! inverse-distance weighted mean of the `k` nearest observations, plus every
//! observation tied with the k-th distance, so the neighbour set does not
//! depend on storage order. Exact hits return the (mean of the) stored
//! value(s) unweighted.

use serde::Serialize;

use super::cfg::CloudCfg;
use super::table::AngleSpan;
use super::PolarRepr;
use crate::error::{PolarError, Result};
use crate::geom::circular_diff;
use crate::triple::Triple;

#[derive(Clone, Debug, Serialize)]
pub struct PointCloud {
    points: Vec<Triple>,
    /// `Full` once any angle exceeds 180° or after `symmetrized`.
    span: AngleSpan,
    cfg: CloudCfg,
}

impl PointCloud {
    pub fn new(points: Vec<Triple>, cfg: CloudCfg) -> Result<Self> {
        if points.is_empty() {
            return Err(PolarError::format("point cloud needs at least one triple"));
        }
        if cfg.k == 0 {
            return Err(PolarError::value("cloud k must be >= 1"));
        }
        if !cfg.power.is_finite() || cfg.power < 0.0 {
            return Err(PolarError::value(format!(
                "cloud power must be finite and >= 0, got {}",
                cfg.power
            )));
        }
        if !cfg.ws_scale.is_finite() || cfg.ws_scale <= 0.0 {
            return Err(PolarError::value(format!(
                "cloud ws_scale must be finite and > 0, got {}",
                cfg.ws_scale
            )));
        }
        if !cfg.slice_tol.is_finite() || cfg.slice_tol < 0.0 {
            return Err(PolarError::value(format!(
                "cloud slice_tol must be finite and >= 0, got {}",
                cfg.slice_tol
            )));
        }
        let span = if points.iter().any(|t| t.wa() > 180.0) {
            AngleSpan::Full
        } else {
            AngleSpan::Half
        };
        tracing::debug!(points = points.len(), k = cfg.k, ?span, "point cloud built");
        Ok(Self { points, span, cfg })
    }

    pub fn points(&self) -> &[Triple] {
        &self.points
    }

    pub fn cfg(&self) -> CloudCfg {
        self.cfg
    }

    pub fn span(&self) -> AngleSpan {
        self.span
    }

    #[inline]
    fn distance(&self, t: &Triple, ws: f64, wa: f64) -> f64 {
        ((t.ws() - ws) * self.cfg.ws_scale).hypot(circular_diff(t.wa(), wa))
    }
}

impl PolarRepr for PointCloud {
    fn speeds(&self) -> Vec<f64> {
        let mut speeds: Vec<f64> = self.points.iter().map(Triple::ws).collect();
        speeds.sort_by(f64::total_cmp);
        speeds.dedup();
        speeds
    }

    /// A cloud has no fixed angle set.
    fn angles(&self) -> Option<Vec<f64>> {
        None
    }

    fn boat_speed_at(&self, ws: f64, wa: f64) -> Result<f64> {
        let mut near: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|t| (self.distance(t, ws, wa), t.bs()))
            .collect();

        let exact: Vec<f64> = near.iter().filter(|(d, _)| *d == 0.0).map(|(_, bs)| *bs).collect();
        if !exact.is_empty() {
            return Ok(exact.iter().sum::<f64>() / exact.len() as f64);
        }

        near.sort_by(|a, b| a.0.total_cmp(&b.0));
        let cut = near[self.cfg.k.min(near.len()) - 1].0;
        near.retain(|(d, _)| *d <= cut);
        let (num, den) = near.iter().fold((0.0, 0.0), |(num, den), (d, bs)| {
            let w = d.powf(-self.cfg.power);
            (num + w * bs, den + w)
        });
        if !(den.is_finite() && den > 0.0) {
            return Err(PolarError::query(format!(
                "no usable neighbours for ws={ws}, wa={wa}"
            )));
        }
        Ok(num / den)
    }

    fn to_triples(&self) -> Vec<Triple> {
        self.points.clone()
    }

    /// Observations within `slice_tol` of `ws`, sorted by angle.
    fn slice(&self, ws: f64) -> Result<Vec<(f64, f64)>> {
        let mut out: Vec<(f64, f64)> = self
            .points
            .iter()
            .filter(|t| (t.ws() - ws).abs() <= self.cfg.slice_tol)
            .map(|t| (t.wa(), t.bs()))
            .collect();
        out.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        Ok(out)
    }

    fn max_angle(&self) -> f64 {
        self.points.iter().map(Triple::wa).fold(0.0, f64::max)
    }

    fn symmetrized(&self) -> Result<Self> {
        if self.span == AngleSpan::Full {
            return Err(PolarError::domain(format!(
                "point cloud already spans the full circle (max angle {})",
                self.max_angle()
            )));
        }
        let mut points = self.points.clone();
        points.extend(
            self.points
                .iter()
                .filter(|t| t.wa() > 0.0 && t.wa() < 180.0)
                .map(Triple::mirrored),
        );
        let mut cloud = Self::new(points, self.cfg)?;
        cloud.span = AngleSpan::Full;
        Ok(cloud)
    }
}
