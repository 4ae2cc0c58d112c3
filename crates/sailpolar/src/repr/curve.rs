//! Parametric polar curves: one fit per wind speed, all of one family.
//!
//! Wind speed inside the fitted range interpolates the parameter vectors of
//! the two bracketing fits; outside it the nearest fit is used. The angle is
//! then evaluated in the family's functional form.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::cfg::CurveCfg;
use super::PolarRepr;
use crate::error::{PolarError, Result};
use crate::geom::{bracket, lerp, sample_angles, Bracket, MIN_SAMPLE_STEP};
use crate::triple::Triple;

/// Functional family `θ ↦ boat speed` (θ in degrees).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Family {
    /// `Σ p_k cos(k θ)`, k = 0..terms.
    CosineSeries { terms: usize },
    /// `Σ p_k (θ/180)^k`, k = 0..=degree.
    Polynomial { degree: usize },
    /// `p0 - p1 (θ - p2)²`.
    Parabola,
    /// `p0 exp(-(θ - p1)² / (2 p2))`.
    Gaussian,
    /// `p2 / (1 + e^(p0 - p1 θ)) - p3 θ²`.
    SShaped,
}

impl Family {
    pub fn param_count(&self) -> usize {
        match *self {
            Family::CosineSeries { terms } => terms,
            Family::Polynomial { degree } => degree + 1,
            Family::Parabola | Family::Gaussian => 3,
            Family::SShaped => 4,
        }
    }

    /// Linear in its parameters (fit by least squares).
    pub fn is_linear(&self) -> bool {
        matches!(self, Family::CosineSeries { .. } | Family::Polynomial { .. })
    }

    fn basis(&self, wa: f64) -> Vec<f64> {
        match *self {
            Family::CosineSeries { terms } => {
                let th = wa.to_radians();
                (0..terms).map(|k| (k as f64 * th).cos()).collect()
            }
            Family::Polynomial { degree } => {
                let x = wa / 180.0;
                (0..=degree).map(|k| x.powi(k as i32)).collect()
            }
            Family::Parabola | Family::Gaussian | Family::SShaped => Vec::new(),
        }
    }

    /// `params` must hold `param_count()` values.
    pub(crate) fn eval(&self, params: &[f64], wa: f64) -> f64 {
        match *self {
            Family::CosineSeries { .. } | Family::Polynomial { .. } => self
                .basis(wa)
                .iter()
                .zip(params)
                .map(|(b, p)| b * p)
                .sum(),
            Family::Parabola => params[0] - params[1] * (wa - params[2]).powi(2),
            Family::Gaussian => params[0] * (-(wa - params[1]).powi(2) / (2.0 * params[2])).exp(),
            Family::SShaped => {
                params[2] / (1.0 + (params[0] - params[1] * wa).exp()) - params[3] * wa * wa
            }
        }
    }
}

/// Parameters of one wind speed's curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveFit {
    pub ws: f64,
    pub params: Vec<f64>,
}

/// Angular domain on which the fits are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveDomain {
    /// [0, 180].
    Half,
    /// [0, 360).
    Full,
    /// Half fit, extended to the circle: θ > 180 evaluates at 360 − θ.
    Mirrored,
}

#[derive(Clone, Debug, Serialize)]
pub struct Curve {
    family: Family,
    /// Sorted by strictly increasing `ws`.
    fits: Vec<CurveFit>,
    domain: CurveDomain,
    cfg: CurveCfg,
}

impl Curve {
    pub fn new(family: Family, mut fits: Vec<CurveFit>, domain: CurveDomain, cfg: CurveCfg) -> Result<Self> {
        if family.param_count() == 0 {
            return Err(PolarError::format("curve family needs at least one parameter"));
        }
        if fits.is_empty() {
            return Err(PolarError::format("curve needs at least one fit"));
        }
        if !cfg.resolution.is_finite() || cfg.resolution < MIN_SAMPLE_STEP {
            return Err(PolarError::value(format!(
                "curve resolution must be finite and >= {MIN_SAMPLE_STEP}°, got {}",
                cfg.resolution
            )));
        }
        for fit in &fits {
            if !fit.ws.is_finite() || fit.ws <= 0.0 {
                return Err(PolarError::value(format!(
                    "wind speed must be finite and > 0, got {}",
                    fit.ws
                )));
            }
            if fit.params.len() != family.param_count() {
                return Err(PolarError::format(format!(
                    "fit at ws={} has {} parameters, family {:?} takes {}",
                    fit.ws,
                    fit.params.len(),
                    family,
                    family.param_count()
                )));
            }
            if fit.params.iter().any(|p| !p.is_finite()) {
                return Err(PolarError::value(format!(
                    "fit at ws={} has non-finite parameters",
                    fit.ws
                )));
            }
        }
        fits.sort_by(|a, b| a.ws.total_cmp(&b.ws));
        if let Some(w) = fits.windows(2).find(|w| w[0].ws == w[1].ws) {
            return Err(PolarError::format(format!("duplicate fit at ws={}", w[0].ws)));
        }
        Ok(Self {
            family,
            fits,
            domain,
            cfg,
        })
    }

    /// Least-squares fit of a linear family, one fit per distinct wind speed.
    ///
    /// The domain is `Half` when every angle lies in [0, 180], `Full` otherwise.
    pub fn fit(triples: &[Triple], family: Family, cfg: CurveCfg) -> Result<Self> {
        if !family.is_linear() {
            return Err(PolarError::domain(format!(
                "family {family:?} is not linear in its parameters; supply parameters instead"
            )));
        }
        let n = family.param_count();
        if n == 0 {
            return Err(PolarError::format("curve family needs at least one parameter"));
        }
        let mut speeds: Vec<f64> = triples.iter().map(Triple::ws).collect();
        speeds.sort_by(f64::total_cmp);
        speeds.dedup();
        let mut fits = Vec::with_capacity(speeds.len());
        for ws in speeds {
            let group: Vec<&Triple> = triples.iter().filter(|t| t.ws() == ws).collect();
            if group.len() < n {
                return Err(PolarError::domain(format!(
                    "ws={ws}: {} observations cannot determine {n} parameters",
                    group.len()
                )));
            }
            let rows: Vec<Vec<f64>> = group.iter().map(|t| family.basis(t.wa())).collect();
            let a = DMatrix::from_fn(group.len(), n, |i, j| rows[i][j]);
            let b = DVector::from_iterator(group.len(), group.iter().map(|t| t.bs()));
            let params = a
                .svd(true, true)
                .solve(&b, 1e-12)
                .map_err(|e| PolarError::domain(format!("ws={ws}: least squares failed: {e}")))?;
            fits.push(CurveFit {
                ws,
                params: params.iter().copied().collect(),
            });
        }
        let domain = if triples.iter().any(|t| t.wa() > 180.0) {
            CurveDomain::Full
        } else {
            CurveDomain::Half
        };
        tracing::debug!(fits = fits.len(), ?family, ?domain, "curve fitted");
        Self::new(family, fits, domain, cfg)
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn fits(&self) -> &[CurveFit] {
        &self.fits
    }

    pub fn domain(&self) -> CurveDomain {
        self.domain
    }

    pub fn cfg(&self) -> CurveCfg {
        self.cfg
    }

    /// Parameter vector at `ws`: nearest fit outside the range, linear blend inside.
    fn params_at(&self, ws: f64) -> Vec<f64> {
        let speeds: Vec<f64> = self.fits.iter().map(|f| f.ws).collect();
        match bracket(&speeds, ws) {
            Bracket::Below => self.fits[0].params.clone(),
            Bracket::Above => self.fits[self.fits.len() - 1].params.clone(),
            Bracket::Inside { lo, t } if t == 0.0 || self.fits.len() == 1 => {
                self.fits[lo].params.clone()
            }
            Bracket::Inside { lo, t } => self.fits[lo]
                .params
                .iter()
                .zip(&self.fits[lo + 1].params)
                .map(|(a, b)| lerp(*a, *b, t))
                .collect(),
        }
    }

    /// Map a query angle into the fitted domain.
    fn domain_angle(&self, wa: f64) -> Result<f64> {
        match self.domain {
            CurveDomain::Full => Ok(wa),
            CurveDomain::Half if wa > 180.0 => Err(PolarError::query(format!(
                "wind angle {wa} outside curve domain [0, 180]"
            ))),
            CurveDomain::Half => Ok(wa),
            CurveDomain::Mirrored if wa > 180.0 => Ok(360.0 - wa),
            CurveDomain::Mirrored => Ok(wa),
        }
    }

    fn sample_grid(&self) -> Vec<f64> {
        sample_angles(self.cfg.resolution, self.domain != CurveDomain::Half)
    }
}

impl PolarRepr for Curve {
    fn speeds(&self) -> Vec<f64> {
        self.fits.iter().map(|f| f.ws).collect()
    }

    /// Sample angles at the configured resolution.
    fn angles(&self) -> Option<Vec<f64>> {
        Some(self.sample_grid())
    }

    fn boat_speed_at(&self, ws: f64, wa: f64) -> Result<f64> {
        let th = self.domain_angle(wa)?;
        let v = self.family.eval(&self.params_at(ws), th);
        if !v.is_finite() {
            return Err(PolarError::query(format!(
                "curve evaluates to {v} at ws={ws}, wa={wa}"
            )));
        }
        Ok(v.max(0.0))
    }

    /// Samples every fit at the configured resolution (lossy).
    fn to_triples(&self) -> Vec<Triple> {
        let angles = self.sample_grid();
        let mut out = Vec::with_capacity(self.fits.len() * angles.len());
        for fit in &self.fits {
            for &wa in &angles {
                match self.boat_speed_at(fit.ws, wa) {
                    Ok(bs) => out.push(Triple::from_parts(fit.ws, wa, bs)),
                    Err(e) => tracing::warn!(ws = fit.ws, wa, error = %e, "skipping sample"),
                }
            }
        }
        out
    }

    fn slice(&self, ws: f64) -> Result<Vec<(f64, f64)>> {
        self.sample_grid()
            .into_iter()
            .map(|wa| Ok((wa, self.boat_speed_at(ws, wa)?)))
            .collect()
    }

    fn max_angle(&self) -> f64 {
        match self.domain {
            CurveDomain::Half => 180.0,
            CurveDomain::Full | CurveDomain::Mirrored => 360.0,
        }
    }

    fn symmetrized(&self) -> Result<Self> {
        if self.domain != CurveDomain::Half {
            return Err(PolarError::domain(format!(
                "curve domain is already {:?}",
                self.domain
            )));
        }
        Ok(Self {
            domain: CurveDomain::Mirrored,
            ..self.clone()
        })
    }
}
