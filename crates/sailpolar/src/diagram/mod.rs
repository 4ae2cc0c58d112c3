//! Diagram engine: one representation behind a uniform query contract.
//!
//! Purpose
//! - Own exactly one `Repr` and dispatch every operation with an exhaustive
//!   `match` (or through `PolarRepr` where the variants agree).
//! - Validate query inputs once (angle wrapped into [0, 360), wind speed
//!   finite and positive) so the variants can assume clean arguments.
//! - Provide the derived views a renderer needs: slices, grids, hulls.
//!
//! Values are immutable; `symmetrize` and the conversions return new diagrams.

mod slices;

use serde::{Deserialize, Serialize};

use crate::error::{PolarError, Result};
use crate::geom::{convex_hull, member_hull, normalize_deg, MemberHull};
use crate::repr::{
    CloudCfg, Curve, CurveCfg, Family, PointCloud, PolarRepr, Table, TableCfg,
};
use crate::triple::Triple;

pub use slices::Slice;

/// Configuration for every representation a diagram may hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramCfg {
    pub table: TableCfg,
    pub curve: CurveCfg,
    pub cloud: CloudCfg,
}

/// Which representation to build from triples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Table,
    /// Least-squares fit of the given (linear) family.
    Curve(Family),
    Cloud,
}

/// The representation a diagram holds.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "repr", rename_all = "lowercase")]
pub enum Repr {
    Table(Table),
    Curve(Curve),
    Cloud(PointCloud),
}

impl Repr {
    fn as_polar(&self) -> &dyn PolarRepr {
        match self {
            Repr::Table(t) => t,
            Repr::Curve(c) => c,
            Repr::Cloud(p) => p,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Repr::Table(_) => "table",
            Repr::Curve(_) => "curve",
            Repr::Cloud(_) => "cloud",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Diagram {
    repr: Repr,
}

impl From<Table> for Diagram {
    fn from(t: Table) -> Self {
        Self::new(Repr::Table(t))
    }
}

impl From<Curve> for Diagram {
    fn from(c: Curve) -> Self {
        Self::new(Repr::Curve(c))
    }
}

impl From<PointCloud> for Diagram {
    fn from(p: PointCloud) -> Self {
        Self::new(Repr::Cloud(p))
    }
}

/// Reject wind speeds a diagram cannot be asked about.
fn check_ws(ws: f64) -> Result<()> {
    if !ws.is_finite() || ws <= 0.0 {
        return Err(PolarError::query(format!(
            "wind speed must be finite and > 0, got {ws}"
        )));
    }
    Ok(())
}

impl Diagram {
    pub fn new(repr: Repr) -> Self {
        Self { repr }
    }

    /// Build the requested representation from normalized triples.
    pub fn from_triples(kind: Kind, triples: &[Triple], cfg: &DiagramCfg) -> Result<Self> {
        let repr = match kind {
            Kind::Table => Repr::Table(Table::from_triples(triples, cfg.table)?),
            Kind::Curve(family) => Repr::Curve(Curve::fit(triples, family, cfg.curve)?),
            Kind::Cloud => Repr::Cloud(PointCloud::new(triples.to_vec(), cfg.cloud)?),
        };
        tracing::debug!(repr = repr.name(), triples = triples.len(), "diagram built");
        Ok(Self { repr })
    }

    pub fn repr(&self) -> &Repr {
        &self.repr
    }

    pub fn into_repr(self) -> Repr {
        self.repr
    }

    pub fn speeds(&self) -> Vec<f64> {
        self.repr.as_polar().speeds()
    }

    pub fn angles(&self) -> Option<Vec<f64>> {
        self.repr.as_polar().angles()
    }

    pub fn max_angle(&self) -> f64 {
        self.repr.as_polar().max_angle()
    }

    /// Boat speed at `(ws, wa)`. The angle is wrapped into [0, 360) first.
    pub fn query(&self, ws: f64, wa: f64) -> Result<f64> {
        check_ws(ws)?;
        if !wa.is_finite() {
            return Err(PolarError::query(format!(
                "wind angle must be finite, got {wa}"
            )));
        }
        self.repr.as_polar().boat_speed_at(ws, normalize_deg(wa))
    }

    /// Mirror half-range data onto the full circle.
    ///
    /// Fails with `PolarError::Domain` when any stored angle exceeds 180°.
    pub fn symmetrize(&self) -> Result<Diagram> {
        let repr = match &self.repr {
            Repr::Table(t) => Repr::Table(t.symmetrized()?),
            Repr::Curve(c) => Repr::Curve(c.symmetrized()?),
            Repr::Cloud(p) => Repr::Cloud(p.symmetrized()?),
        };
        tracing::debug!(repr = repr.name(), max_angle = self.max_angle(), "symmetrized");
        Ok(Diagram { repr })
    }

    /// `(angle, boat speed)` pairs for one wind speed, by increasing angle.
    pub fn slice(&self, ws: f64) -> Result<Vec<(f64, f64)>> {
        check_ws(ws)?;
        self.repr.as_polar().slice(ws)
    }

    /// Convex hull of `slice(ws)`, by increasing angle.
    pub fn hull_slice(&self, ws: f64) -> Result<Vec<(f64, f64)>> {
        Ok(convex_hull(&self.slice(ws)?))
    }

    /// Hull over the same wind speed of several diagrams (e.g. one per sail).
    ///
    /// Vertices carry the index of the member they came from; edges joining
    /// two members are untagged.
    pub fn combined_hull(members: &[&Diagram], ws: f64) -> Result<MemberHull> {
        let slices = members
            .iter()
            .map(|d| d.slice(ws))
            .collect::<Result<Vec<_>>>()?;
        let hull = member_hull(&slices);
        tracing::debug!(
            members = members.len(),
            vertices = hull.vertices.len(),
            ws,
            "combined hull"
        );
        Ok(hull)
    }

    /// Evaluate every `(ws, wa)` combination of the two axes, wind-speed-major.
    pub fn points(&self, speeds: &[f64], angles: &[f64]) -> Result<Vec<Triple>> {
        let pairs: Vec<(f64, f64)> = speeds
            .iter()
            .flat_map(|&ws| angles.iter().map(move |&wa| (ws, wa)))
            .collect();
        self.points_at(&pairs)
    }

    /// Evaluate explicit `(ws, wa)` records.
    pub fn points_at(&self, pairs: &[(f64, f64)]) -> Result<Vec<Triple>> {
        pairs
            .iter()
            .map(|&(ws, wa)| Triple::new(ws, wa, self.query(ws, wa)?))
            .collect()
    }

    /// Normalized triples; the round-trip contract for export.
    pub fn to_triples(&self) -> Vec<Triple> {
        self.repr.as_polar().to_triples()
    }

    /// Re-grid onto the given axes (lossy for anything but the same table).
    pub fn to_table(&self, speeds: &[f64], angles: &[f64], cfg: TableCfg) -> Result<Diagram> {
        let triples = self.points(speeds, angles)?;
        let table = Table::from_triples(&triples, cfg)?;
        tracing::debug!(from = self.repr.name(), cells = triples.len(), "converted to table");
        Ok(table.into())
    }

    /// Point cloud over `to_triples()`; lossless for tables and clouds.
    pub fn to_cloud(&self, cfg: CloudCfg) -> Result<Diagram> {
        let cloud = PointCloud::new(self.to_triples(), cfg)?;
        tracing::debug!(from = self.repr.name(), points = cloud.points().len(), "converted to cloud");
        Ok(cloud.into())
    }
}
