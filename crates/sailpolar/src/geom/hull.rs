//! Polar convex hulls.
//!
//! Points are `(angle°, radius)` pairs. They are mapped to the plane, hulled
//! with Andrew's monotone chain and mapped back by index, so every output
//! pair is one of the input pairs.

use nalgebra::Vector2;
use serde::Serialize;

use super::angle::{normalize_deg, polar_to_cartesian};

const DEDUP_EPS: f64 = 1e-12;

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Indices of finite points, sorted lexicographically by (x, y), duplicates dropped.
fn sorted_distinct(points: &[Vector2<f64>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len())
        .filter(|&i| points[i].x.is_finite() && points[i].y.is_finite())
        .collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (points[a], points[b]);
        match pa.x.partial_cmp(&pb.x).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => pa.y.partial_cmp(&pb.y).unwrap_or(std::cmp::Ordering::Equal),
            o => o,
        }
    });
    order.dedup_by(|a, b| (points[*a] - points[*b]).norm() < DEDUP_EPS);
    order
}

/// Andrew’s monotone chain; returns hull indices in CCW order.
///
/// Collinear points are dropped, so a degenerate (collinear) input yields its
/// two extreme points. Fewer than three distinct points are returned as-is.
pub fn hull_ccw(points: &[Vector2<f64>]) -> Vec<usize> {
    let pts = sorted_distinct(points);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<usize> = Vec::with_capacity(pts.len());
    for &i in &pts {
        while lower.len() >= 2
            && cross(
                points[lower[lower.len() - 2]],
                points[lower[lower.len() - 1]],
                points[i],
            ) <= 0.0
        {
            lower.pop();
        }
        lower.push(i);
    }
    let mut upper: Vec<usize> = Vec::with_capacity(pts.len());
    for &i in pts.iter().rev() {
        while upper.len() >= 2
            && cross(
                points[upper[upper.len() - 2]],
                points[upper[upper.len() - 1]],
                points[i],
            ) <= 0.0
        {
            upper.pop();
        }
        upper.push(i);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

/// Convex hull of one polar slice, ordered by increasing angle.
///
/// - Fewer than 3 distinct points: the input is returned unchanged.
/// - All points collinear: the two extreme points.
pub fn convex_hull(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let cart: Vec<Vector2<f64>> = points
        .iter()
        .map(|&(a, r)| polar_to_cartesian(a, r))
        .collect();
    if sorted_distinct(&cart).len() < 3 {
        return points.to_vec();
    }
    let mut idx = hull_ccw(&cart);
    idx.sort_by(|&i, &j| {
        let (ai, aj) = (normalize_deg(points[i].0), normalize_deg(points[j].0));
        ai.partial_cmp(&aj)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(points[i].1.partial_cmp(&points[j].1).unwrap_or(std::cmp::Ordering::Equal))
    });
    idx.into_iter().map(|i| points[i]).collect()
}

/// Hull vertex tagged with the member (e.g. sail) it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HullVertex {
    pub angle: f64,
    pub radius: f64,
    pub member: usize,
}

/// Hull edge between two vertices (indices into `MemberHull::vertices`).
///
/// `member` is set when both ends belong to the same member and `None` when
/// the edge bridges two members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HullEdge {
    pub from: usize,
    pub to: usize,
    pub member: Option<usize>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct MemberHull {
    /// CCW order.
    pub vertices: Vec<HullVertex>,
    pub edges: Vec<HullEdge>,
}

/// Convex hull across several slices, remembering which slice each vertex came from.
pub fn member_hull(members: &[Vec<(f64, f64)>]) -> MemberHull {
    let tagged: Vec<HullVertex> = members
        .iter()
        .enumerate()
        .flat_map(|(m, pts)| {
            pts.iter().map(move |&(angle, radius)| HullVertex {
                angle,
                radius,
                member: m,
            })
        })
        .collect();
    let cart: Vec<Vector2<f64>> = tagged
        .iter()
        .map(|v| polar_to_cartesian(v.angle, v.radius))
        .collect();
    let vertices: Vec<HullVertex> = hull_ccw(&cart).into_iter().map(|i| tagged[i]).collect();
    let n = vertices.len();
    let edge_count = match n {
        0 | 1 => 0,
        2 => 1,
        _ => n,
    };
    let edges = (0..edge_count)
        .map(|k| {
            let (from, to) = (k, (k + 1) % n);
            let member = if vertices[from].member == vertices[to].member {
                Some(vertices[from].member)
            } else {
                None
            };
            HullEdge { from, to, member }
        })
        .collect();
    MemberHull { vertices, edges }
}
