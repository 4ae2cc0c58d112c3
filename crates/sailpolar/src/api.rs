//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   benches. Breaking changes are allowed and expected.
//! - Prefer these re-exports for clarity and consistency across callers.

// Ingestion
pub use crate::normalize::{
    normalize_path, normalize_reader, normalize_str, read_records, ArrayFormat, Delimiter, Format,
    NormalizeCfg, TableFormat, TriplesFormat,
};
// Representations
pub use crate::repr::{
    AngleSpan, CloudCfg, Curve, CurveCfg, CurveDomain, CurveFit, Extrapolation, Family, PointCloud,
    PolarRepr, Table, TableCfg,
};
// Engine
pub use crate::diagram::{Diagram, DiagramCfg, Kind, Repr, Slice};
// Geometry
pub use crate::geom::{
    circular_diff, convex_hull, hull_ccw, member_hull, normalize_deg, polar_to_cartesian,
    HullEdge, HullVertex, MemberHull,
};
// Export
pub use crate::export::{write_array, write_diagram, write_path, write_triples, ExportCfg};
