//! Sailing polar diagrams: ingestion, representations, queries and hulls.
//!
//! Pipeline: tabular text → `normalize` → `Triple`s → a `repr` variant held by
//! a `diagram::Diagram` → queries, slices and `geom` hulls → `export`.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - `api` and `prelude` are convenience surfaces; breaking changes are allowed
//!   when they improve the design.

pub mod api;
pub mod diagram;
pub mod error;
pub mod export;
pub mod geom;
pub mod normalize;
pub mod repr;
pub mod triple;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{PolarError, Result};
pub use triple::Triple;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::diagram::{Diagram, DiagramCfg, Kind, Repr, Slice};
    pub use crate::error::{PolarError, Result};
    pub use crate::normalize::{Delimiter, Format, NormalizeCfg};
    pub use crate::repr::{Extrapolation, Family, PolarRepr};
    pub use crate::triple::Triple;
}
