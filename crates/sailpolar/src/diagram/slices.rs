//! Multi-slice views: several wind speeds at once, optionally refined.

use serde::Serialize;

use super::Diagram;
use crate::error::{PolarError, Result};
use crate::geom::linspace;

/// One wind speed's `(angle, boat speed)` pairs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slice {
    pub ws: f64,
    pub points: Vec<(f64, f64)>,
}

/// Requested speeds plus `n` evenly spaced speeds between each consecutive pair.
fn refine(ws_list: &[f64], n_steps: Option<usize>) -> Result<Vec<f64>> {
    let n = match n_steps {
        None => return Ok(ws_list.to_vec()),
        Some(0) => return Err(PolarError::value("n_steps must be >= 1")),
        Some(n) => n,
    };
    let mut out = Vec::with_capacity(ws_list.len() + n * ws_list.len().saturating_sub(1));
    for pair in ws_list.windows(2) {
        let seg = linspace(pair[0], pair[1], n + 2);
        out.extend_from_slice(&seg[..seg.len() - 1]);
    }
    out.extend(ws_list.last());
    Ok(out)
}

impl Diagram {
    /// Slices at each wind speed of `ws_list`, in the given order.
    ///
    /// `n_steps = Some(n)` inserts `n` intermediate speeds between every
    /// consecutive pair; `Some(0)` is a `PolarError::Value`.
    pub fn slices(&self, ws_list: &[f64], n_steps: Option<usize>) -> Result<Vec<Slice>> {
        refine(ws_list, n_steps)?
            .into_iter()
            .map(|ws| {
                Ok(Slice {
                    ws,
                    points: self.slice(ws)?,
                })
            })
            .collect()
    }

    /// One slice per wind speed the representation stores.
    pub fn default_slices(&self) -> Result<Vec<Slice>> {
        self.slices(&self.speeds(), None)
    }
}
