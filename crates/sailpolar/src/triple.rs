//! Normalized observation `(wind_speed, wind_angle, boat_speed)`.

use serde::{Deserialize, Serialize};

use crate::error::{PolarError, Result};
use crate::geom::normalize_deg;

/// One point of a polar diagram.
///
/// Invariants (enforced by `Triple::new`):
/// - `ws` finite and > 0,
/// - `wa` in [0, 360) degrees,
/// - `bs` finite and >= 0.
///
/// Deserialization goes through the same checks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTriple")]
pub struct Triple {
    ws: f64,
    wa: f64,
    bs: f64,
}

/// Unchecked wire form of a `Triple`.
#[derive(Deserialize)]
struct RawTriple {
    ws: f64,
    wa: f64,
    bs: f64,
}

impl TryFrom<RawTriple> for Triple {
    type Error = PolarError;

    fn try_from(raw: RawTriple) -> Result<Self> {
        Triple::new(raw.ws, raw.wa, raw.bs)
    }
}

impl Triple {
    /// Validate and normalize. The angle is wrapped into [0, 360).
    pub fn new(ws: f64, wa: f64, bs: f64) -> Result<Self> {
        if !ws.is_finite() || ws <= 0.0 {
            return Err(PolarError::value(format!(
                "wind speed must be finite and > 0, got {ws}"
            )));
        }
        if !wa.is_finite() {
            return Err(PolarError::value(format!(
                "wind angle must be finite, got {wa}"
            )));
        }
        if !bs.is_finite() || bs < 0.0 {
            return Err(PolarError::value(format!(
                "boat speed must be finite and >= 0, got {bs}"
            )));
        }
        Ok(Self {
            ws,
            wa: normalize_deg(wa),
            bs,
        })
    }

    /// Build from values that already satisfy the invariants (angle in [0, 360)).
    #[inline]
    pub(crate) fn from_parts(ws: f64, wa: f64, bs: f64) -> Self {
        debug_assert!(ws > 0.0 && (0.0..360.0).contains(&wa) && bs >= 0.0);
        Self { ws, wa, bs }
    }

    #[inline]
    pub fn ws(&self) -> f64 {
        self.ws
    }
    #[inline]
    pub fn wa(&self) -> f64 {
        self.wa
    }
    #[inline]
    pub fn bs(&self) -> f64 {
        self.bs
    }

    /// Same wind speed and boat speed at `360 - wa`.
    pub(crate) fn mirrored(&self) -> Self {
        Self {
            ws: self.ws,
            wa: normalize_deg(360.0 - self.wa),
            bs: self.bs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_is_wrapped() {
        let t = Triple::new(10.0, -90.0, 4.0).unwrap();
        assert_eq!(t.wa(), 270.0);
        let t = Triple::new(10.0, 360.0, 4.0).unwrap();
        assert_eq!(t.wa(), 0.0);
        let t = Triple::new(10.0, 725.0, 4.0).unwrap();
        assert!((t.wa() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_domain_fields_are_value_errors() {
        assert!(matches!(
            Triple::new(0.0, 10.0, 1.0),
            Err(PolarError::Value(_))
        ));
        assert!(matches!(
            Triple::new(-3.0, 10.0, 1.0),
            Err(PolarError::Value(_))
        ));
        assert!(matches!(
            Triple::new(3.0, f64::NAN, 1.0),
            Err(PolarError::Value(_))
        ));
        assert!(matches!(
            Triple::new(3.0, 10.0, -0.5),
            Err(PolarError::Value(_))
        ));
        assert!(matches!(
            Triple::new(3.0, 10.0, f64::INFINITY),
            Err(PolarError::Value(_))
        ));
    }

    #[test]
    fn deserialize_validates_and_wraps() {
        let t: Triple = serde_json::from_str(r#"{"ws":8,"wa":-45,"bs":3.5}"#).unwrap();
        assert_eq!((t.ws(), t.wa(), t.bs()), (8.0, 315.0, 3.5));
        assert!(serde_json::from_str::<Triple>(r#"{"ws":-5,"wa":720,"bs":-3}"#).is_err());
        assert!(serde_json::from_str::<Triple>(r#"{"ws":5,"wa":10,"bs":-3}"#).is_err());

        let back: Triple = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn mirror_keeps_fixed_points() {
        let t = Triple::new(8.0, 0.0, 1.0).unwrap();
        assert_eq!(t.mirrored().wa(), 0.0);
        let t = Triple::new(8.0, 180.0, 1.0).unwrap();
        assert_eq!(t.mirrored().wa(), 180.0);
        let t = Triple::new(8.0, 45.0, 1.0).unwrap();
        assert_eq!(t.mirrored().wa(), 315.0);
    }
}
