use nalgebra::Vector2;

/// Wrap an angle in degrees into [0, 360).
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 {
        0.0
    } else {
        a + 0.0
    }
}

/// Unsigned angular distance in degrees, in [0, 180].
#[inline]
pub fn circular_diff(a: f64, b: f64) -> f64 {
    let d = (normalize_deg(a) - normalize_deg(b)).abs();
    d.min(360.0 - d)
}

/// `(angle°, radius)` → Cartesian, angle measured counterclockwise from +x.
#[inline]
pub fn polar_to_cartesian(deg: f64, r: f64) -> Vector2<f64> {
    let th = deg.to_radians();
    Vector2::new(r * th.cos(), r * th.sin())
}

/// Cartesian → `(angle° in [0, 360), radius)`.
#[inline]
pub fn cartesian_to_polar(p: Vector2<f64>) -> (f64, f64) {
    (normalize_deg(p.y.atan2(p.x).to_degrees()), p.norm())
}

/// Smallest sampling step in degrees (36 000 samples on the full circle).
pub const MIN_SAMPLE_STEP: f64 = 0.01;

/// Evenly spaced sample angles with step `resolution`.
///
/// Half range covers [0, 180] including both ends; full range covers [0, 360)
/// without the closing 360. Steps below `MIN_SAMPLE_STEP` are raised to it.
pub fn sample_angles(resolution: f64, full: bool) -> Vec<f64> {
    let end = if full { 360.0 } else { 180.0 };
    let step = if resolution.is_finite() && resolution > 0.0 {
        resolution.clamp(MIN_SAMPLE_STEP, end)
    } else {
        1.0
    };
    let n = (end / step).floor() as usize;
    let mut out: Vec<f64> = (0..=n).map(|k| k as f64 * step).collect();
    if full {
        out.retain(|a| *a < 360.0);
    } else if out.last().map_or(true, |a| *a < 180.0) {
        out.push(180.0);
    }
    out
}
