/// Position of a value relative to a strictly increasing grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bracket {
    Below,
    /// `x = grid[lo] * (1 - t) + grid[lo + 1] * t` with `t ∈ [0, 1]`.
    /// For a single-point grid, `lo = 0` and `t = 0`.
    Inside { lo: usize, t: f64 },
    Above,
}

/// Locate `x` on a strictly increasing grid.
pub fn bracket(grid: &[f64], x: f64) -> Bracket {
    let n = grid.len();
    if n == 0 || x < grid[0] {
        return Bracket::Below;
    }
    if x > grid[n - 1] {
        return Bracket::Above;
    }
    if n == 1 {
        return Bracket::Inside { lo: 0, t: 0.0 };
    }
    let lo = grid.partition_point(|v| *v <= x).saturating_sub(1).min(n - 2);
    let t = (x - grid[lo]) / (grid[lo + 1] - grid[lo]);
    Bracket::Inside {
        lo,
        t: t.clamp(0.0, 1.0),
    }
}

/// Linear interpolation that reproduces both endpoints exactly at `t = 0` and `t = 1`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// `n` evenly spaced values from `a` to `b` inclusive (`n >= 2`), or `[a]` for `n < 2`.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![a];
    }
    let last = (n - 1) as f64;
    (0..n)
        .map(|k| {
            if k == n - 1 {
                b
            } else {
                lerp(a, b, k as f64 / last)
            }
        })
        .collect()
}
