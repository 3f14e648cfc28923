//! Adaptive sample-density planning.
//!
//! The per-curve sample count decays with the number of active curves
//! via the harmonic-number expansion, so the *total* per-frame
//! evaluation cost grows like `B·ln(n)` instead of `B·n`.

use crate::camera::Camera;
use crate::error::{Error, Result};

/// Euler–Mascheroni constant, as used by the harmonic expansion.
const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Cartesian margin added on each side of the view so curves do not
/// visibly clip at the edges while panning.
const PLAN_MARGIN: f64 = 1.0;

/// Per-curve sample count for `active_count` curves at `base_density`.
///
/// Exactly `base_density` for a single curve (the expansion is
/// unstable at n = 1); otherwise
/// `round(B·(ln n + γ + 1/(2n) − 1/(12n²)) / n)`, floored at one so no
/// curve ever gets zero samples. Recompute this when the active count
/// changes, not per frame.
pub fn density(active_count: usize, base_density: usize) -> Result<usize> {
    if active_count == 0 {
        return Err(Error::SamplePlan { active: active_count });
    }
    if active_count == 1 {
        return Ok(base_density.max(1));
    }
    let n = active_count as f64;
    let harmonic = n.ln() + EULER_GAMMA + 1.0 / (2.0 * n) - 1.0 / (12.0 * n * n);
    let per_curve = (base_density as f64 * harmonic / n).round() as usize;
    Ok(per_curve.max(1))
}

/// `count` evenly spaced x-values across the camera's visible span
/// plus the pan margin: `[cx − w/2 − 1, cx + w/2 + 1]`.
#[must_use]
pub fn plan_x(camera: &Camera, count: usize) -> Vec<f64> {
    let start = camera.center_x - camera.width / 2.0 - PLAN_MARGIN;
    let end = camera.center_x + camera.width / 2.0 + PLAN_MARGIN;
    linspace(start, end, count)
}

/// Evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
