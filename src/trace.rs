//! Curve tracing: branch evaluation over a sample plan, projected to
//! screen space.
//!
//! A trace is a list of polyline segments rather than one polyline.
//! Whenever a branch is undefined or non-real at a sample, the pen
//! lifts: the current segment ends and the next real value starts a
//! fresh one. Single-point segments are kept; they render as dots at
//! isolated solutions.

use crate::camera::{GridMapper, MAX_PIXEL_Y};
use crate::registry::{Equation, EquationId};

/// A point in screen space, in pixels. Positive `y` is downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl Point {
    /// Construct a screen point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The drawable form of one equation: every branch traced over the
/// same sample plan.
#[derive(Debug, Clone)]
pub struct CurveTrace {
    /// Registry handle of the traced equation.
    pub id: EquationId,
    /// Display label (the user's equation text).
    pub label: String,
    /// Pen strokes in screen space; each inner vec is one unbroken run.
    pub segments: Vec<Vec<Point>>,
}

impl CurveTrace {
    /// Total number of plotted points across all segments.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// Whether the trace draws anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Trace every branch of `equation` at the planned sample positions.
///
/// Samples must be in ascending `x` order; segments inherit it. Screen
/// `y` values are clamped to `±`[`MAX_PIXEL_Y`] so near-asymptote
/// points cannot produce degenerate coordinates downstream.
#[must_use]
pub fn trace_equation(equation: &Equation, samples: &[f64], mapper: &GridMapper) -> CurveTrace {
    let mut segments = Vec::new();
    for branch in equation.branches() {
        let mut current: Vec<Point> = Vec::new();
        for &x in samples {
            match branch.eval(x).value() {
                Some(y) => {
                    let (px, py) = mapper.to_screen(x, y);
                    current.push(Point::new(px, py.clamp(-MAX_PIXEL_Y, MAX_PIXEL_Y)));
                }
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
    }
    CurveTrace {
        id: equation.id(),
        label: equation.source().to_owned(),
        segments,
    }
}
