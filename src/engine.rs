//! The graphing engine facade.
//!
//! [`GraphEngine`] owns the equation set, the camera, and the grid
//! configuration, and turns them into render-ready [`Frame`]s. Curve
//! sample density is cached and recomputed only when the number of
//! tracked equations changes, so pan and zoom never pay for the
//! harmonic-decay formula.

use crate::camera::{Camera, GridConfig, GridMapper, ZoomDirection};
use crate::error::Result;
use crate::markers::{plan_markers, MarkerSet};
use crate::registry::{Equation, EquationId, EquationSet};
use crate::sample;
use crate::trace::{trace_equation, CurveTrace};

/// One render-ready snapshot: every visible curve traced to screen
/// space plus the axis markers for the current view.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Visible curves, in equation insertion order.
    pub curves: Vec<CurveTrace>,
    /// Markers along the x axis, in graph units.
    pub x_markers: MarkerSet,
    /// Markers along the y axis, in graph units.
    pub y_markers: MarkerSet,
}

/// Owns all graphing state and drives the sample, trace, and marker
/// planners.
#[derive(Debug)]
pub struct GraphEngine {
    equations: EquationSet,
    camera: Camera,
    config: GridConfig,
    sample_density: usize,
    density_for: usize,
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::with_config(GridConfig::default())
    }
}

impl GraphEngine {
    /// Engine with the default camera and grid configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom grid configuration and the default camera.
    #[must_use]
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            equations: EquationSet::new(),
            camera: Camera::default(),
            config,
            sample_density: config.base_density.max(1),
            density_for: 0,
        }
    }

    /// Parse, solve, and start tracking an equation.
    pub fn submit_equation(&mut self, raw: &str) -> Result<EquationId> {
        let id = self.equations.submit(raw)?;
        self.refresh_density();
        Ok(id)
    }

    /// Stop tracking an equation. Returns whether it was present.
    pub fn delete_equation(&mut self, id: EquationId) -> bool {
        let removed = self.equations.remove(id);
        if removed {
            self.refresh_density();
        }
        removed
    }

    /// Flip an equation's visibility, returning the new state.
    ///
    /// Hidden equations stay tracked and keep counting toward the
    /// shared sample density.
    pub fn toggle_visibility(&mut self, id: EquationId) -> Option<bool> {
        self.equations.toggle_visibility(id)
    }

    /// Look up a tracked equation.
    #[must_use]
    pub fn equation(&self, id: EquationId) -> Option<&Equation> {
        self.equations.get(id)
    }

    /// Iterate tracked equations in insertion order.
    pub fn equations(&self) -> impl Iterator<Item = &Equation> {
        self.equations.iter()
    }

    /// The current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The grid configuration.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Per-curve sample count for the current equation count.
    #[must_use]
    pub fn sample_density(&self) -> usize {
        self.sample_density
    }

    /// Drag the view by a pixel delta, as from a pointer drag.
    pub fn pan_pixels(&mut self, dx_px: f64, dy_px: f64) {
        self.camera.pan_pixels(dx_px, dy_px, &self.config);
    }

    /// Zoom the view about its center.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        self.camera.zoom(direction);
    }

    /// Trace every visible equation and plan both marker axes for the
    /// current view.
    pub fn render_frame(&self) -> Result<Frame> {
        let mapper = GridMapper::new(&self.camera, &self.config);
        let samples = sample::plan_x(&self.camera, self.sample_density);
        let curves = self
            .equations
            .iter()
            .filter(|equation| equation.is_visible())
            .map(|equation| trace_equation(equation, &samples, &mapper))
            .collect();
        let (x_min, x_max) = self.camera.x_range();
        let (y_min, y_max) = self.camera.y_range();
        Ok(Frame {
            curves,
            x_markers: plan_markers(x_min, x_max, self.config.x_marker_target)?,
            y_markers: plan_markers(y_min, y_max, self.config.y_marker_target)?,
        })
    }

    fn refresh_density(&mut self) {
        let count = self.equations.len();
        if count == self.density_for {
            return;
        }
        self.density_for = count;
        if count > 0 {
            // density() only errors for a zero count, which the guard
            // above rules out; the fallback keeps the last good value.
            self.sample_density = sample::density(count, self.config.base_density)
                .unwrap_or(self.sample_density);
        }
    }
}
