//! Camera state and screen/Cartesian coordinate mapping.
//!
//! The camera is the visible Cartesian window: a center point plus a
//! width/height span, panned by mouse drags and zoomed in fixed ±10%
//! steps. [`GridMapper`] snapshots a camera against a [`GridConfig`]
//! and exposes the pure, mutually inverse screen↔Cartesian mapping
//! (screen origin top-left, Cartesian y-up).

use crate::error::{Error, Result};

/// Zoom steps scale the camera span by 10% per notch.
const ZOOM_STEP: f64 = 0.1;

/// Converted y-pixels are clamped to this magnitude before line
/// drawing, so near-vertical asymptotes cannot produce degenerate
/// geometry. Applied once per point, after mapping.
pub const MAX_PIXEL_Y: f64 = 10_000.0;

/// Zoom direction for a single scroll notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Shrink the visible span (magnify).
    In,
    /// Grow the visible span.
    Out,
}

/// The visible Cartesian window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Cartesian x of the view center.
    pub center_x: f64,
    /// Cartesian y of the view center.
    pub center_y: f64,
    /// Visible span along x, in Cartesian units. Always positive.
    pub width: f64,
    /// Visible span along y, in Cartesian units. Always positive.
    pub height: f64,
}

impl Default for Camera {
    /// The startup view: origin-centered, 20×20 units.
    fn default() -> Self {
        Camera { center_x: 0.0, center_y: 0.0, width: 20.0, height: 20.0 }
    }
}

impl Camera {
    /// Create a camera, validating that both spans are positive.
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Camera { center_x, center_y, width, height })
    }

    /// Translate the center by Cartesian deltas.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center_x += dx;
        self.center_y += dy;
    }

    /// Translate the view by a pointer drag, in pixel deltas. The
    /// content follows the pointer: dragging right moves the camera
    /// left; screen y grows downward, Cartesian y upward.
    pub fn pan_pixels(&mut self, dx_px: f64, dy_px: f64, config: &GridConfig) {
        let (sx, sy) = config.pixel_scale(self);
        self.pan(-dx_px * sx, dy_px * sy);
    }

    /// Apply one zoom notch, scaling both spans by ±10%. Spans can
    /// never reach zero.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => 1.0 - ZOOM_STEP,
            ZoomDirection::Out => 1.0 + ZOOM_STEP,
        };
        self.width = (self.width * factor).max(f64::MIN_POSITIVE);
        self.height = (self.height * factor).max(f64::MIN_POSITIVE);
    }

    /// The visible `[min, max]` range along x.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (self.center_x - self.width / 2.0, self.center_x + self.width / 2.0)
    }

    /// The visible `[min, max]` range along y.
    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (self.center_y - self.height / 2.0, self.center_y + self.height / 2.0)
    }
}

/// Static grid geometry and planning targets, passed explicitly to the
/// components that need them (no ambient globals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Width of the plotting area, in pixels.
    pub grid_width_px: u32,
    /// Height of the plotting area, in pixels.
    pub grid_height_px: u32,
    /// Per-curve sample count when exactly one curve is active.
    pub base_density: usize,
    /// Desired marker count along the x axis.
    pub x_marker_target: usize,
    /// Desired marker count along the y axis.
    pub y_marker_target: usize,
}

impl Default for GridConfig {
    /// The original tool's defaults: a 700×600 grid, base sampling
    /// rate 125, ten markers per axis.
    fn default() -> Self {
        GridConfig {
            grid_width_px: 700,
            grid_height_px: 600,
            base_density: 125,
            x_marker_target: 10,
            y_marker_target: 10,
        }
    }
}

impl GridConfig {
    /// Cartesian units per pixel, `(dx, dy)`, for the given camera.
    #[must_use]
    pub fn pixel_scale(&self, camera: &Camera) -> (f64, f64) {
        (
            camera.width / f64::from(self.grid_width_px),
            camera.height / f64::from(self.grid_height_px),
        )
    }
}

/// A pure snapshot of the screen↔Cartesian mapping for one frame.
///
/// `to_screen` and `to_cartesian` are exact algebraic inverses, up to
/// floating-point rounding, for every valid camera.
#[derive(Debug, Clone, Copy)]
pub struct GridMapper {
    dx: f64,
    dy: f64,
    center_x: f64,
    center_y: f64,
    half_width_px: f64,
    half_height_px: f64,
}

impl GridMapper {
    /// Snapshot the mapping for `camera` on a grid of `config`'s size.
    #[must_use]
    pub fn new(camera: &Camera, config: &GridConfig) -> Self {
        let (dx, dy) = config.pixel_scale(camera);
        GridMapper {
            dx,
            dy,
            center_x: camera.center_x,
            center_y: camera.center_y,
            half_width_px: f64::from(config.grid_width_px) / 2.0,
            half_height_px: f64::from(config.grid_height_px) / 2.0,
        }
    }

    /// Map a screen pixel to its Cartesian coordinate.
    #[must_use]
    pub fn to_cartesian(&self, px: f64, py: f64) -> (f64, f64) {
        let gx = self.dx * (px - self.half_width_px) + self.center_x;
        let gy = -self.dy * (py - self.half_height_px) + self.center_y;
        (gx, gy)
    }

    /// Map a Cartesian coordinate to its screen pixel.
    #[must_use]
    pub fn to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
        let px = (gx - self.center_x) / self.dx + self.half_width_px;
        let py = (self.center_y - gy) / self.dy + self.half_height_px;
        (px, py)
    }

    /// Cartesian units per pixel, `(dx, dy)`.
    #[must_use]
    pub fn pixel_scale(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_non_positive_spans() {
        assert!(Camera::new(0.0, 0.0, 0.0, 20.0).is_err());
        assert!(Camera::new(0.0, 0.0, 20.0, -1.0).is_err());
        assert!(Camera::new(0.0, 0.0, f64::NAN, 20.0).is_err());
    }

    #[test]
    fn test_zoom_scales_by_ten_percent() {
        let mut camera = Camera::default();
        camera.zoom(ZoomDirection::In);
        assert_relative_eq!(camera.width, 18.0);
        assert_relative_eq!(camera.height, 18.0);
        camera.zoom(ZoomDirection::Out);
        assert_relative_eq!(camera.width, 19.8);
    }

    #[test]
    fn test_zoom_never_reaches_zero() {
        let mut camera = Camera::default();
        for _ in 0..100_000 {
            camera.zoom(ZoomDirection::In);
        }
        assert!(camera.width > 0.0);
        assert!(camera.height > 0.0);
    }

    #[test]
    fn test_center_maps_to_grid_center() {
        let camera = Camera::default();
        let mapper = GridMapper::new(&camera, &GridConfig::default());
        let (px, py) = mapper.to_screen(0.0, 0.0);
        assert_relative_eq!(px, 350.0);
        assert_relative_eq!(py, 300.0);
    }

    #[test]
    fn test_screen_y_grows_downward() {
        let camera = Camera::default();
        let mapper = GridMapper::new(&camera, &GridConfig::default());
        let (_, py_high) = mapper.to_screen(0.0, 5.0);
        let (_, py_low) = mapper.to_screen(0.0, -5.0);
        assert!(py_high < py_low);
    }

    #[test]
    fn test_round_trip_with_offset_camera() {
        let camera = Camera::new(3.5, -2.25, 7.0, 11.0).unwrap();
        let mapper = GridMapper::new(&camera, &GridConfig::default());
        for &(gx, gy) in &[(0.0, 0.0), (1.5, -4.0), (-100.0, 42.0)] {
            let (px, py) = mapper.to_screen(gx, gy);
            let (back_x, back_y) = mapper.to_cartesian(px, py);
            assert_relative_eq!(back_x, gx, epsilon = 1e-9);
            assert_relative_eq!(back_y, gy, epsilon = 1e-9);
        }
        for &(px, py) in &[(0.0, 0.0), (350.0, 300.0), (699.0, 1.0)] {
            let (gx, gy) = mapper.to_cartesian(px, py);
            let (back_x, back_y) = mapper.to_screen(gx, gy);
            assert_relative_eq!(back_x, px, epsilon = 1e-9);
            assert_relative_eq!(back_y, py, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pan_pixels_moves_against_drag() {
        let mut camera = Camera::default();
        let config = GridConfig::default();
        // 20 units over 700 px: a 70 px drag right is 2 units.
        camera.pan_pixels(70.0, 0.0, &config);
        assert_relative_eq!(camera.center_x, -2.0);
        // A 60 px drag down (20 units / 600 px) raises the center.
        camera.pan_pixels(0.0, 60.0, &config);
        assert_relative_eq!(camera.center_y, 2.0);
    }

    #[test]
    fn test_ranges() {
        let camera = Camera::new(1.0, 2.0, 4.0, 6.0).unwrap();
        assert_eq!(camera.x_range(), (-1.0, 3.0));
        assert_eq!(camera.y_range(), (-1.0, 5.0));
    }
}
