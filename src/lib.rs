//! # Gridgraph
//!
//! A 2D implicit-equation graphing engine: parse relations in `x` and
//! `y`, solve them into explicit branches, sample and trace curves to
//! screen space, and plan "nice number" axis markers.
//!
//! The crate is a pure engine. It produces segment lists and marker
//! positions in pixel and graph coordinates; drawing them is the
//! caller's concern, so any window toolkit (or none) can sit on top.
//!
//! ## Quick Start
//!
//! ```
//! use gridgraph::prelude::*;
//!
//! let mut engine = GraphEngine::new();
//! engine.submit_equation("x^2 + y^2 = 4")?;
//! engine.zoom(ZoomDirection::In);
//!
//! let frame = engine.render_frame()?;
//! for curve in &frame.curves {
//!     for segment in &curve.segments {
//!         // draw the polyline
//!         let _ = segment;
//!     }
//! }
//! # Ok::<(), gridgraph::Error>(())
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in numeric/plotting code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Expression AST, tokenizer, and parser.
pub mod expr;

/// Real-valued expression evaluation.
pub mod eval;

/// Relations and the branch solver.
pub mod relation;

// ============================================================================
// Planning Modules
// ============================================================================

/// Camera, grid configuration, and the screen↔Cartesian mapper.
pub mod camera;

/// Harmonic-decay sample planning.
pub mod sample;

/// 1-2-5 axis marker planning.
pub mod markers;

// ============================================================================
// Engine Modules
// ============================================================================

/// The tracked equation set.
pub mod registry;

/// Curve tracing to screen-space segments.
pub mod trace;

/// The top-level engine facade.
pub mod engine;

/// Serializable graph records.
pub mod record;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for graphing operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```
/// use gridgraph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, GridConfig, GridMapper, ZoomDirection};
    pub use crate::engine::{Frame, GraphEngine};
    pub use crate::error::{Error, Result};
    pub use crate::eval::EvalResult;
    pub use crate::expr::Expr;
    pub use crate::markers::MarkerSet;
    pub use crate::record::GraphRecord;
    pub use crate::registry::{Equation, EquationId, EquationSet};
    pub use crate::relation::{Branch, Relation};
    pub use crate::trace::{CurveTrace, Point};
}
