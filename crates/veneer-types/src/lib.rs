//! Foundation types for Veneer.
//!
//! This crate contains the value types shared by all Veneer crates: colors,
//! rectangles, the box style descriptors consumed by the scene-graph
//! composer, color schemes, and the error type.

pub mod color;
pub mod error;
pub mod geometry;
pub mod scheme;
pub mod style;

pub use color::Color;
pub use error::{Result, VeneerError};
pub use geometry::Rect;
pub use scheme::{ColorScheme, ColorSchemeSource};
pub use style::{
    BorderColors, BorderMetrics, BoxShape, BoxStyle, Gradient, GradientKind, GradientStop,
    ShadowMetrics,
};
