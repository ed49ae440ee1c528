//! Box style descriptors: shape, border, gradient, and shadow.
//!
//! These are plain values. The scene-graph composer only asks them
//! visibility and null-ness questions; it never constructs or mutates them.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Rect;

/// Corner radii of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxShape {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl BoxShape {
    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// True when every corner is square.
    pub fn is_rectangle(&self) -> bool {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
        .iter()
        .all(|r| *r <= 0.0)
    }
}

/// Border widths per edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderMetrics {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BorderMetrics {
    pub fn uniform(width: f32) -> Self {
        Self {
            left: width,
            top: width,
            right: width,
            bottom: width,
        }
    }

    /// A null border has no width on any edge.
    pub fn is_null(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|w| *w <= 0.0)
    }
}

/// Border colors per edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderColors {
    pub left: Color,
    pub top: Color,
    pub right: Color,
    pub bottom: Color,
}

impl BorderColors {
    pub fn uniform(color: Color) -> Self {
        Self {
            left: color,
            top: color,
            right: color,
            bottom: color,
        }
    }

    /// Visible when at least one edge color is not fully transparent.
    pub fn is_visible(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .any(|c| c.is_visible())
    }
}

/// One color stop of a gradient, `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Linear, top to bottom.
    #[default]
    Vertical,
    /// Linear, left to right.
    Horizontal,
    /// Linear, top-left to bottom-right.
    Diagonal,
    Radial,
    Conic,
}

impl GradientKind {
    pub fn is_linear(self) -> bool {
        matches!(
            self,
            GradientKind::Vertical | GradientKind::Horizontal | GradientKind::Diagonal
        )
    }

    /// Linear along one of the box axes.
    pub fn is_axis_aligned(self) -> bool {
        matches!(self, GradientKind::Vertical | GradientKind::Horizontal)
    }
}

/// A fill gradient. An empty stop list is the "no filling" gradient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Single-color filling.
    pub fn solid(color: Color) -> Self {
        Self {
            kind: GradientKind::Vertical,
            stops: vec![GradientStop::new(0.0, color), GradientStop::new(1.0, color)],
        }
    }

    pub fn new(kind: GradientKind, stops: Vec<GradientStop>) -> Self {
        Self { kind, stops }
    }

    /// Two-color linear gradient from `from` to `to`.
    pub fn linear(kind: GradientKind, from: Color, to: Color) -> Self {
        Self {
            kind,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Visible when there is at least one stop that is not fully transparent.
    pub fn is_visible(&self) -> bool {
        self.stops.iter().any(|s| s.color.is_visible())
    }

    /// All stops share one color (an empty gradient counts as monochrome).
    pub fn is_monochrome(&self) -> bool {
        match self.stops.first() {
            Some(first) => self.stops.iter().all(|s| s.color == first.color),
            None => true,
        }
    }
}

/// Shadow placement relative to the box it belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowMetrics {
    pub offset_x: f32,
    pub offset_y: f32,
    pub spread: f32,
    pub blur_radius: f32,
}

impl ShadowMetrics {
    pub fn new(offset_x: f32, offset_y: f32, spread: f32, blur_radius: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            spread,
            blur_radius,
        }
    }

    /// A null shadow has no offset, spread, or blur.
    pub fn is_null(&self) -> bool {
        self.offset_x == 0.0
            && self.offset_y == 0.0
            && self.spread == 0.0
            && self.blur_radius == 0.0
    }

    /// The rectangle covered by the shadow of `rect`: outset by the spread,
    /// then moved by the offset.
    pub fn shadow_rect(&self, rect: Rect) -> Rect {
        rect.outset(self.spread)
            .translated(self.offset_x, self.offset_y)
    }

    pub fn blur_radius(&self) -> f32 {
        self.blur_radius
    }
}

/// Everything needed to compose one box: the full input set of
/// `BoxNode::update_node` minus the target rectangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    pub shape: BoxShape,
    pub border_metrics: BorderMetrics,
    pub border_colors: BorderColors,
    pub gradient: Gradient,
    pub shadow_metrics: ShadowMetrics,
    pub shadow_color: Color,
}
