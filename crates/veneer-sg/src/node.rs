//! Drawable child nodes composed by [`crate::BoxNode`].
//!
//! Nodes here only record what they were asked to draw; turning that into
//! vertices belongs to the renderer. Each recorded change bumps a revision
//! counter so the renderer can skip untouched nodes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use veneer_types::{BorderColors, BorderMetrics, BoxShape, Color, Gradient, Rect};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identity. A reused node keeps its id across updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capabilities of the renderer backing a fill node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillHints {
    /// Per-vertex colored geometry is preferred over a shader-based fill.
    /// Only then can border and filling share one geometry.
    pub prefer_colored_geometry: bool,
}

impl Default for FillHints {
    fn default() -> Self {
        Self {
            prefer_colored_geometry: true,
        }
    }
}

/// What a [`BoxRectangleNode`] currently draws.
#[derive(Debug, Clone, PartialEq)]
pub enum RectangleContent {
    /// Gradient filling of the area inside the border.
    Filling {
        rect: Rect,
        shape: BoxShape,
        border: BorderMetrics,
        gradient: Gradient,
    },
    /// Single-color filling of the whole rect (shadows without blur).
    SolidFilling {
        rect: Rect,
        shape: BoxShape,
        color: Color,
    },
    /// Border only.
    Border {
        rect: Rect,
        shape: BoxShape,
        border: BorderMetrics,
        colors: BorderColors,
    },
    /// Border and filling in one combined geometry.
    Box {
        rect: Rect,
        shape: BoxShape,
        border: BorderMetrics,
        colors: BorderColors,
        gradient: Gradient,
    },
}

impl RectangleContent {
    pub fn kind(&self) -> &'static str {
        match self {
            RectangleContent::Filling { .. } => "filling",
            RectangleContent::SolidFilling { .. } => "solid-filling",
            RectangleContent::Border { .. } => "border",
            RectangleContent::Box { .. } => "box",
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            RectangleContent::Filling { rect, .. }
            | RectangleContent::SolidFilling { rect, .. }
            | RectangleContent::Border { rect, .. }
            | RectangleContent::Box { rect, .. } => *rect,
        }
    }
}

/// A rounded rectangle with optional border and gradient filling.
///
/// Plain fills of this node type batch with other fills in the renderer.
#[derive(Debug)]
pub struct BoxRectangleNode {
    id: NodeId,
    hints: FillHints,
    content: Option<RectangleContent>,
    revision: u64,
}

impl BoxRectangleNode {
    pub fn new() -> Self {
        Self::with_hints(FillHints::default())
    }

    pub fn with_hints(hints: FillHints) -> Self {
        Self {
            id: NodeId::next(),
            hints,
            content: None,
            revision: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn hints(&self) -> FillHints {
        self.hints
    }

    pub fn content(&self) -> Option<&RectangleContent> {
        self.content.as_ref()
    }

    /// Incremented whenever the recorded content changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether border and filling can be drawn as one colored geometry for
    /// this gradient. Holds for monochrome fills and axis-aligned linear
    /// gradients; the stops of anything else cannot be expressed as vertex
    /// colors along the border.
    pub fn is_combined_geometry_supported(gradient: &Gradient) -> bool {
        gradient.is_monochrome() || gradient.kind.is_axis_aligned()
    }

    pub fn update_filling(
        &mut self,
        rect: Rect,
        shape: &BoxShape,
        border: &BorderMetrics,
        gradient: &Gradient,
    ) {
        self.set_content(RectangleContent::Filling {
            rect,
            shape: *shape,
            border: *border,
            gradient: gradient.clone(),
        });
    }

    pub fn update_solid_filling(&mut self, rect: Rect, shape: &BoxShape, color: Color) {
        self.set_content(RectangleContent::SolidFilling {
            rect,
            shape: *shape,
            color,
        });
    }

    pub fn update_border(
        &mut self,
        rect: Rect,
        shape: &BoxShape,
        border: &BorderMetrics,
        colors: &BorderColors,
    ) {
        self.set_content(RectangleContent::Border {
            rect,
            shape: *shape,
            border: *border,
            colors: *colors,
        });
    }

    /// Border and filling together. Whichever half is invisible is left
    /// out, so a box without a visible border is recorded as a plain
    /// filling and one without a visible gradient as a plain border.
    pub fn update_box(
        &mut self,
        rect: Rect,
        shape: &BoxShape,
        border: &BorderMetrics,
        colors: &BorderColors,
        gradient: &Gradient,
    ) {
        let has_border = !border.is_null() && colors.is_visible();
        let has_filling = gradient.is_visible();

        match (has_border, has_filling) {
            (true, true) => self.set_content(RectangleContent::Box {
                rect,
                shape: *shape,
                border: *border,
                colors: *colors,
                gradient: gradient.clone(),
            }),
            (true, false) => self.update_border(rect, shape, border, colors),
            (false, true) => self.update_filling(rect, shape, &BorderMetrics::default(), gradient),
            (false, false) => {
                if self.content.take().is_some() {
                    self.revision += 1;
                }
            },
        }
    }

    fn set_content(&mut self, content: RectangleContent) {
        if self.content.as_ref() != Some(&content) {
            self.content = Some(content);
            self.revision += 1;
        }
    }
}

impl Default for BoxRectangleNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Blurred box shadow. Drawn with its own shader, so it never batches.
#[derive(Debug)]
pub struct BoxShadowNode {
    id: NodeId,
    rect: Rect,
    shape: BoxShape,
    blur_radius: f32,
    color: Color,
    revision: u64,
}

impl BoxShadowNode {
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            rect: Rect::default(),
            shape: BoxShape::default(),
            blur_radius: 0.0,
            color: Color::TRANSPARENT,
            revision: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn shape(&self) -> BoxShape {
        self.shape
    }

    pub fn blur_radius(&self) -> f32 {
        self.blur_radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_shadow_data(
        &mut self,
        rect: Rect,
        shape: &BoxShape,
        blur_radius: f32,
        color: Color,
    ) {
        if self.rect == rect
            && self.shape == *shape
            && self.blur_radius == blur_radius
            && self.color == color
            && self.revision > 0
        {
            return;
        }
        self.rect = rect;
        self.shape = *shape;
        self.blur_radius = blur_radius;
        self.color = color;
        self.revision += 1;
    }
}

impl Default for BoxShadowNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veneer_types::GradientKind;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 40.0)
    }

    #[test]
    fn node_ids_are_unique() {
        let a = BoxRectangleNode::new();
        let b = BoxRectangleNode::new();
        let c = BoxShadowNode::new();
        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
    }

    #[test]
    fn default_hints_prefer_colored_geometry() {
        assert!(BoxRectangleNode::new().hints().prefer_colored_geometry);
    }

    #[test]
    fn combined_geometry_support_by_gradient() {
        let solid = Gradient::solid(Color::WHITE);
        let vertical = Gradient::linear(GradientKind::Vertical, Color::WHITE, Color::BLACK);
        let diagonal = Gradient::linear(GradientKind::Diagonal, Color::WHITE, Color::BLACK);
        let conic = Gradient::linear(GradientKind::Conic, Color::WHITE, Color::BLACK);
        assert!(BoxRectangleNode::is_combined_geometry_supported(&solid));
        assert!(BoxRectangleNode::is_combined_geometry_supported(&vertical));
        assert!(!BoxRectangleNode::is_combined_geometry_supported(&diagonal));
        assert!(!BoxRectangleNode::is_combined_geometry_supported(&conic));
    }

    #[test]
    fn unchanged_content_keeps_revision() {
        let mut node = BoxRectangleNode::new();
        let shape = BoxShape::uniform(3.0);
        node.update_solid_filling(rect(), &shape, Color::BLACK);
        assert_eq!(node.revision(), 1);
        node.update_solid_filling(rect(), &shape, Color::BLACK);
        assert_eq!(node.revision(), 1);
        node.update_solid_filling(rect(), &shape, Color::WHITE);
        assert_eq!(node.revision(), 2);
    }

    #[test]
    fn update_box_drops_invisible_halves() {
        let mut node = BoxRectangleNode::new();
        let shape = BoxShape::default();
        let border = BorderMetrics::uniform(1.0);
        let colors = BorderColors::uniform(Color::BLACK);

        node.update_box(rect(), &shape, &border, &colors, &Gradient::default());
        assert_eq!(node.content().map(RectangleContent::kind), Some("border"));

        node.update_box(
            rect(),
            &shape,
            &border,
            &BorderColors::default(),
            &Gradient::solid(Color::WHITE),
        );
        assert_eq!(node.content().map(RectangleContent::kind), Some("filling"));

        node.update_box(
            rect(),
            &shape,
            &border,
            &colors,
            &Gradient::solid(Color::WHITE),
        );
        assert_eq!(node.content().map(RectangleContent::kind), Some("box"));
        assert_eq!(node.content().map(RectangleContent::rect), Some(rect()));
    }

    #[test]
    fn shadow_data_revision() {
        let mut node = BoxShadowNode::new();
        let shape = BoxShape::default();
        node.set_shadow_data(rect(), &shape, 4.0, Color::BLACK);
        node.set_shadow_data(rect(), &shape, 4.0, Color::BLACK);
        assert_eq!(node.revision(), 1);
        assert_eq!(node.blur_radius(), 4.0);
        node.set_shadow_data(rect(), &shape, 8.0, Color::BLACK);
        assert_eq!(node.revision(), 2);
    }
}
