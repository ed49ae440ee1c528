//! Box composer: shadow, border, and filling of one styled rectangle.
//!
//! Each update decides afresh which of up to four children are needed:
//!
//! | role         | node                 | when                                   |
//! |--------------|----------------------|----------------------------------------|
//! | `Shadow`     | [`BoxShadowNode`]    | visible shadow with a blur radius      |
//! | `ShadowFill` | [`BoxRectangleNode`] | visible shadow without blur            |
//! | `Box`        | [`BoxRectangleNode`] | visible border and/or filling          |
//! | `Fill`       | [`BoxRectangleNode`] | border and filling that can't combine  |
//!
//! Unblurred shadows and combinable fills stay plain rectangle nodes so the
//! renderer can batch them; blurred shadows and non-combinable fills get
//! their own node.

use veneer_types::{
    BorderColors, BorderMetrics, BoxShape, BoxStyle, Color, Gradient, Rect, ShadowMetrics,
};

use crate::node::{BoxRectangleNode, BoxShadowNode, FillHints, NodeId};
use crate::registry::{NodeRegistry, NodeRole};

/// Child slots of a [`BoxNode`], in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxRole {
    Shadow,
    ShadowFill,
    Box,
    Fill,
}

impl NodeRole for BoxRole {
    const ORDER: &'static [Self] = &[
        BoxRole::Shadow,
        BoxRole::ShadowFill,
        BoxRole::Box,
        BoxRole::Fill,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A child of a [`BoxNode`].
#[derive(Debug)]
pub enum BoxChild {
    Rectangle(BoxRectangleNode),
    Shadow(BoxShadowNode),
}

impl BoxChild {
    pub fn id(&self) -> NodeId {
        match self {
            BoxChild::Rectangle(node) => node.id(),
            BoxChild::Shadow(node) => node.id(),
        }
    }

    pub fn as_rectangle(&self) -> Option<&BoxRectangleNode> {
        match self {
            BoxChild::Rectangle(node) => Some(node),
            BoxChild::Shadow(_) => None,
        }
    }

    pub fn as_shadow(&self) -> Option<&BoxShadowNode> {
        match self {
            BoxChild::Shadow(node) => Some(node),
            BoxChild::Rectangle(_) => None,
        }
    }
}

/// Parent node composing a styled box from role-tagged children.
#[derive(Debug, Default)]
pub struct BoxNode {
    children: NodeRegistry<BoxRole, BoxChild>,
    hints: FillHints,
}

impl BoxNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a box node whose rectangle children are created with `hints`.
    pub fn with_fill_hints(hints: FillHints) -> Self {
        Self {
            children: NodeRegistry::new(),
            hints,
        }
    }

    pub fn fill_hints(&self) -> FillHints {
        self.hints
    }

    pub fn children(&self) -> &NodeRegistry<BoxRole, BoxChild> {
        &self.children
    }

    pub fn child(&self, role: BoxRole) -> Option<&BoxChild> {
        self.children.find(role)
    }

    pub fn rectangle(&self, role: BoxRole) -> Option<&BoxRectangleNode> {
        self.child(role).and_then(BoxChild::as_rectangle)
    }

    pub fn shadow(&self) -> Option<&BoxShadowNode> {
        self.child(BoxRole::Shadow).and_then(BoxChild::as_shadow)
    }

    /// Occupied roles in drawing order.
    pub fn roles(&self) -> Vec<BoxRole> {
        self.children.roles()
    }

    /// Compose the box for `rect` from a bundled style.
    pub fn update_from_style(&mut self, rect: Rect, style: &BoxStyle) {
        self.update_node(
            rect,
            &style.shape,
            &style.border_metrics,
            &style.border_colors,
            &style.gradient,
            &style.shadow_metrics,
            style.shadow_color,
        );
    }

    /// Recompose the children for the given geometry and style.
    ///
    /// Existing children of the right kind are updated in place; children
    /// that are no longer needed are detached.
    #[allow(clippy::too_many_arguments)]
    pub fn update_node(
        &mut self,
        rect: Rect,
        shape: &BoxShape,
        border_metrics: &BorderMetrics,
        border_colors: &BorderColors,
        gradient: &Gradient,
        shadow_metrics: &ShadowMetrics,
        shadow_color: Color,
    ) {
        let mut shadow_node = None;
        let mut shadow_fill_node = None;
        let mut rect_node = None;
        let mut fill_node = None;

        if !rect.is_empty() {
            let has_filling = gradient.is_visible();
            let has_border = !border_metrics.is_null() && border_colors.is_visible();
            let has_shadow =
                has_filling && !shadow_metrics.is_null() && shadow_color.is_visible();

            if has_shadow {
                let shadow_rect = shadow_metrics.shadow_rect(rect);
                let blur_radius = shadow_metrics.blur_radius();

                if blur_radius <= 0.0 {
                    let mut node = self.take_rectangle(BoxRole::ShadowFill);
                    node.update_solid_filling(shadow_rect, shape, shadow_color);
                    shadow_fill_node = Some(node);
                } else {
                    let mut node = self.take_shadow();
                    node.set_shadow_data(shadow_rect, shape, blur_radius, shadow_color);
                    shadow_node = Some(node);
                }
            }

            if has_border || has_filling {
                let mut node = self.take_rectangle(BoxRole::Box);

                if has_border && has_filling {
                    let combine = node.hints().prefer_colored_geometry
                        && BoxRectangleNode::is_combined_geometry_supported(gradient);
                    if !combine {
                        fill_node = Some(self.take_rectangle(BoxRole::Fill));
                    }
                }

                match fill_node.as_mut() {
                    Some(fill) => {
                        node.update_border(rect, shape, border_metrics, border_colors);
                        fill.update_filling(rect, shape, border_metrics, gradient);
                    },
                    None => {
                        node.update_box(rect, shape, border_metrics, border_colors, gradient);
                    },
                }

                rect_node = Some(node);
            }
        }

        self.update_child(BoxRole::Shadow, shadow_node.map(BoxChild::Shadow));
        self.update_child(BoxRole::ShadowFill, shadow_fill_node.map(BoxChild::Rectangle));
        self.update_child(BoxRole::Box, rect_node.map(BoxChild::Rectangle));
        self.update_child(BoxRole::Fill, fill_node.map(BoxChild::Rectangle));
    }

    /// Reuse the rectangle child for `role`, or create one.
    fn take_rectangle(&mut self, role: BoxRole) -> BoxRectangleNode {
        match self.children.take(role) {
            Some(BoxChild::Rectangle(node)) => node,
            Some(other) => {
                log::debug!("replacing {role:?} child {} of the wrong kind", other.id());
                BoxRectangleNode::with_hints(self.hints)
            },
            None => {
                let node = BoxRectangleNode::with_hints(self.hints);
                log::trace!("create {role:?} node {}", node.id());
                node
            },
        }
    }

    fn take_shadow(&mut self) -> BoxShadowNode {
        match self.children.take(BoxRole::Shadow) {
            Some(BoxChild::Shadow(node)) => node,
            Some(other) => {
                log::debug!("replacing Shadow child {} of the wrong kind", other.id());
                BoxShadowNode::new()
            },
            None => BoxShadowNode::new(),
        }
    }

    fn update_child(&mut self, role: BoxRole, node: Option<BoxChild>) {
        if let Some(old) = self.children.replace(role, node) {
            log::trace!("detach {role:?} node {}", old.id());
        }
    }
}
