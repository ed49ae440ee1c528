//! Scene-graph composition.
//!
//! A parent node owns a fixed table of optional children, one slot per
//! [`NodeRole`]. [`BoxNode`] decides every update which of its shadow,
//! shadow-fill, box, and fill children are needed, reuses the ones it
//! already has, and detaches the rest.

pub mod box_node;
pub mod node;
pub mod registry;

pub use box_node::{BoxChild, BoxNode, BoxRole};
pub use node::{BoxRectangleNode, BoxShadowNode, FillHints, NodeId, RectangleContent};
pub use registry::{NodeRegistry, NodeRole};
