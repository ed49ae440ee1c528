//! Rectangle geometry.

use serde::{Deserialize, Serialize};

/// A rectangle with position and size, in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle is empty when it has no positive area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Grow the rectangle by `amount` on every side (shrink when negative).
    pub fn outset(&self, amount: f32) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_negative_size_is_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(Rect::new(0.0, 0.0, -1.0, 5.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f32::NAN, 5.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn outset_grows_every_side() {
        let r = Rect::new(10.0, 10.0, 20.0, 30.0).outset(2.0);
        assert_eq!(r, Rect::new(8.0, 8.0, 24.0, 34.0));
    }

    #[test]
    fn translate_keeps_size() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).translated(5.0, -2.0);
        assert_eq!(r, Rect::new(6.0, 0.0, 3.0, 4.0));
    }
}
