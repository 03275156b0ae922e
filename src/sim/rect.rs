//! Axis-aligned bounding boxes
//!
//! Screen space: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Pull the rectangle back inside `[0, width] x [0, height]`
    pub fn clamp_inside(&mut self, width: f32, height: f32) {
        self.pos.x = self.pos.x.min(width - self.size.x).max(0.0);
        self.pos.y = self.pos.y.min(height - self.size.y).max(0.0);
    }

    /// Whether the rectangle lies fully inside `[0, width] x [0, height]`
    pub fn is_inside(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_clamp_inside() {
        let mut r = Rect::new(-4.0, 598.0, 100.0, 60.0);
        r.clamp_inside(1000.0, 600.0);
        assert_eq!(r.pos, Vec2::new(0.0, 540.0));
        assert!(r.is_inside(1000.0, 600.0));

        let mut r = Rect::new(950.0, -1.0, 100.0, 60.0);
        r.clamp_inside(1000.0, 600.0);
        assert_eq!(r.pos, Vec2::new(900.0, 0.0));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }
}
