//! Axis-aligned rectangle geometry
//!
//! The overlap tests the collision check builds on. Both variants use strict
//! comparisons: rectangles that merely touch do not overlap.

use glam::Vec2;
use rand::Rng;

/// Axis-aligned rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Right edge (x + width)
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge (y + height)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Linear displacement over elapsed time. Speed is signed pixels/second,
/// delta is seconds.
#[inline]
pub fn pixels_moved(speed: f32, delta: f32) -> f32 {
    speed * delta
}

/// Strict AABB intersection
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// AABB intersection with `tolerance` pixels of forgiveness on every edge, so
/// visual bounding boxes may graze without registering a hit. A single scalar
/// applied to both operands; with tolerance 0 this is [`rects_overlap`].
pub fn rects_overlap_with_tolerance(a: &Rect, b: &Rect, tolerance: f32) -> bool {
    a.pos.x < b.right() - tolerance
        && a.right() > b.pos.x + tolerance
        && a.pos.y < b.bottom() - tolerance
        && a.bottom() > b.pos.y + tolerance
}

/// Inclusive uniform integer in `[min, max]`
pub fn random_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}
