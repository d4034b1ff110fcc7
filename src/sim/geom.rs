//! Circle-vs-rectangle overlap tests with penetration-depth tie-breaking
//!
//! The whole field is axis-aligned rectangles, so collision response
//! reduces to one question: which pair of edges does the ball's bounding
//! circle penetrate least? That axis gets the reflection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (min corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
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

    /// Max corner (pos + size)
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Edge-inclusive rectangle overlap (used for drop collection)
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.pos.x <= b_max.x
            && a_max.x >= other.pos.x
            && self.pos.y <= b_max.y
            && a_max.y >= other.pos.y
    }
}

/// Which velocity component a collision should reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Per-edge penetration depths of a circle's bounds into a rectangle
#[derive(Debug, Clone, Copy)]
pub struct Penetration {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Penetration {
    /// The axis with the smaller minimum overlap wins the reflection
    pub fn reflect_axis(&self) -> Axis {
        if self.left.min(self.right) < self.top.min(self.bottom) {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

/// Overlap test between a circle and a rectangle, via the circle's
/// bounding box. Returns the per-edge penetration depths on overlap.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> Option<Penetration> {
    let max = rect.max();
    let overlaps = center.x + radius > rect.pos.x
        && center.x - radius < max.x
        && center.y + radius > rect.pos.y
        && center.y - radius < max.y;
    if !overlaps {
        return None;
    }
    Some(Penetration {
        left: (center.x + radius) - rect.pos.x,
        right: max.x - (center.x - radius),
        top: (center.y + radius) - rect.pos.y,
        bottom: max.y - (center.y - radius),
    })
}
