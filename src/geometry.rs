//! Pixel-space helpers over normalized landmarks.

use crate::frame::{Landmark, MIDDLE_MCP, Skeleton, WRIST};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

pub fn to_pixels(lm: &Landmark, width: u32, height: u32) -> Point {
    Point::new(lm.x * width as f32, lm.y * height as f32)
}

pub fn distance(a: Point, b: Point) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Midpoint of the wrist and the middle-finger base, in pixels.
pub fn palm_center(skeleton: &Skeleton, width: u32, height: u32) -> Point {
    let wrist = to_pixels(&skeleton[WRIST], width, height);
    let base = to_pixels(&skeleton[MIDDLE_MCP], width, height);
    wrist.midpoint(base)
}
