//! Minimal 2D geometry for the continuous engines.
//!
//! All shapes use screen coordinates: `x` grows to the right, `y` grows
//! downwards. Boundary contact counts as intersection everywhere.

use serde::{Deserialize, Serialize};

/// A point or velocity in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`×`h` centred on `center`.
    #[must_use]
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Point-in-rectangle test, edges inclusive.
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Rectangle overlap test, touching edges count as overlap.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Circle test via the closest point of the rectangle to the centre.
    #[must_use]
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest_x = center.x.clamp(self.x, self.right());
        let closest_y = center.y.clamp(self.y, self.bottom());
        let dx = center.x - closest_x;
        let dy = center.y - closest_y;
        dx * dx + dy * dy <= radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(10.0, 10.0, 30.0, 30.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(40.0, 40.0)));
        assert!(!r.contains(Vec2::new(40.1, 20.0)));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(10.0, 5.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(10.5, 5.0, 5.0, 5.0)));
        assert!(Rect::centered(Vec2::new(5.0, 5.0), 2.0, 2.0).intersects(&a));
    }

    #[test]
    fn test_circle_against_corner() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Distance to corner (10, 10) is 5.
        assert!(r.intersects_circle(Vec2::new(13.0, 14.0), 5.0));
        assert!(!r.intersects_circle(Vec2::new(13.0, 14.0), 4.9));
        // Centre inside.
        assert!(r.intersects_circle(Vec2::new(5.0, 5.0), 0.1));
    }
}
