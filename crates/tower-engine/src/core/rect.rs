use glam::Vec2;
use serde::Deserialize;

/// Axis-aligned rectangle in world space. Y grows upward, so `max.y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Corners in order: bottom-left, top-left, top-right, bottom-right.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.min.x, self.max.y),
            self.max,
            Vec2::new(self.max.x, self.min.y),
        ]
    }

    /// Midpoints of the left, top, right and bottom edges.
    pub fn edge_midpoints(&self) -> [Vec2; 4] {
        let c = self.center();
        [
            Vec2::new(self.min.x, c.y),
            Vec2::new(c.x, self.max.y),
            Vec2::new(self.max.x, c.y),
            Vec2::new(c.x, self.min.y),
        ]
    }

    /// Inclusive on every edge.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when all four corners of `other` lie inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.corners().iter().all(|&c| self.contains_point(c))
    }

    /// Horizontal ranges intersect (touching edges count).
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
    }

    /// Same size, moved so its center sits on `center`.
    pub fn moved_to(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 200.0))
    }

    #[test]
    fn rect_inside_is_contained() {
        let r = Rect::from_center_size(Vec2::new(50.0, 50.0), Vec2::splat(20.0));
        assert!(area().contains_rect(&r));
    }

    #[test]
    fn touching_edges_are_inclusive() {
        let r = Rect::new(Vec2::ZERO, Vec2::new(100.0, 10.0));
        assert!(area().contains_rect(&r));
    }

    #[test]
    fn single_corner_outside_fails() {
        let r = Rect::from_center_size(Vec2::new(95.0, 50.0), Vec2::splat(20.0));
        assert!(!area().contains_rect(&r));
    }

    #[test]
    fn overlap_x_ignores_vertical_distance() {
        let a = Rect::from_center_size(Vec2::new(50.0, 0.0), Vec2::splat(20.0));
        let b = Rect::from_center_size(Vec2::new(65.0, 500.0), Vec2::splat(20.0));
        let c = Rect::from_center_size(Vec2::new(90.0, 0.0), Vec2::splat(20.0));
        assert!(a.overlaps_x(&b));
        assert!(!a.overlaps_x(&c));
    }

    #[test]
    fn moved_to_keeps_size() {
        let r = Rect::from_center_size(Vec2::ZERO, Vec2::new(10.0, 4.0)).moved_to(Vec2::new(5.0, 5.0));
        assert_eq!(r.min, Vec2::new(0.0, 3.0));
        assert_eq!(r.max, Vec2::new(10.0, 7.0));
    }
}
