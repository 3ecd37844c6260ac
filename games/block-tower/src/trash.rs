// trash.rs
//
// Elliptical drop zone that swallows blocks.

use glam::Vec2;
use tower_engine::Rect;

use crate::config::TrashHoleSettings;

/// Height of the fall arc at 1/4, 1/2 and 3/4 of the way, as a share of `fall_height`.
const FALL_ARC: [f32; 3] = [0.6, 1.0, 0.3];

#[derive(Debug, Clone, Copy)]
pub struct TrashHole {
    pub center: Vec2,
    pub size: Vec2,
    pub fall_height: f32,
}

impl From<TrashHoleSettings> for TrashHole {
    fn from(s: TrashHoleSettings) -> Self {
        Self {
            center: s.center,
            size: s.size,
            fall_height: s.fall_height,
        }
    }
}

impl TrashHole {
    pub fn contains_point(&self, p: Vec2) -> bool {
        let half = self.size * 0.5;
        if half.x <= 0.0 || half.y <= 0.0 {
            return false;
        }
        ((p - self.center) / half).length_squared() <= 1.0
    }

    /// A rect touches the hole when a corner, its center or an edge midpoint
    /// is inside the oval.
    pub fn is_touching(&self, rect: &Rect) -> bool {
        rect.corners()
            .into_iter()
            .chain(std::iter::once(rect.center()))
            .chain(rect.edge_midpoints())
            .any(|p| self.contains_point(p))
    }

    /// Lowest point of the oval; where falling blocks end up.
    pub fn bottom(&self) -> Vec2 {
        self.center - Vec2::new(0.0, self.size.y * 0.5)
    }

    /// Waypoints of the arc from `start` down into the hole.
    pub fn fall_path(&self, start: Vec2) -> Vec<Vec2> {
        let end = self.bottom();
        let mut points = Vec::with_capacity(FALL_ARC.len() + 2);
        points.push(start);
        for (i, lift) in FALL_ARC.iter().enumerate() {
            let t = (i + 1) as f32 / (FALL_ARC.len() + 1) as f32;
            points.push(start.lerp(end, t) + Vec2::new(0.0, lift * self.fall_height));
        }
        points.push(end);
        points
    }
}
