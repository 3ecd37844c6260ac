// extensions/path.rs
//
// Catmull-Rom sampling through a list of waypoints. The curve passes through
// every point; each segment gets an equal share of `t`.

use glam::Vec2;

/// Sample the spline through `points` at `t` in [0, 1].
pub fn catmull_rom(points: &[Vec2], t: f32) -> Vec2 {
    match points.len() {
        0 => Vec2::ZERO,
        1 => points[0],
        n => {
            let segments = n - 1;
            let scaled = t.clamp(0.0, 1.0) * segments as f32;
            let seg = (scaled.floor() as usize).min(segments - 1);
            let local = scaled - seg as f32;
            let p0 = points[seg.saturating_sub(1)];
            let p1 = points[seg];
            let p2 = points[seg + 1];
            let p3 = points[(seg + 2).min(n - 1)];
            segment(p0, p1, p2, p3, local)
        }
    }
}

#[inline]
fn segment(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_waypoints() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0), Vec2::new(20.0, 0.0)];
        assert!(catmull_rom(&pts, 0.0).distance(pts[0]) < 1e-4);
        assert!(catmull_rom(&pts, 0.5).distance(pts[1]) < 1e-4);
        assert!(catmull_rom(&pts, 1.0).distance(pts[2]) < 1e-4);
    }

    #[test]
    fn arc_rises_between_points() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0), Vec2::new(20.0, 0.0)];
        assert!(catmull_rom(&pts, 0.25).y > 0.0);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(catmull_rom(&[], 0.5), Vec2::ZERO);
        assert_eq!(catmull_rom(&[Vec2::ONE], 0.5), Vec2::ONE);
    }
}
