use glam::Vec2;
use tower_engine::{EntityId, Rect, Scene};

use super::area::is_completely_inside;
use super::state::TowerState;

/// Candidate's horizontal range meets at least one stacked block.
pub(super) fn overlaps_any_x(state: &TowerState, scene: &Scene, candidate: &Rect) -> bool {
    state
        .blocks()
        .iter()
        .filter_map(|&id| scene.get(id))
        .any(|e| e.rect().overlaps_x(candidate))
}

/// Candidate's vertical center is strictly above the top block's.
pub(super) fn is_above(candidate: &Rect, top: &Rect) -> bool {
    candidate.center().y > top.center().y
}

/// Whether `block` may be placed at `candidate` (its center) right now.
///
/// Empty tower: the block must fit completely inside `area`.
/// Otherwise it must overlap some stacked block horizontally and sit above the
/// top block's center. Always false while the tower is animating.
pub fn can_place(state: &TowerState, scene: &Scene, area: &Rect, block: EntityId, candidate: Vec2) -> bool {
    let Some(entity) = scene.get(block) else {
        return false;
    };
    if state.is_animating() {
        return false;
    }

    let rect = entity.rect_at(candidate);
    if state.is_empty() {
        return is_completely_inside(Some(&rect), area);
    }

    let Some(top) = state.top_block(scene).and_then(|id| scene.get(id)) else {
        return false;
    };
    overlaps_any_x(state, scene, &rect) && is_above(&rect, &top.rect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_engine::Entity;

    fn area() -> Rect {
        Rect::new(Vec2::new(0.0, 0.0), Vec2::new(300.0, 500.0))
    }

    fn square(scene: &mut Scene, id: u32, x: f32, y: f32) -> EntityId {
        let id = EntityId(id);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(x, y)).with_size(Vec2::splat(60.0)));
        id
    }

    #[test]
    fn first_block_needs_to_fit_in_area() {
        let mut scene = Scene::new();
        let state = TowerState::new();
        let b = square(&mut scene, 1, 0.0, 0.0);
        assert!(can_place(&state, &scene, &area(), b, Vec2::new(100.0, 40.0)));
        assert!(!can_place(&state, &scene, &area(), b, Vec2::new(20.0, 40.0)));
    }

    #[test]
    fn stacking_needs_overlap_and_height() {
        let mut scene = Scene::new();
        let mut state = TowerState::new();
        state.add(square(&mut scene, 1, 100.0, 30.0));
        let b = square(&mut scene, 2, 0.0, 0.0);

        assert!(can_place(&state, &scene, &area(), b, Vec2::new(120.0, 100.0)));
        // beside, no horizontal overlap
        assert!(!can_place(&state, &scene, &area(), b, Vec2::new(200.0, 100.0)));
        // overlapping but level with the top block's center
        assert!(!can_place(&state, &scene, &area(), b, Vec2::new(120.0, 30.0)));
    }

    #[test]
    fn overlap_may_be_with_any_block() {
        let mut scene = Scene::new();
        let mut state = TowerState::new();
        state.add(square(&mut scene, 1, 50.0, 30.0));
        state.add(square(&mut scene, 2, 110.0, 90.0));
        let b = square(&mut scene, 3, 0.0, 0.0);
        // misses the top block but overlaps the base
        assert!(can_place(&state, &scene, &area(), b, Vec2::new(30.0, 200.0)));
    }

    #[test]
    fn rejected_while_animating_or_missing() {
        let mut scene = Scene::new();
        let mut state = TowerState::new();
        let b = square(&mut scene, 1, 0.0, 0.0);
        state.set_collapse_in_flight(true);
        assert!(!can_place(&state, &scene, &area(), b, Vec2::new(100.0, 40.0)));
        state.set_collapse_in_flight(false);
        state.set_jump_in_flight(true);
        assert!(!can_place(&state, &scene, &area(), b, Vec2::new(100.0, 40.0)));
        state.set_jump_in_flight(false);
        assert!(!can_place(&state, &scene, &area(), EntityId(77), Vec2::new(100.0, 40.0)));
    }

    #[test]
    fn candidate_block_is_not_moved() {
        let mut scene = Scene::new();
        let state = TowerState::new();
        let b = square(&mut scene, 1, 7.0, 7.0);
        can_place(&state, &scene, &area(), b, Vec2::new(100.0, 40.0));
        assert_eq!(scene.get(b).unwrap().pos, Vec2::new(7.0, 7.0));
    }
}
