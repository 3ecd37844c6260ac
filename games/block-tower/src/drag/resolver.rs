use glam::Vec2;
use tower_engine::EntityId;

use crate::stage::Stage;
use crate::tower::TowerController;
use crate::trash::TrashHole;

/// Where a released block goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    TrashDestruction,
    /// Accepted by the tower at this release position.
    TowerPlacement(Vec2),
    RegularDestruction,
}

/// Trash beats tower beats destruction. The trash test uses the block as it
/// is drawn; the tower is asked about the release point.
pub fn resolve(trash: &TrashHole, tower: &TowerController, stage: &Stage, block: EntityId, release: Vec2) -> DragOutcome {
    if stage.rect(block).map_or(false, |r| trash.is_touching(&r)) {
        return DragOutcome::TrashDestruction;
    }
    if tower.can_place_in_tower(stage, block, release) {
        return DragOutcome::TowerPlacement(release);
    }
    DragOutcome::RegularDestruction
}
