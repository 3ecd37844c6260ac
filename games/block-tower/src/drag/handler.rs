// drag/handler.rs
//
// Side effects of a resolved drop, run once the drop animation has finished.

use crate::stage::Stage;
use crate::tower::TowerController;
use crate::trash::TrashHole;
use crate::ui::Message;
use super::animations::BlockAnimations;
use super::resolver::DragOutcome;
use super::session::DragSession;

pub(super) fn apply(
    session: &DragSession,
    outcome: DragOutcome,
    stage: &mut Stage,
    tower: &mut TowerController,
    anims: &BlockAnimations,
    trash: &TrashHole,
) {
    let Some(block) = session.block.filter(|&b| stage.exists(b)) else {
        log::warn!("drop of {:?}: block is gone", session.id);
        stage.unblock_scroll();
        return;
    };

    match outcome {
        DragOutcome::TrashDestruction => {
            anims.trash_fall(stage, trash, block);
            stage.show(Message::BlockTrashed);
        }
        DragOutcome::TowerPlacement(pos) => {
            anims.force_reset_scale(stage, block);
            if tower.try_place_in_tower(stage, block, pos) {
                stage.show(Message::BlockPlaced);
            } else {
                // validated on release, refused now: the tower is full
                anims.destruction(stage, block);
                stage.show(Message::NoMoreSpace);
            }
        }
        DragOutcome::RegularDestruction => {
            anims.destruction(stage, block);
            stage.show(Message::BlockDestroyed);
        }
    }

    stage.unblock_scroll();
}
