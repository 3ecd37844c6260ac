//! Press, hold, drag and drop of blocks.
//!
//! One [`DragSession`] at a time moves through
//! `Idle → AwaitingPickup → PickedUp → Dragging → Resolving → Idle`.
//! `Move` blocks skip `AwaitingPickup`. The drop outcome is decided on
//! release and carried out when the drop animation reports back.

mod animations;
mod handler;
mod resolver;
mod session;

use glam::Vec2;
use tower_engine::{Countdown, EntityId, PointerEvent, PointerPhase};

use crate::block::{DragType, BLOCK_TAG};
use crate::config::TowerSettings;
use crate::cue::DragCue;
use crate::stage::Stage;
use crate::tower::TowerController;
use crate::trash::TrashHole;
use crate::ui::Message;

pub use animations::BlockAnimations;
pub use resolver::{resolve, DragOutcome};
pub use session::{DragPhase, DragSession, SessionId};

pub struct DragController {
    session: Option<DragSession>,
    next_session: u32,
    hold: Countdown,
    hold_duration: f32,
    follow_sharpness: f32,
    trash: TrashHole,
    anims: BlockAnimations,
}

impl DragController {
    pub fn new(settings: &TowerSettings) -> Self {
        Self {
            session: None,
            next_session: 0,
            hold: Countdown::new(),
            hold_duration: settings.hold_duration,
            follow_sharpness: settings.follow_sharpness,
            trash: TrashHole::from(settings.trash_hole),
            anims: BlockAnimations::new(settings),
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.session.as_ref().map_or(DragPhase::Idle, |s| s.phase)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Block currently following the pointer, if any.
    pub fn dragged_block(&self) -> Option<EntityId> {
        self.session.as_ref().and_then(|s| s.block)
    }

    pub fn trash(&self) -> &TrashHole {
        &self.trash
    }

    pub fn on_pointer(&mut self, event: PointerEvent, stage: &mut Stage, tower: &mut TowerController) {
        let Some(phase) = self.session.as_ref().map(|s| s.phase) else {
            if event.phase == PointerPhase::Down {
                self.press(event.pos, stage, tower);
            }
            return;
        };

        match (phase, event.phase) {
            (DragPhase::Resolving, _) | (_, PointerPhase::Down) => {}
            (DragPhase::AwaitingPickup, PointerPhase::DragStart | PointerPhase::Up | PointerPhase::DragEnd) => {
                self.cancel(stage);
            }
            (DragPhase::PickedUp | DragPhase::Dragging, PointerPhase::DragStart | PointerPhase::Dragging) => {
                if let Some(session) = self.session.as_mut() {
                    session.phase = DragPhase::Dragging;
                    session.pointer = event.pos;
                }
            }
            (DragPhase::PickedUp | DragPhase::Dragging, PointerPhase::Up | PointerPhase::DragEnd) => {
                self.finish(event.pos, stage, tower);
            }
            _ => {}
        }
    }

    /// Hold timer and follow smoothing.
    pub fn tick(&mut self, dt: f32, stage: &mut Stage) {
        if self.hold.tick(dt) {
            self.commit_clone(stage);
        }

        let Some(session) = self.session.as_ref().filter(|s| s.phase == DragPhase::Dragging) else {
            return;
        };
        let (Some(block), target) = (session.block, session.pointer) else {
            return;
        };
        let alpha = 1.0 - (-self.follow_sharpness * dt).exp();
        if let Some(pos) = stage.position(block) {
            stage.set_position(block, pos + (target - pos) * alpha);
        }
    }

    pub fn on_cue(&mut self, cue: DragCue, stage: &mut Stage, tower: &mut TowerController) {
        match cue {
            DragCue::PickupRaised { session } => {
                log::debug!("pickup raised: {:?}", session);
            }
            DragCue::Dropped { session } => {
                if self.session.as_ref().map(|s| s.id) != Some(session) {
                    log::warn!("stale drop cue for {:?}", session);
                    return;
                }
                let Some(current) = self.session.take() else {
                    return;
                };
                match current.outcome {
                    Some(outcome) => {
                        handler::apply(&current, outcome, stage, tower, &self.anims, &self.trash);
                    }
                    None => stage.unblock_scroll(),
                }
            }
            DragCue::Destroyed { block } | DragCue::FellInHole { block } => {
                stage.destroy_block(block);
            }
        }
    }

    fn press(&mut self, pos: Vec2, stage: &mut Stage, tower: &mut TowerController) {
        let Some(block) = stage.scene().pick_at(pos, |e| e.tag == BLOCK_TAG) else {
            return;
        };
        if tower.is_structural_animation_in_flight() {
            log::debug!("press on {:?} ignored: tower is animating", block);
            return;
        }
        if stage.blocks.any_animating(&*stage.tweens) {
            log::debug!("press on {:?} ignored: block animation running", block);
            return;
        }

        let id = SessionId(self.next_session);
        self.next_session = self.next_session.wrapping_add(1);

        match stage.blocks.drag_type(block) {
            Some(DragType::Clone) => {
                self.session = Some(DragSession::new(id, block, DragPhase::AwaitingPickup, pos));
                self.hold.start(self.hold_duration);
            }
            Some(DragType::Move) => {
                self.session = Some(DragSession::new(id, block, DragPhase::PickedUp, pos));
                // out of the tower first so it is never validated against itself
                let removed = tower.remove_from_tower(stage, block);
                self.lift(stage, block);
                stage.show(if removed { Message::BlockRemoved } else { Message::BlockPickedUp });
            }
            Some(DragType::Destroying) | None => {}
        }
    }

    fn commit_clone(&mut self, stage: &mut Stage) {
        let Some(session) = self.session.as_ref().filter(|s| s.phase == DragPhase::AwaitingPickup) else {
            return;
        };
        let source = session.source;
        let spawned = match (stage.blocks.get(source).map(|b| b.config_id), stage.position(source)) {
            (Some(config_id), Some(pos)) => stage.spawn_block(config_id, DragType::Move, pos),
            _ => None,
        };
        let Some(clone) = spawned else {
            log::error!("failed to clone block {:?}", source);
            self.cancel(stage);
            return;
        };

        if let Some(session) = self.session.as_mut() {
            session.phase = DragPhase::PickedUp;
        }
        self.lift(stage, clone);
        stage.show(Message::BlockPickedUp);
    }

    /// Make `block` the dragged block: front-most, scaled up, tray locked.
    fn lift(&mut self, stage: &mut Stage, block: EntityId) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.block = Some(block);
        stage.ctx.scene.bring_to_front(block);
        self.anims.scale_up(stage, block, session.id);
        stage.block_scroll();
    }

    fn cancel(&mut self, stage: &mut Stage) {
        self.hold.stop();
        self.session = None;
        stage.unblock_scroll();
    }

    fn finish(&mut self, release: Vec2, stage: &mut Stage, tower: &mut TowerController) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(block) = session.block.filter(|&b| stage.exists(b)) else {
            log::warn!("release of {:?}: dragged block is gone", session.id);
            self.session = None;
            stage.unblock_scroll();
            return;
        };

        let outcome = resolve(&self.trash, tower, stage, block, release);
        log::debug!("release {:?} at {:?}: {:?}", block, release, outcome);
        session.phase = DragPhase::Resolving;
        session.outcome = Some(outcome);
        self.anims.scale_down(stage, block, session.id);
    }
}
