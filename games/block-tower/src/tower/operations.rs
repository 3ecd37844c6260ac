// tower/operations.rs
//
// Place and remove: validate, compute the resting spot, animate, then commit
// to TowerState and persist. Placement reports validation synchronously; the
// block only joins the tower once its jump has landed. A `false` from
// placement leaves the block to the caller, which destroys it.

use glam::Vec2;
use tower_engine::{EntityId, Rect};

use crate::block::DragType;
use crate::config::TowerSettings;
use crate::cue::TowerCue;
use crate::stage::Stage;
use crate::tower::save::TowerSaveManager;
use super::animation::{Settle, TowerAnimator};
use super::calculator::{position_on_base, PositionCalculator};
use super::state::TowerState;
use super::validator;

pub struct Tower {
    pub(super) area: Rect,
    pub(super) state: TowerState,
    pub(super) calculator: PositionCalculator,
    pub(super) animator: TowerAnimator,
    pub(super) saver: TowerSaveManager,
}

impl Tower {
    pub fn new(area: Rect, settings: &TowerSettings, saver: TowerSaveManager) -> Self {
        Self {
            area,
            state: TowerState::new(),
            calculator: PositionCalculator::new(settings.seed),
            animator: TowerAnimator::new(settings),
            saver,
        }
    }

    pub fn can_place(&self, stage: &Stage, block: EntityId, pos: Vec2) -> bool {
        validator::can_place(&self.state, stage.scene(), &self.area, block, pos)
    }

    /// Returns whether placement was accepted. A rejected block is left where it is.
    pub fn place_block(&mut self, stage: &mut Stage, block: EntityId, pos: Vec2) -> bool {
        if !self.can_place(stage, block, pos) {
            return false;
        }

        if self.state.is_empty() {
            stage.set_position(block, pos);
            self.commit(stage, block);
            return true;
        }

        let target = match self.calculator.try_calculate(&self.state, stage.scene(), &self.area, block, pos) {
            Ok(target) => target,
            Err(err) => {
                log::debug!("place {:?}: {}", block, err);
                return false;
            }
        };

        if self.animator.start_jump(&mut self.state, stage, block, target) == Settle::Instant {
            self.commit(stage, block);
        }
        true
    }

    /// Returns whether the block was in the tower and got removed.
    pub fn remove_block(&mut self, stage: &mut Stage, block: EntityId) -> bool {
        if self.state.is_collapse_in_flight() {
            log::debug!("remove {:?}: collapse in flight", block);
            return false;
        }

        let Some(index) = self.state.index_of(block) else {
            let purged = self.state.purge_destroyed(stage.scene());
            if purged > 0 {
                log::warn!("tower: purged {} destroyed blocks", purged);
            }
            self.save(stage);
            return false;
        };

        self.state.remove(block);
        if index >= self.state.len() {
            self.save(stage);
            return true;
        }

        let moves = self.collapse_moves(stage, index);
        if self.animator.start_collapse(&mut self.state, stage, &moves) == Settle::Instant {
            self.save(stage);
        }
        true
    }

    /// Resting centers for every block from `index` up, stacked edge to edge
    /// starting at the base of `index`.
    fn collapse_moves(&self, stage: &Stage, index: usize) -> Vec<(EntityId, Vec2)> {
        let mut base_y = self.base_y_for_index(stage, index);
        let mut moves = Vec::with_capacity(self.state.len() - index);
        for &id in &self.state.blocks()[index..] {
            let Some(rect) = stage.rect(id) else {
                continue;
            };
            moves.push((id, position_on_base(rect.center().x, base_y, rect.height())));
            base_y += rect.height();
        }
        moves
    }

    /// Bottom of the tower for index 0, else the top edge of the block below.
    fn base_y_for_index(&self, stage: &Stage, index: usize) -> f32 {
        if index == 0 {
            return self.area.bottom();
        }
        self.state
            .get(index - 1)
            .and_then(|id| stage.rect(id))
            .map_or(self.area.bottom(), |r| r.top())
    }

    pub fn on_cue(&mut self, stage: &mut Stage, cue: TowerCue) {
        match cue {
            TowerCue::JumpLanded { block, target } => {
                if !self.animator.finish_jump(&mut self.state, block) {
                    log::debug!("stale jump landing for {:?}", block);
                    return;
                }
                if !stage.exists(block) {
                    log::warn!("jump landed for missing block {:?}", block);
                    return;
                }
                stage.set_position(block, target);
                self.commit(stage, block);
            }
            TowerCue::CollapseStep { batch } => {
                if self.animator.on_collapse_step(&mut self.state, batch) {
                    self.save(stage);
                }
            }
        }
    }

    fn commit(&mut self, stage: &mut Stage, block: EntityId) {
        stage.blocks.set_drag_type(block, DragType::Move);
        self.state.add(block);
        self.save(stage);
    }

    /// Persist the tower as it will stand once any running collapse settles.
    pub fn save(&mut self, stage: &mut Stage) {
        let animator = &self.animator;
        self.saver.save(&self.state, stage, |id| animator.resting_position(id));
    }

    pub fn load(&mut self, stage: &mut Stage) {
        self.animator.reset(&mut self.state, stage);
        self.saver.load(&mut self.state, stage);
    }
}
