//! The tower: stacked blocks inside a fixed area, placement rules, the
//! jump/collapse animations and persistence.
//!
//! [`TowerController`] is the only entry point the rest of the game uses.
//! Without a tower area it stays unwired: every query answers `false` and
//! every command is a no-op.

mod animation;
mod area;
mod calculator;
mod operations;
mod save;
mod state;
mod validator;

use glam::Vec2;
use tower_engine::{EntityId, Rect, SaveStore, StorageError};

use crate::config::TowerSettings;
use crate::cue::TowerCue;
use crate::stage::Stage;
use operations::Tower;

pub use animation::jump_height;
pub use area::is_completely_inside;
pub use calculator::{position_on_base, PlacementError, PositionCalculator};
pub use save::{TowerBlockRecord, TowerSaveManager, TowerSaveSnapshot};
pub use state::TowerState;

pub struct TowerController {
    tower: Option<Tower>,
}

impl TowerController {
    pub fn new(settings: &TowerSettings, store: Box<dyn SaveStore>) -> Self {
        let tower = match settings.tower_area {
            Some(area) => {
                let saver = TowerSaveManager::new(store, settings.save_key.clone());
                Some(Tower::new(area, settings, saver))
            }
            None => {
                log::error!("tower area is not set; tower disabled");
                None
            }
        };
        Self { tower }
    }

    /// Restore the persisted tower. Runs once at startup.
    pub fn initialize(&mut self, stage: &mut Stage) {
        self.load_state(stage);
    }

    pub fn is_wired(&self) -> bool {
        self.tower.is_some()
    }

    pub fn area(&self) -> Option<Rect> {
        self.tower.as_ref().map(|t| t.area)
    }

    pub fn state(&self) -> Option<&TowerState> {
        self.tower.as_ref().map(|t| &t.state)
    }

    pub fn snapshot(&self) -> Option<&TowerSaveSnapshot> {
        self.tower.as_ref().map(|t| t.saver.snapshot())
    }

    pub fn contains(&self, block: EntityId) -> bool {
        self.state().map_or(false, |s| s.contains(block))
    }

    /// Whether `rect` lies completely inside the tower area.
    pub fn is_block_in_tower_area(&self, rect: &Rect) -> bool {
        let Some(tower) = &self.tower else {
            return false;
        };
        is_completely_inside(Some(rect), &tower.area)
    }

    pub fn is_structural_animation_in_flight(&self) -> bool {
        self.state().map_or(false, |s| s.is_animating())
    }

    /// Pure validation, no side effects.
    pub fn can_place_in_tower(&self, stage: &Stage, block: EntityId, pos: Vec2) -> bool {
        self.tower.as_ref().map_or(false, |t| t.can_place(stage, block, pos))
    }

    /// Validate and start placing. `true` means accepted; the block joins the
    /// tower once its jump lands.
    pub fn try_place_in_tower(&mut self, stage: &mut Stage, block: EntityId, pos: Vec2) -> bool {
        let Some(tower) = self.tower.as_mut() else {
            return false;
        };
        tower.place_block(stage, block, pos)
    }

    pub fn remove_from_tower(&mut self, stage: &mut Stage, block: EntityId) -> bool {
        let Some(tower) = self.tower.as_mut() else {
            return false;
        };
        tower.remove_block(stage, block)
    }

    pub fn save_state(&mut self, stage: &mut Stage) {
        if let Some(tower) = self.tower.as_mut() {
            tower.save(stage);
        }
    }

    pub fn load_state(&mut self, stage: &mut Stage) {
        if let Some(tower) = self.tower.as_mut() {
            tower.load(stage);
        }
    }

    /// Delete the persisted snapshot and tear the current tower down.
    pub fn clear_saved_state(&mut self, stage: &mut Stage) -> Result<(), StorageError> {
        let Some(tower) = self.tower.as_mut() else {
            return Ok(());
        };
        for &id in tower.state.blocks() {
            stage.destroy_block(id);
        }
        tower.state.clear();
        tower.animator.reset(&mut tower.state, stage);
        tower.saver.delete()?;
        log::info!("tower save deleted");
        Ok(())
    }

    pub fn on_cue(&mut self, stage: &mut Stage, cue: TowerCue) {
        if let Some(tower) = self.tower.as_mut() {
            tower.on_cue(stage, cue);
        }
    }
}
