use glam::Vec2;
use serde::{Deserialize, Serialize};
use tower_engine::{load_json, save_json, EntityId, GameEvent, SaveStore, StorageError};

use crate::block::DragType;
use crate::stage::Stage;
use crate::ui::EVENT_TOWER_SAVED;
use super::state::TowerState;

/// One stacked block as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerBlockRecord {
    pub block_id: u32,
    pub position_x: f32,
    pub position_y: f32,
    pub layer_index: usize,
}

impl TowerBlockRecord {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.position_x, self.position_y)
    }
}

/// Persisted tower, bottom to top. Rewritten wholesale on every save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TowerSaveSnapshot {
    pub blocks: Vec<TowerBlockRecord>,
}

/// Writes and restores TowerState through a SaveStore.
pub struct TowerSaveManager {
    store: Box<dyn SaveStore>,
    key: String,
    snapshot: TowerSaveSnapshot,
}

impl TowerSaveManager {
    pub fn new(store: Box<dyn SaveStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            snapshot: TowerSaveSnapshot::default(),
        }
    }

    /// Last snapshot written or read.
    pub fn snapshot(&self) -> &TowerSaveSnapshot {
        &self.snapshot
    }

    /// Snapshot every live stacked block with its stack index and persist.
    /// `resting` overrides the scene position of blocks that are still moving.
    /// Storage failures are logged; the game carries on.
    pub fn save(&mut self, state: &TowerState, stage: &mut Stage, resting: impl Fn(EntityId) -> Option<Vec2>) {
        self.snapshot.blocks.clear();
        for (layer_index, &id) in state.blocks().iter().enumerate() {
            let pos = resting(id).or_else(|| stage.position(id));
            let (Some(block), Some(pos)) = (stage.blocks.get(id), pos) else {
                continue;
            };
            self.snapshot.blocks.push(TowerBlockRecord {
                block_id: block.config_id,
                position_x: pos.x,
                position_y: pos.y,
                layer_index,
            });
        }

        match save_json(self.store.as_mut(), &self.key, &self.snapshot) {
            Ok(()) => log::debug!("tower saved: {} blocks", self.snapshot.blocks.len()),
            Err(err) => log::error!("tower save failed: {}", err),
        }
        stage.emit(GameEvent::new(EVENT_TOWER_SAVED, self.snapshot.blocks.len() as f32, 0.0, 0.0));
    }

    /// Replace the tower with the persisted one. Current tower blocks are destroyed;
    /// missing data gives an empty tower.
    pub fn load(&mut self, state: &mut TowerState, stage: &mut Stage) {
        for &id in state.blocks() {
            stage.destroy_block(id);
        }
        state.clear();

        self.snapshot = load_json(self.store.as_ref(), &self.key);
        self.snapshot.blocks.sort_by_key(|r| r.layer_index);

        for record in &self.snapshot.blocks {
            match stage.spawn_block(record.block_id, DragType::Move, record.position()) {
                Some(id) => {
                    state.add(id);
                }
                None => log::error!("tower load: failed to create block with id {}", record.block_id),
            }
        }
        log::info!("tower loaded: {} blocks", state.len());
    }

    /// Remove the persisted snapshot.
    pub fn delete(&mut self) -> Result<(), StorageError> {
        self.snapshot = TowerSaveSnapshot::default();
        self.store.delete(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::World;
    use tower_engine::MemoryStore;

    #[test]
    fn snapshot_json_shape() {
        let snap = TowerSaveSnapshot {
            blocks: vec![TowerBlockRecord { block_id: 2, position_x: 1.5, position_y: 3.0, layer_index: 0 }],
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(
            json,
            r#"{"blocks":[{"block_id":2,"position_x":1.5,"position_y":3.0,"layer_index":0}]}"#
        );
    }

    #[test]
    fn save_then_load_restores_order_and_positions() {
        let store = MemoryStore::new();
        let mut world = World::new();
        let mut state = TowerState::new();
        let a = world.block_of(2, DragType::Move, 100.0, 30.0);
        let b = world.block_of(4, DragType::Move, 110.0, 90.0);
        state.add(a);
        state.add(b);

        let mut saver = TowerSaveManager::new(Box::new(store.clone()), "TowerData");
        saver.save(&state, &mut world.stage(), |_| None);
        assert!(store.contains("TowerData"));

        // fresh process
        let mut world = World::new();
        let mut state = TowerState::new();
        let mut saver = TowerSaveManager::new(Box::new(store), "TowerData");
        saver.load(&mut state, &mut world.stage());

        assert_eq!(state.len(), 2);
        let ids: Vec<u32> = state.blocks().iter().map(|&id| world.blocks.get(id).unwrap().config_id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(world.pos(state.blocks()[1]), Vec2::new(110.0, 90.0));
        assert_eq!(world.blocks.drag_type(state.blocks()[0]), Some(DragType::Move));
    }

    #[test]
    fn resting_position_wins_over_scene() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let a = world.block_of(1, DragType::Move, 100.0, 30.0);
        let b = world.block_of(1, DragType::Move, 100.0, 117.0);
        state.add(a);
        state.add(b);

        let mut saver = TowerSaveManager::new(Box::new(MemoryStore::new()), "TowerData");
        saver.save(&state, &mut world.stage(), |id| (id == b).then(|| Vec2::new(100.0, 90.0)));

        let ys: Vec<f32> = saver.snapshot().blocks.iter().map(|r| r.position_y).collect();
        assert_eq!(ys, vec![30.0, 90.0]);
    }

    #[test]
    fn load_orders_by_layer_and_skips_unknown_ids() {
        let mut store = MemoryStore::new();
        store
            .write(
                "TowerData",
                r#"{"blocks":[
                    {"block_id":3,"position_x":0,"position_y":90,"layer_index":1},
                    {"block_id":99,"position_x":0,"position_y":150,"layer_index":2},
                    {"block_id":1,"position_x":0,"position_y":30,"layer_index":0}
                ]}"#,
            )
            .unwrap();

        let mut world = World::new();
        let mut state = TowerState::new();
        let mut saver = TowerSaveManager::new(Box::new(store), "TowerData");
        saver.load(&mut state, &mut world.stage());

        let ids: Vec<u32> = state.blocks().iter().map(|&id| world.blocks.get(id).unwrap().config_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn load_replaces_current_tower() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let old = world.block_at(0.0, 30.0);
        state.add(old);

        let mut saver = TowerSaveManager::new(Box::new(MemoryStore::new()), "TowerData");
        saver.load(&mut state, &mut world.stage());

        assert!(state.is_empty());
        assert!(!world.ctx.scene.contains(old));
    }

    #[test]
    fn delete_removes_key() {
        let store = MemoryStore::new();
        let mut world = World::new();
        let mut saver = TowerSaveManager::new(Box::new(store.clone()), "TowerData");
        saver.save(&TowerState::new(), &mut world.stage(), |_| None);
        assert!(store.contains("TowerData"));
        saver.delete().unwrap();
        assert!(!store.contains("TowerData"));
    }
}
