// tray.rs
//
// Row of pickup sources, one Clone block per catalog entry.

use glam::Vec2;
use tower_engine::EntityId;

use crate::block::DragType;
use crate::config::TowerSettings;
use crate::stage::Stage;

pub fn populate(stage: &mut Stage, settings: &TowerSettings) -> Vec<EntityId> {
    let ids: Vec<u32> = stage.factory.catalog().iter().map(|c| c.id).collect();
    let mut spawned = Vec::with_capacity(ids.len());
    for (slot, config_id) in ids.into_iter().enumerate() {
        let pos = settings.tray_origin + Vec2::new(slot as f32 * settings.tray_spacing, 0.0);
        match stage.spawn_block(config_id, DragType::Clone, pos) {
            Some(id) => spawned.push(id),
            None => log::error!("tray: cannot spawn block {}", config_id),
        }
    }
    log::info!("tray: {} blocks", spawned.len());
    spawned
}
