use wasm_bindgen::prelude::*;

pub mod block;
pub mod catalog;
pub mod config;
pub mod cue;
pub mod drag;
pub mod game;
pub mod stage;
pub mod tower;
pub mod trash;
pub mod tray;
pub mod ui;

#[cfg(test)]
mod fixture;

pub use block::{Block, BlockFactory, Blocks, DragType};
pub use catalog::{BlockCatalog, CubeSpec};
pub use config::{ConfigError, TowerSettings};
pub use game::BlockTower;
pub use tower::{PlacementError, TowerController, TowerSaveSnapshot};
pub use ui::{Message, StringTable, TextResolver};

fn web_game(mut settings: TowerSettings, catalog: BlockCatalog) -> BlockTower {
    settings.seed = js_sys::Date::now() as u64;
    BlockTower::from_parts(
        settings,
        catalog,
        Box::new(tower_web::WebStorage::new()),
        Box::new(StringTable::english()),
    )
}

tower_web::export_game!(
    BlockTower,
    "block-tower",
    web_game(TowerSettings::default(), BlockCatalog::default())
);

/// Like `game_init`, with settings and block catalog supplied by the host as
/// JSON. Either one falls back to its defaults if it does not parse.
#[wasm_bindgen]
pub fn game_init_with_config(settings_json: &str, catalog_json: &str) {
    let (settings, catalog) = game::configure(settings_json, catalog_json);
    install(web_game(settings, catalog));
}
