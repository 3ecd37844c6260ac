use serde::Deserialize;

use crate::api::types::{EntityId, GameEvent};
use crate::core::rect::Rect;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Initial entity capacity of the scene (default: 256).
    pub max_entities: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_entities: 256,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// The visible world as a rectangle anchored at the origin (Y up).
    pub fn world_rect(&self) -> Rect {
        Rect::new(glam::Vec2::ZERO, glam::Vec2::new(self.world_width, self.world_height))
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, restore saved progress.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step: consume input, advance timers and tweens.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// The host is about to background or close the page.
    fn suspend(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a context sized for the given configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_entities),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn config_parses_partial_json() {
        let config: GameConfig = serde_json::from_str(r#"{ "world_width": 1024 }"#).unwrap();
        assert_eq!(config.world_width, 1024.0);
        assert_eq!(config.world_height, 600.0);
    }

    #[test]
    fn frame_data_is_cleared() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
