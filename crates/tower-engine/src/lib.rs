pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod extensions;
pub mod storage;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::{Entity, SpriteRef};
pub use core::rect::Rect;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use input::gesture::{GestureTracker, PointerEvent, PointerPhase};
pub use storage::{SaveStore, MemoryStore, StorageError, save_json, load_json};
pub use bridge::instance::{Instance, InstanceBuffer, build_instances};

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, lerp, lerp_vec2, ease, ease_vec2, catmull_rom,
    TweenState, Tween, TweenId, TweenTarget, TweenChannel,
    Countdown, Interval,
};
