// extensions/mod.rs
//
// Optional extension modules for tower-engine.
// Decoupled from Entity/Scene internals: games opt in by owning these systems
// and ticking them from their own update.

pub mod easing;
pub mod path;
pub mod timer;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec2, ease, ease_vec2};
pub use path::catmull_rom;
pub use timer::{Countdown, Interval};
pub use tween::{TweenState, Tween, TweenId, TweenTarget, TweenChannel};
