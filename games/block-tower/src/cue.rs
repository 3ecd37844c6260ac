// cue.rs
//
// Completion cues carried by tweens. When a tween finishes, its cue is routed
// back to the subsystem that started it, which resumes the suspended step.

use glam::Vec2;
use tower_engine::EntityId;

use crate::drag::SessionId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Tower(TowerCue),
    Drag(DragCue),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TowerCue {
    /// A jumping block reached its resting position.
    JumpLanded { block: EntityId, target: Vec2 },
    /// One block of a collapse batch settled.
    CollapseStep { batch: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragCue {
    /// Pickup scale-up finished.
    PickupRaised { session: SessionId },
    /// Drop scale-down finished; the pending drag result can be applied.
    Dropped { session: SessionId },
    /// Explosion-then-shrink finished.
    Destroyed { block: EntityId },
    /// Fall into the trash hole finished.
    FellInHole { block: EntityId },
}
