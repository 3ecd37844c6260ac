use glam::Vec2;
use tower_engine::EntityId;

use super::resolver::DragOutcome;

/// Identifies one press-to-resolution drag. Cues carry it so a stale cue
/// from an earlier session is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Clone block pressed, hold timer running.
    AwaitingPickup,
    /// Block lifted, pointer has not moved past the threshold.
    PickedUp,
    Dragging,
    /// Released; drop animation and outcome pending.
    Resolving,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    pub id: SessionId,
    pub phase: DragPhase,
    /// Block that was pressed.
    pub source: EntityId,
    /// Block that follows the pointer: the source itself, or its clone.
    pub block: Option<EntityId>,
    pub pointer: Vec2,
    pub outcome: Option<DragOutcome>,
}

impl DragSession {
    pub fn new(id: SessionId, source: EntityId, phase: DragPhase, pointer: Vec2) -> Self {
        Self {
            id,
            phase,
            source,
            block: None,
            pointer,
            outcome: None,
        }
    }
}
