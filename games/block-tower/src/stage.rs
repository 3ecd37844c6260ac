use glam::Vec2;
use tower_engine::{EngineContext, EntityId, GameEvent, Rect, Scene, TweenState};

use crate::block::{BlockFactory, Blocks, DragType};
use crate::cue::Cue;
use crate::ui::{Message, Ui};

/// Borrowed view of everything the tower and drag code act on during one step.
/// Each field is a disjoint borrow of the game, so subsystems can be handed a
/// `Stage` alongside their own `&mut self`.
pub struct Stage<'a> {
    pub ctx: &'a mut EngineContext,
    pub blocks: &'a mut Blocks,
    pub tweens: &'a mut TweenState<Cue>,
    pub factory: &'a BlockFactory,
    pub ui: &'a mut Ui,
}

impl<'a> Stage<'a> {
    pub fn scene(&self) -> &Scene {
        &self.ctx.scene
    }

    pub fn exists(&self, id: EntityId) -> bool {
        self.ctx.scene.contains(id)
    }

    pub fn rect(&self, id: EntityId) -> Option<Rect> {
        self.ctx.scene.get(id).map(|e| e.rect())
    }

    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.ctx.scene.get(id).map(|e| e.pos)
    }

    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(entity) = self.ctx.scene.get_mut(id) {
            entity.pos = pos;
        }
    }

    pub fn spawn_block(&mut self, config_id: u32, drag_type: DragType, pos: Vec2) -> Option<EntityId> {
        self.factory.spawn(self.ctx, self.blocks, config_id, drag_type, pos)
    }

    pub fn destroy_block(&mut self, id: EntityId) {
        self.factory.destroy(self.ctx, self.blocks, self.tweens, id);
    }

    pub fn show(&mut self, message: Message) {
        self.ui.show(self.ctx, message);
    }

    pub fn block_scroll(&mut self) {
        self.ui.scroll.block(self.ctx);
    }

    pub fn unblock_scroll(&mut self) {
        self.ui.scroll.unblock(self.ctx);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.ctx.emit_event(event);
    }
}
