// Test-only owner of a Stage's parts.

use glam::Vec2;
use tower_engine::{EngineContext, EntityId, TweenState};

use crate::block::{BlockFactory, Blocks, DragType};
use crate::cue::Cue;
use crate::stage::Stage;
use crate::ui::{StringTable, Ui};

pub struct World {
    pub ctx: EngineContext,
    pub blocks: Blocks,
    pub tweens: TweenState<Cue>,
    pub factory: BlockFactory,
    pub ui: Ui,
}

impl World {
    pub fn new() -> Self {
        Self {
            ctx: EngineContext::new(),
            blocks: Blocks::new(),
            tweens: TweenState::new(),
            factory: BlockFactory::default(),
            ui: Ui::new(Box::new(StringTable::english())),
        }
    }

    pub fn stage(&mut self) -> Stage<'_> {
        Stage {
            ctx: &mut self.ctx,
            blocks: &mut self.blocks,
            tweens: &mut self.tweens,
            factory: &self.factory,
            ui: &mut self.ui,
        }
    }

    /// Spawn a 60×60 catalog block.
    pub fn block_at(&mut self, x: f32, y: f32) -> EntityId {
        self.block_of(1, DragType::Move, x, y)
    }

    pub fn block_of(&mut self, config_id: u32, drag_type: DragType, x: f32, y: f32) -> EntityId {
        self.factory
            .spawn(&mut self.ctx, &mut self.blocks, config_id, drag_type, Vec2::new(x, y))
            .unwrap()
    }

    pub fn pos(&self, id: EntityId) -> Vec2 {
        self.ctx.scene.get(id).unwrap().pos
    }

    /// Advance tweens only and return the cues that fired.
    pub fn run_tweens(&mut self, seconds: f32) -> Vec<Cue> {
        let dt = 1.0 / 60.0;
        let mut cues = Vec::new();
        let mut t = 0.0;
        while t < seconds {
            self.tweens.tick(dt, &mut self.ctx.scene);
            cues.extend(self.tweens.take_completed());
            t += dt;
        }
        cues
    }
}
