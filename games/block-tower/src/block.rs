use std::collections::BTreeMap;

use glam::Vec2;
use tower_engine::{EngineContext, Entity, EntityId, SpriteRef, TweenId, TweenState};

use crate::catalog::BlockCatalog;

/// Scene tag shared by every block entity.
pub const BLOCK_TAG: &str = "block";

/// How a block reacts to being picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragType {
    /// Tray source: picking it up spawns a copy.
    Clone,
    /// Picking it up moves this instance.
    Move,
    /// Playing its destruction animation; gone once that finishes.
    Destroying,
}

/// Gameplay record of a block. Geometry lives on the scene entity.
#[derive(Debug, Clone)]
pub struct Block {
    pub entity: EntityId,
    pub config_id: u32,
    pub drag_type: DragType,
    /// Scale at rest; pickup animations scale relative to it.
    pub reference_scale: Vec2,
    /// Running pickup/drop scale tween.
    pub scale_anim: Option<TweenId>,
    /// Running destruction or trash-fall tween.
    pub destroy_anim: Option<TweenId>,
}

impl Block {
    pub fn new(entity: EntityId, config_id: u32, drag_type: DragType) -> Self {
        Self {
            entity,
            config_id,
            drag_type,
            reference_scale: Vec2::ONE,
            scale_anim: None,
            destroy_anim: None,
        }
    }

    /// Whether a pickup, drop or destruction animation is still running.
    pub fn is_animating<C>(&self, tweens: &TweenState<C>) -> bool {
        let live = |id: Option<TweenId>| id.map_or(false, |id| tweens.is_active(id));
        live(self.scale_anim) || live(self.destroy_anim)
    }
}

/// All live blocks, keyed by entity.
#[derive(Debug, Default)]
pub struct Blocks {
    map: BTreeMap<EntityId, Block>,
}

impl Blocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, block: Block) {
        self.map.insert(block.entity, block);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Block> {
        self.map.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Block> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Block> {
        self.map.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.map.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn drag_type(&self, id: EntityId) -> Option<DragType> {
        self.get(id).map(|b| b.drag_type)
    }

    pub fn set_drag_type(&mut self, id: EntityId, drag_type: DragType) {
        if let Some(block) = self.map.get_mut(&id) {
            block.drag_type = drag_type;
        }
    }

    pub fn any_animating<C>(&self, tweens: &TweenState<C>) -> bool {
        self.map.values().any(|b| b.is_animating(tweens))
    }
}

/// Creates block entities from catalog ids.
#[derive(Debug, Clone, Default)]
pub struct BlockFactory {
    catalog: BlockCatalog,
}

impl BlockFactory {
    pub fn new(catalog: BlockCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// Spawn a block of type `config_id` centered on `pos`. `None` for unknown ids.
    pub fn spawn(
        &self,
        ctx: &mut EngineContext,
        blocks: &mut Blocks,
        config_id: u32,
        drag_type: DragType,
        pos: Vec2,
    ) -> Option<EntityId> {
        let spec = self.catalog.get(config_id)?;
        let sprite = self.catalog.index_of(config_id)? as u32;
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(BLOCK_TAG)
                .with_pos(pos)
                .with_size(spec.size)
                .with_sprite(SpriteRef(sprite)),
        );
        blocks.insert(Block::new(id, config_id, drag_type));
        Some(id)
    }

    /// Remove a block from the scene, the registry and the tween system.
    pub fn destroy<C>(&self, ctx: &mut EngineContext, blocks: &mut Blocks, tweens: &mut TweenState<C>, id: EntityId) {
        tweens.remove_entity(id);
        blocks.remove(id);
        ctx.scene.despawn(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::Cue;

    #[test]
    fn spawn_uses_catalog_size_and_sprite() {
        let factory = BlockFactory::default();
        let mut ctx = EngineContext::new();
        let mut blocks = Blocks::new();

        let id = factory.spawn(&mut ctx, &mut blocks, 3, DragType::Clone, Vec2::new(5.0, 6.0)).unwrap();
        let entity = ctx.scene.get(id).unwrap();
        assert_eq!(entity.size, Vec2::splat(60.0));
        assert_eq!(entity.sprite, Some(SpriteRef(2)));
        assert_eq!(entity.tag, BLOCK_TAG);
        assert_eq!(blocks.drag_type(id), Some(DragType::Clone));
    }

    #[test]
    fn unknown_config_id_spawns_nothing() {
        let factory = BlockFactory::default();
        let mut ctx = EngineContext::new();
        let mut blocks = Blocks::new();
        assert!(factory.spawn(&mut ctx, &mut blocks, 99, DragType::Move, Vec2::ZERO).is_none());
        assert!(ctx.scene.is_empty());
        assert!(blocks.is_empty());
    }

    #[test]
    fn destroy_clears_everything() {
        let factory = BlockFactory::default();
        let mut ctx = EngineContext::new();
        let mut blocks = Blocks::new();
        let mut tweens: TweenState<Cue> = TweenState::new();

        let id = factory.spawn(&mut ctx, &mut blocks, 1, DragType::Move, Vec2::ZERO).unwrap();
        tweens.start(id, tower_engine::Tween::rotation(0.0, 1.0, 1.0, tower_engine::Easing::Linear));
        factory.destroy(&mut ctx, &mut blocks, &mut tweens, id);

        assert!(!ctx.scene.contains(id));
        assert!(!blocks.contains(id));
        assert!(tweens.is_empty());
    }
}
