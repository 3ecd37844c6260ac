use glam::Vec2;
use crate::api::types::EntityId;
use crate::core::rect::Rect;

/// Index into the host's sprite/color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteRef(pub u32);

/// Fat Entity: one flat struct per scene object.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Center position in world space.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Multiplier applied to `size`.
    pub scale: Vec2,
    /// Unscaled bounding box size in world units.
    pub size: Vec2,
    /// Sprite reference (entities without one are invisible).
    pub sprite: Option<SpriteRef>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            size: Vec2::ONE,
            sprite: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteRef) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Rendered size: `size * scale`.
    pub fn extent(&self) -> Vec2 {
        self.size * self.scale
    }

    /// World-space bounding box at the current position.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, self.extent())
    }

    /// Bounding box the entity would have if moved to `pos`.
    /// The entity itself is not touched.
    pub fn rect_at(&self, pos: Vec2) -> Rect {
        Rect::from_center_size(pos, self.extent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_uses_scaled_size() {
        let e = Entity::new(EntityId(1))
            .with_pos(Vec2::new(10.0, 10.0))
            .with_size(Vec2::new(4.0, 2.0))
            .with_scale(Vec2::splat(2.0));
        let r = e.rect();
        assert_eq!(r.min, Vec2::new(6.0, 8.0));
        assert_eq!(r.max, Vec2::new(14.0, 12.0));
    }

    #[test]
    fn rect_at_leaves_position_alone() {
        let e = Entity::new(EntityId(1)).with_size(Vec2::splat(2.0));
        let r = e.rect_at(Vec2::new(100.0, 0.0));
        assert_eq!(r.center(), Vec2::new(100.0, 0.0));
        assert_eq!(e.pos, Vec2::ZERO);
    }
}
