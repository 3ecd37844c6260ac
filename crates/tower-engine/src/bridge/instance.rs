use bytemuck::{Pod, Zeroable};
use crate::components::entity::Entity;

/// Per-entity draw data handed to the host renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Instance {
    /// Center X in world space.
    pub x: f32,
    /// Center Y in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered width (size × scale).
    pub width: f32,
    /// Rendered height (size × scale).
    pub height: f32,
    /// Host sprite/color table index.
    pub sprite: f32,
    /// Entity id, so the host can attach labels or debug overlays.
    pub entity: f32,
    pub _pad: f32,
}

impl Instance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Instances in draw order, rebuilt every frame.
#[derive(Debug, Default)]
pub struct InstanceBuffer {
    pub instances: Vec<Instance>,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { instances: Vec::with_capacity(capacity) }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from the host.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

/// Rebuild `buffer` from visible entities, keeping scene order.
pub fn build_instances<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut InstanceBuffer) {
    buffer.instances.clear();
    for entity in entities {
        let Some(sprite) = entity.sprite else {
            continue;
        };
        if !entity.active {
            continue;
        }
        let extent = entity.extent();
        buffer.instances.push(Instance {
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            width: extent.x,
            height: extent.y,
            sprite: sprite.0 as f32,
            entity: entity.id.0 as f32,
            _pad: 0.0,
        });
    }
}
