use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage using a flat Vec. Vec order is draw order: later entries
/// are drawn on top and win hit tests.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Add an entity on top of everything else.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID, keeping the draw order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Whether an entity with this ID is alive.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities, back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Move an entity to the end of the draw order.
    pub fn bring_to_front(&mut self, id: EntityId) {
        if let Some(idx) = self.entities.iter().position(|e| e.id == id) {
            let entity = self.entities.remove(idx);
            self.entities.push(entity);
        }
    }

    /// Front-most active entity whose bounding box contains `point` and that passes `filter`.
    pub fn pick_at(&self, point: Vec2, filter: impl Fn(&Entity) -> bool) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.active && e.rect().contains_point(point) && filter(e))
            .map(|e| e.id)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
