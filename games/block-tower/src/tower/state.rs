use tower_engine::{EntityId, Scene};

/// Blocks currently stacked in the tower, bottom (index 0) to top, plus the
/// flags that reject structural changes while the tower is animating.
#[derive(Debug, Default)]
pub struct TowerState {
    blocks: Vec<EntityId>,
    collapse_in_flight: bool,
    jump_in_flight: bool,
}

impl TowerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append on top. Duplicates are ignored; returns whether the block was added.
    pub fn add(&mut self, block: EntityId) -> bool {
        if self.blocks.contains(&block) {
            return false;
        }
        self.blocks.push(block);
        true
    }

    /// Returns whether the block was present.
    pub fn remove(&mut self, block: EntityId) -> bool {
        match self.index_of(block) {
            Some(idx) => {
                self.blocks.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, block: EntityId) -> Option<usize> {
        self.blocks.iter().position(|&b| b == block)
    }

    pub fn contains(&self, block: EntityId) -> bool {
        self.blocks.contains(&block)
    }

    /// Block with the highest top edge. Scanned on every call; on a tie the
    /// lower index wins.
    pub fn top_block(&self, scene: &Scene) -> Option<EntityId> {
        let mut best: Option<(EntityId, f32)> = None;
        for &id in &self.blocks {
            let Some(entity) = scene.get(id) else {
                continue;
            };
            let top = entity.rect().top();
            if best.map_or(true, |(_, best_top)| top > best_top) {
                best = Some((id, top));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Drop entries whose entity no longer exists. Returns how many were dropped.
    pub fn purge_destroyed(&mut self, scene: &Scene) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|&id| scene.contains(id));
        before - self.blocks.len()
    }

    pub fn blocks(&self) -> &[EntityId] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.blocks.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn set_collapse_in_flight(&mut self, value: bool) {
        self.collapse_in_flight = value;
    }

    pub fn set_jump_in_flight(&mut self, value: bool) {
        self.jump_in_flight = value;
    }

    pub fn is_collapse_in_flight(&self) -> bool {
        self.collapse_in_flight
    }

    pub fn is_jump_in_flight(&self) -> bool {
        self.jump_in_flight
    }

    pub fn is_animating(&self) -> bool {
        self.collapse_in_flight || self.jump_in_flight
    }
}
