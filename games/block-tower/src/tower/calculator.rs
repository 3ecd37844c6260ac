use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tower_engine::{EntityId, Rect, Scene};

use super::state::TowerState;
use super::validator::{is_above, overlaps_any_x};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("block no longer exists")]
    MissingBlock,
    #[error("tower has no live blocks to stack on")]
    NoTopBlock,
    #[error("block does not overlap the tower horizontally")]
    NoOverlap,
    #[error("block is not above the top block")]
    NotAbove,
    /// The stacked block would poke out of the tower's top edge.
    #[error("no more space")]
    NoMoreSpace,
    #[error("stacked block would leave the tower area")]
    OutOfBounds,
}

/// Computes where a block comes to rest on the tower.
#[derive(Debug)]
pub struct PositionCalculator {
    rng: ChaCha8Rng,
}

impl PositionCalculator {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Resting center for `block` dropped at `desired`.
    ///
    /// Empty tower: `desired` unchanged. Otherwise the block lands on the top
    /// block's top edge, shifted by a random offset drawn from where the top
    /// block and the base block overlap horizontally. If that spot leaves the
    /// area through the top it is `NoMoreSpace`; any other miss is retried
    /// once centered on the top block.
    pub fn try_calculate(
        &mut self,
        state: &TowerState,
        scene: &Scene,
        area: &Rect,
        block: EntityId,
        desired: Vec2,
    ) -> Result<Vec2, PlacementError> {
        let entity = scene.get(block).ok_or(PlacementError::MissingBlock)?;
        if state.is_empty() {
            return Ok(desired);
        }

        let top = state
            .top_block(scene)
            .and_then(|id| scene.get(id))
            .map(|e| e.rect())
            .ok_or(PlacementError::NoTopBlock)?;
        let candidate = entity.rect_at(desired);
        if !overlaps_any_x(state, scene, &candidate) {
            return Err(PlacementError::NoOverlap);
        }
        if !is_above(&candidate, &top) {
            return Err(PlacementError::NotAbove);
        }

        let base = state
            .blocks()
            .iter()
            .find_map(|&id| scene.get(id))
            .map(|e| e.rect())
            .unwrap_or(top);
        let lo = top.left().max(base.left());
        let hi = top.right().min(base.right());
        let offset = if lo < hi {
            self.rng.gen_range(lo..hi) - top.center().x
        } else {
            0.0
        };

        let y = top.top() + candidate.height() * 0.5;
        let jittered = Vec2::new(top.center().x + offset, y);
        match Self::check_fit(&candidate, jittered, area) {
            Ok(pos) => Ok(pos),
            Err(PlacementError::NoMoreSpace) => Err(PlacementError::NoMoreSpace),
            Err(_) => Self::check_fit(&candidate, Vec2::new(top.center().x, y), area),
        }
    }

    fn check_fit(candidate: &Rect, pos: Vec2, area: &Rect) -> Result<Vec2, PlacementError> {
        let rect = candidate.moved_to(pos);
        if area.contains_rect(&rect) {
            Ok(pos)
        } else if rect.top() > area.top() {
            Err(PlacementError::NoMoreSpace)
        } else {
            Err(PlacementError::OutOfBounds)
        }
    }
}

/// Center for a block of height `height` resting on `base_y`, keeping `x`.
pub fn position_on_base(x: f32, base_y: f32, height: f32) -> Vec2 {
    Vec2::new(x, base_y + height * 0.5)
}
