// tower/animation.rs
//
// Jump (one block arcs onto the stack) and collapse (blocks above a removed
// one settle down, staggered). Both set the in-flight flags on TowerState for
// their whole duration; the flags are cleared here when the last cue arrives.
// While a collapse runs the animator also knows where each moving block will
// come to rest, so a save taken mid-collapse records the settled tower.

use glam::Vec2;
use tower_engine::{Easing, EntityId, Rect, Tween};

use crate::config::TowerSettings;
use crate::cue::{Cue, TowerCue};
use crate::stage::Stage;
use super::state::TowerState;

/// How a structural animation was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Applied on the spot; the caller finishes the operation now.
    Instant,
    /// Running; the caller finishes when the cue comes back.
    Animated,
}

#[derive(Debug, Clone)]
struct CollapseBarrier {
    batch: u32,
    remaining: usize,
    targets: Vec<(EntityId, Vec2)>,
}

#[derive(Debug)]
pub struct TowerAnimator {
    viewport: Option<Rect>,
    jump_duration: f32,
    collapse_duration: f32,
    collapse_stagger: f32,
    barrier: Option<CollapseBarrier>,
    next_batch: u32,
    /// Block whose jump is running; it joins the tower when it lands.
    jumping: Option<EntityId>,
}

/// Arc height: half the room left above the higher endpoint, kept within
/// 10%..30% of the viewport height.
pub fn jump_height(viewport: &Rect, start_y: f32, target_y: f32) -> f32 {
    let h = viewport.height();
    ((viewport.top() - start_y.max(target_y)) * 0.5).clamp(0.1 * h, 0.3 * h)
}

impl TowerAnimator {
    pub fn new(settings: &TowerSettings) -> Self {
        Self {
            viewport: settings.viewport,
            jump_duration: settings.jump_duration,
            collapse_duration: settings.collapse_duration,
            collapse_stagger: settings.collapse_stagger,
            barrier: None,
            next_batch: 0,
            jumping: None,
        }
    }

    pub fn start_jump(&mut self, state: &mut TowerState, stage: &mut Stage, block: EntityId, target: Vec2) -> Settle {
        state.set_jump_in_flight(true);

        let (Some(viewport), Some(start)) = (self.viewport, stage.position(block)) else {
            log::warn!("jump: no viewport, settling {:?} in place", block);
            stage.set_position(block, target);
            state.set_jump_in_flight(false);
            return Settle::Instant;
        };

        let peak = (start + target) * 0.5 + Vec2::new(0.0, jump_height(&viewport, start.y, target.y));
        stage.tweens.start(
            block,
            Tween::path(vec![start, peak, target], self.jump_duration, Easing::QuadOut)
                .with_on_complete(Cue::Tower(TowerCue::JumpLanded { block, target })),
        );
        self.jumping = Some(block);
        Settle::Animated
    }

    /// Clear the jump flag. False if `block` is not the jump in flight, e.g. one
    /// dropped by `reset`.
    pub fn finish_jump(&mut self, state: &mut TowerState, block: EntityId) -> bool {
        if self.jumping != Some(block) {
            return false;
        }
        self.jumping = None;
        state.set_jump_in_flight(false);
        true
    }

    /// Move each `(block, resting center)` pair; block `i` starts `i * stagger` late.
    pub fn start_collapse(&mut self, state: &mut TowerState, stage: &mut Stage, moves: &[(EntityId, Vec2)]) -> Settle {
        if moves.is_empty() {
            return Settle::Instant;
        }
        state.set_collapse_in_flight(true);

        let batch = self.next_batch;
        self.next_batch = self.next_batch.wrapping_add(1);
        self.barrier = Some(CollapseBarrier { batch, remaining: moves.len(), targets: moves.to_vec() });

        for (i, &(block, to)) in moves.iter().enumerate() {
            let from = stage.position(block).unwrap_or(to);
            stage.tweens.start(
                block,
                Tween::position(from, to, self.collapse_duration, Easing::CubicOut)
                    .with_delay(i as f32 * self.collapse_stagger)
                    .with_on_complete(Cue::Tower(TowerCue::CollapseStep { batch })),
            );
        }
        Settle::Animated
    }

    /// Count one settled block. True once the whole batch has settled.
    pub fn on_collapse_step(&mut self, state: &mut TowerState, batch: u32) -> bool {
        let Some(barrier) = self.barrier.as_mut().filter(|b| b.batch == batch) else {
            return false;
        };
        barrier.remaining = barrier.remaining.saturating_sub(1);
        if barrier.remaining > 0 {
            return false;
        }
        self.barrier = None;
        state.set_collapse_in_flight(false);
        true
    }

    /// Where `block` comes to rest once the running collapse settles.
    pub fn resting_position(&self, block: EntityId) -> Option<Vec2> {
        let barrier = self.barrier.as_ref()?;
        barrier.targets.iter().find(|(id, _)| *id == block).map(|&(_, to)| to)
    }

    /// Forget any running batch, e.g. when the tower is rebuilt from storage.
    /// A block still mid-jump never joined the tower and is destroyed.
    pub fn reset(&mut self, state: &mut TowerState, stage: &mut Stage) {
        if let Some(block) = self.jumping.take() {
            log::debug!("jump of {:?} dropped", block);
            stage.destroy_block(block);
        }
        self.barrier = None;
        state.set_collapse_in_flight(false);
        state.set_jump_in_flight(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::World;

    #[test]
    fn jump_height_is_clamped() {
        let viewport = Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
        assert_eq!(jump_height(&viewport, 500.0, 100.0), 60.0);
        assert_eq!(jump_height(&viewport, 0.0, 0.0), 180.0);
        assert_eq!(jump_height(&viewport, 400.0, 200.0), 100.0);
    }

    #[test]
    fn jump_arcs_and_lands() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let mut anim = TowerAnimator::new(&TowerSettings::default());
        let b = world.block_at(100.0, 100.0);
        let target = Vec2::new(300.0, 100.0);

        assert_eq!(anim.start_jump(&mut state, &mut world.stage(), b, target), Settle::Animated);
        assert!(state.is_jump_in_flight());

        world.run_tweens(0.2);
        assert!(world.pos(b).y > 100.0);

        let cues = world.run_tweens(0.3);
        assert_eq!(cues, vec![Cue::Tower(TowerCue::JumpLanded { block: b, target })]);
        assert!(world.pos(b).distance(target) < 0.01);
    }

    #[test]
    fn jump_without_viewport_is_instant() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let settings = TowerSettings { viewport: None, ..TowerSettings::default() };
        let mut anim = TowerAnimator::new(&settings);
        let b = world.block_at(0.0, 0.0);

        let settle = anim.start_jump(&mut state, &mut world.stage(), b, Vec2::new(50.0, 50.0));
        assert_eq!(settle, Settle::Instant);
        assert!(!state.is_jump_in_flight());
        assert_eq!(world.pos(b), Vec2::new(50.0, 50.0));
        assert!(world.tweens.is_empty());
    }

    #[test]
    fn collapse_barrier_waits_for_every_block() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let mut anim = TowerAnimator::new(&TowerSettings::default());
        let a = world.block_at(0.0, 150.0);
        let b = world.block_at(0.0, 210.0);
        let moves = [(a, Vec2::new(0.0, 90.0)), (b, Vec2::new(0.0, 150.0))];

        assert_eq!(anim.start_collapse(&mut state, &mut world.stage(), &moves), Settle::Animated);
        assert!(state.is_collapse_in_flight());

        let mut settled = Vec::new();
        for cue in world.run_tweens(1.0) {
            let Cue::Tower(TowerCue::CollapseStep { batch }) = cue else {
                panic!("unexpected cue {:?}", cue);
            };
            settled.push(anim.on_collapse_step(&mut state, batch));
        }
        assert_eq!(settled, vec![false, true]);
        assert!(!state.is_collapse_in_flight());
        assert_eq!(world.pos(b), Vec2::new(0.0, 150.0));
    }

    #[test]
    fn collapse_targets_are_known_until_settled() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let mut anim = TowerAnimator::new(&TowerSettings::default());
        let a = world.block_at(0.0, 150.0);
        let other = world.block_at(0.0, 300.0);
        anim.start_collapse(&mut state, &mut world.stage(), &[(a, Vec2::new(0.0, 90.0))]);

        world.run_tweens(0.1);
        assert_eq!(anim.resting_position(a), Some(Vec2::new(0.0, 90.0)));
        assert_eq!(anim.resting_position(other), None);

        for cue in world.run_tweens(1.0) {
            if let Cue::Tower(TowerCue::CollapseStep { batch }) = cue {
                anim.on_collapse_step(&mut state, batch);
            }
        }
        assert_eq!(anim.resting_position(a), None);
    }

    #[test]
    fn reset_drops_the_jumping_block() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let mut anim = TowerAnimator::new(&TowerSettings::default());
        let b = world.block_at(100.0, 100.0);
        anim.start_jump(&mut state, &mut world.stage(), b, Vec2::new(300.0, 100.0));
        world.run_tweens(0.1);

        anim.reset(&mut state, &mut world.stage());
        assert!(!state.is_jump_in_flight());
        assert!(!world.ctx.scene.contains(b));
        assert!(world.run_tweens(1.0).is_empty());
        assert!(!anim.finish_jump(&mut state, b));
    }

    #[test]
    fn stale_batch_is_ignored() {
        let mut state = TowerState::new();
        let mut anim = TowerAnimator::new(&TowerSettings::default());
        assert!(!anim.on_collapse_step(&mut state, 3));
    }

    #[test]
    fn empty_collapse_is_instant() {
        let mut world = World::new();
        let mut state = TowerState::new();
        let mut anim = TowerAnimator::new(&TowerSettings::default());
        assert_eq!(anim.start_collapse(&mut state, &mut world.stage(), &[]), Settle::Instant);
        assert!(!state.is_collapse_in_flight());
    }
}
