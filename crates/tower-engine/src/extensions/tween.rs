// extensions/tween.rs
//
// Tween system: animated entity transitions keyed by EntityId, reporting
// completion through a game-defined cue type.
//
// Usage:
//   let mut tweens: TweenState<MyCue> = TweenState::new();
//   let id = tweens.start(entity_id, Tween::position(from, to, 0.4, Easing::QuadOut)
//       .with_on_complete(MyCue::Landed(entity_id)));
//   tweens.tick(dt, &mut scene);
//   for cue in tweens.take_completed() { /* resume whatever was waiting */ }
//
// Ordering: tweens live in a BTreeMap keyed by increasing id, so cues that
// become due in the same tick are reported in start order.

use std::collections::BTreeMap;
use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use super::easing::{Easing, ease, ease_vec2};
use super::path::catmull_rom;

/// What property a tween animates.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenTarget {
    /// Straight line on Entity.pos.
    Position { from: Vec2, to: Vec2 },
    /// Entity.pos along a Catmull-Rom spline through the waypoints.
    Path { points: Vec<Vec2> },
    /// Entity.rotation
    Rotation { from: f32, to: f32 },
    /// Entity.scale
    Scale { from: Vec2, to: Vec2 },
}

/// Entity property a tween writes. At most one tween per entity and channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenChannel {
    Position,
    Rotation,
    Scale,
}

impl TweenTarget {
    pub fn channel(&self) -> TweenChannel {
        match self {
            TweenTarget::Position { .. } | TweenTarget::Path { .. } => TweenChannel::Position,
            TweenTarget::Rotation { .. } => TweenChannel::Rotation,
            TweenTarget::Scale { .. } => TweenChannel::Scale,
        }
    }

    fn apply(&self, entity: &mut Entity, t: f32, easing: Easing) {
        match self {
            TweenTarget::Position { from, to } => entity.pos = ease_vec2(*from, *to, t, easing),
            TweenTarget::Path { points } => entity.pos = catmull_rom(points, easing.apply(t)),
            TweenTarget::Rotation { from, to } => entity.rotation = ease(*from, *to, t, easing),
            TweenTarget::Scale { from, to } => entity.scale = ease_vec2(*from, *to, t, easing),
        }
    }
}

/// A single tween animation, optionally followed by more on the same channel.
#[derive(Debug, Clone)]
pub struct Tween<C = u32> {
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    pub elapsed: f32,
    /// Seconds to wait before the first write to the entity.
    pub delay: f32,
    pub easing: Easing,
    /// Cue reported once the whole chain has finished.
    pub on_complete: Option<C>,
    next: Option<Box<Tween<C>>>,
}

impl<C> Tween<C> {
    fn with_target(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            delay: 0.0,
            easing,
            on_complete: None,
            next: None,
        }
    }

    pub fn position(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Position { from, to }, duration, easing)
    }

    /// Follow a curved path; easing is applied to progress along the whole path.
    pub fn path(points: Vec<Vec2>, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Path { points }, duration, easing)
    }

    pub fn rotation(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Rotation { from, to }, duration, easing)
    }

    pub fn scale(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Scale { from, to }, duration, easing)
    }

    // -- Builder methods --

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_on_complete(mut self, cue: C) -> Self {
        self.on_complete = Some(cue);
        self
    }

    /// Play `next` after this one. Both should write the same channel.
    pub fn then(mut self, next: Tween<C>) -> Self {
        let tail = match self.next.take() {
            Some(tail) => (*tail).then(next),
            None => next,
        };
        self.next = Some(Box::new(tail));
        self
    }

    pub fn channel(&self) -> TweenChannel {
        self.target.channel()
    }

    /// Normalized progress of the current segment [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn write(&self, entity: &mut Entity) {
        self.target.apply(entity, self.progress(), self.easing);
    }

    /// Swap in the chained tween, carrying the chain's cue over.
    fn advance_chain(&mut self) -> bool {
        let Some(next) = self.next.take() else {
            return false;
        };
        let cue = self.on_complete.take();
        *self = *next;
        if cue.is_some() {
            self.on_complete = cue;
        }
        true
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// Manages all active tweens.
#[derive(Debug)]
pub struct TweenState<C = u32> {
    tweens: BTreeMap<TweenId, (EntityId, Tween<C>)>,
    next_id: u32,
    completed: Vec<C>,
}

impl<C> Default for TweenState<C> {
    fn default() -> Self {
        Self {
            tweens: BTreeMap::new(),
            next_id: 0,
            completed: Vec::new(),
        }
    }
}

impl<C> TweenState<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween on an entity. A tween already running on the same entity
    /// and channel is killed first and its cue is dropped.
    pub fn start(&mut self, entity: EntityId, tween: Tween<C>) -> TweenId {
        let channel = tween.channel();
        self.tweens.retain(|_, (e, t)| !(*e == entity && t.channel() == channel));
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (entity, tween));
        id
    }

    /// Kill a tween. Safe to call on finished or unknown handles.
    /// A killed tween never reports its cue.
    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Kill all tweens for an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|_, (e, _)| *e != entity);
    }

    /// Still running (including while waiting out its delay).
    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    /// Whether the entity has a running tween on `channel`.
    pub fn is_animating(&self, entity: EntityId, channel: TweenChannel) -> bool {
        self.tweens.values().any(|(e, t)| *e == entity && t.channel() == channel)
    }

    /// Advance all tweens and apply them to entities in the scene.
    /// Returns the number of tweens that finished this tick.
    ///
    /// A tween whose entity no longer exists finishes immediately, so anything
    /// counting on its cue is still released.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut finished = Vec::new();

        for (&id, (entity_id, tween)) in self.tweens.iter_mut() {
            let Some(entity) = scene.get_mut(*entity_id) else {
                finished.push(id);
                continue;
            };

            let mut remaining = dt;
            loop {
                if tween.delay > 0.0 {
                    if remaining < tween.delay {
                        tween.delay -= remaining;
                        break;
                    }
                    remaining -= tween.delay;
                    tween.delay = 0.0;
                }

                tween.elapsed += remaining;
                tween.write(entity);
                if tween.elapsed < tween.duration {
                    break;
                }

                let overflow = tween.elapsed - tween.duration;
                if tween.advance_chain() {
                    remaining = overflow;
                    continue;
                }
                finished.push(id);
                break;
            }
        }

        let count = finished.len();
        for id in finished {
            if let Some((_, tween)) = self.tweens.remove(&id) {
                if let Some(cue) = tween.on_complete {
                    self.completed.push(cue);
                }
            }
        }
        count
    }

    /// Take the cues of tweens finished so far, in start order.
    pub fn take_completed(&mut self) -> Vec<C> {
        std::mem::take(&mut self.completed)
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with(ids: &[u32]) -> Scene {
        let mut scene = Scene::new();
        for &id in ids {
            scene.spawn(Entity::new(EntityId(id)));
        }
        scene
    }

    #[test]
    fn tween_position() {
        let mut tweens: TweenState = TweenState::new();
        let mut scene = scene_with(&[1]);
        let id = EntityId(1);

        tweens.start(id, Tween::position(Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0, Easing::Linear));

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 50.0).abs() < 0.01);

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 100.0).abs() < 0.01);
        assert!(tweens.is_empty());
    }

    #[test]
    fn cues_fire_in_start_order_on_tie() {
        let mut tweens = TweenState::new();
        let mut scene = scene_with(&[1, 2, 3]);

        tweens.start(EntityId(3), Tween::rotation(0.0, 1.0, 0.3, Easing::Linear).with_on_complete("c"));
        tweens.start(EntityId(1), Tween::rotation(0.0, 1.0, 0.3, Easing::Linear).with_on_complete("a"));
        tweens.start(EntityId(2), Tween::rotation(0.0, 1.0, 0.3, Easing::Linear).with_on_complete("b"));

        tweens.tick(0.3, &mut scene);
        assert_eq!(tweens.take_completed(), vec!["c", "a", "b"]);
    }

    #[test]
    fn delay_holds_entity_still() {
        let mut tweens: TweenState = TweenState::new();
        let mut scene = scene_with(&[1]);
        let id = EntityId(1);

        tweens.start(id, Tween::position(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0, Easing::Linear).with_delay(0.5));
        scene.get_mut(id).unwrap().pos = Vec2::new(-5.0, 0.0);

        tweens.tick(0.25, &mut scene);
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(-5.0, 0.0));

        // 0.25 left of delay, 0.5 into the tween
        tweens.tick(0.75, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 5.0).abs() < 0.01);
    }

    #[test]
    fn killed_tween_never_reports() {
        let mut tweens = TweenState::new();
        let mut scene = scene_with(&[1]);

        let id = tweens.start(EntityId(1), Tween::rotation(0.0, 1.0, 0.1, Easing::Linear).with_on_complete(7u32));
        assert!(tweens.remove(id));
        assert!(!tweens.remove(id));
        tweens.tick(1.0, &mut scene);
        assert!(tweens.take_completed().is_empty());
        assert!(!tweens.is_active(id));
    }

    #[test]
    fn new_tween_supersedes_same_channel_only() {
        let mut tweens = TweenState::new();
        let mut scene = scene_with(&[1]);
        let e = EntityId(1);

        let first = tweens.start(e, Tween::scale(Vec2::ONE, Vec2::splat(2.0), 1.0, Easing::Linear).with_on_complete(1u32));
        let spin = tweens.start(e, Tween::rotation(0.0, 1.0, 1.0, Easing::Linear).with_on_complete(2u32));
        let second = tweens.start(e, Tween::scale(Vec2::splat(2.0), Vec2::ONE, 0.5, Easing::Linear).with_on_complete(3u32));

        assert!(!tweens.is_active(first));
        assert!(tweens.is_active(spin));
        assert!(tweens.is_active(second));

        tweens.tick(1.0, &mut scene);
        assert_eq!(tweens.take_completed(), vec![2, 3]);
    }

    #[test]
    fn chain_runs_segments_and_reports_once() {
        let mut tweens = TweenState::new();
        let mut scene = scene_with(&[1]);
        let e = EntityId(1);

        let id = tweens.start(
            e,
            Tween::scale(Vec2::ONE, Vec2::splat(1.5), 0.15, Easing::Linear)
                .then(Tween::scale(Vec2::splat(1.5), Vec2::ZERO, 0.25, Easing::Linear))
                .with_on_complete(9u32),
        );

        tweens.tick(0.15, &mut scene);
        assert!((scene.get(e).unwrap().scale.x - 1.5).abs() < 0.01);
        assert!(tweens.is_active(id));
        assert!(tweens.take_completed().is_empty());

        tweens.tick(0.25, &mut scene);
        assert!(scene.get(e).unwrap().scale.x.abs() < 0.01);
        assert_eq!(tweens.take_completed(), vec![9]);
    }

    #[test]
    fn missing_entity_finishes_immediately() {
        let mut tweens = TweenState::new();
        let mut scene = Scene::new();

        tweens.start(EntityId(42), Tween::rotation(0.0, 1.0, 10.0, Easing::Linear).with_on_complete(1u32));
        assert_eq!(tweens.tick(0.01, &mut scene), 1);
        assert_eq!(tweens.take_completed(), vec![1]);
    }

    #[test]
    fn remove_entity_tweens() {
        let mut tweens: TweenState = TweenState::new();
        let id = EntityId(1);

        tweens.start(id, Tween::position(Vec2::ZERO, Vec2::ONE, 1.0, Easing::Linear));
        tweens.start(id, Tween::rotation(0.0, 1.0, 1.0, Easing::Linear));
        assert_eq!(tweens.len(), 2);
        assert!(tweens.is_animating(id, TweenChannel::Rotation));

        tweens.remove_entity(id);
        assert!(tweens.is_empty());
    }
}
