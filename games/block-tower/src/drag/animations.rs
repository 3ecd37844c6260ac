// drag/animations.rs
//
// Per-block scale animations for pickup, drop and destruction, plus the fall
// into the trash hole. Handles are kept on the block record so a later
// animation can supersede or stop them.

use std::f32::consts::PI;

use glam::Vec2;
use tower_engine::{Easing, EntityId, Tween};

use crate::block::DragType;
use crate::config::TowerSettings;
use crate::cue::{Cue, DragCue};
use crate::stage::Stage;
use crate::trash::TrashHole;
use super::session::SessionId;

#[derive(Debug, Clone)]
pub struct BlockAnimations {
    pickup_scale: f32,
    pickup_duration: f32,
    peak_scale: f32,
    grow_duration: f32,
    shrink_duration: f32,
    fall_duration: f32,
    fall_scale: f32,
}

impl BlockAnimations {
    pub fn new(settings: &TowerSettings) -> Self {
        Self {
            pickup_scale: settings.pickup_scale,
            pickup_duration: settings.pickup_duration,
            peak_scale: settings.destruction_peak_scale,
            grow_duration: settings.destruction_grow_duration,
            shrink_duration: settings.destruction_shrink_duration,
            fall_duration: settings.trash_fall_duration,
            fall_scale: settings.trash_fall_scale,
        }
    }

    fn scale_to(&self, stage: &mut Stage, block: EntityId, factor: f32, easing: Easing, cue: Cue) {
        let (Some(reference), Some(from)) = (
            stage.blocks.get(block).map(|b| b.reference_scale),
            stage.scene().get(block).map(|e| e.scale),
        ) else {
            return;
        };
        let id = stage.tweens.start(
            block,
            Tween::scale(from, reference * factor, self.pickup_duration, easing).with_on_complete(cue),
        );
        if let Some(b) = stage.blocks.get_mut(block) {
            b.scale_anim = Some(id);
        }
    }

    pub fn scale_up(&self, stage: &mut Stage, block: EntityId, session: SessionId) {
        let cue = Cue::Drag(DragCue::PickupRaised { session });
        self.scale_to(stage, block, self.pickup_scale, Easing::BackOut, cue);
    }

    pub fn scale_down(&self, stage: &mut Stage, block: EntityId, session: SessionId) {
        let cue = Cue::Drag(DragCue::Dropped { session });
        self.scale_to(stage, block, 1.0, Easing::QuadOut, cue);
    }

    /// Stop any scale animation and snap back to the reference scale.
    pub fn force_reset_scale(&self, stage: &mut Stage, block: EntityId) {
        let Some(b) = stage.blocks.get_mut(block) else {
            return;
        };
        if let Some(id) = b.scale_anim.take() {
            stage.tweens.remove(id);
        }
        let reference = b.reference_scale;
        if let Some(entity) = stage.ctx.scene.get_mut(block) {
            entity.scale = reference;
        }
    }

    /// Pop then shrink to nothing. The block is despawned on `Destroyed`.
    pub fn destruction(&self, stage: &mut Stage, block: EntityId) {
        let Some(b) = stage.blocks.get_mut(block) else {
            return;
        };
        b.drag_type = DragType::Destroying;
        b.scale_anim = None;
        let reference = b.reference_scale;
        let from = stage.scene().get(block).map_or(reference, |e| e.scale);
        let peak = reference * self.peak_scale;

        let id = stage.tweens.start(
            block,
            Tween::scale(from, peak, self.grow_duration, Easing::BackOut)
                .then(Tween::scale(peak, Vec2::ZERO, self.shrink_duration, Easing::BackIn))
                .with_on_complete(Cue::Drag(DragCue::Destroyed { block })),
        );
        if let Some(b) = stage.blocks.get_mut(block) {
            b.destroy_anim = Some(id);
        }
    }

    /// Arc into the hole while turning half over and shrinking. The block is
    /// despawned on `FellInHole`.
    pub fn trash_fall(&self, stage: &mut Stage, trash: &TrashHole, block: EntityId) {
        let Some(entity) = stage.scene().get(block) else {
            return;
        };
        let (start, rotation, scale) = (entity.pos, entity.rotation, entity.scale);
        let Some(b) = stage.blocks.get_mut(block) else {
            return;
        };
        b.drag_type = DragType::Destroying;
        b.scale_anim = None;
        let reference = b.reference_scale;

        let easing = Easing::QuadInOut;
        let fall = stage.tweens.start(
            block,
            Tween::path(trash.fall_path(start), self.fall_duration, easing)
                .with_on_complete(Cue::Drag(DragCue::FellInHole { block })),
        );
        stage.tweens.start(block, Tween::rotation(rotation, rotation + PI, self.fall_duration, easing));
        stage.tweens.start(block, Tween::scale(scale, reference * self.fall_scale, self.fall_duration, easing));
        if let Some(b) = stage.blocks.get_mut(block) {
            b.destroy_anim = Some(fall);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::World;

    fn anims() -> BlockAnimations {
        BlockAnimations::new(&TowerSettings::default())
    }

    #[test]
    fn pickup_then_drop_returns_to_reference() {
        let mut world = World::new();
        let b = world.block_at(100.0, 100.0);
        let session = SessionId(7);

        anims().scale_up(&mut world.stage(), b, session);
        assert!(world.blocks.get(b).unwrap().is_animating(&world.tweens));
        let cues = world.run_tweens(0.5);
        assert_eq!(cues, vec![Cue::Drag(DragCue::PickupRaised { session })]);
        assert!((world.ctx.scene.get(b).unwrap().scale.x - 1.15).abs() < 1e-4);

        anims().scale_down(&mut world.stage(), b, session);
        let cues = world.run_tweens(0.5);
        assert_eq!(cues, vec![Cue::Drag(DragCue::Dropped { session })]);
        assert!((world.ctx.scene.get(b).unwrap().scale.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn drop_supersedes_pickup() {
        let mut world = World::new();
        let b = world.block_at(100.0, 100.0);
        anims().scale_up(&mut world.stage(), b, SessionId(1));
        world.run_tweens(0.05);
        anims().scale_down(&mut world.stage(), b, SessionId(1));

        let cues = world.run_tweens(0.5);
        assert_eq!(cues, vec![Cue::Drag(DragCue::Dropped { session: SessionId(1) })]);
    }

    #[test]
    fn force_reset_kills_cue() {
        let mut world = World::new();
        let b = world.block_at(100.0, 100.0);
        anims().scale_up(&mut world.stage(), b, SessionId(1));
        world.run_tweens(0.05);
        anims().force_reset_scale(&mut world.stage(), b);

        assert_eq!(world.ctx.scene.get(b).unwrap().scale, Vec2::ONE);
        assert!(world.run_tweens(0.5).is_empty());
        // redundant reset is harmless
        anims().force_reset_scale(&mut world.stage(), b);
    }

    #[test]
    fn destruction_pops_then_vanishes() {
        let mut world = World::new();
        let b = world.block_at(100.0, 100.0);
        anims().destruction(&mut world.stage(), b);
        assert_eq!(world.blocks.drag_type(b), Some(DragType::Destroying));

        world.run_tweens(0.15);
        assert!(world.ctx.scene.get(b).unwrap().scale.x > 1.3);
        let cues = world.run_tweens(0.5);
        assert_eq!(cues, vec![Cue::Drag(DragCue::Destroyed { block: b })]);
        assert!(world.ctx.scene.get(b).unwrap().scale.x.abs() < 1e-4);
    }

    #[test]
    fn trash_fall_ends_in_hole() {
        let mut world = World::new();
        let trash = TrashHole::from(TowerSettings::default().trash_hole);
        let b = world.block_at(200.0, 330.0);
        anims().trash_fall(&mut world.stage(), &trash, b);

        let cues = world.run_tweens(1.0);
        assert_eq!(cues, vec![Cue::Drag(DragCue::FellInHole { block: b })]);
        let e = world.ctx.scene.get(b).unwrap();
        assert!((e.pos - trash.bottom()).length() < 1e-3);
        assert!((e.rotation - PI).abs() < 1e-4);
        assert!((e.scale.x - 0.6).abs() < 1e-4);
    }
}
