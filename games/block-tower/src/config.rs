use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;
use tower_engine::Rect;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings JSON: {0}")]
    Settings(#[source] serde_json::Error),
    #[error("invalid block catalog JSON: {0}")]
    Catalog(#[source] serde_json::Error),
    #[error("block catalog has duplicate id {0}")]
    DuplicateBlock(u32),
}

/// Elliptical trash hole.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TrashHoleSettings {
    pub center: Vec2,
    /// Full width and height of the oval.
    pub size: Vec2,
    /// Peak height of the fall arc.
    pub fall_height: f32,
}

impl Default for TrashHoleSettings {
    fn default() -> Self {
        Self {
            center: Vec2::new(200.0, 330.0),
            size: Vec2::new(180.0, 90.0),
            fall_height: 120.0,
        }
    }
}

/// Gameplay tuning, loaded from JSON. Every field is optional.
///
/// ```json
/// { "tower_area": { "min": [450, 60], "max": [750, 560] }, "hold_duration": 0.3 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TowerSettings {
    /// Bounds the tower must stay inside. `None` leaves the tower unwired.
    pub tower_area: Option<Rect>,
    pub trash_hole: TrashHoleSettings,
    /// Visible area used to size the jump arc. `None` makes jumps instantaneous.
    pub viewport: Option<Rect>,
    /// Storage key of the tower snapshot.
    pub save_key: String,
    pub seed: u64,

    /// Press-and-hold time before a tray block is cloned.
    pub hold_duration: f32,
    /// Squared pointer travel that turns a press into a drag.
    pub drag_threshold_sq: f32,
    /// Exponential follow rate of a dragged block towards the pointer (1/s).
    pub follow_sharpness: f32,

    pub jump_duration: f32,
    pub collapse_duration: f32,
    /// Extra start delay per block above the removed one.
    pub collapse_stagger: f32,

    pub pickup_scale: f32,
    pub pickup_duration: f32,
    pub destruction_peak_scale: f32,
    pub destruction_grow_duration: f32,
    pub destruction_shrink_duration: f32,
    pub trash_fall_duration: f32,
    pub trash_fall_scale: f32,

    pub autosave_interval: f32,

    /// Tray row: first slot center and spacing between slots.
    pub tray_origin: Vec2,
    pub tray_spacing: f32,
}

impl Default for TowerSettings {
    fn default() -> Self {
        Self {
            tower_area: Some(Rect::new(Vec2::new(450.0, 60.0), Vec2::new(750.0, 560.0))),
            trash_hole: TrashHoleSettings::default(),
            viewport: Some(Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0))),
            save_key: "TowerData".to_owned(),
            seed: 42,
            hold_duration: 0.3,
            drag_threshold_sq: 16.0,
            follow_sharpness: 25.0,
            jump_duration: 0.4,
            collapse_duration: 0.3,
            collapse_stagger: 0.05,
            pickup_scale: 1.15,
            pickup_duration: 0.2,
            destruction_peak_scale: 1.5,
            destruction_grow_duration: 0.15,
            destruction_shrink_duration: 0.25,
            trash_fall_duration: 0.6,
            trash_fall_scale: 0.6,
            autosave_interval: 5.0,
            tray_origin: Vec2::new(60.0, 60.0),
            tray_spacing: 80.0,
        }
    }
}

impl TowerSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Settings)
    }
}
