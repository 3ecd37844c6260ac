use tower_engine::*;

use crate::block::{BlockFactory, Blocks};
use crate::catalog::BlockCatalog;
use crate::config::TowerSettings;
use crate::cue::Cue;
use crate::drag::DragController;
use crate::stage::Stage;
use crate::tower::TowerController;
use crate::tray;
use crate::ui::{Message, StringTable, TextResolver, Ui};

// Custom event kinds (host → game)
pub const CUSTOM_SUSPEND: u32 = 1;
pub const CUSTOM_DELETE_SAVE: u32 = 2;
pub const CUSTOM_RELOAD: u32 = 3;

pub struct BlockTower {
    settings: TowerSettings,
    config: GameConfig,
    factory: BlockFactory,
    blocks: Blocks,
    tweens: TweenState<Cue>,
    ui: Ui,
    tower: TowerController,
    drag: DragController,
    gestures: GestureTracker,
    autosave: Interval,
}

/// Splits the game into a `Stage` plus the two controllers that act on it.
macro_rules! split {
    ($self:ident, $ctx:expr) => {
        (
            Stage {
                ctx: &mut *$ctx,
                blocks: &mut $self.blocks,
                tweens: &mut $self.tweens,
                factory: &$self.factory,
                ui: &mut $self.ui,
            },
            &mut $self.tower,
            &mut $self.drag,
        )
    };
}

impl BlockTower {
    /// Default settings and catalog, in-memory storage.
    pub fn new() -> Self {
        Self::with_store(TowerSettings::default(), Box::new(MemoryStore::new()))
    }

    pub fn with_store(settings: TowerSettings, store: Box<dyn SaveStore>) -> Self {
        Self::from_parts(settings, BlockCatalog::default(), store, Box::new(StringTable::english()))
    }

    pub fn from_parts(
        settings: TowerSettings,
        catalog: BlockCatalog,
        store: Box<dyn SaveStore>,
        text: Box<dyn TextResolver>,
    ) -> Self {
        let config = GameConfig::default();
        Self {
            tower: TowerController::new(&settings, store),
            drag: DragController::new(&settings),
            gestures: GestureTracker::new(settings.drag_threshold_sq),
            autosave: Interval::new(settings.autosave_interval),
            factory: BlockFactory::new(catalog),
            blocks: Blocks::new(),
            tweens: TweenState::new(),
            ui: Ui::new(text),
            config,
            settings,
        }
    }

    pub fn settings(&self) -> &TowerSettings {
        &self.settings
    }

    pub fn tower(&self) -> &TowerController {
        &self.tower
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    fn on_custom(&mut self, ctx: &mut EngineContext, kind: u32) {
        let (mut stage, tower, _) = split!(self, ctx);
        match kind {
            CUSTOM_SUSPEND => tower.save_state(&mut stage),
            CUSTOM_DELETE_SAVE => {
                if let Err(err) = tower.clear_saved_state(&mut stage) {
                    log::error!("delete save failed: {}", err);
                }
                self.autosave.reset();
            }
            CUSTOM_RELOAD => tower.load_state(&mut stage),
            other => log::warn!("unknown custom event {}", other),
        }
    }

    /// Route finished-tween cues back to whoever started them.
    fn dispatch_cues(&mut self, ctx: &mut EngineContext) {
        let cues = self.tweens.take_completed();
        let (mut stage, tower, drag) = split!(self, ctx);
        for cue in cues {
            match cue {
                Cue::Tower(cue) => tower.on_cue(&mut stage, cue),
                Cue::Drag(cue) => drag.on_cue(cue, &mut stage, tower),
            }
        }
    }
}

/// Parse host-supplied settings and catalog. Malformed input is logged and
/// replaced by the defaults so the game still starts.
pub fn configure(settings_json: &str, catalog_json: &str) -> (TowerSettings, BlockCatalog) {
    let settings = TowerSettings::from_json(settings_json).unwrap_or_else(|err| {
        log::error!("{}; using default settings", err);
        TowerSettings::default()
    });
    let catalog = BlockCatalog::from_json(catalog_json).unwrap_or_else(|err| {
        log::error!("{}; using default block catalog", err);
        BlockCatalog::default()
    });
    (settings, catalog)
}

impl Default for BlockTower {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BlockTower {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let (mut stage, tower, _) = split!(self, ctx);
        tray::populate(&mut stage, &self.settings);
        tower.initialize(&mut stage);
        stage.show(Message::StartGame);
        log::info!("block tower ready");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = self.config.fixed_dt;

        for event in input.iter() {
            if let InputEvent::Custom { kind, .. } = *event {
                self.on_custom(ctx, kind);
                continue;
            }
            if let Some(pointer) = self.gestures.feed(event) {
                let (mut stage, tower, drag) = split!(self, ctx);
                drag.on_pointer(pointer, &mut stage, tower);
            }
        }

        {
            let (mut stage, _, drag) = split!(self, ctx);
            drag.tick(dt, &mut stage);
        }
        self.tweens.tick(dt, &mut ctx.scene);
        self.dispatch_cues(ctx);

        if self.autosave.tick(dt) > 0 {
            let (mut stage, tower, _) = split!(self, ctx);
            tower.save_state(&mut stage);
        }
    }

    fn suspend(&mut self, ctx: &mut EngineContext) {
        let (mut stage, tower, _) = split!(self, ctx);
        tower.save_state(&mut stage);
    }
}
