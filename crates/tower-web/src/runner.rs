use tower_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, InstanceBuffer,
    FixedTimestep, build_instances,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    instances: InstanceBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_entities),
            timestep: FixedTimestep::new(config.fixed_dt),
            game,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        build_instances(self.ctx.scene.iter(), &mut self.instances);
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed steps of game logic, then rebuild the instance buffer.
    ///
    /// Input is handed to the first step only; later catch-up steps see an
    /// empty queue so no event is handled twice.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.input.clear();
        }

        build_instances(self.ctx.scene.iter(), &mut self.instances);
    }

    /// The page is going to the background: let the game persist, drop the partial step.
    pub fn suspend(&mut self) {
        if !self.initialized {
            return;
        }
        self.game.suspend(&mut self.ctx);
        self.timestep.reset();
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}
