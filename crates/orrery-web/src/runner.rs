use orrery_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, InstanceBuffer,
    FrameTimer, ProtocolLayout, CameraUniform,
    build_instance_buffer,
};

/// Generic game runner that wires up the frame loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    instances: InstanceBuffer,
    timer: FrameTimer,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Camera block of the last frame, for direct pointer reads.
    camera: CameraUniform,
    /// Whole frame packed per `ProtocolLayout`, for one-copy transfer.
    frame_buffer: Vec<f32>,
    frame_counter: u32,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::from_config(&config);
        let camera = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_instances),
            timer: FrameTimer::new(config.max_frame_dt),
            layout,
            config,
            initialized: false,
            camera,
            frame_buffer: Vec::new(),
            frame_counter: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.camera = self.ctx.camera.uniform();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forward game-specific JSON configuration.
    pub fn load_config(&mut self, json: &str) {
        self.game.load_config(json);
    }

    /// Viewport resized (CSS pixels).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height);
    }

    /// Run one rendered frame: update game, rebuild instance buffer, pack frame.
    pub fn tick(&mut self, frame_dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let dt = self.timer.tick(frame_dt);
        self.game.update(&mut self.ctx, &self.input, dt);

        // Staged intents are consumed exactly once
        self.input.drain();

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "frame {} ({:.1}s): {} events exceed capacity {}, truncating",
                self.timer.frames(),
                self.timer.elapsed(),
                self.ctx.events.len(),
                self.config.max_events
            );
            self.ctx.events.truncate(self.config.max_events);
        }

        build_instance_buffer(self.ctx.scene.iter(), &mut self.instances);
        self.camera = self.ctx.camera.uniform();

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.layout.pack_frame(
            &mut self.frame_buffer,
            self.frame_counter,
            self.instances.instances(),
            &self.camera,
            &self.ctx.events,
        );
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable game access for exports that stage data outside the input queue.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
