/// Solar System: a time-accelerated orrery with a follow camera.
///
/// The UI stages intents as custom events; each frame the game applies them,
/// advances the clock, places every body, steps the camera rig and (a few
/// times per second) reports the clock and selection back to the UI.

use glam::{Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::{BodyRegistry, CLOUD_SPIN_RATE};
use crate::camera_rig::{CameraRig, Focus, RigPhase};
use crate::clock::{RunLength, SimulationClock};
use crate::config::SimConfig;
use crate::i18n::Language;
use crate::orbit;

// ── Custom event kinds from the UI ───────────────────────────────────

pub const CUSTOM_SET_SPEED: u32 = 1;
/// a, b, c = years, months, days. Starts immediately.
pub const CUSTOM_REQUEST_RUN: u32 = 2;
/// a, b, c = years, months, days. Staged for the next toggle.
pub const CUSTOM_SET_RUN_LENGTH: u32 = 3;
pub const CUSTOM_TOGGLE_RUN: u32 = 4;
pub const CUSTOM_RESET: u32 = 5;
/// a = body index, negative for the overview.
pub const CUSTOM_SELECT: u32 = 6;
/// a = 0 (en) or 1 (mn).
pub const CUSTOM_SET_LANGUAGE: u32 = 7;
/// a = 1 while an immersive session is active.
pub const CUSTOM_SET_IMMERSIVE: u32 = 8;
/// Viewport resize (sent by worker as kind=99).
pub const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the UI ───────────────────────────────────────

/// a = whole days, b = running, c = a bounded run just finished.
pub const EVENT_CLOCK: f32 = 1.0;
/// a = whole days. Once per bounded run.
pub const EVENT_RUN_FINISHED: f32 = 2.0;
/// a = index or -1, b = distance traveled (million km), c = velocity (km/s).
pub const EVENT_SELECTION: f32 = 3.0;
/// a = flying, b = index or -1.
pub const EVENT_CAMERA: f32 = 4.0;

// ── Visuals ──────────────────────────────────────────────────────────

const STAR_EMISSIVE: f32 = 1.0;
/// Ring radii as multiples of the planet radius.
const RING_INNER: f32 = 1.4;
const RING_OUTER: f32 = 2.5;

/// Instance buffer capacity, and so the largest body set that can be loaded.
const MAX_BODIES: usize = 32;

/// An in-progress pointer press.
#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Vec2,
    last: Vec2,
    moved: bool,
}

pub struct SolarSystem {
    config: SimConfig,
    registry: BodyRegistry,
    /// Replacement data staged by `load_bodies`, installed next frame.
    pending_registry: Option<BodyRegistry>,
    /// Body key staged by `select_key`, resolved next frame against the
    /// registry in force by then.
    pending_key: Option<String>,
    clock: SimulationClock,
    rig: CameraRig,
    run_length: RunLength,
    language: Language,
    immersive: bool,
    /// Entity per body, same order as the registry.
    body_ids: Vec<EntityId>,
    snapshot: Throttle,
    drag: Option<Drag>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    pub fn with_config(config: SimConfig) -> Self {
        let mut clock = SimulationClock::new(config.days_per_second)
            .with_speed_range(config.speed_min, config.speed_max);
        clock.set_speed(config.initial_speed);

        Self {
            rig: CameraRig::new(config.camera.clone()),
            snapshot: Throttle::new(config.snapshot_hz),
            config,
            registry: BodyRegistry::solar_system(),
            pending_registry: None,
            pending_key: None,
            clock,
            run_length: RunLength::default(),
            language: Language::default(),
            immersive: false,
            body_ids: Vec::new(),
            drag: None,
        }
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn selected(&self) -> Option<usize> {
        self.rig.selection()
    }

    pub fn rig_phase(&self) -> RigPhase {
        self.rig.phase()
    }

    pub fn run_length(&self) -> RunLength {
        self.run_length
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Stage a replacement body set (JSON array). Invalid or oversized data
    /// is logged and the current bodies stay.
    pub fn load_bodies(&mut self, json: &str) -> bool {
        let max = self.config().max_instances;
        match BodyRegistry::from_json(json).and_then(|registry| registry.within(max)) {
            Ok(registry) => {
                log::info!("solar-system: staged {} bodies", registry.len());
                self.pending_registry = Some(registry);
                true
            }
            Err(e) => {
                log::warn!("solar-system: body data rejected: {e}");
                false
            }
        }
    }

    /// Stage a selection by body key; an empty key returns to the overview.
    pub fn select_key(&mut self, key: &str) {
        self.pending_key = Some(key.to_owned());
    }

    fn apply_config(&mut self, config: SimConfig) {
        self.clock.set_days_per_second(config.days_per_second);
        self.clock.set_speed_range(config.speed_min, config.speed_max);
        self.rig.set_settings(config.camera.clone());
        self.snapshot = Throttle::new(config.snapshot_hz);
        self.config = config;
    }

    // ── Bodies ─────────────────────────────────────────────────────

    fn spawn_bodies(&mut self, ctx: &mut EngineContext) {
        self.body_ids.clear();
        let total_days = self.clock.total_days();

        for body in self.registry.iter() {
            let color = MeshColor::from_hex(&body.color).unwrap_or_else(|| {
                log::warn!("solar-system: bad color {} for {}", body.color, body.key);
                MeshColor::new(1.0, 1.0, 1.0)
            });
            let mut mesh = MeshComponent::sphere(body.radius, color)
                .with_orbit(body.orbit_radius)
                .with_atmosphere(body.atmosphere)
                .with_clouds(body.clouds);
            if body.is_star() {
                mesh = mesh.with_emissive(STAR_EMISSIVE);
            }
            if body.ring {
                mesh = mesh.with_ring(body.radius * RING_INNER, body.radius * RING_OUTER);
            }

            let (x, z) = orbit::orbital_position(body, total_days);
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(body.key.as_str())
                    .with_pos(Vec3::new(x as f32, 0.0, z as f32))
                    .with_mesh(mesh),
            );
            self.body_ids.push(id);
        }
    }

    fn install_registry(&mut self, ctx: &mut EngineContext, registry: BodyRegistry) {
        for id in self.body_ids.drain(..) {
            ctx.scene.despawn(id);
        }
        self.select(ctx, None);
        self.registry = registry;
        self.spawn_bodies(ctx);
        log::info!("solar-system: installed {} bodies", self.registry.len());
    }

    /// Place every body for `total_days` and advance its spin.
    fn place_bodies(&self, ctx: &mut EngineContext, total_days: f64, dt: f32) {
        let selected = self.rig.selection();
        for (i, (body, id)) in self.registry.iter().zip(&self.body_ids).enumerate() {
            let Some(entity) = ctx.scene.get_mut(*id) else {
                continue;
            };
            let (x, z) = orbit::orbital_position(body, total_days);
            entity.pos = Vec3::new(x as f32, 0.0, z as f32);
            entity.spin = orbit::advance_spin(entity.spin, body.spin_rate(), dt);
            if body.clouds {
                entity.cloud_spin = orbit::advance_spin(entity.cloud_spin, CLOUD_SPIN_RATE, dt);
            }
            entity.highlight = flag(selected == Some(i));
        }
    }

    fn focus(&self, ctx: &EngineContext) -> Option<Focus> {
        let index = self.rig.selection()?;
        let body = self.registry.get(index)?;
        let position = ctx.scene.world_pos(*self.body_ids.get(index)?)?;
        Some(Focus { position, vantage: self.rig.settings().vantage(body) })
    }

    // ── Selection ──────────────────────────────────────────────────

    fn select(&mut self, ctx: &mut EngineContext, selection: Option<usize>) {
        if !self.rig.select(selection) {
            return;
        }
        match selection.and_then(|i| self.registry.get(i)) {
            Some(body) => log::debug!("solar-system: focus {}", body.key),
            None => log::debug!("solar-system: overview"),
        }
        ctx.emit_event(GameEvent::new(EVENT_CAMERA, flag(true), index_or_none(selection), 0.0));
        self.snapshot.prime();
    }

    /// Nearest body whose enlarged hit sphere the view ray crosses.
    fn pick(&self, ctx: &EngineContext, x: f32, y: f32) -> Option<usize> {
        let ray = ctx.camera.ray_from_ndc(x, y)?;
        let controls = &self.config.controls;

        self.registry
            .iter()
            .zip(&self.body_ids)
            .enumerate()
            .filter_map(|(i, (body, id))| {
                let center = ctx.scene.world_pos(*id)?;
                let radius = if body.is_star() {
                    controls.star_hit_radius
                } else {
                    (body.radius * controls.planet_hit_factor).max(controls.planet_hit_min)
                };
                ray.intersect_sphere(center, radius).map(|t| (i, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn resolve_key(&mut self, ctx: &mut EngineContext, key: &str) {
        if key.is_empty() {
            self.select(ctx, None);
        } else if let Some(index) = self.registry.index_of(key) {
            self.select(ctx, Some(index));
        } else {
            log::warn!("solar-system: unknown body `{key}`");
        }
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32, c: f32) {
        match kind {
            CUSTOM_SET_SPEED => {
                if !self.clock.set_speed(a as f64) {
                    log::debug!("solar-system: ignored speed {a}");
                }
            }
            CUSTOM_REQUEST_RUN => {
                self.run_length = RunLength::from_raw(a, b, c);
                self.clock.start(self.run_length.total_days());
                self.snapshot.prime();
            }
            CUSTOM_SET_RUN_LENGTH => {
                self.run_length = RunLength::from_raw(a, b, c);
            }
            CUSTOM_TOGGLE_RUN => {
                self.clock.toggle(self.run_length.total_days());
                self.snapshot.prime();
            }
            CUSTOM_RESET => {
                self.clock.reset();
                self.run_length = RunLength::default();
                self.select(ctx, None);
                self.snapshot.prime();
            }
            CUSTOM_SELECT => {
                if !a.is_finite() || a < 0.0 {
                    self.select(ctx, None);
                } else if (a as usize) < self.registry.len() {
                    self.select(ctx, Some(a as usize));
                } else {
                    log::warn!("solar-system: no body at index {a}");
                }
            }
            CUSTOM_SET_LANGUAGE => {
                self.language = Language::from_index(a as u32);
            }
            CUSTOM_SET_IMMERSIVE => {
                let on = a > 0.5;
                if on != self.immersive {
                    log::info!("solar-system: immersive {}", if on { "on" } else { "off" });
                }
                self.immersive = on;
                self.rig.set_suspended(on);
                self.drag = None;
            }
            CUSTOM_RESIZE => {
                ctx.camera.resize(a, b);
            }
            _ => log::debug!("solar-system: unknown custom event {kind}"),
        }
    }

    fn handle_pointer(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        // Immersive sessions bring their own controllers.
        if self.immersive {
            return;
        }
        let controls = &self.config.controls;

        match *event {
            InputEvent::PointerDown { x, y } => {
                let at = Vec2::new(x, y);
                self.drag = Some(Drag { start: at, last: at, moved: false });
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(drag) = &mut self.drag {
                    let at = Vec2::new(x, y);
                    if !drag.moved && at.distance(drag.start) > controls.drag_threshold {
                        drag.moved = true;
                    }
                    if drag.moved {
                        let delta = at - drag.last;
                        ctx.camera.orbit(-delta.x * controls.orbit_sensitivity, delta.y * controls.orbit_sensitivity);
                    }
                    drag.last = at;
                }
            }
            InputEvent::PointerUp { x, y } => {
                if let Some(drag) = self.drag.take() {
                    if !drag.moved {
                        if let Some(index) = self.pick(ctx, x, y) {
                            self.select(ctx, Some(index));
                        }
                    }
                }
            }
            InputEvent::Wheel { delta } => {
                ctx.camera.dolly(delta * controls.wheel_step, controls.min_distance, controls.max_distance);
            }
            InputEvent::Custom { .. } => {}
        }
    }

    // ── Output ─────────────────────────────────────────────────────

    fn emit_snapshot(&mut self, ctx: &mut EngineContext) {
        let snap = self.clock.snapshot();
        let finished = self.clock.take_finished();
        ctx.emit_event(GameEvent::new(
            EVENT_CLOCK,
            snap.total_days_floor as f32,
            flag(snap.running),
            flag(finished),
        ));

        let selection = self.rig.selection();
        let (distance, velocity) = match selection.and_then(|i| self.registry.get(i)) {
            Some(body) => (
                orbit::distance_traveled_km(body.velocity_km_s, snap.total_days_floor as f64) / 1_000_000.0,
                body.velocity_km_s,
            ),
            None => (0.0, 0.0),
        };
        ctx.emit_event(GameEvent::new(
            EVENT_SELECTION,
            index_or_none(selection),
            distance as f32,
            velocity as f32,
        ));
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn index_or_none(selection: Option<usize>) -> f32 {
    selection.map_or(-1.0, |i| i as f32)
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: MAX_BODIES,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.camera.position = self.rig.settings().overview_eye();
        ctx.camera.target = Vec3::ZERO;
        self.spawn_bodies(ctx);
        log::info!("solar-system: {} bodies", self.registry.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        if let Some(registry) = self.pending_registry.take() {
            self.install_registry(ctx, registry);
        }
        if let Some(key) = self.pending_key.take() {
            self.resolve_key(ctx, &key);
        }

        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, c } => self.handle_custom(ctx, kind, a, b, c),
                _ => self.handle_pointer(ctx, event),
            }
        }

        // ── Advance time ─────────────────────────────────────────────
        if self.clock.advance(dt) {
            let days = self.clock.snapshot().total_days_floor;
            log::info!("solar-system: run finished at day {days}");
            ctx.emit_event(GameEvent::new(EVENT_RUN_FINISHED, days as f32, 0.0, 0.0));
            self.snapshot.prime();
        }

        // One reading of the clock drives every body this frame.
        let total_days = self.clock.total_days();
        self.place_bodies(ctx, total_days, dt);

        // ── Camera ───────────────────────────────────────────────────
        let focus = self.focus(ctx);
        if let Some(phase) = self.rig.update(&mut ctx.camera, focus, dt) {
            log::debug!("solar-system: camera {phase:?}");
            ctx.emit_event(GameEvent::new(
                EVENT_CAMERA,
                flag(phase == RigPhase::Flying),
                index_or_none(self.rig.selection()),
                0.0,
            ));
        }

        if self.snapshot.ready(dt) {
            self.emit_snapshot(ctx);
        }
    }

    fn load_config(&mut self, json: &str) {
        match SimConfig::from_json(json) {
            Ok(config) => {
                self.apply_config(config);
                log::info!("solar-system: config loaded");
            }
            Err(e) => log::warn!("solar-system: config rejected: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn setup() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    /// Run one frame and return the events it emitted.
    fn frame(game: &mut SolarSystem, ctx: &mut EngineContext, events: &[InputEvent]) -> Vec<GameEvent> {
        ctx.clear_frame_data();
        let mut queue = InputQueue::new();
        for &e in events {
            queue.push(e);
        }
        game.update(ctx, &queue, FRAME);
        ctx.events.clone()
    }

    fn custom(kind: u32, a: f32, b: f32, c: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b, c }
    }

    fn of_kind(events: &[GameEvent], kind: f32) -> Vec<GameEvent> {
        events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn init_spawns_every_body_at_day_zero() {
        let (game, ctx) = setup();
        assert_eq!(ctx.scene.len(), game.registry().len());
        let earth = ctx.scene.find_by_tag("earth").unwrap();
        assert!(earth.pos.distance(Vec3::new(25.0, 0.0, 0.0)) < 1e-4);
        let sun = ctx.scene.find_by_tag("sun").unwrap();
        assert_eq!(sun.pos, Vec3::ZERO);
        assert!(sun.mesh.as_ref().is_some_and(|m| m.emissive > 0.0));
        let saturn = ctx.scene.find_by_tag("saturn").unwrap();
        assert!(saturn.mesh.as_ref().is_some_and(|m| m.ring.is_some()));

        let mut buffer = InstanceBuffer::with_capacity(game.config().max_instances);
        build_instance_buffer(ctx.scene.iter(), &mut buffer);
        let earth = buffer.instances()[game.registry().index_of("earth").unwrap()];
        assert_eq!((earth.atmosphere, earth.clouds), (1.0, 1.0));
        let mars = buffer.instances()[game.registry().index_of("mars").unwrap()];
        assert_eq!(mars.clouds, 0.0);
    }

    #[test]
    fn clouds_turn_faster_than_the_surface() {
        let (mut game, mut ctx) = setup();
        for _ in 0..60 {
            frame(&mut game, &mut ctx, &[]);
        }
        let earth = ctx.scene.find_by_tag("earth").unwrap();
        assert!((earth.cloud_spin - CLOUD_SPIN_RATE).abs() < 1e-5);
        assert!(earth.cloud_spin > earth.spin);
        assert_eq!(ctx.scene.find_by_tag("mars").unwrap().cloud_spin, 0.0);
    }

    #[test]
    fn toggle_runs_about_five_days_per_second() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_RUN, 0.0, 0.0, 0.0)]);
        for _ in 0..59 {
            frame(&mut game, &mut ctx, &[]);
        }
        assert!((game.clock().total_days() - 5.0).abs() < 1e-3);
        assert!(game.clock().is_running());
    }

    #[test]
    fn requested_run_finishes_once() {
        let (mut game, mut ctx) = setup();
        let mut events = frame(&mut game, &mut ctx, &[custom(CUSTOM_REQUEST_RUN, 0.0, 0.0, 30.0)]);
        for _ in 0..600 {
            events.extend(frame(&mut game, &mut ctx, &[]));
        }
        assert_eq!(game.clock().total_days(), 30.0);
        assert!(!game.clock().is_running());

        let finished = of_kind(&events, EVENT_RUN_FINISHED);
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].a, 30.0);

        let clock_finished: Vec<_> = of_kind(&events, EVENT_CLOCK).into_iter().filter(|e| e.c == 1.0).collect();
        assert_eq!(clock_finished.len(), 1);
        assert_eq!(clock_finished[0].a, 30.0);
    }

    #[test]
    fn staged_length_used_by_toggle() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[
            custom(CUSTOM_SET_RUN_LENGTH, 0.0, 0.0, 2.0),
            custom(CUSTOM_TOGGLE_RUN, 0.0, 0.0, 0.0),
        ]);
        assert_eq!(game.clock().target_days(), 2.0);
        for _ in 0..60 {
            frame(&mut game, &mut ctx, &[]);
        }
        assert_eq!(game.clock().total_days(), 2.0);
    }

    #[test]
    fn bodies_move_with_the_clock() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_RUN, 0.0, 0.0, 0.0)]);
        for _ in 0..120 {
            frame(&mut game, &mut ctx, &[]);
        }
        let days = game.clock().total_days();
        let mercury = game.registry().get(1).unwrap();
        let (x, z) = orbit::orbital_position(mercury, days);
        let entity = ctx.scene.find_by_tag("mercury").unwrap();
        assert!(entity.pos.distance(Vec3::new(x as f32, 0.0, z as f32)) < 1e-4);
        assert!(entity.spin > 0.0);
    }

    #[test]
    fn speed_event_clamps() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SET_SPEED, 25.0, 0.0, 0.0)]);
        assert_eq!(game.clock().speed(), 10.0);
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SET_SPEED, f32::NAN, 0.0, 0.0)]);
        assert_eq!(game.clock().speed(), 10.0);
    }

    #[test]
    fn select_flies_to_body_and_arrives() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[]);

        let mut events = frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, 3.0, 0.0, 0.0)]);
        assert_eq!(game.selected(), Some(3));
        for _ in 0..600 {
            events.extend(frame(&mut game, &mut ctx, &[]));
        }
        assert_eq!(game.rig_phase(), RigPhase::Arrived);
        assert!(ctx.camera.position.distance(Vec3::new(37.0, 4.0, 0.0)) < 2.0);
        assert!(ctx.camera.target.distance(Vec3::new(25.0, 0.0, 0.0)) < 0.1);

        let camera: Vec<f32> = of_kind(&events, EVENT_CAMERA).iter().map(|e| e.a).collect();
        assert_eq!(camera, vec![1.0, 0.0]);

        let earth = ctx.scene.find_by_tag("earth").unwrap();
        assert_eq!(earth.highlight, 1.0);
    }

    #[test]
    fn reselecting_same_body_does_not_restart() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, 3.0, 0.0, 0.0)]);
        for _ in 0..600 {
            frame(&mut game, &mut ctx, &[]);
        }
        let events = frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, 3.0, 0.0, 0.0)]);
        assert!(of_kind(&events, EVENT_CAMERA).is_empty());
        assert_eq!(game.rig_phase(), RigPhase::Arrived);
    }

    #[test]
    fn out_of_range_select_is_ignored() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, 2.0, 0.0, 0.0)]);
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, 42.0, 0.0, 0.0)]);
        assert_eq!(game.selected(), Some(2));
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, -1.0, 0.0, 0.0)]);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn selection_event_reports_distance() {
        let (mut game, mut ctx) = setup();
        let mut events = frame(&mut game, &mut ctx, &[
            custom(CUSTOM_SELECT, 3.0, 0.0, 0.0),
            custom(CUSTOM_REQUEST_RUN, 0.0, 0.0, 10.0),
        ]);
        for _ in 0..300 {
            events.extend(frame(&mut game, &mut ctx, &[]));
        }
        let last = *of_kind(&events, EVENT_SELECTION).last().unwrap();
        assert_eq!(last.a, 3.0);
        assert!((last.b - 25.729_92).abs() < 1e-3, "distance = {}", last.b);
        assert!((last.c - 29.78).abs() < 1e-4);
    }

    #[test]
    fn reset_returns_to_day_zero_and_overview() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[
            custom(CUSTOM_SET_SPEED, 3.0, 0.0, 0.0),
            custom(CUSTOM_SELECT, 5.0, 0.0, 0.0),
            custom(CUSTOM_REQUEST_RUN, 1.0, 0.0, 0.0),
        ]);
        for _ in 0..30 {
            frame(&mut game, &mut ctx, &[]);
        }
        frame(&mut game, &mut ctx, &[custom(CUSTOM_RESET, 0.0, 0.0, 0.0)]);

        assert_eq!(game.clock().total_days(), 0.0);
        assert!(!game.clock().is_running());
        assert_eq!(game.clock().speed(), 3.0);
        assert_eq!(game.selected(), None);
        assert!(game.run_length().is_zero());
        let earth = ctx.scene.find_by_tag("earth").unwrap();
        assert!(earth.pos.distance(Vec3::new(25.0, 0.0, 0.0)) < 1e-4);
    }

    #[test]
    fn click_on_sun_from_overview_selects_it() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[]);
        frame(&mut game, &mut ctx, &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerUp { x: 0.0, y: 0.0 },
        ]);
        assert_eq!(game.selected(), Some(0));
    }

    #[test]
    fn click_on_empty_space_keeps_selection() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, 0.0, 0.0, 0.0)]);
        frame(&mut game, &mut ctx, &[
            InputEvent::PointerDown { x: 0.95, y: 0.95 },
            InputEvent::PointerUp { x: 0.95, y: 0.95 },
        ]);
        assert_eq!(game.selected(), Some(0));
    }

    #[test]
    fn drag_orbits_instead_of_picking() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[]);
        let before = ctx.camera.position;
        let distance = ctx.camera.distance();

        frame(&mut game, &mut ctx, &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: 0.3, y: 0.0 },
            InputEvent::PointerUp { x: 0.3, y: 0.0 },
        ]);
        assert_eq!(game.selected(), None);
        assert!(ctx.camera.position.distance(before) > 1.0);
        assert!((ctx.camera.distance() - distance).abs() < 1e-2);
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[]);
        frame(&mut game, &mut ctx, &[InputEvent::Wheel { delta: 1.0e6 }]);
        assert!((ctx.camera.distance() - 400.0).abs() < 1e-2);
        frame(&mut game, &mut ctx, &[InputEvent::Wheel { delta: -1.0e6 }]);
        assert!((ctx.camera.distance() - 2.0).abs() < 1e-2);
    }

    #[test]
    fn immersive_session_freezes_rig_and_pointer() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[]);
        frame(&mut game, &mut ctx, &[
            custom(CUSTOM_SET_IMMERSIVE, 1.0, 0.0, 0.0),
            custom(CUSTOM_SELECT, 3.0, 0.0, 0.0),
        ]);
        let before = ctx.camera.position;
        for _ in 0..60 {
            frame(&mut game, &mut ctx, &[InputEvent::Wheel { delta: 50.0 }]);
        }
        assert_eq!(ctx.camera.position, before);
        assert_eq!(game.selected(), Some(3));

        frame(&mut game, &mut ctx, &[custom(CUSTOM_SET_IMMERSIVE, 0.0, 0.0, 0.0)]);
        assert_ne!(ctx.camera.position, before);
    }

    #[test]
    fn language_event() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SET_LANGUAGE, 1.0, 0.0, 0.0)]);
        assert_eq!(game.language(), Language::Mn);
    }

    #[test]
    fn resize_event_updates_aspect() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_RESIZE, 800.0, 800.0, 0.0)]);
        assert_eq!(ctx.camera.aspect, 1.0);
    }

    #[test]
    fn bad_config_keeps_previous() {
        let (mut game, _ctx) = setup();
        game.load_config(r#"{"speed_max": 20}"#);
        game.clock.set_speed(15.0);
        assert_eq!(game.clock().speed(), 15.0);

        game.load_config(r#"{"speed_max": -1}"#);
        game.load_config("not json");
        game.clock.set_speed(18.0);
        assert_eq!(game.clock().speed(), 18.0);
    }

    #[test]
    fn loaded_bodies_replace_scene_next_frame() {
        let (mut game, mut ctx) = setup();
        assert!(!game.load_bodies("[]"));

        let json = r##"[
            {"key":"star","kind":"star","name":{"en":"Star","mn":"Од"},"radius":4.0,"color":"#FFFF00",
             "details":{"temperature":"","gravity":"","kind":{"en":"","mn":""},"description":{"en":"","mn":""}}},
            {"key":"rock","kind":"planet","name":{"en":"Rock","mn":"Чулуу"},"radius":1.0,"orbit_radius":10.0,
             "orbital_period":20.0,"velocity_km_s":10.0,"color":"#888888",
             "details":{"temperature":"","gravity":"","kind":{"en":"","mn":""},"description":{"en":"","mn":""}}}
        ]"##;
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SELECT, 5.0, 0.0, 0.0)]);
        assert!(game.load_bodies(json));
        frame(&mut game, &mut ctx, &[]);

        assert_eq!(game.registry().len(), 2);
        assert_eq!(ctx.scene.len(), 2);
        assert_eq!(game.selected(), None);
        assert!(ctx.scene.find_by_tag("rock").is_some());
        assert!(ctx.scene.find_by_tag("earth").is_none());
    }

    #[test]
    fn oversized_body_set_rejected() {
        let (mut game, mut ctx) = setup();
        let details = r#""details":{"temperature":"","gravity":"","kind":{"en":"","mn":""},"description":{"en":"","mn":""}}"#;
        let mut bodies = vec![format!(
            r##"{{"key":"star","kind":"star","name":{{"en":"Star","mn":"Од"}},"radius":4.0,"color":"#FFFF00",{details}}}"##
        )];
        for i in 1..40 {
            bodies.push(format!(
                r##"{{"key":"p{i}","kind":"planet","name":{{"en":"P","mn":"P"}},"radius":0.5,"orbit_radius":{i}.0,
                    "orbital_period":100.0,"color":"#888888",{details}}}"##
            ));
        }
        let json = format!("[{}]", bodies.join(","));

        assert!(!game.load_bodies(&json));
        frame(&mut game, &mut ctx, &[]);
        assert_eq!(game.registry().len(), 9);
        assert_eq!(ctx.scene.len(), 9);
    }

    #[test]
    fn key_selection_resolves_against_staged_bodies() {
        let (mut game, mut ctx) = setup();
        let json = r##"[
            {"key":"rock","kind":"planet","name":{"en":"Rock","mn":"Чулуу"},"radius":1.0,"orbit_radius":10.0,
             "orbital_period":20.0,"color":"#888888",
             "details":{"temperature":"","gravity":"","kind":{"en":"","mn":""},"description":{"en":"","mn":""}}},
            {"key":"star","kind":"star","name":{"en":"Star","mn":"Од"},"radius":4.0,"color":"#FFFF00",
             "details":{"temperature":"","gravity":"","kind":{"en":"","mn":""},"description":{"en":"","mn":""}}}
        ]"##;
        assert!(game.load_bodies(json));
        game.select_key("rock");
        assert_eq!(game.selected(), None);
        frame(&mut game, &mut ctx, &[]);
        assert_eq!(game.selected(), Some(0));

        game.select_key("earth");
        frame(&mut game, &mut ctx, &[]);
        assert_eq!(game.selected(), Some(0));

        game.select_key("");
        frame(&mut game, &mut ctx, &[]);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn config_capacity_fits_the_solar_system() {
        let game = SolarSystem::new();
        assert!(game.config().max_instances >= game.registry().len());
    }
}
