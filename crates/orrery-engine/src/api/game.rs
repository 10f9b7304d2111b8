use serde::{Deserialize, Serialize};
use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;

/// Configuration for the engine, provided by the game.
/// Every field has a default, so partial JSON overrides are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum number of body instances per frame (default: 64).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Largest frame delta fed to the game, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Vertical field of view in degrees (default: 45).
    pub fov_degrees: f32,
    /// Near clip plane (default: 0.1).
    pub near: f32,
    /// Far clip plane (default: 2000).
    pub far: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_instances: 64,
            max_events: 32,
            max_frame_dt: 0.1,
            fov_degrees: 45.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, position the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One rendered frame. `dt` is the sanitized frame delta in seconds;
    /// all motion must scale with it.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);

    /// Apply game-specific configuration supplied by the host page as JSON.
    /// Invalid input should be logged and ignored.
    fn load_config(&mut self, _json: &str) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create a context whose camera projection follows `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera3D::new(config.fov_degrees, 16.0 / 9.0, config.near, config.far),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn camera_follows_config() {
        let config = GameConfig { fov_degrees: 60.0, far: 500.0, ..GameConfig::default() };
        let ctx = EngineContext::from_config(&config);
        assert!((ctx.camera.fov_y - 60f32.to_radians()).abs() < 1e-6);
        assert_eq!(ctx.camera.far, 500.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "max_instances": 16 }"#).unwrap();
        assert_eq!(config.max_instances, 16);
        assert_eq!(config.max_events, GameConfig::default().max_events);
    }
}
