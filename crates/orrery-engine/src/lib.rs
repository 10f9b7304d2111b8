pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent, flag};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshColor, RingDesc};
pub use crate::core::scene::Scene;
pub use crate::core::time::{FrameTimer, Throttle};
pub use renderer::camera::{Camera3D, CameraUniform, Ray};
pub use renderer::instance::{BodyInstance, InstanceBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_instance_buffer;

pub use extensions::{lerp_vec3, damp_factor, damp_vec3};
