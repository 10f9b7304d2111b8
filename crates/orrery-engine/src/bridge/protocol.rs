/// Frame buffer layout shared with the TypeScript renderer.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 16 floats]
/// [Camera: 24 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::BodyInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_PROTOCOL_VERSION: usize = 6;
pub const HEADER_CAMERA_OFFSET: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per body instance (fixed wire format).
pub const INSTANCE_FLOATS: usize = BodyInstance::FLOATS;

/// Floats in the camera block: view-proj matrix, eye, target.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per game event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where the camera block begins.
    pub camera_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let camera_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = camera_data_offset + CAMERA_FLOATS;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            camera_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }

    /// Pack one frame into `out`, resizing it to the full buffer length.
    /// Instances and events beyond capacity are truncated; counts in the
    /// header always match what was written.
    pub fn pack_frame(
        &self,
        out: &mut Vec<f32>,
        frame_counter: u32,
        instances: &[BodyInstance],
        camera: &CameraUniform,
        events: &[GameEvent],
    ) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let instances = &instances[..instances.len().min(self.max_instances)];
        let events = &events[..events.len().min(self.max_events)];

        out[HEADER_FRAME_COUNTER] = frame_counter as f32;
        out[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        out[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = events.len() as f32;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_CAMERA_OFFSET] = self.camera_data_offset as f32;

        let inst: &[f32] = bytemuck::cast_slice(instances);
        out[self.instance_data_offset..self.instance_data_offset + inst.len()].copy_from_slice(inst);

        let cam: &[f32] = bytemuck::cast_slice(std::slice::from_ref(camera));
        out[self.camera_data_offset..self.camera_data_offset + CAMERA_FLOATS].copy_from_slice(cam);

        let ev: &[f32] = bytemuck::cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + ev.len()].copy_from_slice(ev);
    }
}
