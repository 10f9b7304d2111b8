use bytemuck::{Pod, Zeroable};

/// Per-body render data read by the TypeScript scene renderer.
/// 16 floats = 64 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    /// Spin about the local Y axis (radians).
    pub spin: f32,
    pub emissive: f32,
    /// Selection highlight (0.0 = none).
    pub highlight: f32,
    /// Orbit path radius around the origin (0.0 = no path).
    pub orbit_radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 1.0 when an atmosphere shell should be drawn.
    pub atmosphere: f32,
    /// Ring radii (both 0.0 = no ring).
    pub ring_inner: f32,
    pub ring_outer: f32,
    /// 1.0 when a cloud layer should be drawn.
    pub clouds: f32,
    /// Cloud layer rotation about the local Y axis (radians).
    pub cloud_spin: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of body instances, rebuilt every frame.
pub struct InstanceBuffer {
    instances: Vec<BodyInstance>,
    max: usize,
}

impl InstanceBuffer {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false (and drops it) when the buffer is full.
    pub fn push(&mut self, instance: BodyInstance) -> bool {
        if self.instances.len() >= self.max {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}
