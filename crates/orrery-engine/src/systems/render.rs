use crate::components::entity::Entity;
use crate::renderer::instance::{BodyInstance, InstanceBuffer};

/// Build the instance buffer from active entities with a mesh, in scene order.
/// Entities beyond the buffer capacity are dropped with a warning.
pub fn build_instance_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut InstanceBuffer,
) {
    buffer.clear();
    let mut dropped = 0usize;
    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else {
            continue;
        };
        let (ring_inner, ring_outer) = mesh.ring.map_or((0.0, 0.0), |r| (r.inner, r.outer));
        let pushed = buffer.push(BodyInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius: mesh.radius,
            spin: entity.spin,
            emissive: mesh.emissive,
            highlight: entity.highlight,
            orbit_radius: mesh.orbit_radius,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            atmosphere: if mesh.atmosphere { 1.0 } else { 0.0 },
            ring_inner,
            ring_outer,
            clouds: if mesh.clouds { 1.0 } else { 0.0 },
            cloud_spin: entity.cloud_spin,
        });
        if !pushed {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::warn!("instance buffer full: dropped {dropped} entities");
    }
}
