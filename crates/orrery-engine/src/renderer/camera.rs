use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Polar angle limit keeping the orbit camera from flipping over the poles.
const POLAR_EPSILON: f32 = 0.01;

/// Perspective camera described by an eye position and a look-at target.
/// Right-handed, Y-up, depth in [0, 1] (WebGPU convention).
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
/// 24 floats: view-projection matrix, eye (w = 1), target (w = 1).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub target: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 24;
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    /// Distance along the ray to the first intersection with a sphere, if any.
    /// A ray starting inside the sphere hits at distance 0.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        (t >= 0.0).then_some(t)
    }
}

impl Camera3D {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn with_pose(mut self, position: Vec3, target: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
            target: self.target.extend(1.0).to_array(),
        }
    }

    /// Update the aspect ratio after a viewport resize. Degenerate sizes are ignored.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            self.aspect = viewport_width / viewport_height;
        }
    }

    /// Eye-to-target distance.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Move the eye along the view axis by `delta` (positive = away from target),
    /// keeping the eye-to-target distance within `[min, max]`.
    pub fn dolly(&mut self, delta: f32, min: f32, max: f32) {
        let offset = self.position - self.target;
        let dist = offset.length();
        if dist < f32::EPSILON {
            return;
        }
        let new_dist = (dist + delta).clamp(min, max);
        self.position = self.target + offset / dist * new_dist;
    }

    /// Orbit the eye around the target: `yaw` about world Y, `pitch` toward the poles.
    /// Distance to the target is preserved.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius < f32::EPSILON {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) + yaw;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + pitch)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        let (sin_p, cos_p) = polar.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();
        self.position = self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * radius;
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x, y in [-1, 1], +y up).
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inv = self.view_proj().inverse();
        let unproject = |z: f32| {
            let p = inv * Vec4::new(ndc_x, ndc_y, z, 1.0);
            (p.w.abs() > f32::EPSILON).then(|| p.truncate() / p.w)
        };
        let near = unproject(0.0)?;
        let far = unproject(1.0)?;
        let dir = (far - near).try_normalize()?;
        Some(Ray { origin: near, dir })
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(45.0, 16.0 / 9.0, 0.1, 2000.0)
    }
}
