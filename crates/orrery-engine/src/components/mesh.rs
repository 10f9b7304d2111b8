/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeshColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string. Returns None if malformed.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Flat ring around a sphere's equator (inner/outer radius in world units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDesc {
    pub inner: f32,
    pub outer: f32,
}

/// Component for sphere-rendered bodies.
#[derive(Debug, Clone, Copy)]
pub struct MeshComponent {
    pub radius: f32,
    pub color: MeshColor,
    /// Glow multiplier (0.0 = lit normally, > 0 self-illuminated).
    pub emissive: f32,
    /// Radius of the orbit path drawn around the world origin (0.0 = none).
    pub orbit_radius: f32,
    /// Optional equatorial ring.
    pub ring: Option<RingDesc>,
    /// Whether to draw an atmosphere shell.
    pub atmosphere: bool,
    /// Whether to draw a cloud layer turning at the entity's `cloud_spin`.
    pub clouds: bool,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            radius: 1.0,
            color: MeshColor::default(),
            emissive: 0.0,
            orbit_radius: 0.0,
            ring: None,
            atmosphere: false,
            clouds: false,
        }
    }
}

impl MeshComponent {
    pub fn sphere(radius: f32, color: MeshColor) -> Self {
        Self {
            radius,
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_orbit(mut self, orbit_radius: f32) -> Self {
        self.orbit_radius = orbit_radius;
        self
    }

    pub fn with_ring(mut self, inner: f32, outer: f32) -> Self {
        self.ring = Some(RingDesc { inner, outer });
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: bool) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    pub fn with_clouds(mut self, clouds: bool) -> Self {
        self.clouds = clouds;
        self
    }
}
