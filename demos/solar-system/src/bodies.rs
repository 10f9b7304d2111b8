/// Celestial body registry: the star and its planets.
///
/// Distances and radii are display units, not astronomical ones. Periods are
/// real sidereal periods in Earth days so relative orbital speeds stay true.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::{Language, LocalizedText};

/// Self-rotation of planets, radians per second.
pub const PLANET_SPIN_RATE: f32 = 0.01;
/// Self-rotation of the star, radians per second.
pub const STAR_SPIN_RATE: f32 = 0.002;
/// Cloud layers turn slightly faster than the surface below.
pub const CLOUD_SPIN_RATE: f32 = 0.012;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
}

/// Informational panel contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDetails {
    pub temperature: String,
    pub gravity: String,
    pub kind: LocalizedText,
    pub description: LocalizedText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub key: String,
    pub kind: BodyKind,
    pub name: LocalizedText,
    pub radius: f32,
    #[serde(default)]
    pub orbit_radius: f32,
    /// Days per revolution. Zero for the star.
    #[serde(default)]
    pub orbital_period: f64,
    /// Average orbital velocity (km/s), informational only.
    #[serde(default)]
    pub velocity_km_s: f64,
    /// `#RRGGBB`
    pub color: String,
    #[serde(default)]
    pub spin_rate: Option<f32>,
    #[serde(default)]
    pub ring: bool,
    #[serde(default)]
    pub atmosphere: bool,
    #[serde(default)]
    pub clouds: bool,
    pub details: BodyDetails,
}

impl CelestialBody {
    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    pub fn spin_rate(&self) -> f32 {
        self.spin_rate.unwrap_or(match self.kind {
            BodyKind::Star => STAR_SPIN_RATE,
            BodyKind::Planet => PLANET_SPIN_RATE,
        })
    }

    pub fn name(&self, lang: Language) -> &str {
        self.name.get(lang)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to parse body data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("body list is empty")]
    Empty,

    #[error("duplicate body key `{0}`")]
    DuplicateKey(String),

    #[error("expected exactly one star, found {0}")]
    StarCount(usize),

    #[error("body `{key}`: {reason}")]
    InvalidBody { key: String, reason: &'static str },

    #[error("{count} bodies exceed the limit of {max}")]
    TooMany { count: usize, max: usize },
}

/// Ordered, immutable set of bodies. Index is the body's dense identity
/// (the star is not required to be first).
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
}

impl BodyRegistry {
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self, RegistryError> {
        validate(&bodies)?;
        Ok(Self { bodies })
    }

    /// Parse a JSON array of bodies.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let bodies: Vec<CelestialBody> = serde_json::from_str(json)?;
        Self::new(bodies)
    }

    /// Reject the set if it holds more than `max` bodies.
    pub fn within(self, max: usize) -> Result<Self, RegistryError> {
        if self.bodies.len() > max {
            return Err(RegistryError::TooMany { count: self.bodies.len(), max });
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    /// The Sun and the eight planets.
    pub fn solar_system() -> Self {
        Self { bodies: solar_system_bodies() }
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::solar_system()
    }
}

fn validate(bodies: &[CelestialBody]) -> Result<(), RegistryError> {
    if bodies.is_empty() {
        return Err(RegistryError::Empty);
    }

    for (i, body) in bodies.iter().enumerate() {
        if bodies[..i].iter().any(|b| b.key == body.key) {
            return Err(RegistryError::DuplicateKey(body.key.clone()));
        }
        let invalid = |reason| RegistryError::InvalidBody { key: body.key.clone(), reason };

        if !(body.radius.is_finite() && body.radius > 0.0) {
            return Err(invalid("radius must be positive"));
        }
        if orrery_engine::MeshColor::from_hex(&body.color).is_none() {
            return Err(invalid("color must be #RRGGBB"));
        }
        match body.kind {
            BodyKind::Star => {
                if body.orbit_radius != 0.0 || body.orbital_period != 0.0 {
                    return Err(invalid("the star must sit at the origin"));
                }
            }
            BodyKind::Planet => {
                if !(body.orbital_period.is_finite() && body.orbital_period > 0.0) {
                    return Err(invalid("orbital period must be positive"));
                }
                if !(body.orbit_radius.is_finite() && body.orbit_radius > 0.0) {
                    return Err(invalid("orbit radius must be positive"));
                }
            }
        }
    }

    let stars = bodies.iter().filter(|b| b.is_star()).count();
    if stars != 1 {
        return Err(RegistryError::StarCount(stars));
    }
    Ok(())
}

// ── Data ─────────────────────────────────────────────────────────────

struct PlanetRow {
    key: &'static str,
    name: (&'static str, &'static str),
    radius: f32,
    orbit_radius: f32,
    period: f64,
    velocity: f64,
    color: &'static str,
    temperature: &'static str,
    gravity: &'static str,
    kind: (&'static str, &'static str),
    description: (&'static str, &'static str),
}

const PLANETS: [PlanetRow; 8] = [
    PlanetRow {
        key: "mercury", name: ("Mercury", "Буд"),
        radius: 0.38, orbit_radius: 12.0, period: 87.97, velocity: 47.87, color: "#8C7853",
        temperature: "167°C", gravity: "3.7 m/s²",
        kind: ("Terrestrial", "Хатуу"),
        description: ("Smallest planet, closest to Sun.", "Нартай хамгийн ойр, хамгийн жижиг."),
    },
    PlanetRow {
        key: "venus", name: ("Venus", "Сугар"),
        radius: 0.95, orbit_radius: 18.0, period: 224.70, velocity: 35.02, color: "#FFC649",
        temperature: "464°C", gravity: "8.87 m/s²",
        kind: ("Terrestrial", "Хатуу"),
        description: ("Hottest planet due to greenhouse effect.", "Хүлэмжийн хийн улмаас хамгийн халуун."),
    },
    PlanetRow {
        key: "earth", name: ("Earth", "Дэлхий"),
        radius: 1.0, orbit_radius: 25.0, period: 365.25, velocity: 29.78, color: "#2E7DD1",
        temperature: "15°C", gravity: "9.8 m/s²",
        kind: ("Terrestrial", "Хатуу"),
        description: ("The only known planet with life.", "Амьдрал байгаа нь батлагдсан цор ганц гараг."),
    },
    PlanetRow {
        key: "mars", name: ("Mars", "Ангараг"),
        radius: 0.53, orbit_radius: 35.0, period: 686.98, velocity: 24.07, color: "#CD5C5C",
        temperature: "-65°C", gravity: "3.71 m/s²",
        kind: ("Terrestrial", "Хатуу"),
        description: ("The Red Planet. Dusty and cold.", "Улаан нүдэн гараг. Тоостой, хүйтэн."),
    },
    PlanetRow {
        key: "jupiter", name: ("Jupiter", "Бархасбадь"),
        radius: 2.8, orbit_radius: 60.0, period: 4332.59, velocity: 13.07, color: "#D4A373",
        temperature: "-110°C", gravity: "24.79 m/s²",
        kind: ("Gas Giant", "Хийн аварга"),
        description: ("Largest planet in the solar system.", "Нарны аймгийн хамгийн том гараг."),
    },
    PlanetRow {
        key: "saturn", name: ("Saturn", "Санчир"),
        radius: 2.3, orbit_radius: 85.0, period: 10759.22, velocity: 9.69, color: "#FAD5A5",
        temperature: "-140°C", gravity: "10.44 m/s²",
        kind: ("Gas Giant", "Хийн аварга"),
        description: ("Famous for its beautiful ring system.", "Үзэсгэлэнт цагирагаараа алдартай."),
    },
    PlanetRow {
        key: "uranus", name: ("Uranus", "Тэнгэрийн ван"),
        radius: 1.6, orbit_radius: 110.0, period: 30688.5, velocity: 6.81, color: "#4FD0E7",
        temperature: "-195°C", gravity: "8.69 m/s²",
        kind: ("Ice Giant", "Мөсөн аварга"),
        description: ("Rotates on its side.", "Хажуулдаж эргэдэг онцлогтой."),
    },
    PlanetRow {
        key: "neptune", name: ("Neptune", "Далайн ван"),
        radius: 1.55, orbit_radius: 135.0, period: 60182.0, velocity: 5.43, color: "#4166F5",
        temperature: "-200°C", gravity: "11.15 m/s²",
        kind: ("Ice Giant", "Мөсөн аварга"),
        description: ("Windiest planet with supersonic storms.", "Хэт авианы хурдтай шуурга болдог."),
    },
];

/// Display radius of the star (the informational radius of 109 Earths would
/// swallow the inner orbits).
const SUN_RADIUS: f32 = 8.0;

fn solar_system_bodies() -> Vec<CelestialBody> {
    let sun = CelestialBody {
        key: "sun".to_owned(),
        kind: BodyKind::Star,
        name: LocalizedText::new("The Sun", "Нар"),
        radius: SUN_RADIUS,
        orbit_radius: 0.0,
        orbital_period: 0.0,
        velocity_km_s: 0.0,
        color: "#FDB813".to_owned(),
        spin_rate: None,
        ring: false,
        atmosphere: false,
        clouds: false,
        details: BodyDetails {
            temperature: "5,500°C".to_owned(),
            gravity: "274 m/s²".to_owned(),
            kind: LocalizedText::new("Yellow Dwarf Star", "Шар одой од"),
            description: LocalizedText::new("The heart of our solar system.", "Манай нарны аймгийн төв."),
        },
    };

    let planets = PLANETS.iter().map(|row| CelestialBody {
        key: row.key.to_owned(),
        kind: BodyKind::Planet,
        name: LocalizedText::new(row.name.0, row.name.1),
        radius: row.radius,
        orbit_radius: row.orbit_radius,
        orbital_period: row.period,
        velocity_km_s: row.velocity,
        color: row.color.to_owned(),
        spin_rate: None,
        ring: row.key == "saturn",
        atmosphere: row.key == "earth",
        clouds: row.key == "earth",
        details: BodyDetails {
            temperature: row.temperature.to_owned(),
            gravity: row.gravity.to_owned(),
            kind: LocalizedText::new(row.kind.0, row.kind.1),
            description: LocalizedText::new(row.description.0, row.description.1),
        },
    });

    std::iter::once(sun).chain(planets).collect()
}
