//! Hand-picked sizes, distances and speeds of the bodies.
//!
//! None of these are to scale. Speeds are radians per rendered frame.

/// A flat ring around a planet's equator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
    /// Used when the texture file can't be loaded.
    pub fallback: [u8; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySpec {
    pub name: &'static str,
    pub radius: f32,
    /// Distance of the body's centre from the sun's centre.
    pub distance: f32,
    /// Rotation around the body's own Y axis per frame.
    pub spin: f32,
    /// Rotation of the body's pivot around the sun per frame.
    pub orbit: f32,
    pub texture: &'static str,
    pub fallback: [u8; 4],
    pub ring: Option<RingSpec>,
}

impl BodySpec {
    const fn body(
        name: &'static str,
        radius: f32,
        distance: f32,
        spin: f32,
        orbit: f32,
        texture: &'static str,
        fallback: [u8; 4],
    ) -> Self {
        Self {
            name,
            radius,
            distance,
            spin,
            orbit,
            texture,
            fallback,
            ring: None,
        }
    }

    const fn with_ring(mut self, ring: RingSpec) -> Self {
        self.ring = Some(ring);
        self
    }
}

pub const SPHERE_SEGMENTS: u32 = 30;
pub const RING_SEGMENTS: u32 = 32;

/// Drawn on all six faces of the background cube.
pub const STARS: &str = "stars.jpg";
pub const STARS_FALLBACK: [u8; 4] = [4, 4, 12, 255];

pub const SUN: BodySpec =
    BodySpec::body("sun", 16.0, 0.0, 0.004, 0.0, "sun.jpg", [255, 190, 60, 255]);

pub const MERCURY: BodySpec = BodySpec::body(
    "mercury",
    3.2,
    28.0,
    0.004,
    0.04,
    "mercury.jpg",
    [150, 140, 130, 255],
);
pub const VENUS: BodySpec = BodySpec::body(
    "venus",
    5.8,
    44.0,
    0.002,
    0.015,
    "venus.jpg",
    [220, 180, 120, 255],
);
pub const EARTH: BodySpec =
    BodySpec::body("earth", 6.0, 62.0, 0.02, 0.01, "earth.jpg", [60, 110, 200, 255]);
pub const MARS: BodySpec =
    BodySpec::body("mars", 4.0, 78.0, 0.018, 0.008, "mars.jpg", [190, 90, 50, 255]);
pub const JUPITER: BodySpec = BodySpec::body(
    "jupiter",
    12.0,
    100.0,
    0.04,
    0.002,
    "jupiter.jpg",
    [200, 160, 120, 255],
);
pub const SATURN: BodySpec = BodySpec::body(
    "saturn",
    10.0,
    138.0,
    0.038,
    0.0009,
    "saturn.jpg",
    [210, 190, 140, 255],
)
.with_ring(RingSpec {
    inner_radius: 10.0,
    outer_radius: 20.0,
    texture: "saturn ring.png",
    fallback: [190, 170, 130, 160],
});
pub const URANUS: BodySpec = BodySpec::body(
    "uranus",
    7.0,
    176.0,
    0.03,
    0.0004,
    "uranus.jpg",
    [150, 210, 220, 255],
)
.with_ring(RingSpec {
    inner_radius: 7.0,
    outer_radius: 12.0,
    texture: "uranus ring.png",
    fallback: [160, 200, 210, 120],
});
pub const NEPTUNE: BodySpec = BodySpec::body(
    "neptune",
    7.0,
    200.0,
    0.032,
    0.0001,
    "neptune.jpg",
    [70, 100, 210, 255],
);
pub const PLUTO: BodySpec = BodySpec::body(
    "pluto",
    2.8,
    216.0,
    0.008,
    0.00007,
    "pluto.jpg",
    [180, 160, 140, 255],
);

/// Ordered by distance from the sun.
pub static PLANETS: [BodySpec; 9] = [
    MERCURY, VENUS, EARTH, MARS, JUPITER, SATURN, URANUS, NEPTUNE, PLUTO,
];

/// Looks a planet up by name, ignoring case. The sun is not a planet.
pub fn planet(name: &str) -> Option<&'static BodySpec> {
    PLANETS.iter().find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Where the camera starts and returns to on reset.
pub const CAMERA_EYE: [f32; 3] = [-90.0, 140.0, 140.0];
pub const CAMERA_FOVY_DEG: f32 = 55.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

/// White point light sitting in the sun.
pub const LIGHT_INTENSITY: f32 = 10000.0;
pub const LIGHT_RANGE: f32 = 1000.0;
