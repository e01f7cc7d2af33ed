/// Planet catalog — static display/simulation parameters for every body.
///
/// Radii and distances are scene units tuned for readability, not to scale
/// (real planets would be sub-pixel). Speeds are the production defaults
/// the UI sliders start from.

use serde::Serialize;

use crate::api::types::Color;

// ---- Display constants ----

pub const SUN_RADIUS: f32 = 8.0;
/// Outermost orbital distance; sizes the starfield and camera limits.
pub const SYSTEM_RADIUS_SCALE: f32 = 120.0;

/// Orbit angle advance multiplier per second of delta (visual calibration).
pub const ORBIT_TIME_SCALE: f32 = 50.0;
/// Self-rotation advance multiplier per second of delta (visual calibration).
pub const SPIN_TIME_SCALE: f32 = 10.0;

/// Background clear colors for the dark/light theme toggle.
pub const BACKGROUND_DARK: Color = Color::from_hex(0x000000);
pub const BACKGROUND_LIGHT: Color = Color::from_hex(0xEEEEEE);

// ---- Texture assets ----

pub const SUN_TEXTURE: &str = "8k_sun.jpg";
pub const STARFIELD_TEXTURE: &str = "8k_stars_milky_way.jpg";

// ---- Planets ----

pub const PLANET_COUNT: usize = 8;

/// Ring parameters (Saturn only). Radii are relative to the planet mesh.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
}

/// Immutable per-planet parameters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlanetSpec {
    /// Unique lower-case key, also the UI display name.
    pub name: &'static str,
    pub radius: f32,
    /// Orbital distance from the sun, scene units.
    pub distance: f32,
    pub texture: &'static str,
    /// Initial revolution speed (mutable at runtime via the control surface).
    pub orbit_speed: f32,
    /// Self-rotation speed (fixed post-construction).
    pub rotation_speed: f32,
    pub ring: Option<RingSpec>,
}

/// The full catalog, in canonical order mercury → neptune.
pub fn planets() -> [PlanetSpec; PLANET_COUNT] {
    [
        PlanetSpec {
            name: "mercury", radius: 1.0, distance: 15.0,
            texture: "8k_mercury.jpg",
            orbit_speed: 0.005, rotation_speed: 0.02, ring: None,
        },
        PlanetSpec {
            name: "venus", radius: 1.5, distance: 25.0,
            texture: "8k_venus_surface.jpg",
            orbit_speed: 0.004, rotation_speed: 0.015, ring: None,
        },
        PlanetSpec {
            name: "earth", radius: 1.8, distance: 35.0,
            texture: "8k_earth_daymap.jpg",
            orbit_speed: 0.003, rotation_speed: 0.03, ring: None,
        },
        PlanetSpec {
            name: "mars", radius: 1.2, distance: 45.0,
            texture: "8k_mars.jpg",
            orbit_speed: 0.0025, rotation_speed: 0.025, ring: None,
        },
        PlanetSpec {
            name: "jupiter", radius: 4.5, distance: 70.0,
            texture: "8k_jupiter.jpg",
            orbit_speed: 0.0015, rotation_speed: 0.04, ring: None,
        },
        PlanetSpec {
            name: "saturn", radius: 3.8, distance: 90.0,
            texture: "8k_saturn.jpg",
            orbit_speed: 0.0012, rotation_speed: 0.035,
            ring: Some(RingSpec {
                inner_radius: 4.5,
                outer_radius: 8.0,
                texture: "8k_saturn_ring_alpha.png",
            }),
        },
        PlanetSpec {
            name: "uranus", radius: 3.0, distance: 105.0,
            texture: "2k_uranus.jpg",
            orbit_speed: 0.0010, rotation_speed: 0.03, ring: None,
        },
        PlanetSpec {
            name: "neptune", radius: 2.8, distance: 120.0,
            texture: "2k_neptune.jpg",
            orbit_speed: 0.0009, rotation_speed: 0.028, ring: None,
        },
    ]
}

/// Look up a single catalog entry by name.
pub fn get(name: &str) -> Option<PlanetSpec> {
    planets().into_iter().find(|p| p.name == name)
}

// ---- Initial angle scatter ----

/// Deterministic integer hash (no external rand crate).
pub fn scatter_hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2654435761);
    n ^= n >> 16;
    n = n.wrapping_mul(2246822519);
    n ^= n >> 13;
    n
}

/// Starting orbital angle for the planet at `index`, in [0, 2π).
pub fn scatter_angle(index: usize) -> f32 {
    let h = scatter_hash(index as u32 * 7 + 31);
    (h as f64 / (u32::MAX as f64 + 1.0)) as f32 * std::f32::consts::TAU
}
