//! One-time scene construction from the planet catalog.
//!
//! Builds lighting, the sun, each planet (orbit-group pivot + textured
//! sphere, plus Saturn's ring), the enclosing starfield, and the static
//! orbit-path circles. All resource handles are acquired here and live
//! inside the scene nodes until the manager's teardown releases them.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::api::manager::PlanetState;
use crate::api::types::Color;
use crate::catalog::{self, PlanetSpec};
use crate::core::scene::{NodeKind, Scene, SceneNode};
use crate::renderer::backend::{GeometryDesc, MaterialDesc, RenderBackend, Shading, Side};

const SPHERE_SEGMENTS: u32 = 64;
const STARFIELD_SEGMENTS: u32 = 32;
const RING_SEGMENTS: u32 = 64;
const ORBIT_LINE_POINTS: u32 = 100;

const AMBIENT_COLOR: Color = Color::from_hex(0x333333);
const SUN_LIGHT_COLOR: Color = Color::from_hex(0xFFFFFF);
const SUN_LIGHT_INTENSITY: f32 = 1.5;
const SUN_GLOW_COLOR: Color = Color::from_hex(0xFFFFF0);
const SUN_GLOW_INTENSITY: f32 = 10.0;

const ORBIT_LINE_COLOR: Color = Color::from_hex(0x555555);
const ORBIT_LINE_OPACITY: f32 = 0.4;

const RING_OPACITY: f32 = 0.8;
/// Lay the ring into the orbital-ish plane, with a slight twist.
const RING_TILT_X: f32 = -FRAC_PI_2;
const RING_TILT_Y: f32 = PI / 10.0;

/// Builds the renderable scene into `scene`, acquiring resources from
/// `backend`. Consumed by a single `build` call.
pub struct SceneBuilder<'a, B: RenderBackend> {
    scene: &'a mut Scene,
    backend: &'a mut B,
}

impl<'a, B: RenderBackend> SceneBuilder<'a, B> {
    pub fn new(scene: &'a mut Scene, backend: &'a mut B) -> Self {
        Self { scene, backend }
    }

    /// Construct the full scene. Returns the mutable per-planet state,
    /// one entry per catalog entry in catalog order.
    pub fn build(mut self, planets: &[PlanetSpec]) -> Vec<PlanetState> {
        self.add_lighting();
        self.add_sun();
        let states = self.add_planets(planets);
        self.add_stars();
        self.add_orbit_lines(planets);
        states
    }

    fn add_lighting(&mut self) {
        let id = self.scene.alloc_id();
        self.scene.spawn(SceneNode::new(
            id,
            NodeKind::AmbientLight {
                color: AMBIENT_COLOR,
                intensity: 1.0,
            },
        ));

        let id = self.scene.alloc_id();
        self.scene.spawn(SceneNode::new(
            id,
            NodeKind::PointLight {
                color: SUN_LIGHT_COLOR,
                intensity: SUN_LIGHT_INTENSITY,
            },
        ));
    }

    fn add_sun(&mut self) {
        let geometry = self.backend.create_geometry(&GeometryDesc::Sphere {
            radius: catalog::SUN_RADIUS,
            segments: SPHERE_SEGMENTS,
        });
        let texture = self.backend.load_texture(catalog::SUN_TEXTURE);
        // Unlit: the sun is the light source, it takes no shading itself.
        let material = self
            .backend
            .create_material(&MaterialDesc::textured(Shading::Unlit, texture));

        let sun = self.scene.alloc_id();
        self.scene.spawn(
            SceneNode::new(
                sun,
                NodeKind::Mesh {
                    geometry,
                    materials: vec![material],
                },
            )
            .with_tag("sun"),
        );

        // Warm glow anchored to the sun mesh.
        let glow = self.scene.alloc_id();
        self.scene.spawn(
            SceneNode::new(
                glow,
                NodeKind::PointLight {
                    color: SUN_GLOW_COLOR,
                    intensity: SUN_GLOW_INTENSITY,
                },
            )
            .with_parent(sun),
        );
    }

    fn add_planets(&mut self, planets: &[PlanetSpec]) -> Vec<PlanetState> {
        let mut states = Vec::with_capacity(planets.len());

        for (index, spec) in planets.iter().enumerate() {
            let start_angle = catalog::scatter_angle(index);

            // Orbit group: a pivot at the origin whose Y rotation
            // realizes revolution around the sun.
            let group = self.scene.alloc_id();
            self.scene.spawn(
                SceneNode::new(group, NodeKind::Group)
                    .with_tag(format!("{}-orbit", spec.name))
                    .with_rotation(Vec3::new(0.0, start_angle, 0.0)),
            );

            let geometry = self.backend.create_geometry(&GeometryDesc::Sphere {
                radius: spec.radius,
                segments: SPHERE_SEGMENTS,
            });
            let texture = self.backend.load_texture(spec.texture);
            let material = self
                .backend
                .create_material(&MaterialDesc::textured(Shading::Lit, texture));

            let mesh = self.scene.alloc_id();
            self.scene.spawn(
                SceneNode::new(
                    mesh,
                    NodeKind::Mesh {
                        geometry,
                        materials: vec![material],
                    },
                )
                .with_tag(spec.name)
                .with_parent(group)
                .with_translation(Vec3::new(spec.distance, 0.0, 0.0)),
            );

            if let Some(ring) = &spec.ring {
                self.add_ring(mesh, ring);
            }

            states.push(PlanetState {
                name: spec.name,
                group,
                mesh,
                distance: spec.distance,
                orbit_speed: spec.orbit_speed,
                rotation_speed: spec.rotation_speed,
                current_angle: start_angle,
            });
        }

        states
    }

    fn add_ring(&mut self, planet_mesh: crate::api::types::NodeId, ring: &catalog::RingSpec) {
        let geometry = self.backend.create_geometry(&GeometryDesc::Ring {
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            segments: RING_SEGMENTS,
        });
        let texture = self.backend.load_texture(ring.texture);
        let material = self.backend.create_material(
            &MaterialDesc::textured(Shading::Lit, texture)
                .with_opacity(RING_OPACITY)
                .with_side(Side::Double),
        );

        let id = self.scene.alloc_id();
        self.scene.spawn(
            SceneNode::new(
                id,
                NodeKind::Mesh {
                    geometry,
                    materials: vec![material],
                },
            )
            .with_tag("ring")
            .with_parent(planet_mesh)
            .with_rotation(Vec3::new(RING_TILT_X, RING_TILT_Y, 0.0)),
        );
    }

    fn add_stars(&mut self) {
        let geometry = self.backend.create_geometry(&GeometryDesc::Sphere {
            radius: catalog::SYSTEM_RADIUS_SCALE * 2.0,
            segments: STARFIELD_SEGMENTS,
        });
        let texture = self.backend.load_texture(catalog::STARFIELD_TEXTURE);
        // Back faces only: the scene sits inside this sphere.
        let material = self.backend.create_material(
            &MaterialDesc::textured(Shading::Unlit, texture).with_side(Side::Back),
        );

        let id = self.scene.alloc_id();
        self.scene.spawn(
            SceneNode::new(
                id,
                NodeKind::Mesh {
                    geometry,
                    materials: vec![material],
                },
            )
            .with_tag("stars"),
        );
    }

    fn add_orbit_lines(&mut self, planets: &[PlanetSpec]) {
        for spec in planets {
            let geometry = self.backend.create_geometry(&GeometryDesc::Circle {
                radius: spec.distance,
                points: ORBIT_LINE_POINTS,
            });
            let material = self.backend.create_material(
                &MaterialDesc {
                    shading: Shading::Unlit,
                    color: ORBIT_LINE_COLOR,
                    ..Default::default()
                }
                .with_opacity(ORBIT_LINE_OPACITY),
            );

            let id = self.scene.alloc_id();
            self.scene.spawn(
                SceneNode::new(id, NodeKind::Line { geometry, material })
                    .with_tag(format!("{}-path", spec.name))
                    // Circle geometry lives in XY; tip it into the orbital plane.
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            );
        }
    }
}
