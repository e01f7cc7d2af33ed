use glam::Vec3;

use crate::api::types::NodeId;
use crate::builder::SceneBuilder;
use crate::catalog;
use crate::core::scene::{NodeKind, Scene};
use crate::renderer::backend::RenderBackend;
use crate::renderer::camera::OrbitCamera;

/// Camera placement and zoom limits, relative to the system scale.
const CAMERA_MIN_DISTANCE: f32 = 20.0;
const CAMERA_HEIGHT_FACTOR: f32 = 0.7;
const CAMERA_BACK_FACTOR: f32 = 1.2;
const CAMERA_MAX_DISTANCE_FACTOR: f32 = 1.5;

/// Animation loop state. `Running` means the host's next tick advances
/// the simulation and submits a frame; `Stopped` means ticks are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Mutable per-planet simulation state, owned by the scene manager for
/// the whole mounted period and destroyed together at teardown.
#[derive(Debug, Clone)]
pub struct PlanetState {
    pub name: &'static str,
    /// Orbit-group pivot; its Y rotation realizes revolution.
    pub group: NodeId,
    /// Planet sphere; its own Y rotation realizes spin.
    pub mesh: NodeId,
    pub distance: f32,
    /// Mutable via the control surface.
    pub orbit_speed: f32,
    /// Fixed post-construction.
    pub rotation_speed: f32,
    /// Accumulates without wrapping; the applied rotation is equivalent
    /// mod 2π, which is the renderer's concern, not stored state.
    pub current_angle: f32,
}

/// Owns the scene graph, the camera, the per-planet simulation state and
/// the animation-loop state machine. An explicit instance — construct as
/// many as you like (one per canvas, one per test).
pub struct SceneManager<B: RenderBackend> {
    backend: B,
    scene: Scene,
    camera: OrbitCamera,
    planets: Vec<PlanetState>,
    loop_state: LoopState,
    initialized: bool,
}

impl<B: RenderBackend> SceneManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            scene: Scene::new(),
            camera: OrbitCamera::new(1.0),
            planets: Vec::new(),
            loop_state: LoopState::Stopped,
            initialized: false,
        }
    }

    // ---- Lifecycle ----

    /// Attach to a surface of the given size, build the scene, place the
    /// camera and start the loop. Once per mounted period; a second call
    /// without an intervening `dispose` is ignored with a warning.
    pub fn init(&mut self, width: f32, height: f32) {
        if self.initialized {
            log::warn!("scene manager: init called while already initialized, ignoring");
            return;
        }

        self.backend.init_surface(width, height);

        let aspect = if height > 0.0 { width / height } else { 1.0 };
        self.camera = OrbitCamera::new(aspect);
        self.camera.min_distance = CAMERA_MIN_DISTANCE;
        self.camera.max_distance = catalog::SYSTEM_RADIUS_SCALE * CAMERA_MAX_DISTANCE_FACTOR;
        self.camera.look_from(
            Vec3::new(
                0.0,
                catalog::SYSTEM_RADIUS_SCALE * CAMERA_HEIGHT_FACTOR,
                catalog::SYSTEM_RADIUS_SCALE * CAMERA_BACK_FACTOR,
            ),
            Vec3::ZERO,
        );

        self.planets =
            SceneBuilder::new(&mut self.scene, &mut self.backend).build(&catalog::planets());

        self.loop_state = LoopState::Running;
        self.initialized = true;
        log::info!(
            "scene manager: initialized {}x{}, {} planets",
            width,
            height,
            self.planets.len()
        );
    }

    /// Keep camera aspect and viewport in sync with the container.
    pub fn resize(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.camera.set_aspect(width / height);
        }
        self.backend.resize(width, height);
    }

    /// Tear everything down: stop the loop, release every geometry and
    /// material acquired at build time, release the surface, clear the
    /// scene and planet state. Safe to call at any point — before init,
    /// after a failed init, or repeatedly — and leaves the manager ready
    /// for a fresh `init`.
    pub fn dispose(&mut self) {
        self.loop_state = LoopState::Stopped;

        for node in self.scene.iter() {
            match &node.kind {
                NodeKind::Mesh { geometry, materials } => {
                    self.backend.release_geometry(*geometry);
                    for material in materials {
                        self.backend.release_material(*material);
                    }
                }
                NodeKind::Line { geometry, material } => {
                    self.backend.release_geometry(*geometry);
                    self.backend.release_material(*material);
                }
                NodeKind::Group | NodeKind::AmbientLight { .. } | NodeKind::PointLight { .. } => {}
            }
        }
        self.backend.release_surface();

        self.scene.clear();
        self.planets.clear();

        if self.initialized {
            log::info!("scene manager: disposed");
        }
        self.initialized = false;
    }

    // ---- Animation loop ----

    /// One animation tick: advance every planet's orbit and spin by the
    /// elapsed time, step the camera damping, submit one frame. Inert
    /// while the loop is stopped — no state mutation, no submission.
    pub fn tick(&mut self, dt: f32) {
        if self.loop_state != LoopState::Running {
            return;
        }

        for planet in &mut self.planets {
            planet.current_angle += planet.orbit_speed * dt * catalog::ORBIT_TIME_SCALE;
            if let Some(group) = self.scene.get_mut(planet.group) {
                group.rotation.y = planet.current_angle;
            }
            if let Some(mesh) = self.scene.get_mut(planet.mesh) {
                mesh.rotation.y += planet.rotation_speed * dt * catalog::SPIN_TIME_SCALE;
            }
        }

        self.camera.update();
        self.backend.submit(&self.scene, &self.camera);
    }

    /// Stop the loop. Idempotent.
    pub fn pause(&mut self) {
        self.loop_state = LoopState::Stopped;
    }

    /// (Re-)start the loop. Idempotent.
    pub fn resume(&mut self) {
        self.loop_state = LoopState::Running;
    }

    // ---- Control surface ----

    /// Set the named planet's orbit speed. Unknown names are silently
    /// ignored — best-effort policy, nothing downstream depends on it.
    pub fn set_orbit_speed(&mut self, name: &str, speed: f32) {
        match self.planets.iter_mut().find(|p| p.name == name) {
            Some(planet) => planet.orbit_speed = speed,
            None => log::debug!("set_orbit_speed: unknown planet '{name}'"),
        }
    }

    /// Switch the background clear color between the two theme palette
    /// values. Pure display toggle, no simulation effect.
    pub fn toggle_background(&mut self, is_dark: bool) {
        let color = if is_dark {
            catalog::BACKGROUND_DARK
        } else {
            catalog::BACKGROUND_LIGHT
        };
        self.backend.set_clear_color(color);
    }

    /// Dolly the camera outward by `factor` and apply one damping step
    /// immediately so the zoom responds even while paused.
    pub fn zoom_camera(&mut self, factor: f32) {
        self.camera.dolly_out(factor);
        self.camera.update();
    }

    // ---- Accessors ----

    pub fn is_running(&self) -> bool {
        self.loop_state == LoopState::Running
    }

    pub fn planets(&self) -> &[PlanetState] {
        &self.planets
    }

    pub fn planet(&self, name: &str) -> Option<&PlanetState> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
