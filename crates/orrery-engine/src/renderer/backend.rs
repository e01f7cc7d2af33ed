use crate::api::types::{Color, GeometryHandle, MaterialHandle, TextureHandle};
use crate::core::scene::Scene;
use crate::renderer::camera::OrbitCamera;

/// Geometry requested from the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryDesc {
    Sphere {
        radius: f32,
        segments: u32,
    },
    /// Flat annulus, for planetary rings.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
    },
    /// Closed circular polyline in the local XY plane.
    Circle {
        radius: f32,
        points: u32,
    },
}

/// Whether a material reacts to scene lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Lit,
    /// Flat/emissive-style: sun, starfield, orbit lines.
    Unlit,
}

/// Which faces the collaborator rasterizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    /// Inside of an enclosing sphere (starfield).
    Back,
    Double,
}

/// Material requested from the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub shading: Shading,
    pub texture: Option<TextureHandle>,
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            shading: Shading::Lit,
            texture: None,
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
        }
    }
}

impl MaterialDesc {
    pub fn textured(shading: Shading, texture: TextureHandle) -> Self {
        Self {
            shading,
            texture: Some(texture),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

/// The rendering collaborator, consumed as a black box.
///
/// The scene manager acquires geometry/material/texture handles during
/// construction, submits one frame per animation tick, and releases every
/// handle at teardown. Releasing a handle the backend does not know is a
/// no-op — teardown must never fail.
pub trait RenderBackend {
    /// Create and attach the rendering surface at the given size.
    fn init_surface(&mut self, width: f32, height: f32);

    /// Keep the viewport in sync with the container size.
    fn resize(&mut self, width: f32, height: f32);

    /// Request an asynchronous texture load by asset name.
    /// The handle is usable immediately; the surface stays blank until
    /// the host resolves the asset (or forever, if it never does).
    fn load_texture(&mut self, name: &str) -> TextureHandle;

    fn create_geometry(&mut self, desc: &GeometryDesc) -> GeometryHandle;

    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialHandle;

    fn release_geometry(&mut self, handle: GeometryHandle);

    fn release_material(&mut self, handle: MaterialHandle);

    /// Set the background clear color.
    fn set_clear_color(&mut self, color: Color);

    /// Submit the scene and camera for one draw.
    fn submit(&mut self, scene: &Scene, camera: &OrbitCamera);

    /// Detach and release the rendering surface.
    fn release_surface(&mut self);
}
