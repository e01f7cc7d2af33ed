//! Production render backend: packs the scene into a flat f32 frame
//! buffer the JS host reads directly from WASM memory and replays
//! against its 3D library. Geometry/material descriptors live Rust-side
//! keyed by handle; the host sees them inline in each instance.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::api::types::{Color, GeometryHandle, MaterialHandle, TextureHandle};
use crate::bridge::protocol::{self, ProtocolLayout};
use crate::core::scene::{NodeKind, Scene, SceneNode};
use crate::renderer::backend::{GeometryDesc, MaterialDesc, RenderBackend, Shading, Side};
use crate::renderer::camera::OrbitCamera;

/// One drawable node on the wire.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct FrameInstance {
    pub node_id: f32,
    pub kind: f32,
    /// World translation.
    pub tx: f32,
    pub ty: f32,
    pub tz: f32,
    /// World rotation quaternion.
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    /// Geometry parameters: sphere radius / ring inner / circle radius,
    /// and ring outer / circle point count. Light intensity for lights.
    pub param0: f32,
    pub param1: f32,
    /// Texture table index, or NO_TEXTURE.
    pub texture: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
    pub flags: f32,
    pub _pad: [f32; 3],
}

impl FrameInstance {
    pub const FLOATS: usize = protocol::INSTANCE_FLOATS;
}

/// Default instance capacity — the solar-system scene has ~30 drawables,
/// so 64 leaves comfortable headroom.
const DEFAULT_MAX_INSTANCES: usize = 64;

pub struct FrameBackend {
    layout: ProtocolLayout,
    frame: Vec<f32>,
    frame_counter: u32,
    clear_color: Color,
    geometries: HashMap<u32, GeometryDesc>,
    materials: HashMap<u32, MaterialDesc>,
    /// Texture names in handle order; the host loads them lazily by name.
    textures: Vec<String>,
    next_geometry: u32,
    next_material: u32,
    surface: Option<(f32, f32)>,
}

impl FrameBackend {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_INSTANCES)
    }

    pub fn with_capacity(max_instances: usize) -> Self {
        let layout = ProtocolLayout::from_capacity(max_instances);
        Self {
            frame: vec![0.0; layout.buffer_total_floats],
            layout,
            frame_counter: 0,
            clear_color: Color::BLACK,
            geometries: HashMap::new(),
            materials: HashMap::new(),
            textures: Vec::new(),
            next_geometry: 1,
            next_material: 1,
            surface: None,
        }
    }

    // ---- Accessors for the WASM bridge ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn instance_count(&self) -> u32 {
        self.frame[protocol::HEADER_INSTANCE_COUNT] as u32
    }

    pub fn texture_table(&self) -> &[String] {
        &self.textures
    }

    // ---- Packing ----

    fn pack_instance(&self, scene: &Scene, node: &SceneNode) -> Option<FrameInstance> {
        let mut inst = FrameInstance {
            node_id: node.id.0 as f32,
            texture: protocol::NO_TEXTURE,
            opacity: 1.0,
            ..Default::default()
        };

        match &node.kind {
            NodeKind::Group => return None,
            NodeKind::Mesh { geometry, materials } => {
                inst.kind = protocol::KIND_MESH;
                self.pack_geometry(*geometry, &mut inst);
                if let Some(material) = materials.first() {
                    self.pack_material(*material, &mut inst);
                }
            }
            NodeKind::Line { geometry, material } => {
                inst.kind = protocol::KIND_LINE;
                self.pack_geometry(*geometry, &mut inst);
                self.pack_material(*material, &mut inst);
            }
            NodeKind::AmbientLight { color, intensity } => {
                inst.kind = protocol::KIND_AMBIENT_LIGHT;
                inst.param0 = *intensity;
                inst.r = color.r;
                inst.g = color.g;
                inst.b = color.b;
            }
            NodeKind::PointLight { color, intensity } => {
                inst.kind = protocol::KIND_POINT_LIGHT;
                inst.param0 = *intensity;
                inst.r = color.r;
                inst.g = color.g;
                inst.b = color.b;
            }
        }

        let (_, rotation, translation) =
            scene.world_transform(node.id).to_scale_rotation_translation();
        inst.tx = translation.x;
        inst.ty = translation.y;
        inst.tz = translation.z;
        inst.qx = rotation.x;
        inst.qy = rotation.y;
        inst.qz = rotation.z;
        inst.qw = rotation.w;

        Some(inst)
    }

    fn pack_geometry(&self, handle: GeometryHandle, inst: &mut FrameInstance) {
        match self.geometries.get(&handle.0) {
            Some(GeometryDesc::Sphere { radius, .. }) => inst.param0 = *radius,
            Some(GeometryDesc::Ring { inner_radius, outer_radius, .. }) => {
                inst.param0 = *inner_radius;
                inst.param1 = *outer_radius;
            }
            Some(GeometryDesc::Circle { radius, points }) => {
                inst.param0 = *radius;
                inst.param1 = *points as f32;
            }
            None => {}
        }
    }

    fn pack_material(&self, handle: MaterialHandle, inst: &mut FrameInstance) {
        let Some(desc) = self.materials.get(&handle.0) else {
            return;
        };
        inst.texture = desc
            .texture
            .map(|t| t.0 as f32)
            .unwrap_or(protocol::NO_TEXTURE);
        inst.r = desc.color.r;
        inst.g = desc.color.g;
        inst.b = desc.color.b;
        inst.opacity = desc.opacity;

        let mut flags = 0u32;
        if desc.transparent {
            flags |= protocol::FLAG_TRANSPARENT;
        }
        if desc.side == Side::Double {
            flags |= protocol::FLAG_DOUBLE_SIDE;
        }
        if desc.side == Side::Back {
            flags |= protocol::FLAG_BACK_SIDE;
        }
        if desc.shading == Shading::Unlit {
            flags |= protocol::FLAG_UNLIT;
        }
        inst.flags = flags as f32;
    }

    fn write_header(&mut self, instance_count: usize, camera: &OrbitCamera) {
        let h = &mut self.frame;
        h[protocol::HEADER_PROTOCOL_VERSION] = protocol::PROTOCOL_VERSION;
        h[protocol::HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        h[protocol::HEADER_INSTANCE_COUNT] = instance_count as f32;
        h[protocol::HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        h[protocol::HEADER_CLEAR_R] = self.clear_color.r;
        h[protocol::HEADER_CLEAR_G] = self.clear_color.g;
        h[protocol::HEADER_CLEAR_B] = self.clear_color.b;
        h[protocol::HEADER_CAMERA_X] = camera.position.x;
        h[protocol::HEADER_CAMERA_Y] = camera.position.y;
        h[protocol::HEADER_CAMERA_Z] = camera.position.z;
        h[protocol::HEADER_TARGET_X] = camera.target.x;
        h[protocol::HEADER_TARGET_Y] = camera.target.y;
        h[protocol::HEADER_TARGET_Z] = camera.target.z;
        h[protocol::HEADER_FOV_Y] = camera.fov_y_deg;
        h[protocol::HEADER_ASPECT] = camera.aspect;
        h[protocol::HEADER_RESERVED] = 0.0;
    }
}

impl Default for FrameBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for FrameBackend {
    fn init_surface(&mut self, width: f32, height: f32) {
        self.surface = Some((width, height));
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.surface = Some((width, height));
    }

    fn load_texture(&mut self, name: &str) -> TextureHandle {
        // Dedupe by name so re-init after dispose reuses table slots.
        if let Some(index) = self.textures.iter().position(|t| t == name) {
            return TextureHandle(index as u32);
        }
        self.textures.push(name.to_string());
        TextureHandle(self.textures.len() as u32 - 1)
    }

    fn create_geometry(&mut self, desc: &GeometryDesc) -> GeometryHandle {
        let handle = self.next_geometry;
        self.next_geometry += 1;
        self.geometries.insert(handle, *desc);
        GeometryHandle(handle)
    }

    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialHandle {
        let handle = self.next_material;
        self.next_material += 1;
        self.materials.insert(handle, *desc);
        MaterialHandle(handle)
    }

    fn release_geometry(&mut self, handle: GeometryHandle) {
        self.geometries.remove(&handle.0);
    }

    fn release_material(&mut self, handle: MaterialHandle) {
        self.materials.remove(&handle.0);
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn submit(&mut self, scene: &Scene, camera: &OrbitCamera) {
        self.frame_counter = self.frame_counter.wrapping_add(1);

        let mut count = 0;
        for node in scene.iter() {
            if count >= self.layout.max_instances {
                log::warn!("frame backend: instance capacity reached, frame truncated");
                break;
            }
            if let Some(inst) = self.pack_instance(scene, node) {
                let offset = self.layout.instance_offset(count);
                self.frame[offset..offset + FrameInstance::FLOATS]
                    .copy_from_slice(bytemuck::cast_slice(&[inst]));
                count += 1;
            }
        }

        self.write_header(count, camera);
    }

    fn release_surface(&mut self) {
        self.surface = None;
        self.geometries.clear();
        self.materials.clear();
        self.frame.fill(0.0);
        self.frame_counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneNode;
    use glam::Vec3;

    fn sphere_mesh(scene: &mut Scene, backend: &mut FrameBackend, radius: f32) -> SceneNode {
        let geometry = backend.create_geometry(&GeometryDesc::Sphere { radius, segments: 16 });
        let material = backend.create_material(&MaterialDesc::default());
        let id = scene.alloc_id();
        SceneNode::new(
            id,
            NodeKind::Mesh {
                geometry,
                materials: vec![material],
            },
        )
    }

    #[test]
    fn submit_writes_header_and_instances() {
        let mut backend = FrameBackend::new();
        let mut scene = Scene::new();
        let node = sphere_mesh(&mut scene, &mut backend, 3.5);
        scene.spawn(node.with_translation(Vec3::new(15.0, 0.0, 0.0)));
        backend.set_clear_color(Color::BLACK);

        let camera = OrbitCamera::new(800.0 / 600.0);
        backend.submit(&scene, &camera);

        assert_eq!(backend.frame[protocol::HEADER_PROTOCOL_VERSION], 1.0);
        assert_eq!(backend.frame[protocol::HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(backend.instance_count(), 1);

        let offset = backend.layout.instance_offset(0);
        let inst = &backend.frame[offset..offset + FrameInstance::FLOATS];
        assert_eq!(inst[1], protocol::KIND_MESH);
        assert_eq!(inst[2], 15.0); // tx
        assert_eq!(inst[9], 3.5); // sphere radius
    }

    #[test]
    fn groups_do_not_cross_the_wire_but_shape_children() {
        let mut backend = FrameBackend::new();
        let mut scene = Scene::new();

        let pivot = scene.alloc_id();
        scene.spawn(
            SceneNode::new(pivot, NodeKind::Group)
                .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0)),
        );
        let child = sphere_mesh(&mut scene, &mut backend, 1.0);
        scene.spawn(
            child
                .with_parent(pivot)
                .with_translation(Vec3::new(10.0, 0.0, 0.0)),
        );

        backend.submit(&scene, &OrbitCamera::new(1.0));
        assert_eq!(backend.instance_count(), 1);

        let offset = backend.layout.instance_offset(0);
        let tx = backend.frame[offset + 2];
        let tz = backend.frame[offset + 4];
        assert!(tx.abs() < 1e-4, "tx = {tx}");
        assert!((tz + 10.0).abs() < 1e-4, "tz = {tz}");
    }

    #[test]
    fn clear_color_lands_in_the_header() {
        let mut backend = FrameBackend::new();
        let scene = Scene::new();
        backend.set_clear_color(Color::from_hex(0xEEEEEE));
        backend.submit(&scene, &OrbitCamera::new(1.0));
        let expected = 0xEE as f32 / 255.0;
        assert!((backend.frame[protocol::HEADER_CLEAR_R] - expected).abs() < 1e-6);
    }

    #[test]
    fn camera_state_lands_in_the_header() {
        let mut backend = FrameBackend::new();
        let scene = Scene::new();
        let mut camera = OrbitCamera::new(2.0);
        camera.look_from(Vec3::new(0.0, 84.0, 144.0), Vec3::ZERO);
        backend.submit(&scene, &camera);
        assert_eq!(backend.frame[protocol::HEADER_CAMERA_Y], 84.0);
        assert_eq!(backend.frame[protocol::HEADER_CAMERA_Z], 144.0);
        assert_eq!(backend.frame[protocol::HEADER_ASPECT], 2.0);
        assert_eq!(backend.frame[protocol::HEADER_FOV_Y], 60.0);
    }

    #[test]
    fn texture_table_dedupes_by_name() {
        let mut backend = FrameBackend::new();
        let a = backend.load_texture("8k_sun.jpg");
        let b = backend.load_texture("8k_mars.jpg");
        let c = backend.load_texture("8k_sun.jpg");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(backend.texture_table().len(), 2);
    }

    #[test]
    fn releasing_unknown_handles_is_harmless() {
        let mut backend = FrameBackend::new();
        backend.release_geometry(GeometryHandle(999));
        backend.release_material(MaterialHandle(999));
    }

    #[test]
    fn release_surface_resets_frame_state() {
        let mut backend = FrameBackend::new();
        let mut scene = Scene::new();
        let node = sphere_mesh(&mut scene, &mut backend, 1.0);
        scene.spawn(node);
        backend.submit(&scene, &OrbitCamera::new(1.0));
        assert_eq!(backend.frame_counter(), 1);

        backend.release_surface();
        assert_eq!(backend.frame_counter(), 0);
        assert_eq!(backend.instance_count(), 0);
        assert!(backend.geometries.is_empty());
        assert!(backend.materials.is_empty());
    }

    #[test]
    fn frame_truncates_at_capacity() {
        let mut backend = FrameBackend::with_capacity(2);
        let mut scene = Scene::new();
        for _ in 0..5 {
            let node = sphere_mesh(&mut scene, &mut backend, 1.0);
            scene.spawn(node);
        }
        backend.submit(&scene, &OrbitCamera::new(1.0));
        assert_eq!(backend.instance_count(), 2);
    }

    #[test]
    fn unlit_back_side_material_sets_flags() {
        let mut backend = FrameBackend::new();
        let mut scene = Scene::new();
        let geometry =
            backend.create_geometry(&GeometryDesc::Sphere { radius: 240.0, segments: 32 });
        let texture = backend.load_texture("8k_stars_milky_way.jpg");
        let material = backend.create_material(
            &MaterialDesc::textured(Shading::Unlit, texture).with_side(Side::Back),
        );
        let id = scene.alloc_id();
        scene.spawn(SceneNode::new(
            id,
            NodeKind::Mesh {
                geometry,
                materials: vec![material],
            },
        ));

        backend.submit(&scene, &OrbitCamera::new(1.0));
        let offset = backend.layout.instance_offset(0);
        let flags = backend.frame[offset + 16] as u32;
        assert_ne!(flags & protocol::FLAG_BACK_SIDE, 0);
        assert_ne!(flags & protocol::FLAG_UNLIT, 0);
        assert_eq!(flags & protocol::FLAG_TRANSPARENT, 0);
    }
}
