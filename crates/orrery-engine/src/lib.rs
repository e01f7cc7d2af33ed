pub mod api;
pub mod bridge;
pub mod builder;
pub mod catalog;
pub mod core;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::manager::{LoopState, PlanetState, SceneManager};
pub use api::types::{Color, GeometryHandle, MaterialHandle, NodeId, TextureHandle};
pub use bridge::protocol::ProtocolLayout;
pub use builder::SceneBuilder;
pub use catalog::{PlanetSpec, RingSpec};
pub use core::clock::FrameClock;
pub use core::scene::{NodeKind, Scene, SceneNode};
pub use renderer::backend::{GeometryDesc, MaterialDesc, RenderBackend, Shading, Side};
pub use renderer::buffer::{FrameBackend, FrameInstance};
pub use renderer::camera::OrbitCamera;
