pub mod backend;
pub mod buffer;
pub mod camera;
