pub mod clock;
pub mod scene;
