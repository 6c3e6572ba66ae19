pub mod camera;
pub mod config;
pub mod constants;
pub mod field;
pub mod glow;
pub mod graph;
pub mod lifecycle;
pub mod physics;
pub mod pulse;
pub mod scene;

pub use camera::*;
pub use config::*;
pub use field::*;
pub use glow::*;
pub use graph::*;
pub use lifecycle::*;
pub use pulse::*;
pub use scene::*;

// Shaders bundled as string constants
pub static NETWORK_WGSL: &str = include_str!("../../shaders/network.wgsl");
