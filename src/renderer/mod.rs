//! WebGPU rendering for the forest scene
//!
//! Consumes the camera pose and an obstacle registry snapshot each frame;
//! the simulation never touches rendering state.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
