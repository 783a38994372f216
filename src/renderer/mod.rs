//! WebGPU rendering module
//!
//! The simulation is flattened into colored triangles on the CPU each frame
//! and drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, StartupError};
pub use scene::build_scene;
pub use vertex::Vertex;
