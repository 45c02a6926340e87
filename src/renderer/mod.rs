//! WebGPU rendering module
//!
//! Flat-colored triangle lists rebuilt each frame from the simulation
//! snapshot. The HUD (score, countdown, overlays) lives in the DOM, not
//! here.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_frame;
pub use vertex::Vertex;
