//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Sky fill, same shade the canvas fell back to without a background
    pub const SKY: [f32; 4] = [0.44, 0.77, 0.81, 1.0];
    pub const HILLS: [f32; 4] = [0.36, 0.65, 0.55, 1.0];
    pub const GROUND: [f32; 4] = [0.82, 0.72, 0.42, 1.0];
    pub const PIPE: [f32; 4] = [0.18, 0.70, 0.25, 1.0];
    pub const PIPE_RIM: [f32; 4] = [0.11, 0.50, 0.17, 1.0];
    pub const BIRD_BODY: [f32; 4] = [0.98, 0.83, 0.18, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.95, 0.65, 0.12, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.92, 0.42, 0.12, 1.0];
    pub const BIRD_EYE: [f32; 4] = [0.12, 0.12, 0.12, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.84, 0.1, 1.0];
}
