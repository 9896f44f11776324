//! Vertex types for 3D rendering

use bytemuck::{Pod, Zeroable};

/// Lit 3D vertex with position, normal, and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
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
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements (matching the shipped palette)
pub mod colors {
    pub const GROUND: [f32; 4] = [0.102, 0.416, 0.169, 1.0];
    pub const TRUNK: [f32; 4] = [0.420, 0.247, 0.122, 1.0];
    pub const LEAVES: [f32; 4] = [0.118, 0.545, 0.227, 1.0];
    pub const HOUSE_BASE: [f32; 4] = [0.851, 0.776, 0.651, 1.0];
    pub const HOUSE_ROOF: [f32; 4] = [0.545, 0.231, 0.165, 1.0];
    /// Sky tint, also the fog color
    pub const SKY: [f32; 4] = [0.529, 0.776, 1.0, 1.0];
}
