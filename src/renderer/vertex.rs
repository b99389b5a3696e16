//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in scene pixels with an sRGB color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Scene colors (sRGB, written straight to a non-sRGB surface)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLATE_FILL: [f32; 4] = [0.965, 0.965, 0.969, 1.0]; // #f6f6f7
    pub const PLATE_EDGE: [f32; 4] = [0.6, 0.6, 0.6, 1.0]; // #999
    pub const RAY: [f32; 4] = [0.173, 0.243, 0.314, 1.0]; // #2c3e50
    pub const NORMAL_MARKER: [f32; 4] = [0.584, 0.647, 0.651, 1.0]; // #95a5a6
    pub const SHIFT_MARKER: [f32; 4] = [0.902, 0.494, 0.133, 1.0]; // #e67e22
}
