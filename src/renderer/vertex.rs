//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::Rgba;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
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

/// Colors for game elements (bricks carry their own tint)
pub mod colors {
    use crate::Rgba;

    pub const BACKGROUND_TOP: Rgba = [0.06, 0.13, 0.24, 1.0];
    pub const BACKGROUND_BOTTOM: Rgba = [0.03, 0.07, 0.13, 1.0];
    /// Alpha of the top-half gradient band
    pub const BACKGROUND_BAND_ALPHA: f32 = 0.55;
    pub const VIGNETTE: Rgba = [0.0, 0.0, 0.0, 0.16];
    pub const PADDLE: Rgba = [0.33, 0.85, 0.62, 1.0];
    pub const BALL: Rgba = [0.96, 0.96, 1.0, 1.0];
    pub const BRICK_HIGHLIGHT: Rgba = [1.0, 1.0, 1.0, 0.14];
}
