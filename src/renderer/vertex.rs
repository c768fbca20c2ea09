//! Vertex types for textured quads

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            tex_coord: [u, v],
        }
    }

    /// Byte stride of one vertex in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Texture each sprite samples from
pub mod textures {
    pub const BALL: &str = "ball.png";
    pub const PADDLE: &str = "paddle.png";
    pub const BLOCK: &str = "block.png";
}
