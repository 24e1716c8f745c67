//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position (arena units) and color
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

    #[inline]
    pub fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }
}

/// Colors for arena elements
pub mod colors {
    pub const OBSTACLE: [f32; 4] = [0.5, 0.0, 0.0, 1.0]; // Maroon
    pub const BOUNDARY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const TARGET: [f32; 4] = [0.67, 0.67, 0.67, 1.0];
    pub const ROBOT: [f32; 4] = [0.47, 0.47, 0.47, 1.0];
    pub const ROBOT_EYE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SENSOR_RAY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let vertices = [Vertex::new(1.0, 2.0, colors::ROBOT); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 72);
    }
}
