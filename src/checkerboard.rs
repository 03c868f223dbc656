use cgmath::Vector4;
use thiserror::Error;

use crate::mesh::{TriMesh, Vertex};

const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Grid of `nx` by `ny` square cells on the XZ plane, centered on the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CheckerPattern {
    pub nx: u32,
    pub ny: u32,
    pub cell_size: f32,
    pub colors: [Vector4<f32>; 2],
}

impl CheckerPattern {
    pub fn new(nx: u32, ny: u32) -> Self {
        Self {
            nx,
            ny,
            cell_size: 1.0,
            colors: [
                Vector4::new(0.9, 0.9, 0.9, 1.0),
                Vector4::new(0.2, 0.2, 0.2, 1.0),
            ],
        }
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_colors(mut self, light: Vector4<f32>, dark: Vector4<f32>) -> Self {
        self.colors = [light, dark];
        self
    }

    pub fn cells(&self) -> u64 {
        self.nx as u64 * self.ny as u64
    }

    /// Every cell gets its own four vertices so neighbours can differ in color.
    pub fn build(&self) -> Result<TriMesh, GridError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(self.cell_size));
        }

        if self.cells() == 0 {
            return Ok(TriMesh::new());
        }

        // index count has to fit a GLsizei draw count
        if self.cells() * 6 > i32::MAX as u64 {
            return Err(GridError::TooLarge(self.nx, self.ny));
        }

        let cells = self.cells() as usize;
        let mut mesh = TriMesh::with_capacity(cells * 4, cells * 6);

        let s = self.cell_size;
        let x_start = -(self.nx as f32) * s / 2.0;
        let z_start = -(self.ny as f32) * s / 2.0;

        for i in 0..self.nx {
            for j in 0..self.ny {
                let color = self.colors[((i + j) % 2) as usize];

                let x0 = x_start + i as f32 * s;
                let x1 = x0 + s;
                let z0 = z_start + j as f32 * s;
                let z1 = z0 + s;

                mesh.push_quad([
                    Vertex::new([x0, 0.0, z1], UP, color),
                    Vertex::new([x1, 0.0, z1], UP, color),
                    Vertex::new([x1, 0.0, z0], UP, color),
                    Vertex::new([x0, 0.0, z0], UP, color),
                ]);
            }
        }

        Ok(mesh)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("cell size must be a positive number, got {0}")]
    InvalidCellSize(f32),
    #[error("{0}x{1} grid has too many indices for a single draw")]
    TooLarge(u32, u32),
}
