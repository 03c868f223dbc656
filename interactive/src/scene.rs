use deepimage::camera::OrbitCamera;
use deepimage::{CheckerPattern, Model3D};

use gl_wrapper::shaders::ShaderKind;

use crate::args::Args;

pub const DEFAULT_GRID: u32 = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeshKind {
    Cube,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub mesh: MeshKind,
    pub shader: ShaderKind,
    pub model: Model3D,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub pattern: CheckerPattern,
    pub shader: ShaderKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: OrbitCamera,
    pub floor: Option<Floor>,
    pub objects: Vec<SceneObject>,
}

/// Checkerboard settings given on the command line.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GridOverrides {
    pub nx: Option<u32>,
    pub ny: Option<u32>,
    pub cell_size: Option<f32>,
}

impl GridOverrides {
    pub fn from_args(args: &Args) -> Self {
        Self {
            nx: args.grid_x,
            ny: args.grid_y,
            cell_size: args.cell_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nx.is_none() && self.ny.is_none() && self.cell_size.is_none()
    }

    /// Adds a floor to scenes without one when any value is overridden.
    pub fn apply(&self, scene: &mut Scene) {
        if self.is_empty() {
            return;
        }

        let floor = scene.floor.get_or_insert_with(|| Floor {
            pattern: CheckerPattern::new(DEFAULT_GRID, DEFAULT_GRID),
            shader: ShaderKind::VertexColor,
        });

        if let Some(nx) = self.nx {
            floor.pattern.nx = nx;
        }
        if let Some(ny) = self.ny {
            floor.pattern.ny = ny;
        }
        if let Some(cell_size) = self.cell_size {
            floor.pattern.cell_size = cell_size;
        }
    }
}
