use cgmath::Matrix4;
use thiserror::Error;

use deepimage::{CheckerPattern, GridError, Model3D};

use crate::geometry::{GBError, Geometry};
use crate::renderer::GlRenderer;
use crate::shaders::ModelShader;

/// Checkerboard floor kept in GPU buffers.
pub struct CheckerBoard {
    pattern: CheckerPattern,
    model: Model3D,
    geometry: Option<Geometry>,
}

impl CheckerBoard {
    /// No GL work happens until [`CheckerBoard::init`].
    pub fn new(nx: u32, ny: u32) -> Self {
        Self::with_pattern(CheckerPattern::new(nx, ny))
    }

    pub fn with_pattern(pattern: CheckerPattern) -> Self {
        Self {
            pattern,
            model: Model3D::default(),
            geometry: None,
        }
    }

    pub fn pattern(&self) -> &CheckerPattern {
        &self.pattern
    }

    pub fn is_initialized(&self) -> bool {
        self.geometry.is_some()
    }

    /// Builds the grid and uploads it, replacing earlier buffers.
    pub fn init(&mut self) -> Result<(), CheckerBoardError> {
        let mesh = self.pattern.build()?;
        let geometry = Geometry::from_mesh(&mesh)?;

        log::debug!(
            "checkerboard {}x{}: {} triangles",
            self.pattern.nx,
            self.pattern.ny,
            mesh.triangle_count()
        );

        self.geometry = Some(geometry);
        Ok(())
    }

    pub fn draw(
        &self,
        renderer: &mut GlRenderer,
        view: &Matrix4<f32>,
        proj: &Matrix4<f32>,
        shader: &dyn ModelShader,
    ) -> Result<(), CheckerBoardError> {
        let geometry = self
            .geometry
            .as_ref()
            .ok_or(CheckerBoardError::NotInitialized)?;

        if geometry.indices() == Some(0) {
            return Ok(());
        }

        renderer.draw_model(geometry, shader, view, proj, &self.model);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CheckerBoardError {
    #[error("checkerboard drawn before init")]
    NotInitialized,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Geometry(#[from] GBError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    use crate::program::Program;

    /// Stands in for a real shader where the draw must fail before touching it.
    struct UnusedShader;

    impl ModelShader for UnusedShader {
        fn program(&self) -> &Program {
            unreachable!("shader used by a board that was never uploaded")
        }

        fn set_uniforms(&self, _: &Matrix4<f32>, _: &Matrix4<f32>, _: &Model3D) {
            unreachable!("shader used by a board that was never uploaded")
        }
    }

    #[test]
    fn draw_before_init_fails() {
        let board = CheckerBoard::new(2, 2);
        let mut renderer = GlRenderer::new();
        let id = Matrix4::identity();

        let res = board.draw(&mut renderer, &id, &id, &UnusedShader);

        assert!(matches!(res, Err(CheckerBoardError::NotInitialized)));
    }

    #[test]
    fn new_does_not_upload() {
        let board = CheckerBoard::new(8, 4);

        assert!(!board.is_initialized());
        assert_eq!(board.pattern().nx, 8);
        assert_eq!(board.pattern().ny, 4);
    }

    #[test]
    fn init_reports_grid_errors_before_gl() {
        let mut board = CheckerBoard::with_pattern(CheckerPattern::new(2, 2).with_cell_size(-1.0));

        let err = board.init().unwrap_err();

        assert!(matches!(err, CheckerBoardError::Grid(GridError::InvalidCellSize(_))));
        assert!(!board.is_initialized());
    }
}
