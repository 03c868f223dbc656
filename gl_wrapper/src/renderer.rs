use cgmath::Matrix4;
use gl::types::GLsizei;

use deepimage::Model3D;

use crate::geometry::Geometry;
use crate::program::Program;
use crate::shaders::ModelShader;

#[derive(Default)]
pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            program.bind();
            self.current_program = p_id;
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        let (indexed, count) = match geometry.indices() {
            Some(count) => (true, count),
            None => (false, geometry.vertices()),
        };

        let Some(count) = draw_count(count) else {
            log::error!("geometry {} has {count} elements, too many for one draw", geometry.vao());
            return;
        };

        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            if indexed {
                gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, std::ptr::null());
            } else {
                gl::DrawArrays(gl::TRIANGLES, 0, count);
            }
            gl::BindVertexArray(0);
        }
    }

    /// Binds the shader, pushes the model's uniforms and draws.
    pub fn draw_model(
        &mut self,
        geometry: &Geometry,
        shader: &dyn ModelShader,
        view: &Matrix4<f32>,
        proj: &Matrix4<f32>,
        model: &Model3D,
    ) {
        self.use_program(shader.program());
        shader.set_uniforms(view, proj, model);
        self.draw(geometry, shader.program());
    }

    /// Forgets the cached program, e.g. after someone else called `glUseProgram`.
    pub fn reset(&mut self) {
        self.current_program = 0;
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn enable_depth_test(&self) {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LESS);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }
}

fn draw_count(count: usize) -> Option<GLsizei> {
    GLsizei::try_from(count).ok()
}
