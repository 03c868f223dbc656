use std::path::PathBuf;

use cgmath::{Matrix4, Vector4};

use deepimage::Model3D;

use crate::program::{PBError, Program, ProgramBuilder};

/// Where the GLSL sources of the built-in shaders come from.
#[derive(Debug, Clone, Default)]
pub enum ShaderSource {
    /// Sources compiled into the binary
    #[default]
    Embedded,
    /// `<dir>/<Name>.vertex` and `<dir>/<Name>.fragment`
    Directory(PathBuf),
}

impl ShaderSource {
    fn builder(&self, name: &str, vert: &str, frag: &str) -> Result<ProgramBuilder, PBError> {
        match self {
            ShaderSource::Embedded => ProgramBuilder::new(vert, frag),
            ShaderSource::Directory(dir) => ProgramBuilder::from_files(
                dir.join(format!("{name}.vertex")),
                dir.join(format!("{name}.fragment")),
            ),
        }
    }

    fn build(&self, name: &str, vert: &str, frag: &str) -> Result<Program, PBError> {
        log::debug!("building shader {name} from {self:?}");

        self.builder(name, vert, frag)?.build()
    }
}

/// A program that knows how to push the uniforms of one model.
pub trait ModelShader {
    fn program(&self) -> &Program;

    /// The program must already be bound.
    fn set_uniforms(&self, view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D);

    fn predraw(&self, view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D) {
        self.program().bind();
        self.set_uniforms(view, proj, model);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhongUniforms {
    pub model_view: Matrix4<f32>,
    pub proj: Matrix4<f32>,
    pub color: Vector4<f32>,
}

impl PhongUniforms {
    pub fn new(view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D) -> Self {
        Self {
            model_view: view * model.model_matrix(),
            proj: *proj,
            color: model.color(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolidColorUniforms {
    pub mvp: Matrix4<f32>,
    pub color: Vector4<f32>,
}

impl SolidColorUniforms {
    pub fn new(view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D) -> Self {
        Self {
            mvp: proj * view * model.model_matrix(),
            color: model.color(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexColorUniforms {
    pub mvp: Matrix4<f32>,
}

impl VertexColorUniforms {
    pub fn new(view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D) -> Self {
        Self {
            mvp: proj * view * model.model_matrix(),
        }
    }
}

fn set_color(program: &Program, color: Vector4<f32>) {
    program.set_uniform_4f("u_Color", color.x, color.y, color.z, color.w);
}

/// Headlight Phong shading with the model color.
pub struct PhongShader {
    program: Program,
}

impl PhongShader {
    pub const NAME: &'static str = "Phong";

    pub fn new(source: &ShaderSource) -> Result<Self, PBError> {
        let program = source.build(
            Self::NAME,
            include_str!("../res/shaders/Phong.vertex"),
            include_str!("../res/shaders/Phong.fragment"),
        )?;

        Ok(Self { program })
    }
}

impl ModelShader for PhongShader {
    fn program(&self) -> &Program {
        &self.program
    }

    fn set_uniforms(&self, view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D) {
        let u = PhongUniforms::new(view, proj, model);

        self.program.set_uniform_mat4("u_ModelView", &u.model_view);
        self.program.set_uniform_mat4("u_Proj", &u.proj);
        set_color(&self.program, u.color);
    }
}

/// Unlit, the whole model in its color.
pub struct SolidColorShader {
    program: Program,
}

impl SolidColorShader {
    pub const NAME: &'static str = "BasicColor";

    pub fn new(source: &ShaderSource) -> Result<Self, PBError> {
        let program = source.build(
            Self::NAME,
            include_str!("../res/shaders/BasicColor.vertex"),
            include_str!("../res/shaders/BasicColor.fragment"),
        )?;

        Ok(Self { program })
    }
}

impl ModelShader for SolidColorShader {
    fn program(&self) -> &Program {
        &self.program
    }

    fn set_uniforms(&self, view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D) {
        let u = SolidColorUniforms::new(view, proj, model);

        self.program.set_uniform_mat4("u_MVP", &u.mvp);
        set_color(&self.program, u.color);
    }
}

/// Unlit, colors taken from the vertex data.
pub struct VertexColorShader {
    program: Program,
}

impl VertexColorShader {
    pub const NAME: &'static str = "BasicVertexColor";

    pub fn new(source: &ShaderSource) -> Result<Self, PBError> {
        let program = source.build(
            Self::NAME,
            include_str!("../res/shaders/BasicVertexColor.vertex"),
            include_str!("../res/shaders/BasicVertexColor.fragment"),
        )?;

        Ok(Self { program })
    }
}

impl ModelShader for VertexColorShader {
    fn program(&self) -> &Program {
        &self.program
    }

    fn set_uniforms(&self, view: &Matrix4<f32>, proj: &Matrix4<f32>, model: &Model3D) {
        let u = VertexColorUniforms::new(view, proj, model);

        self.program.set_uniform_mat4("u_MVP", &u.mvp);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Phong,
    SolidColor,
    VertexColor,
}

/// One instance of every built-in shader.
pub struct ShaderSet {
    pub phong: PhongShader,
    pub solid_color: SolidColorShader,
    pub vertex_color: VertexColorShader,
}

impl ShaderSet {
    pub fn new(source: &ShaderSource) -> Result<Self, PBError> {
        Ok(Self {
            phong: PhongShader::new(source)?,
            solid_color: SolidColorShader::new(source)?,
            vertex_color: VertexColorShader::new(source)?,
        })
    }

    pub fn get(&self, kind: ShaderKind) -> &dyn ModelShader {
        match kind {
            ShaderKind::Phong => &self.phong,
            ShaderKind::SolidColor => &self.solid_color,
            ShaderKind::VertexColor => &self.vertex_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{perspective, Deg, Point3, SquareMatrix, Vector3};

    fn mat4_approx_eq(a: &Matrix4<f32>, b: &Matrix4<f32>, epsilon: f32) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();

        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= epsilon)
    }

    fn camera() -> (Matrix4<f32>, Matrix4<f32>) {
        let view = Matrix4::look_at_rh(
            Point3::new(3.0, 4.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        let proj = perspective(Deg(45.0), 16.0 / 9.0, 0.1, 100.0);

        (view, proj)
    }

    fn model() -> Model3D {
        Model3D::new()
            .with_position(Vector3::new(1.0, 0.5, -2.0))
            .with_rotation(Vector3::new(10.0, 20.0, 30.0))
            .with_scale(Vector3::new(1.0, 2.0, 3.0))
            .with_color(Vector4::new(0.2, 0.4, 0.6, 0.8))
    }

    #[test]
    fn phong_keeps_projection_separate() {
        let (view, proj) = camera();
        let model = model();

        let u = PhongUniforms::new(&view, &proj, &model);

        assert!(mat4_approx_eq(&u.model_view, &(view * model.model_matrix()), 1e-6));
        assert_eq!(u.proj, proj);
        assert_eq!(u.color, model.color);
        assert!(mat4_approx_eq(
            &(u.proj * u.model_view),
            &SolidColorUniforms::new(&view, &proj, &model).mvp,
            1e-4
        ));
    }

    #[test]
    fn solid_and_vertex_color_share_mvp() {
        let (view, proj) = camera();
        let model = model();

        let solid = SolidColorUniforms::new(&view, &proj, &model);
        let vertex = VertexColorUniforms::new(&view, &proj, &model);

        assert_eq!(solid.mvp, vertex.mvp);
        assert_eq!(solid.color, Vector4::new(0.2, 0.4, 0.6, 0.8));
    }

    #[test]
    fn identity_model_is_view_projection() {
        let (view, proj) = camera();

        let u = VertexColorUniforms::new(&view, &proj, &Model3D::default());

        assert!(mat4_approx_eq(&u.mvp, &(proj * view), 1e-6));
        assert!(!mat4_approx_eq(&u.mvp, &Matrix4::identity(), 1e-3));
    }

    #[test]
    fn directory_source_reports_missing_files() {
        let source = ShaderSource::Directory(PathBuf::from("does/not/exist"));

        let res = source.builder(PhongShader::NAME, "", "");

        match res {
            Err(PBError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist/Phong.vertex"))
            }
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn embedded_sources_declare_uniforms() {
        let phong = include_str!("../res/shaders/Phong.vertex");
        let solid = include_str!("../res/shaders/BasicColor.fragment");
        let vertex = include_str!("../res/shaders/BasicVertexColor.vertex");

        assert!(phong.contains("uniform mat4 u_ModelView;"));
        assert!(phong.contains("uniform mat4 u_Proj;"));
        assert!(solid.contains("uniform vec4 u_Color;"));
        assert!(vertex.contains("uniform mat4 u_MVP;"));
        assert!(ShaderSource::Embedded.builder("Phong", phong, solid).is_ok());
    }
}
