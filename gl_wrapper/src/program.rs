use std::ffi::{c_char, CString, NulError};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use cgmath::Matrix4;
use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

use crate::uniform::UniformCache;

/// Reads a shader source file, normalizing every line ending to `\n`.
pub fn load_shader<P: AsRef<Path>>(path: P) -> Result<String, PBError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| PBError::Io {
        path: path.to_owned(),
        source,
    })?;

    let mut source = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        source.push_str(line);
        source.push('\n');
    }

    Ok(source)
}

pub struct ProgramBuilder {
    vert: CString,
    frag: CString,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Result<Self, PBError> {
        Ok(Self {
            vert: CString::new(vert_src)?,
            frag: CString::new(frag_src)?,
        })
    }

    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(vert: P, frag: Q) -> Result<Self, PBError> {
        let vert = load_shader(vert)?;
        let frag = load_shader(frag)?;

        Self::new(&vert, &frag)
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert = compile_shader(ShaderStage::Vertex, &self.vert)?;
        let frag = match compile_shader(ShaderStage::Fragment, &self.frag) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            if success != gl::TRUE as GLint {
                let log = program_info_log(program);
                log::error!("Failed to link shader program!\n{log}");
                gl::DeleteProgram(program);
                return Err(PBError::Linking(log));
            }

            // validation depends on the state bound right now, so it only warns
            gl::ValidateProgram(program);
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut success);
            if success != gl::TRUE as GLint {
                log::warn!(
                    "shader program {program} failed validation: {}",
                    program_info_log(program)
                );
            }

            log::debug!("linked shader program {program}");

            Ok(Program {
                id: program,
                uniforms: UniformCache::new(),
            })
        }
    }
}

fn compile_shader(stage: ShaderStage, source: &CString) -> Result<GLuint, PBError> {
    let mut success: GLint = 0;

    unsafe {
        let id = gl::CreateShader(stage.gl_enum());

        gl::ShaderSource(
            id,
            1,
            (&source.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );
        gl::CompileShader(id);

        gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        if success != gl::TRUE as GLint {
            let mut length: GLint = 0;
            gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut length);

            let mut buf = vec![0_u8; length.max(1) as usize];
            gl::GetShaderInfoLog(
                id,
                buf.len() as GLint,
                &mut length,
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(id);

            let log = info_log_to_string(&buf, length);
            log::error!("Failed to compile {stage} shader!\n{log}");

            return Err(PBError::Compilation { stage, log });
        }

        Ok(id)
    }
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut length: GLint = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length);

    let mut buf = vec![0_u8; length.max(1) as usize];
    gl::GetProgramInfoLog(
        program,
        buf.len() as GLint,
        &mut length,
        buf.as_mut_ptr() as *mut c_char,
    );

    info_log_to_string(&buf, length)
}

/// `written` is the length reported by GL, without the terminating zero.
fn info_log_to_string(buf: &[u8], written: GLint) -> String {
    let end = (written.max(0) as usize).min(buf.len());
    let data = &buf[..end];
    let data = data.split(|b| *b == 0).next().unwrap_or_default();

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("cannot read shader {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("shader source contains a nul byte")]
    InvalidSource(#[from] NulError),
    #[error("{stage} shader: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("{0}")]
    Linking(String),
}

pub struct Program {
    id: GLuint,
    uniforms: UniformCache,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    pub fn unbind(&self) {
        unsafe { gl::UseProgram(0) }
    }

    pub fn uniform_location(&self, name: &str) -> GLint {
        self.uniforms.location(name, |name| {
            let loc = match CString::new(name) {
                Ok(c_name) => unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) },
                Err(_) => -1,
            };

            if loc < 0 {
                log::warn!("uniform '{name}' not found in program {}", self.id);
            }

            loc
        })
    }

    /// The program must be bound.
    pub fn set_uniform_1i(&self, name: &str, value: i32) {
        unsafe { gl::Uniform1i(self.uniform_location(name), value) }
    }

    pub fn set_uniform_4f(&self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        unsafe { gl::Uniform4f(self.uniform_location(name), v0, v1, v2, v3) }
    }

    /// Uploads column-major, as cgmath stores it.
    pub fn set_uniform_mat4(&self, name: &str, mat: &Matrix4<f32>) {
        let data: &[f32; 16] = mat.as_ref();

        unsafe {
            gl::UniformMatrix4fv(self.uniform_location(name), 1, gl::FALSE, data.as_ptr());
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gl_wrapper_{}_{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn load_shader_appends_newlines() {
        let path = temp_file("crlf.vertex", b"#version 450 core\r\nvoid main() {}");

        let src = load_shader(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(src, "#version 450 core\nvoid main() {}\n");
    }

    #[test]
    fn load_missing_shader() {
        let err = load_shader("does/not/exist.vertex").unwrap_err();

        assert!(matches!(err, PBError::Io { .. }));
        assert!(err.to_string().contains("exist.vertex"));
    }

    #[test]
    fn builder_rejects_nul() {
        let res = ProgramBuilder::new("void main() {}\0", "void main() {}");

        assert!(matches!(res, Err(PBError::InvalidSource(_))));
    }

    #[test]
    fn from_files_reports_missing_fragment() {
        let vert = temp_file("only.vertex", b"void main() {}\n");

        let res = ProgramBuilder::from_files(&vert, "does/not/exist.fragment");
        std::fs::remove_file(&vert).unwrap();

        match res {
            Err(PBError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.fragment"))
            }
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn info_log_trimming() {
        let buf = b"0:1(1): error: syntax error\n\0garbage";

        assert_eq!(
            info_log_to_string(buf, 28),
            "0:1(1): error: syntax error"
        );
        assert_eq!(info_log_to_string(buf, 0), "");
        assert_eq!(info_log_to_string(buf, 1000), "0:1(1): error: syntax error");
    }

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }
}
