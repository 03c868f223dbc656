use std::path::Path;

use cgmath::{Point3, Vector3, Vector4};

use serde::Deserialize;

use thiserror::Error;

use deepimage::camera::OrbitCamera;
use deepimage::{CheckerPattern, Model3D};

use gl_wrapper::shaders::ShaderKind;

use crate::scene::{Floor, MeshKind, Scene, SceneObject};

pub const DEFAULT_SCENE: &str = include_str!("../scenes/default.json5");

pub struct SceneLoader {}

impl SceneLoader {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Scene, LoaderError> {
        let scene_str = std::fs::read_to_string(path).map_err(LoaderError::InputError)?;

        Self::load_from_str(&scene_str)
    }

    pub fn load_from_str(scene_str: &str) -> Result<Scene, LoaderError> {
        let json: SceneFile = json5::from_str(scene_str)?;

        let camera = load_camera(&json.camera)?;

        let floor = json.checkerboard.as_ref().map(load_floor).transpose()?;

        let objects = json
            .objects
            .iter()
            .enumerate()
            .map(|(i, stub)| load_object(stub).map_err(|e| LoaderError::Object(i, Box::new(e))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scene {
            camera,
            floor,
            objects,
        })
    }
}

fn load_camera(stub: &CameraStub) -> Result<OrbitCamera, LoaderError> {
    let mut cam = OrbitCamera::new();

    if let Some(target) = stub.target {
        cam.target = Point3::from(finite_array(target, "camera target")?);
    }

    if let Some(distance) = stub.distance {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(LoaderError::Invalid("camera distance must be positive"));
        }
        cam.distance = distance;
    }

    if let Some(yaw) = stub.yaw {
        cam.yaw = yaw;
    }

    if let Some(pitch) = stub.pitch {
        // goes through the clamp
        cam.rotate(0.0, pitch - cam.pitch);
    }

    if let Some(fov) = stub.fov {
        if !(1.0..179.0).contains(&fov) {
            return Err(LoaderError::Invalid("camera fov must be between 1 and 179 degrees"));
        }
        cam.fov_y = fov;
    }

    Ok(cam)
}

fn load_floor(stub: &CheckerStub) -> Result<Floor, LoaderError> {
    let mut pattern = CheckerPattern::new(stub.nx, stub.ny);

    if let Some(size) = stub.cell_size {
        if !size.is_finite() || size <= 0.0 {
            return Err(LoaderError::Invalid("checkerboard cell_size must be positive"));
        }
        pattern.cell_size = size;
    }

    if let Some([light, dark]) = stub.colors {
        pattern.colors = [
            Vector4::from(finite_array(light, "checkerboard color")?),
            Vector4::from(finite_array(dark, "checkerboard color")?),
        ];
    }

    Ok(Floor {
        pattern,
        shader: stub.shader.unwrap_or(ShaderStub::VertexColor).into(),
    })
}

fn load_object(stub: &ObjectStub) -> Result<SceneObject, LoaderError> {
    let mut model = Model3D::new();

    if let Some(position) = stub.position {
        model.position = Vector3::from(finite_array(position, "position")?);
    }

    if let Some(rotation) = stub.rotation {
        model.rotation = Vector3::from(finite_array(rotation, "rotation")?);
    }

    if let Some(scale) = stub.scale {
        model.scale = Vector3::from(finite_array(scale, "scale")?);
    }

    if let Some(color) = stub.color {
        model.color = Vector4::from(finite_array(color, "color")?);
    }

    let mesh = match stub.mesh {
        MeshStub::Cube => MeshKind::Cube,
    };

    Ok(SceneObject {
        mesh,
        shader: stub.shader.into(),
        model,
    })
}

fn finite_array<const N: usize>(
    values: [f32; N],
    what: &'static str,
) -> Result<[f32; N], LoaderError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(values)
    } else {
        Err(LoaderError::NotFinite(what))
    }
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("{0}")]
    InputError(std::io::Error),
    #[error("{0}")]
    FormatError(#[from] json5::Error),
    #[error("{0} has a non-finite value")]
    NotFinite(&'static str),
    #[error("{0}")]
    Invalid(&'static str),
    #[error("object {0}: {1}")]
    Object(usize, Box<LoaderError>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    camera: CameraStub,
    checkerboard: Option<CheckerStub>,
    #[serde(default)]
    objects: Vec<ObjectStub>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraStub {
    target: Option<[f32; 3]>,
    distance: Option<f32>,
    yaw: Option<f32>,
    pitch: Option<f32>,
    fov: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckerStub {
    nx: u32,
    ny: u32,
    cell_size: Option<f32>,
    colors: Option<[[f32; 4]; 2]>,
    shader: Option<ShaderStub>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectStub {
    mesh: MeshStub,
    shader: ShaderStub,
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 3]>,
    scale: Option<[f32; 3]>,
    color: Option<[f32; 4]>,
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MeshStub {
    Cube,
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShaderStub {
    Phong,
    SolidColor,
    VertexColor,
}

impl From<ShaderStub> for ShaderKind {
    fn from(s: ShaderStub) -> Self {
        match s {
            ShaderStub::Phong => Self::Phong,
            ShaderStub::SolidColor => Self::SolidColor,
            ShaderStub::VertexColor => Self::VertexColor,
        }
    }
}
