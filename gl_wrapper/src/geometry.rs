use std::ffi::c_void;

use thiserror::Error;

use deepimage::mesh::{TriMesh, Vertex};

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Draw through an element buffer instead of plain vertex order.
    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Attributes of [`Vertex`]: position, normal, color.
    pub fn with_mesh_layout(self) -> Self {
        self.with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec4)
    }

    /// Checks the input without touching GL, returns the vertex count.
    fn validate(&self) -> Result<usize, GBError> {
        let total_len: usize = self.attributes.iter().map(|a| a.size()).sum();

        if total_len == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.len() % total_len != 0 {
            return Err(GBError::InvalidDataLength);
        }

        let vertices = self.data.len() / total_len;

        if let Some(indices) = self.indices {
            if let Some(index) = indices.iter().find(|i| **i as usize >= vertices) {
                return Err(GBError::IndexOutOfRange {
                    index: *index,
                    vertices,
                });
            }
        }

        Ok(vertices)
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let vertices = self.validate()?;
        let total_len: usize = self.attributes.iter().map(|a| a.size()).sum();

        let mut vao = 0;
        let mut vbo = 0;
        let mut ibo = None;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (total_len * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(i as u32);
            }

            if let Some(indices) = self.indices {
                let mut id = 0;
                gl::GenBuffers(1, (&mut id) as *mut u32);
                // element buffer binding is part of the VAO state
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
                ibo = Some((id, indices.len()));
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }

        log::debug!("uploaded geometry vao {vao}, {vertices} vertices");

        Ok(Geometry {
            vao,
            vbo,
            ibo,
            vertices,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("No vertex attributes given")]
    NoAttributes,
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    /// Element buffer and its index count
    ibo: Option<(u32, usize)>,
    vertices: usize,
}

impl Geometry {
    /// Uploads an indexed mesh with the [`Vertex`] layout.
    pub fn from_mesh(mesh: &TriMesh) -> Result<Self, GBError> {
        let data = mesh.interleaved();
        debug_assert_eq!(data.len(), mesh.vertices.len() * Vertex::FLOATS);

        GeometryBuilder::new(&data)
            .with_mesh_layout()
            .with_indices(&mesh.indices)
            .build()
    }

    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn indices(&self) -> Option<usize> {
        self.ibo.map(|(_, count)| count)
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some((ibo, _)) = self.ibo {
                gl::DeleteBuffers(1, (&ibo) as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_layout_stride() {
        let builder = GeometryBuilder::new(&[0.0; 20]).with_mesh_layout();

        assert_eq!(builder.validate(), Ok(2));
    }

    #[test]
    fn rejects_partial_vertex() {
        let data = [0.0; 7];
        let builder = GeometryBuilder::new(&data).with_attribute(VertexAttribute::Vec2);

        assert_eq!(builder.validate(), Err(GBError::InvalidDataLength));
    }

    #[test]
    fn rejects_missing_attributes() {
        let builder = GeometryBuilder::new(&[0.0; 6]);

        assert_eq!(builder.validate(), Err(GBError::NoAttributes));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let data = [0.0; 9];
        let indices = [0, 1, 3];
        let builder = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&indices);

        assert_eq!(
            builder.validate(),
            Err(GBError::IndexOutOfRange {
                index: 3,
                vertices: 3
            })
        );
    }

    #[test]
    fn empty_indexed_geometry_is_valid() {
        let builder = GeometryBuilder::new(&[])
            .with_attribute(VertexAttribute::Float)
            .with_indices(&[]);

        assert_eq!(builder.validate(), Ok(0));
    }
}
