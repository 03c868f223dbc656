use cgmath::Vector4;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    /// Floats per vertex in the interleaved layout: position, normal, color.
    pub const FLOATS: usize = 10;

    pub fn new(position: [f32; 3], normal: [f32; 3], color: Vector4<f32>) -> Self {
        Self {
            position,
            normal,
            color: color.into(),
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Adds four corners as two triangles `(a, b, c)` and `(a, c, d)`.
    ///
    /// Corners must be given counter-clockwise when looking at the front face.
    pub fn push_quad(&mut self, corners: [Vertex; 4]) {
        let base = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * Vertex::FLOATS);

        for v in &self.vertices {
            data.extend_from_slice(&v.position);
            data.extend_from_slice(&v.normal);
            data.extend_from_slice(&v.color);
        }

        data
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis aligned cube centered on the origin with flat shaded faces.
    pub fn cube(size: f32, color: Vector4<f32>) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(24, 36);

        // normal, then corners counter-clockwise seen from outside
        #[rustfmt::skip]
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            ([0.0, 0.0, 1.0], [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]]),
            ([0.0, 0.0, -1.0], [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]]),
            ([1.0, 0.0, 0.0], [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]]),
            ([-1.0, 0.0, 0.0], [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]]),
            ([0.0, 1.0, 0.0], [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]]),
            ([0.0, -1.0, 0.0], [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]]),
        ];

        for (normal, corners) in faces {
            mesh.push_quad(corners.map(|p| Vertex::new(p, normal, color)));
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn face_normal(mesh: &TriMesh, tri: usize) -> Vector3<f32> {
        let idx = &mesh.indices[tri * 3..tri * 3 + 3];
        let p = |i: u32| Vector3::from(mesh.vertices[i as usize].position);

        let (a, b, c) = (p(idx[0]), p(idx[1]), p(idx[2]));
        (b - a).cross(c - a).normalize()
    }

    #[test]
    fn push_quad_offsets_indices() {
        let v = Vertex::new([0.0; 3], [0.0, 1.0, 0.0], Vector4::new(1.0, 1.0, 1.0, 1.0));
        let mut mesh = TriMesh::new();

        mesh.push_quad([v; 4]);
        mesh.push_quad([v; 4]);

        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices[6..], [4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn interleaved_layout() {
        let v = Vertex::new(
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 0.0],
            Vector4::new(0.5, 0.25, 0.125, 1.0),
        );
        let mesh = TriMesh {
            vertices: vec![v],
            indices: vec![],
        };

        assert_eq!(
            mesh.interleaved(),
            vec![1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.5, 0.25, 0.125, 1.0]
        );
    }

    #[test]
    fn cube_faces_point_outwards() {
        let mesh = TriMesh::cube(2.0, Vector4::new(1.0, 0.0, 0.0, 1.0));

        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);

        for tri in 0..mesh.triangle_count() {
            let n = face_normal(&mesh, tri);
            let stored = Vector3::from(mesh.vertices[mesh.indices[tri * 3] as usize].normal);

            assert!((n - stored).magnitude() < 1e-6, "triangle {tri}");
        }
    }

    #[test]
    fn empty_mesh() {
        assert!(TriMesh::new().is_empty());
        assert!(TriMesh::new().interleaved().is_empty());
    }
}
