pub mod camera;
pub mod checkerboard;
pub mod math;
pub mod mesh;
pub mod model;

pub use checkerboard::{CheckerPattern, GridError};
pub use mesh::{TriMesh, Vertex};
pub use model::Model3D;
