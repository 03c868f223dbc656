pub mod checkerboard;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod shaders;
pub mod uniform;
