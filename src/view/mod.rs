// VIEW: the drawing side of the world
pub mod render;

pub use render::{cube_vertices, Batch, CubeVertices, DrawHandle, Renderer, Vertex};
