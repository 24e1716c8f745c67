//! Rendering support
//!
//! Tessellates a read-only view of the simulation into triangle lists. Any
//! GPU or canvas backend can upload the vertices as-is.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{SceneStyle, build_scene};
pub use vertex::{Vertex, colors};
