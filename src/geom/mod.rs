mod beam;
mod core;
mod frame;
mod triangle;

pub use beam::Beam;
pub use core::Vec3;
pub use frame::{Frame, extract_beams, extract_nodes, extract_triangles};
pub use triangle::Triangle;
