#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Converts a triangulated COLLADA mesh into a node-and-beam physics frame and
//! serializes the frame as a BeamNG.drive jbeam package.
//!
//! Pipeline, leaves first: raw numeric arrays ([`parse`]) → nodes → triangles →
//! beams ([`geom`]) → serialized frame ([`export`]). Data flows one direction;
//! nothing is mutated after its owning phase finishes.

pub mod export;
pub mod geom;
pub mod parse;

pub use export::{ExportError, FrameTuning, export_frame};
pub use geom::{Beam, Frame, Triangle, Vec3, extract_beams, extract_nodes, extract_triangles};
pub use parse::{MeshArrays, ParseError, parse_str};
