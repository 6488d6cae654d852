pub mod collada_xml;

pub use collada_xml::{MeshArrays, ParseError, ParseResult, parse_str};
