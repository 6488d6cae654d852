//! Parser voor COLLADA XML-bestanden.
//!
//! Locates the first mesh under `library_geometries` and pulls out its raw
//! numeric arrays: the flattened node coordinates from the first source's
//! `<float_array>` and the flattened vertex-index triples from the first
//! `<triangles>` block's `<p>` element. Everything else in the document is
//! ignored.

use std::num::{ParseFloatError, ParseIntError};

use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;

/// Result type voor parsing van COLLADA-bestanden.
pub type ParseResult<T> = Result<T, ParseError>;

/// Beschrijft fouten tijdens het parsen.
///
/// Each missing structural element gets its own variant so the CLI can keep a
/// distinct, stable exit code per failure stage.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML document could not be deserialized.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),
    /// The document does not start with a COLLADA root element.
    #[error("unable to find the COLLADA XML element")]
    MissingRoot,
    /// No mesh under library_geometries/geometry.
    #[error("unable to find the mesh")]
    MissingMesh,
    /// The first mesh source carries no float_array.
    #[error("unable to find the float_array XML element")]
    MissingFloatArray,
    /// The mesh has no triangles block.
    #[error("unable to find the triangles XML element")]
    MissingTriangles,
    /// The triangles block has no vertex-index sub-element.
    #[error("unable to find the triangle vertex XML element")]
    MissingVertexIndices,
    /// A coordinate token failed to parse.
    #[error("invalid numeric value: {0}")]
    Number(#[from] ParseFloatError),
    /// A vertex-index token failed to parse.
    #[error("invalid index value: {0}")]
    Index(#[from] ParseIntError),
}

/// The raw numeric arrays decoded from a COLLADA mesh, plus the counts the
/// document declared for them. Declared-vs-actual mismatches are reported as
/// warnings during parsing, never as errors.
#[derive(Debug, Clone, Default)]
pub struct MeshArrays {
    /// Flattened node coordinates, to be grouped in triples.
    pub positions: Vec<f64>,
    /// Flattened triangle vertex indices, to be grouped in triples.
    pub indices: Vec<u32>,
    /// The `count` attribute of the float array (number of scalars).
    pub declared_position_count: Option<usize>,
    /// The `count` attribute of the triangles block (number of triangles).
    pub declared_triangle_count: Option<usize>,
}

/// Leest een COLLADA-document en converteert het naar [`MeshArrays`].
pub fn parse_str(input: &str) -> ParseResult<MeshArrays> {
    let trimmed = strip_xml_preamble(input);
    let prefix = trimmed.chars().take(16).collect::<String>().to_lowercase();
    if !prefix.starts_with("<collada") {
        return Err(ParseError::MissingRoot);
    }

    log::debug!("start parsing COLLADA document");
    let document: ColladaDocument = from_str(input)?;

    let mesh = document
        .library_geometries
        .geometries
        .first()
        .and_then(|geometry| geometry.mesh.as_ref())
        .ok_or(ParseError::MissingMesh)?;

    // The first source holds the node dimensions.
    let float_array = mesh
        .sources
        .first()
        .and_then(|source| source.float_array.as_ref())
        .ok_or(ParseError::MissingFloatArray)?;

    // The first triangles block holds the vertex-index triples (node
    // dimensions mod 3).
    let triangles = mesh.triangles.first().ok_or(ParseError::MissingTriangles)?;
    let vertex_block = triangles.p.as_ref().ok_or(ParseError::MissingVertexIndices)?;

    let positions = parse_floats(float_array.text.as_deref().unwrap_or_default())?;
    if let Some(want) = float_array.count {
        if positions.len() != want {
            log::warn!(
                "node element want count {want} not equal to got count {}",
                positions.len()
            );
        }
    }

    let indices = parse_indices(vertex_block.text.as_deref().unwrap_or_default())?;
    if let Some(want) = triangles.count {
        if indices.len() / 3 != want {
            log::warn!(
                "triangle index want count {want} not equal to got count {}",
                indices.len() / 3
            );
        }
    }

    Ok(MeshArrays {
        positions,
        indices,
        declared_position_count: float_array.count,
        declared_triangle_count: triangles.count,
    })
}

fn strip_xml_preamble(input: &str) -> &str {
    let trimmed = input.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
    if let Some(rest) = trimmed.strip_prefix("<?xml") {
        if let Some(idx) = rest.find("?>") {
            return rest[idx + 2..].trim_start();
        }
    }
    trimmed
}

fn parse_floats(text: &str) -> Result<Vec<f64>, ParseFloatError> {
    text.split_whitespace().map(str::parse).collect()
}

fn parse_indices(text: &str) -> Result<Vec<u32>, ParseIntError> {
    text.split_whitespace().map(str::parse).collect()
}

#[derive(Debug, Default, Deserialize)]
struct ColladaDocument {
    #[serde(default)]
    library_geometries: LibraryGeometries,
}

#[derive(Debug, Default, Deserialize)]
struct LibraryGeometries {
    #[serde(default, rename = "geometry")]
    geometries: Vec<GeometryElement>,
}

#[derive(Debug, Default, Deserialize)]
struct GeometryElement {
    #[serde(default)]
    mesh: Option<MeshElement>,
}

#[derive(Debug, Default, Deserialize)]
struct MeshElement {
    #[serde(default, rename = "source")]
    sources: Vec<SourceElement>,
    #[serde(default, rename = "triangles")]
    triangles: Vec<TrianglesElement>,
}

#[derive(Debug, Default, Deserialize)]
struct SourceElement {
    #[serde(default)]
    float_array: Option<FloatArrayElement>,
}

#[derive(Debug, Default, Deserialize)]
struct FloatArrayElement {
    #[serde(rename = "@count")]
    count: Option<usize>,
    #[serde(rename = "$text")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TrianglesElement {
    #[serde(rename = "@count")]
    count: Option<usize>,
    #[serde(default, rename = "p")]
    p: Option<VertexIndexElement>,
}

#[derive(Debug, Default, Deserialize)]
struct VertexIndexElement {
    #[serde(rename = "$text")]
    text: Option<String>,
}
