//! Serializers for the BeamNG.drive jbeam package: the `<model>.jbeam` frame
//! description plus the `info.json` package descriptor and `material.cs`
//! render material that ship alongside it.
//!
//! The key names and nesting below are a compatibility surface with the
//! simulator and are reproduced byte-for-byte from known-good output.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geom::{Beam, Frame, Vec3};

/// Beschrijft fouten tijdens het wegschrijven van het pakket.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output directory could not be created.
    #[error("unable to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    /// An output file could not be created or written.
    #[error("unable to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Global physical tuning parameters for the exported frame.
///
/// Defaults carry the values the simulator templates were tuned against.
/// A `deform` or `strength` of 0 renders as the string `"FLT_MAX"` (an
/// unbreakable beam).
#[derive(Debug, Clone)]
pub struct FrameTuning {
    pub node_weight: u32,
    pub friction_coef: f64,
    pub spring: u32,
    pub damp: u32,
    pub deform: u32,
    pub strength: u32,
    pub wheel_factor: f64,
    pub wheel_lock: u32,
    pub wheel_degrees: u32,
}

impl Default for FrameTuning {
    fn default() -> Self {
        Self {
            node_weight: 10,
            friction_coef: 0.7,
            spring: 2_000_000,
            damp: 200,
            deform: 80_000,
            strength: 800_000,
            wheel_factor: 0.05,
            wheel_lock: 460,
            wheel_degrees: 25,
        }
    }
}

/// Write the full jbeam package for `frame` into `<base_dir>/<model>/`:
/// `<model>.jbeam`, `info.json` and `material.cs`.
pub fn export_frame(
    base_dir: &Path,
    model: &str,
    author: &str,
    frame: &Frame,
    tuning: &FrameTuning,
) -> Result<(), ExportError> {
    let out_dir = base_dir.join(model);
    fs::create_dir_all(&out_dir).map_err(|source| ExportError::CreateDir {
        path: out_dir.clone(),
        source,
    })?;

    write_file(&out_dir.join(format!("{model}.jbeam")), |w| {
        write_jbeam(w, model, author, frame, tuning)
    })?;
    write_file(&out_dir.join("info.json"), |w| write_info(w, model, author))?;
    write_file(&out_dir.join("material.cs"), |w| write_materials(w, model))?;

    Ok(())
}

fn write_file<F>(path: &Path, body: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let map_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(map_err)?;
    let mut w = BufWriter::new(file);
    body(&mut w).map_err(map_err)?;
    w.flush().map_err(map_err)
}

/// Render the jbeam frame description.
///
/// Layout: information header and flexbodies table, the node list (body nodes
/// prefixed `b`, axle nodes prefixed `a`), the beam list (body beams with the
/// full deform/strength parameters, axle beams unbreakable), and the steering
/// hydros.
pub fn write_jbeam<W: Write>(
    w: &mut W,
    model: &str,
    author: &str,
    frame: &Frame,
    tuning: &FrameTuning,
) -> io::Result<()> {
    let body = format!("{model}_body");
    let body_group = format!("{body}_g").to_lowercase();
    let axles = format!("{model}_axles");
    let axles_group = format!("{axles}_g").to_lowercase();

    write_header(w, model, author, &body, &body_group)?;

    // nodes
    writeln!(w, "    \"nodes\": [")?;
    writeln!(w, "        [\"id\", \"posX\", \"posY\", \"posZ\"],")?;
    writeln!(w, "        {{\"nodeWeight\":{}}},", tuning.node_weight)?;
    writeln!(w, "        {{\"frictionCoef\":{:.2}}},", tuning.friction_coef)?;
    writeln!(w, "        {{\"nodeMaterial\":\"|NM_METAL\"}},")?;
    writeln!(w, "        {{\"collision\":true}},")?;
    writeln!(w, "        {{\"selfCollision\":true}},")?;
    write_nodes(w, &frame.nodes, &body_group, 'b')?;
    write_nodes(w, &frame.axle_nodes, &axles_group, 'a')?;
    writeln!(w, "    ],")?;
    writeln!(w)?;

    // beams
    writeln!(w, "    \"beams\": [")?;
    writeln!(w, "        [\"id1:\", \"id2:\"],")?;
    write_beam_rows(
        w,
        &frame.beams,
        &frame.nodes,
        'b',
        &[],
        '\0',
        tuning.spring,
        tuning.damp,
        tuning.deform,
        tuning.strength,
    )?;
    write_beam_rows(
        w,
        &frame.axle_beams,
        &frame.nodes,
        'b',
        &frame.axle_nodes,
        'a',
        tuning.spring,
        tuning.damp,
        0,
        0,
    )?;
    writeln!(w, "    ],")?;
    writeln!(w)?;

    // steering hydros
    writeln!(w, "    \"hydros\": [")?;
    writeln!(w, "        [\"id1:\", \"id2:\"],")?;
    write_hydro_rows(w, &frame.steering_beams, &frame.axle_nodes, 'a', tuning)?;
    writeln!(w, "    ],")?;
    writeln!(w)?;

    // footer
    writeln!(w, "}}")?;
    writeln!(w, "}}")
}

fn write_header<W: Write>(
    w: &mut W,
    model: &str,
    author: &str,
    body: &str,
    body_group: &str,
) -> io::Result<()> {
    let wheel_groups = ["Wheel_FL", "Wheel_FR", "Wheel_RL", "Wheel_RR"]
        .map(|wheel| (wheel, format!("{wheel}_g").to_lowercase()));

    writeln!(w, "{{\"{model}\":")?;
    writeln!(w)?;
    writeln!(w, "{{")?;
    writeln!(w, "    \"information\":{{")?;
    writeln!(w, "         \"authors\":\"{author}\",")?;
    writeln!(w, "         \"name\":\"{model}\",")?;
    writeln!(w, "    }}")?;
    writeln!(w)?;
    writeln!(w, "    \"slotType\" : \"main\",")?;
    writeln!(w)?;
    writeln!(w, "    \"flexbodies\": [")?;
    writeln!(w, "        [\"mesh\", \"[group]:\", \"nonFlexMaterials\"],")?;
    writeln!(w, "        [\"{body}\", [\"{body_group}\"]],")?;
    for (wheel, group) in &wheel_groups {
        writeln!(w, "        [\"{wheel}\", [\"{group}\"]],")?;
    }
    writeln!(w, "    ],")?;
    writeln!(w)
}

/// One `{"group":...}` header plus a `["<pfx><i>",x,y,z]` row per node, at 3
/// decimals. An empty node list writes nothing.
fn write_nodes<W: Write>(w: &mut W, nodes: &[Vec3], group: &str, pfx: char) -> io::Result<()> {
    if nodes.is_empty() {
        return Ok(());
    }
    writeln!(w, "        {{\"group\":\"{group}\"}},")?;
    for (i, n) in nodes.iter().enumerate() {
        writeln!(
            w,
            "        [\"{pfx}{i}\",{:.3},{:.3},{:.3}],",
            n.x, n.y, n.z
        )?;
    }
    Ok(())
}

/// Locate `point` in the node lists the way identifiers are assigned: the
/// primary list wins over the secondary, by exact-equality scan.
fn node_id(
    point: Vec3,
    first: &[Vec3],
    first_char: char,
    second: &[Vec3],
    second_char: char,
) -> Option<(char, usize)> {
    // Coincident vertices are never welded upstream; when the primary list
    // holds duplicates, the last occurrence wins.
    if let Some(i) = first.iter().rposition(|n| *n == point) {
        return Some((first_char, i));
    }
    second
        .iter()
        .position(|n| *n == point)
        .map(|i| (second_char, i))
}

#[allow(clippy::too_many_arguments)]
fn write_beam_rows<W: Write>(
    w: &mut W,
    beams: &[Beam],
    first: &[Vec3],
    first_char: char,
    second: &[Vec3],
    second_char: char,
    spring: u32,
    damp: u32,
    deform: u32,
    strength: u32,
) -> io::Result<()> {
    if beams.is_empty() {
        return Ok(());
    }

    let def = unbreakable_or(deform);
    let strn = unbreakable_or(strength);
    writeln!(w, "        {{\"beamSpring\":{spring},\"beamDamp\":{damp}}},")?;
    writeln!(w, "        {{\"beamDeform\":\"{def}\",\"beamStrength\":\"{strn}\"}},")?;

    for b in beams {
        let Some((c1, i1)) = node_id(b.p1, first, first_char, second, second_char) else {
            log::warn!("beam endpoint {:?} not found in any node list, skipping", b.p1);
            continue;
        };
        let Some((c2, i2)) = node_id(b.p2, first, first_char, second, second_char) else {
            log::warn!("beam endpoint {:?} not found in any node list, skipping", b.p2);
            continue;
        };
        writeln!(w, "        [\"{c1}{i1}\",\"{c2}{i2}\"],")?;
    }
    Ok(())
}

fn unbreakable_or(value: u32) -> String {
    if value == 0 {
        "FLT_MAX".to_owned()
    } else {
        value.to_string()
    }
}

fn write_hydro_rows<W: Write>(
    w: &mut W,
    steering_beams: &[Beam],
    axle_nodes: &[Vec3],
    axle_char: char,
    tuning: &FrameTuning,
) -> io::Result<()> {
    for b in steering_beams {
        let i1 = axle_nodes.iter().rposition(|n| *n == b.p1);
        let i2 = axle_nodes.iter().rposition(|n| *n == b.p2);
        let (Some(i1), Some(i2)) = (i1, i2) else {
            log::warn!("steering beam endpoint not found in axle nodes, skipping");
            continue;
        };
        writeln!(
            w,
            "        [\"{axle_char}{i1}\",\"{axle_char}{i2}\",{{\"factor\":{:.2},\"steeringWheelLock\":{},\"lockDegrees\":{}}}],",
            tuning.wheel_factor, tuning.wheel_lock, tuning.wheel_degrees
        )?;
    }
    Ok(())
}

/// Render the `info.json` package descriptor.
pub fn write_info<W: Write>(w: &mut W, model: &str, author: &str) -> io::Result<()> {
    writeln!(w, "{{")?;
    writeln!(w, "    \"Name\":\"{model}\",")?;
    writeln!(w, "    \"Author\":\"{author}\",")?;
    writeln!(w, "    \"Type\":\"Car\",")?;
    writeln!(w, "    \"default_pc\":\"default\",")?;
    writeln!(w, "    \"colors\":{{")?;
    writeln!(w, "        \"Pearl White\": \"1 1 1 1\"")?;
    writeln!(w, "    }}")?;
    writeln!(w, "}}")
}

/// Render `material.cs`: one render material for the body, one for the wheel.
pub fn write_materials<W: Write>(w: &mut W, model: &str) -> io::Result<()> {
    write_material(w, &format!("{model}_body"))?;
    writeln!(w)?;
    write_material(w, &format!("{model}_wheel"))
}

fn write_material<W: Write>(w: &mut W, body: &str) -> io::Result<()> {
    writeln!(w, "singleton Material({body})")?;
    writeln!(w, "{{")?;
    writeln!(w, "    mapTo = \"{body}\";")?;
    writeln!(w, "    diffuseMap[0] = \"{body}.png\";")?;
    writeln!(w, "    specularPower[0] = \"15\";")?;
    writeln!(w, "    useAnisotropic[0] = \"1\";")?;
    writeln!(w, "    castShadows = \"1\";")?;
    writeln!(w, "    translucent = \"0\";")?;
    writeln!(w, "    alphaTest = \"0\";")?;
    writeln!(w, "    alphaRef = \"0\";")?;
    writeln!(w, "}}")
}
