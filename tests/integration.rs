use std::fs;

use sketcher::{
    Beam, Frame, FrameTuning, Vec3, export_frame, extract_beams, extract_nodes,
    extract_triangles, parse_str,
};

/// Unit square in the XY plane split along its diagonal: the shared edge
/// (0,0,0)-(1,1,0) is the longest edge of both halves.
const SQUARE_DAE: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <library_geometries>
    <geometry id="square" name="square">
      <mesh>
        <source id="square-positions">
          <float_array id="square-positions-array" count="12">0 0 0 1 0 0 1 1 0 0 1 0</float_array>
        </source>
        <vertices id="square-vertices">
          <input semantic="POSITION" source="#square-positions" />
        </vertices>
        <triangles count="2">
          <input offset="0" semantic="VERTEX" source="#square-vertices" />
          <p>0 1 2 0 2 3</p>
        </triangles>
      </mesh>
    </geometry>
  </library_geometries>
</COLLADA>
"##;

fn frame_from_dae(dae: &str) -> Frame {
    let arrays = parse_str(dae).expect("collada parsed");
    let nodes = extract_nodes(&arrays.positions);
    let triangles = extract_triangles(&arrays.indices, &nodes);
    let beams = extract_beams(&triangles);
    Frame::new(nodes, beams)
}

#[test]
fn square_mesh_yields_four_sides_and_a_diagonal() {
    let frame = frame_from_dae(SQUARE_DAE);
    assert_eq!(frame.nodes.len(), 4);
    assert_eq!(frame.beams.len(), 5);

    let diagonal = Beam::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    assert!(frame.beams.contains(&diagonal));
}

#[test]
fn stretched_square_loses_the_diagonal() {
    // Same topology, but one leg stretched past the shared edge so the gate
    // rejects the diagonal: 4 unique edges plus the shared edge, no brace.
    let dae = SQUARE_DAE.replace(
        ">0 0 0 1 0 0 1 1 0 0 1 0<",
        ">0 0 0 3 0 0 1 1 0 0 1 0<",
    );
    let frame = frame_from_dae(&dae);
    assert_eq!(frame.beams.len(), 5);

    let diagonal = Beam::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    assert!(!frame.beams.contains(&diagonal));
}

#[test]
fn folded_mesh_gets_no_cross_beam() {
    // Lift the fourth corner out of the plane: the two triangles are no
    // longer coplanar, so only their own edges survive.
    let dae = SQUARE_DAE.replace(
        ">0 0 0 1 0 0 1 1 0 0 1 0<",
        ">0 0 0 1 0 0 1 1 0 0 1 1<",
    );
    let frame = frame_from_dae(&dae);
    assert_eq!(frame.beams.len(), 5);
    for beam in &frame.beams {
        // Every beam is a triangle edge; none was synthesized.
        assert!(beam.length_squared() > 0.0);
    }
    let diagonal = Beam::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
    assert!(!frame.beams.contains(&diagonal));
}

#[test]
fn out_of_range_triangle_index_is_dropped() {
    let dae = SQUARE_DAE.replace("<p>0 1 2 0 2 3</p>", "<p>0 1 2 0 2 9</p>");
    let frame = frame_from_dae(&dae);
    // Only the first triangle survives decoding; extraction runs fine on it.
    assert_eq!(frame.beams.len(), 3);
}

#[test]
fn declared_count_mismatch_still_converts() {
    let dae = SQUARE_DAE.replace("count=\"12\"", "count=\"99\"");
    let frame = frame_from_dae(&dae);
    assert_eq!(frame.beams.len(), 5);
}

#[test]
fn export_writes_the_three_package_files() {
    let frame = frame_from_dae(SQUARE_DAE);
    let base = std::env::temp_dir().join(format!("sketcher-it-{}", std::process::id()));

    export_frame(&base, "cart", "kevin", &frame, &FrameTuning::default())
        .expect("package exported");

    let jbeam = fs::read_to_string(base.join("cart").join("cart.jbeam")).expect("jbeam written");
    assert!(jbeam.starts_with("{\"cart\":\n"));
    assert!(jbeam.contains("        [\"b0\",0.000,0.000,0.000],"));
    // 5 extracted beams, each as one ["bX","bY"] row.
    assert_eq!(
        jbeam
            .lines()
            .filter(|l| l.trim_start().starts_with("[\"b") && l.contains("\",\"b"))
            .count(),
        5
    );

    let info = fs::read_to_string(base.join("cart").join("info.json")).expect("info written");
    assert!(info.contains("\"Name\":\"cart\""));
    assert!(info.contains("\"Author\":\"kevin\""));

    let material =
        fs::read_to_string(base.join("cart").join("material.cs")).expect("material written");
    assert!(material.contains("singleton Material(cart_body)"));
    assert!(material.contains("singleton Material(cart_wheel)"));

    fs::remove_dir_all(&base).expect("cleanup");
}
