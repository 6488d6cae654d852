use super::{Beam, Triangle, Vec3};

// ─────────────────────────────────────────────────────────────────────────────
// Frame
// ─────────────────────────────────────────────────────────────────────────────

/// The extracted physics frame handed to the serializer: body nodes and beams,
/// plus the optional axle/steering subsets of the richer export variant.
///
/// Nodes and beams must stay flat, randomly-indexable sequences; the exporter
/// assigns output identifiers by exact-equality scans over the node lists, and
/// it performs no deduplication of its own.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub nodes: Vec<Vec3>,
    pub beams: Vec<Beam>,
    pub axle_nodes: Vec<Vec3>,
    pub axle_beams: Vec<Beam>,
    pub steering_beams: Vec<Beam>,
}

impl Frame {
    #[must_use]
    pub fn new(nodes: Vec<Vec3>, beams: Vec<Beam>) -> Self {
        Self {
            nodes,
            beams,
            ..Self::default()
        }
    }

    /// Attach axle geometry and steering actuators for the export variant.
    #[must_use]
    pub fn with_axles(
        mut self,
        axle_nodes: Vec<Vec3>,
        axle_beams: Vec<Beam>,
        steering_beams: Vec<Beam>,
    ) -> Self {
        self.axle_nodes = axle_nodes;
        self.axle_beams = axle_beams;
        self.steering_beams = steering_beams;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mesh decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Group a flat coordinate list into node positions, 3 components at a time.
///
/// A trailing remainder that does not fill a triple is dropped with a warning.
#[must_use]
pub fn extract_nodes(dims: &[f64]) -> Vec<Vec3> {
    if dims.len() % 3 != 0 {
        log::warn!(
            "incomplete node coordinate list: {} elements, dropping remainder",
            dims.len()
        );
    }

    dims.chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect()
}

/// Group a flat vertex-index list into triangles against `nodes`.
///
/// An index triple referencing a node index out of range is skipped with a
/// warning; a trailing remainder that does not fill a triple is dropped.
#[must_use]
pub fn extract_triangles(indices: &[u32], nodes: &[Vec3]) -> Vec<Triangle> {
    let node_count = nodes.len();

    if indices.len() % 3 != 0 {
        log::warn!(
            "incomplete triangle index list: {} indices, dropping remainder",
            indices.len()
        );
    }

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for idx in indices.chunks_exact(3) {
        let (i1, i2, i3) = (idx[0] as usize, idx[1] as usize, idx[2] as usize);
        if i1 >= node_count || i2 >= node_count || i3 >= node_count {
            log::warn!(
                "triangle vertex index out of node range: {i1}, {i2}, {i3} >= {node_count}, skipping"
            );
            continue;
        }
        triangles.push(Triangle::new(nodes[i1], nodes[i2], nodes[i3]));
    }
    triangles
}

// ─────────────────────────────────────────────────────────────────────────────
// Beam extraction
// ─────────────────────────────────────────────────────────────────────────────

fn contains_beam(beams: &[Beam], beam: &Beam) -> bool {
    beams.iter().any(|b| b == beam)
}

/// Append `beam` unless an undirected-equal beam is already present.
/// Returns whether the set grew.
fn add_unique_beam(beams: &mut Vec<Beam>, beam: Beam) -> bool {
    if contains_beam(beams, &beam) {
        return false;
    }
    beams.push(beam);
    true
}

/// The two defining beams of a planar quad formed by an edge-adjacent pair.
struct QuadBeams {
    /// Diagonal between the corner of `t1` absent from `t2` and the corner of
    /// `t2` absent from `t1`.
    opposite: Beam,
    /// The edge the two triangles share, in `t1`'s vertex order.
    shared: Beam,
}

/// Identify the opposite corners and shared edge of two triangles that share
/// exactly 2 vertices. Returns `None` for any other adjacency relation.
fn quad_beams(t1: &Triangle, t2: &Triangle) -> Option<QuadBeams> {
    if t1.shared_points(t2) != 2 {
        return None;
    }

    let o1 = [t1.p1, t1.p2, t1.p3]
        .into_iter()
        .find(|p| !t2.contains_point(*p))?;
    let o2 = [t2.p1, t2.p2, t2.p3]
        .into_iter()
        .find(|p| !t1.contains_point(*p))?;

    let shared = if t1.p1 == o1 {
        Beam::new(t1.p2, t1.p3)
    } else if t1.p2 == o1 {
        Beam::new(t1.p1, t1.p3)
    } else {
        Beam::new(t1.p1, t1.p2)
    };

    Some(QuadBeams {
        opposite: Beam::new(o1, o2),
        shared,
    })
}

/// Derive the deduplicated beam set from a triangle soup.
///
/// Every triangle contributes its own 3 edges. Additionally, for every pair of
/// distinct coplanar triangles sharing exactly one edge, the diagonal between
/// the quad's opposite corners is synthesized, but only when the shared edge
/// is the longest edge of both triangles. A diagonal should only bridge a
/// quad's long hinge; bridging a short shared side would brace an implausible,
/// non-square quad.
///
/// Degenerate triangles fail the coplanarity/longest-edge gates and contribute
/// nothing beyond their own edges. The scan is all-pairs `O(n²)` with linear
/// dedup lookups; fine for hand-modeled meshes.
#[must_use]
pub fn extract_beams(triangles: &[Triangle]) -> Vec<Beam> {
    let mut beams = Vec::new();

    for (i, t1) in triangles.iter().enumerate() {
        // All triangle edges are beams.
        for edge in t1.edges() {
            add_unique_beam(&mut beams, edge);
        }

        // For adjacent, coplanar triangles, add the beam between the
        // opposing points.
        for (j, t2) in triangles.iter().enumerate() {
            if i == j {
                continue;
            }
            if !t2.same_orientation(t1) {
                continue;
            }

            let Some(quad) = quad_beams(t1, t2) else {
                continue;
            };
            if t1.is_longest(&quad.shared)
                && t2.is_longest(&quad.shared)
                && add_unique_beam(&mut beams, quad.opposite)
            {
                log::debug!(
                    "found cross beam: [{:?}] - [{:?}]",
                    quad.opposite.p1,
                    quad.opposite.p2
                );
            }
        }
    }

    beams
}
