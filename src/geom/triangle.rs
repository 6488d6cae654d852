use super::{Beam, Vec3};

// ─────────────────────────────────────────────────────────────────────────────
// Triangle
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered triple of mesh vertices.
///
/// "Sameness" between triangles is sharing all 3 vertices regardless of order,
/// not reference identity; [`Triangle::same`] is the equality relation the
/// extraction pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl Triangle {
    #[must_use]
    pub const fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p1, p2, p3 }
    }

    /// Count of this triangle's vertices that appear anywhere in `other`,
    /// in the range 0–3.
    #[must_use]
    pub fn shared_points(&self, other: &Self) -> u32 {
        let mut shared = 0;
        if other.contains_point(self.p1) {
            shared += 1;
        }
        if other.contains_point(self.p2) {
            shared += 1;
        }
        if other.contains_point(self.p3) {
            shared += 1;
        }
        shared
    }

    /// Triangles meeting at exactly one vertex.
    #[must_use]
    pub fn touching(&self, other: &Self) -> bool {
        self.shared_points(other) == 1
    }

    /// Triangles sharing exactly one edge.
    #[must_use]
    pub fn adjacent(&self, other: &Self) -> bool {
        self.shared_points(other) == 2
    }

    /// Triangles sharing all three vertices, in any order.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        self.shared_points(other) == 3
    }

    /// Normalized face normal from the two edge vectors at `p1`.
    ///
    /// Degenerate (collinear or duplicate-vertex) triangles yield the zero
    /// vector, which compares "same orientation" with any other degenerate
    /// normal. Known edge case, not specially guarded.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        let e2 = self.p2 - self.p1;
        let e3 = self.p3 - self.p1;
        e2.cross(e3).normalized()
    }

    /// Coplanarity test: the normals are exactly equal or exact negations.
    /// Decides whether two adjacent triangles belong to the same planar quad.
    #[must_use]
    pub fn same_orientation(&self, other: &Self) -> bool {
        let n = self.normal();
        let tn = other.normal();
        tn == n || tn == -n
    }

    #[must_use]
    pub fn contains_point(&self, pt: Vec3) -> bool {
        pt == self.p1 || pt == self.p2 || pt == self.p3
    }

    /// The triangle's three edges in vertex order.
    #[must_use]
    pub fn edges(&self) -> [Beam; 3] {
        [
            Beam::new(self.p1, self.p2),
            Beam::new(self.p2, self.p3),
            Beam::new(self.p3, self.p1),
        ]
    }

    #[must_use]
    pub fn contains_edge(&self, edge: &Beam) -> bool {
        self.edges().iter().any(|e| e == edge)
    }

    /// True only when `edge` is one of this triangle's edges and its squared
    /// length is at least the squared length of the other two (ties count as
    /// longest). Squared lengths avoid a redundant square root.
    #[must_use]
    pub fn is_longest(&self, edge: &Beam) -> bool {
        if !self.contains_edge(edge) {
            return false;
        }
        let mb = edge.length_squared();
        self.edges().iter().all(|e| mb >= e.length_squared())
    }
}
