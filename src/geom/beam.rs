use super::Vec3;

// ─────────────────────────────────────────────────────────────────────────────
// Beam
// ─────────────────────────────────────────────────────────────────────────────

/// An undirected structural edge between two node positions.
///
/// Equality is symmetric: `{a, b} == {b, a}`. Endpoint comparison is the exact
/// floating-point equality of [`Vec3`].
#[derive(Debug, Clone, Copy)]
pub struct Beam {
    pub p1: Vec3,
    pub p2: Vec3,
}

impl Beam {
    #[must_use]
    pub const fn new(p1: Vec3, p2: Vec3) -> Self {
        Self { p1, p2 }
    }

    /// Edge vector from `p2` to `p1`.
    #[must_use]
    pub fn direction(self) -> Vec3 {
        self.p1 - self.p2
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.direction().length_squared()
    }
}

impl PartialEq for Beam {
    fn eq(&self, other: &Self) -> bool {
        (self.p1 == other.p1 && self.p2 == other.p2)
            || (self.p1 == other.p2 && self.p2 == other.p1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_equality_is_undirected() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(Beam::new(a, b), Beam::new(a, b));
        assert_eq!(Beam::new(a, b), Beam::new(b, a));
    }

    #[test]
    fn test_beam_inequality() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 2.0, 3.0);
        let c = Vec3::new(1.0, 2.0, 4.0);

        assert_ne!(Beam::new(a, b), Beam::new(a, c));
        assert_ne!(Beam::new(a, b), Beam::new(b, c));
    }

    #[test]
    fn test_beam_length_squared() {
        let b = Beam::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(b.length_squared(), 2.0);
    }
}
