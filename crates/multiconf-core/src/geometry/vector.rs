use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Magnitudes below this are treated as zero during normalization.
pub const NORMALIZE_EPSILON: f64 = 1e-20;

/// Returns the unit vector of `v`, or the zero vector when the magnitude is
/// below [`NORMALIZE_EPSILON`].
///
/// The zero-vector fallback avoids a division blow-up on degenerate input
/// (e.g. a line built from two coincident points).
pub fn normalize_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    let d = v.norm();
    if d < NORMALIZE_EPSILON {
        Vector3::zeros()
    } else {
        v / d
    }
}

/// Returns the angle between two vectors in radians.
///
/// Both inputs are normalized first and the dot product is clamped to
/// `[-1, 1]` before the inverse cosine, so floating-point overshoot on
/// near-parallel vectors cannot produce a domain error.
pub fn angle_between(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    let t = normalize_or_zero(*v1)
        .dot(&normalize_or_zero(*v2))
        .clamp(-1.0, 1.0);
    t.acos()
}

/// A line defined by an origin point and a unit direction vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub origin: Point3<f64>,
    pub dir: Vector3<f64>,
}

impl Line {
    /// Builds the line through `a` and `b`, directed from `a` towards `b`.
    pub fn through(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            origin: a,
            dir: normalize_or_zero(b - a),
        }
    }

    /// Angle between the direction vectors of two lines, in radians.
    pub fn angle_to(&self, other: &Line) -> f64 {
        angle_between(&self.dir, &other.dir)
    }
}

/// A plane defined by an origin point and a unit normal vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Builds the plane through `a`, `b`, and `c`.
    ///
    /// The normal is the normalized cross product of the edge `a`→`b` with the
    /// edge `b`→`c`. The edge order is fixed so the sign of the normal is
    /// deterministic for a given point order.
    pub fn through(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            origin: a,
            normal: normalize_or_zero((b - a).cross(&(c - b))),
        }
    }

    /// Angle between the normals of two planes, in radians.
    pub fn angle_to(&self, other: &Plane) -> f64 {
        angle_between(&self.normal, &other.normal)
    }
}

/// Shortest distance between two (possibly skew) lines.
///
/// Uses the scalar-triple-product formula: the determinant of the matrix built
/// from the inter-origin vector and the two direction vectors, divided by the
/// magnitude of the directions' cross product.
pub fn line_line_distance(l1: &Line, l2: &Line) -> f64 {
    let m = Matrix3::new(
        l2.origin.x - l1.origin.x,
        l2.origin.y - l1.origin.y,
        l2.origin.z - l1.origin.z,
        l1.dir.x,
        l1.dir.y,
        l1.dir.z,
        l2.dir.x,
        l2.dir.y,
        l2.dir.z,
    );
    let cross = l1.dir.cross(&l2.dir);
    (det3(&m) / cross.norm()).abs()
}

/// Dihedral angle defined by four points, in radians.
///
/// Measured as the angle between the plane (p1, p2, p3) and the plane
/// (p2, p3, p4).
pub fn dihedral_angle(p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>, p4: Point3<f64>) -> f64 {
    Plane::through(p1, p2, p3).angle_to(&Plane::through(p2, p3, p4))
}

/// Determinant of a 3×3 matrix by explicit cofactor expansion.
pub fn det3(m: &Matrix3<f64>) -> f64 {
    m[(0, 0)] * m[(1, 1)] * m[(2, 2)] - m[(0, 0)] * m[(1, 2)] * m[(2, 1)]
        + m[(0, 1)] * m[(1, 2)] * m[(2, 0)]
        - m[(0, 1)] * m[(1, 0)] * m[(2, 2)]
        + m[(0, 2)] * m[(1, 0)] * m[(2, 1)]
        - m[(0, 2)] * m[(1, 1)] * m[(2, 0)]
}

/// Determinant of a 4×4 matrix by expansion into 2×2 minor products.
pub fn det4(m: &Matrix4<f64>) -> f64 {
    (m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)])
        * (m[(2, 2)] * m[(3, 3)] - m[(2, 3)] * m[(3, 2)])
        - (m[(0, 0)] * m[(1, 2)] - m[(0, 2)] * m[(1, 0)])
            * (m[(2, 1)] * m[(3, 3)] - m[(2, 3)] * m[(3, 1)])
        + (m[(0, 0)] * m[(1, 3)] - m[(0, 3)] * m[(1, 0)])
            * (m[(2, 1)] * m[(3, 2)] - m[(2, 2)] * m[(3, 1)])
        + (m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)])
            * (m[(2, 0)] * m[(3, 3)] - m[(2, 3)] * m[(3, 0)])
        - (m[(0, 1)] * m[(1, 3)] - m[(0, 3)] * m[(1, 1)])
            * (m[(2, 0)] * m[(3, 2)] - m[(2, 2)] * m[(3, 0)])
        + (m[(0, 2)] * m[(1, 3)] - m[(0, 3)] * m[(1, 2)])
            * (m[(2, 0)] * m[(3, 1)] - m[(2, 1)] * m[(3, 0)])
}
