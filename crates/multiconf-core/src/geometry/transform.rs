use super::vector::{Line, Plane, angle_between, det3, det4, normalize_or_zero};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use thiserror::Error;

/// Rotations smaller than this, or axes whose direction components sum to less
/// than this in absolute value, are recorded as no-ops.
pub const DEGENERATE_EPSILON: f64 = 1e-8;

/// Determinant magnitudes below this are treated as singular on inversion.
const SINGULAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("transform matrix is singular (determinant {determinant:e}) and cannot be inverted")]
    SingularTransform { determinant: f64 },
}

/// A recorder for accumulated rigid-body operations.
///
/// The recorder holds a 4×4 homogeneous matrix, starting at identity. Each
/// recorded operation left-multiplies the accumulated matrix, so an operation
/// recorded later acts *after* everything recorded before it when the
/// transform is applied to a point:
///
/// ```
/// use multiconf::geometry::transform::TransformRecorder;
/// use nalgebra::{Point3, Vector3};
///
/// let mut op = TransformRecorder::new();
/// op.translate(Vector3::new(1.0, 2.0, 3.0));
/// assert_eq!(op.apply(Point3::new(1.0, 1.0, 1.0)), Point3::new(2.0, 3.0, 4.0));
/// ```
///
/// In well-formed use the matrix encodes rotation plus translation only (no
/// scaling), so the recorder is freely composable and invertible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformRecorder {
    matrix: Matrix4<f64>,
}

impl Default for TransformRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformRecorder {
    /// Creates an identity recorder.
    pub fn new() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Resets the recorder to identity, discarding all recorded operations.
    pub fn reset(&mut self) {
        self.matrix = Matrix4::identity();
    }

    /// The accumulated 4×4 homogeneous matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Records a translation by `v`.
    pub fn translate(&mut self, v: Vector3<f64>) {
        self.matrix = Matrix4::new_translation(&v) * self.matrix;
    }

    /// Records a rotation of `angle` radians about an arbitrary axis,
    /// following the right-hand rule about `axis.dir`.
    ///
    /// The rotation is built as translate-to-origin, closed-form rotation
    /// about the unit axis direction, translate-back. Degenerate input
    /// (`|angle| < 1e-8`, or axis direction components summing in absolute
    /// value to `< 1e-8`) leaves the recorder bit-for-bit unchanged.
    pub fn rotate(&mut self, angle: f64, axis: &Line) {
        let span = axis.dir.x.abs() + axis.dir.y.abs() + axis.dir.z.abs();
        if angle.abs() < DEGENERATE_EPSILON || span < DEGENERATE_EPSILON {
            return;
        }

        let to_origin = Matrix4::new_translation(&(-axis.origin.coords));
        let back = Matrix4::new_translation(&axis.origin.coords);

        let v = axis.dir;
        let (sin, cos) = angle.sin_cos();
        let ic = 1.0 - cos;
        #[rustfmt::skip]
        let rotation = Matrix4::new(
            v.x * v.x * ic + cos,       v.x * v.y * ic - v.z * sin, v.x * v.z * ic + v.y * sin, 0.0,
            v.x * v.y * ic + v.z * sin, v.y * v.y * ic + cos,       v.y * v.z * ic - v.x * sin, 0.0,
            v.x * v.z * ic - v.y * sin, v.y * v.z * ic + v.x * sin, v.z * v.z * ic + cos,       0.0,
            0.0,                        0.0,                        0.0,                        1.0,
        );

        self.matrix = back * rotation * to_origin * self.matrix;
    }

    /// Applies the accumulated transform to a point (implicit w = 1).
    ///
    /// The recorder itself is not mutated.
    pub fn apply(&self, p: Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(&p)
    }

    /// Replaces the recorded transform with its matrix inverse, computed via
    /// the classical adjugate/determinant method.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularTransform`] and leaves the recorder
    /// unchanged when the determinant magnitude is below the singularity
    /// threshold. Well-formed rigid-body transforms always invert.
    pub fn invert(&mut self) -> Result<(), GeometryError> {
        let det = det4(&self.matrix);
        if det.abs() < SINGULAR_EPSILON {
            return Err(GeometryError::SingularTransform { determinant: det });
        }

        let m = self.matrix;
        let mut inverse = Matrix4::zeros();
        for row in 0..4 {
            for col in 0..4 {
                // The adjugate is the transposed cofactor matrix.
                inverse[(col, row)] = cofactor(&m, row, col) / det;
            }
        }
        self.matrix = inverse;
        Ok(())
    }

    /// Computes the transform that superposes the source triple
    /// `(a1, a2, a3)` onto the target triple `(b1, b2, b3)`.
    ///
    /// The alignment is performed in three rigid stages:
    ///
    /// 1. translate `a1` onto `b1`;
    /// 2. rotate about the axis through `b1` perpendicular to both edge
    ///    directions, aligning the line `a1`→`a2` with `b1`→`b2`;
    /// 3. rotate about the now-shared edge line, aligning the plane
    ///    `(a1, a2, a3)` with `(b1, b2, b3)` via the two planes' normals.
    ///
    /// This is not a least-squares fit: the first point maps exactly, the
    /// first edge direction maps exactly, and the third point lands on the
    /// target plane. Degenerate stages (already-aligned edges or planes)
    /// collapse into rotation no-ops.
    pub fn superpose(
        a1: Point3<f64>,
        a2: Point3<f64>,
        a3: Point3<f64>,
        b1: Point3<f64>,
        b2: Point3<f64>,
        b3: Point3<f64>,
    ) -> TransformRecorder {
        let mut op = TransformRecorder::new();

        // Stage 1: superpose a1 onto b1.
        op.translate(b1 - a1);

        // Stage 2: align the edge a1-a2 with b1-b2.
        let angle = Line::through(a1, a2).angle_to(&Line::through(b1, b2));
        let axis = Line {
            origin: b1,
            dir: normalize_or_zero((a2 - a1).cross(&(b2 - b1))),
        };
        op.rotate(angle, &axis);

        // The source plane normal must be re-derived after the partial
        // transform has moved the source points.
        let m1 = op.apply(a1);
        let m2 = op.apply(a2);
        let m3 = op.apply(a3);
        let source_plane = Plane::through(m1, m2, m3);
        let target_plane = Plane::through(b1, b2, b3);

        // Stage 3: align the planes by rotating about the shared edge.
        let angle = angle_between(&source_plane.normal, &target_plane.normal);
        let axis = Line {
            origin: b1,
            dir: normalize_or_zero(source_plane.normal.cross(&target_plane.normal)),
        };
        op.rotate(angle, &axis);

        op
    }
}

fn cofactor(m: &Matrix4<f64>, row: usize, col: usize) -> f64 {
    let mut minor = Matrix3::zeros();
    let mut mr = 0;
    for r in 0..4 {
        if r == row {
            continue;
        }
        let mut mc = 0;
        for c in 0..4 {
            if c == col {
                continue;
            }
            minor[(mr, mc)] = m[(r, c)];
            mc += 1;
        }
        mr += 1;
    }
    let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
    sign * det3(&minor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_points_close(a: Point3<f64>, b: Point3<f64>, tol: f64) {
        assert!(
            (a - b).norm() < tol,
            "points differ by {:e}: {:?} vs {:?}",
            (a - b).norm(),
            a,
            b
        );
    }

    #[test]
    fn identity_leaves_points_unchanged() {
        let op = TransformRecorder::new();
        let p = Point3::new(1.5, -2.25, 0.75);
        assert_eq!(op.apply(p), p);
    }

    #[test]
    fn reset_restores_identity_after_operations() {
        let mut op = TransformRecorder::new();
        op.translate(Vector3::new(4.0, 5.0, 6.0));
        op.reset();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(op.apply(p), p);
    }

    #[test]
    fn translation_is_exact_on_integral_input() {
        let mut op = TransformRecorder::new();
        op.translate(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(op.apply(Point3::new(1.0, 1.0, 1.0)), Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn rotation_about_z_axis_quarter_turn() {
        let mut op = TransformRecorder::new();
        let z_axis = Line::through(Point3::origin(), Point3::new(0.0, 0.0, 1.0));
        op.rotate(FRAC_PI_2, &z_axis);
        // Right-hand rule: +x rotates onto +y.
        assert_points_close(op.apply(Point3::new(1.0, 0.0, 0.0)), Point3::new(0.0, 1.0, 0.0), 1e-12);
    }

    #[test]
    fn rotation_about_offset_axis() {
        let mut op = TransformRecorder::new();
        // Half turn about the vertical axis through (1, 0, 0).
        let axis = Line::through(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 1.0));
        op.rotate(PI, &axis);
        assert_points_close(op.apply(Point3::origin()), Point3::new(2.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn operations_compose_in_invocation_order() {
        // Rotation recorded after a translation must act on the translated
        // point, and the two orders must disagree for a non-origin axis.
        let z_axis = Line::through(Point3::origin(), Point3::new(0.0, 0.0, 1.0));
        let shift = Vector3::new(1.0, 0.0, 0.0);
        let p = Point3::new(1.0, 0.0, 0.0);

        let mut translate_then_rotate = TransformRecorder::new();
        translate_then_rotate.translate(shift);
        translate_then_rotate.rotate(FRAC_PI_2, &z_axis);

        let mut rotate_then_translate = TransformRecorder::new();
        rotate_then_translate.rotate(FRAC_PI_2, &z_axis);
        rotate_then_translate.translate(shift);

        assert_points_close(translate_then_rotate.apply(p), Point3::new(0.0, 2.0, 0.0), 1e-12);
        assert_points_close(rotate_then_translate.apply(p), Point3::new(1.0, 1.0, 0.0), 1e-12);

        // Stepwise application matches the accumulated matrix.
        let mut first = TransformRecorder::new();
        first.translate(shift);
        let mut second = TransformRecorder::new();
        second.rotate(FRAC_PI_2, &z_axis);
        assert_points_close(
            translate_then_rotate.apply(p),
            second.apply(first.apply(p)),
            1e-12,
        );
    }

    #[test]
    fn zero_angle_rotation_is_a_bitwise_noop() {
        let mut op = TransformRecorder::new();
        op.translate(Vector3::new(0.1, 0.2, 0.3));
        let before = op;
        let axis = Line::through(Point3::origin(), Point3::new(0.0, 0.0, 1.0));
        op.rotate(0.0, &axis);
        op.rotate(1e-9, &axis);
        assert_eq!(op, before);
    }

    #[test]
    fn zero_length_axis_rotation_is_a_bitwise_noop() {
        let mut op = TransformRecorder::new();
        op.translate(Vector3::new(0.1, 0.2, 0.3));
        let before = op;
        let degenerate = Line {
            origin: Point3::new(1.0, 1.0, 1.0),
            dir: Vector3::new(1e-9, 1e-9, 1e-9),
        };
        op.rotate(FRAC_PI_2, &degenerate);
        assert_eq!(op, before);
    }

    #[test]
    fn invert_composes_to_identity() {
        let mut op = TransformRecorder::new();
        op.translate(Vector3::new(1.0, -2.0, 3.0));
        op.rotate(
            0.7,
            &Line::through(Point3::new(1.0, 1.0, 0.0), Point3::new(2.0, 3.0, 1.0)),
        );

        let mut inverse = op;
        inverse.invert().unwrap();

        let product = inverse.matrix() * op.matrix();
        let identity = Matrix4::<f64>::identity();
        for row in 0..4 {
            for col in 0..4 {
                assert!(
                    (product[(row, col)] - identity[(row, col)]).abs() < 1e-9,
                    "entry ({row}, {col}) = {}",
                    product[(row, col)]
                );
            }
        }

        let p = Point3::new(0.5, 0.25, -1.0);
        assert_points_close(inverse.apply(op.apply(p)), p, 1e-9);
    }

    #[test]
    fn invert_rejects_singular_matrix() {
        let mut op = TransformRecorder::new();
        // Collapse the matrix onto a plane: not reachable through the public
        // rigid-body operations, but the guard must still hold.
        op.matrix[(2, 2)] = 0.0;
        let before = op;
        assert!(matches!(
            op.invert(),
            Err(GeometryError::SingularTransform { .. })
        ));
        assert_eq!(op, before);
    }

    #[test]
    fn superpose_maps_source_triple_onto_target_triple() {
        let a1 = Point3::new(0.0, 0.0, 0.0);
        let a2 = Point3::new(1.0, 0.0, 0.0);
        let a3 = Point3::new(0.0, 1.0, 0.0);
        let b1 = Point3::new(1.0, 2.0, 3.0);
        let b2 = Point3::new(1.0, 2.0, 4.0);
        let b3 = Point3::new(1.0, 3.0, 3.0);

        let op = TransformRecorder::superpose(a1, a2, a3, b1, b2, b3);
        assert_points_close(op.apply(a1), b1, 1e-9);
        assert_points_close(op.apply(a2), b2, 1e-9);
        assert_points_close(op.apply(a3), b3, 1e-9);
    }

    #[test]
    fn superpose_of_identical_triples_is_identity_within_tolerance() {
        let a1 = Point3::new(0.3, 0.1, -0.2);
        let a2 = Point3::new(1.0, 0.4, 0.0);
        let a3 = Point3::new(0.2, 1.3, 0.5);
        let op = TransformRecorder::superpose(a1, a2, a3, a1, a2, a3);
        let probe = Point3::new(5.0, -3.0, 2.0);
        assert_points_close(op.apply(probe), probe, 1e-9);
    }

    #[test]
    fn superpose_preserves_rigid_distances() {
        let a1 = Point3::new(0.0, 0.0, 0.0);
        let a2 = Point3::new(1.5, 0.0, 0.0);
        let a3 = Point3::new(0.0, 0.8, 0.0);
        let b1 = Point3::new(-2.0, 1.0, 4.0);
        let b2 = Point3::new(-2.0, 2.5, 4.0);
        let b3 = Point3::new(-2.8, 1.0, 4.0);

        let op = TransformRecorder::superpose(a1, a2, a3, b1, b2, b3);
        let d_before = (a2 - a3).norm();
        let d_after = (op.apply(a2) - op.apply(a3)).norm();
        assert!((d_before - d_after).abs() < 1e-9);
    }
}
