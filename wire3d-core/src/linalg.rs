/// Homogeneous transform and projection primitives
use nalgebra::{Matrix4, Vector3};

use crate::error::{Error, Result};

/// Threshold for floating-point orthonormality checks
pub const ORTH_EPSILON: f64 = 1.0e-9;

/// Three orthonormal, right-handed vectors defining a local coordinate system.
///
/// Construction validates the invariant; a failing triple is an error, never
/// silently normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    vectors: [Vector3<f64>; 3],
}

impl Basis {
    /// Build a basis from three vectors, validating that they are unit
    /// length and right-handed (`cross(x, y) ≈ z` within [`ORTH_EPSILON`]).
    pub fn new(x: Vector3<f64>, y: Vector3<f64>, z: Vector3<f64>) -> Result<Self> {
        for v in [&x, &y, &z] {
            if (v.norm() - 1.0).abs() > ORTH_EPSILON {
                return Err(Error::InvalidBasis);
            }
        }
        if (x.cross(&y) - z).norm() > ORTH_EPSILON {
            return Err(Error::InvalidBasis);
        }
        Ok(Self { vectors: [x, y, z] })
    }

    /// The world-aligned identity basis.
    pub fn world() -> Self {
        Self {
            vectors: [Vector3::x(), Vector3::y(), Vector3::z()],
        }
    }

    /// Construct without validation. Callers must guarantee orthonormality,
    /// e.g. when the vectors are produced by rotating an existing basis.
    pub(crate) fn new_unchecked(x: Vector3<f64>, y: Vector3<f64>, z: Vector3<f64>) -> Self {
        Self { vectors: [x, y, z] }
    }

    pub fn x(&self) -> Vector3<f64> {
        self.vectors[0]
    }

    pub fn y(&self) -> Vector3<f64> {
        self.vectors[1]
    }

    pub fn z(&self) -> Vector3<f64> {
        self.vectors[2]
    }

    pub fn vectors(&self) -> [Vector3<f64>; 3] {
        self.vectors
    }
}

/// 4x4 matrix rotating space by `angle` radians about the line through
/// `point` in direction `axis` (closed Rodrigues form).
///
/// `axis` must be a unit vector. With `point` at the origin this reduces to a
/// pure axis rotation.
pub fn rotation_matrix(point: Vector3<f64>, axis: Vector3<f64>, angle: f64) -> Matrix4<f64> {
    let (a, b, c) = (point.x, point.y, point.z);
    let (u, v, w) = (axis.x, axis.y, axis.z);
    let cos = angle.cos();
    let sin = angle.sin();

    Matrix4::new(
        u * u + (v * v + w * w) * cos,
        u * v * (1.0 - cos) - w * sin,
        u * w * (1.0 - cos) + v * sin,
        (a * (v * v + w * w) - u * (b * v + c * w)) * (1.0 - cos) + (b * w - c * v) * sin,
        u * v * (1.0 - cos) + w * sin,
        v * v + (u * u + w * w) * cos,
        v * w * (1.0 - cos) - u * sin,
        (b * (u * u + w * w) - v * (a * u + c * w)) * (1.0 - cos) + (c * u - a * w) * sin,
        u * w * (1.0 - cos) - v * sin,
        v * w * (1.0 - cos) + u * sin,
        w * w + (u * u + v * v) * cos,
        (c * (u * u + v * v) - w * (a * u + b * v)) * (1.0 - cos) + (a * v - b * u) * sin,
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// 4x4 homogeneous translation matrix.
pub fn translation_matrix(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(dx, dy, dz))
}

/// Change-of-basis matrix with the basis vectors as columns (homogeneous
/// weight 0) and a unit bottom-right corner.
pub fn basis_matrix(basis: &Basis) -> Matrix4<f64> {
    let [x, y, z] = basis.vectors();
    Matrix4::new(
        x.x, y.x, z.x, 0.0, //
        x.y, y.y, z.y, 0.0, //
        x.z, y.z, z.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Invert a matrix, failing explicitly when it is singular.
pub fn invert(matrix: &Matrix4<f64>) -> Result<Matrix4<f64>> {
    matrix.try_inverse().ok_or(Error::SingularMatrix)
}

/// Rotate the world basis successively about its own (already rotated)
/// z, x, and y axes by `yaw`, `pitch`, and `roll` radians.
///
/// Order matters and is not commutative; this is the canonical definition of
/// orientation for every model.
pub fn oriented_basis(yaw: f64, pitch: f64, roll: f64) -> Basis {
    let mut m = basis_matrix(&Basis::world());

    // Column indices of the evolving z, x, and y axes.
    for (col, angle) in [(2, yaw), (0, pitch), (1, roll)] {
        let axis = Vector3::new(m[(0, col)], m[(1, col)], m[(2, col)]);
        m = rotation_matrix(Vector3::zeros(), axis, angle) * m;
    }

    // Rotations preserve orthonormality, so no revalidation is needed.
    Basis::new_unchecked(
        Vector3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]),
        Vector3::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]),
        Vector3::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]),
    )
}

/// Rotate a 2D point about the origin.
pub fn rotate2d(point: (f64, f64), angle: f64) -> (f64, f64) {
    let cos = angle.cos();
    let sin = angle.sin();
    (
        point.0 * cos - point.1 * sin,
        point.1 * cos + point.0 * sin,
    )
}

/// Perspective-divide projection of a camera-space point onto the screen.
///
/// Callers must clip first: the divide is undefined for z ≈ 0.
pub fn project(point: (f64, f64, f64), center: (i32, i32), scale: (f64, f64)) -> (i32, i32) {
    (
        center.0 + (point.0 / point.2 * scale.0) as i32,
        center.1 + (point.1 / point.2 * scale.1) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn world_basis_is_valid() {
        let b = Basis::world();
        assert!(Basis::new(b.x(), b.y(), b.z()).is_ok());
    }

    #[test]
    fn left_handed_basis_is_rejected() {
        let result = Basis::new(Vector3::x(), Vector3::y(), -Vector3::z());
        assert!(matches!(result, Err(Error::InvalidBasis)));
    }

    #[test]
    fn non_unit_basis_is_rejected() {
        let result = Basis::new(Vector3::x() * 2.0, Vector3::y(), Vector3::z());
        assert!(matches!(result, Err(Error::InvalidBasis)));
    }

    #[test]
    fn basis_matrix_inverse_round_trip() {
        let basis = oriented_basis(0.4, -1.1, 2.3);
        let m = basis_matrix(&basis);
        let product = invert(&m).unwrap() * m;
        assert!((product - Matrix4::identity()).norm() < 1e-9);
    }

    #[test]
    fn rotation_about_origin_is_pure_axis_rotation() {
        let m = rotation_matrix(Vector3::zeros(), Vector3::z(), FRAC_PI_2);
        let p = m.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_close(p.x, 0.0);
        assert_close(p.y, 1.0);
        assert_close(p.z, 0.0);
    }

    #[test]
    fn rotation_about_offset_line_fixes_points_on_it() {
        let point = Vector3::new(1.0, 2.0, 3.0);
        let m = rotation_matrix(point, Vector3::y(), 1.7);
        let p = m.transform_point(&nalgebra::Point3::new(1.0, 5.0, 3.0));
        assert_close(p.x, 1.0);
        assert_close(p.y, 5.0);
        assert_close(p.z, 3.0);
    }

    #[test]
    fn oriented_basis_with_no_angles_is_world() {
        let b = oriented_basis(0.0, 0.0, 0.0);
        assert!((b.x() - Vector3::x()).norm() < 1e-12);
        assert!((b.y() - Vector3::y()).norm() < 1e-12);
        assert!((b.z() - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn yaw_rotates_about_z() {
        let b = oriented_basis(FRAC_PI_2, 0.0, 0.0);
        assert!((b.x() - Vector3::y()).norm() < 1e-9);
        assert!((b.z() - Vector3::z()).norm() < 1e-9);
    }

    #[test]
    fn oriented_basis_stays_orthonormal() {
        let b = oriented_basis(0.7, -0.3, 2.9);
        assert!(Basis::new(b.x(), b.y(), b.z()).is_ok());
    }

    #[test]
    fn rotate2d_quarter_turn() {
        let (x, y) = rotate2d((1.0, 0.0), PI / 2.0);
        assert_close(x, 0.0);
        assert_close(y, 1.0);
    }

    #[test]
    fn project_scales_and_offsets() {
        let (x, y) = project((1.0, -1.0, 2.0), (100, 100), (50.0, 50.0));
        assert_eq!(x, 125);
        assert_eq!(y, 75);
    }

    #[test]
    fn singular_matrix_fails_inversion() {
        let m = Matrix4::zeros();
        assert!(matches!(invert(&m), Err(Error::SingularMatrix)));
    }
}
