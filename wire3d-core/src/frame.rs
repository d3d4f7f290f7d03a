/// Per-model spatial frame: basis + origin with a cached inverse transform
use nalgebra::{Matrix4, Vector3, Vector4};

use crate::error::Result;
use crate::linalg::{basis_matrix, invert, translation_matrix, Basis};

/// A local coordinate system expressed in world coordinates.
///
/// The cached inverse (`translation ∘ basis⁻¹`) maps points in this frame's
/// local coordinates into world coordinates. Every setter recomputes the
/// cache before returning, so no stale-cache window is observable.
#[derive(Debug, Clone)]
pub struct Frame {
    basis: Basis,
    origin: Vector3<f64>,
    translation: Matrix4<f64>,
    inverse: Matrix4<f64>,
}

impl Frame {
    /// The identity frame: world-aligned basis, origin at zero.
    pub fn new() -> Self {
        Self {
            basis: Basis::world(),
            origin: Vector3::zeros(),
            translation: Matrix4::identity(),
            inverse: Matrix4::identity(),
        }
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    pub fn set_basis(&mut self, basis: Basis) -> Result<()> {
        self.basis = basis;
        self.rebuild_inverse()
    }

    pub fn set_origin(&mut self, origin: Vector3<f64>) -> Result<()> {
        self.origin = origin;
        self.translation = translation_matrix(origin.x, origin.y, origin.z);
        self.rebuild_inverse()
    }

    /// Map a local homogeneous point into world coordinates.
    pub fn world_point(&self, local: &Vector4<f64>) -> Vector4<f64> {
        self.inverse * local
    }

    fn rebuild_inverse(&mut self) -> Result<()> {
        self.inverse = self.translation * invert(&basis_matrix(&self.basis))?;
        Ok(())
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::oriented_basis;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_frame_is_the_identity_map() {
        let frame = Frame::new();
        let p = Vector4::new(1.5, -2.0, 3.25, 1.0);
        assert_eq!(frame.world_point(&p), p);
    }

    #[test]
    fn origin_translates_points() {
        let mut frame = Frame::new();
        frame.set_origin(Vector3::new(10.0, 0.0, -5.0)).unwrap();
        let p = frame.world_point(&Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(p, Vector4::new(11.0, 2.0, -2.0, 1.0));
    }

    #[test]
    fn basis_reorients_points() {
        let mut frame = Frame::new();
        frame.set_basis(oriented_basis(FRAC_PI_2, 0.0, 0.0)).unwrap();
        // The inverse maps local x onto world -y under a quarter-turn yaw.
        let p = frame.world_point(&Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert!((p - Vector4::new(0.0, -1.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn cache_tracks_both_setters() {
        let mut frame = Frame::new();
        frame.set_basis(oriented_basis(FRAC_PI_2, 0.0, 0.0)).unwrap();
        frame.set_origin(Vector3::new(1.0, 1.0, 1.0)).unwrap();
        let p = frame.world_point(&Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert!((p - Vector4::new(1.0, 0.0, 1.0, 1.0)).norm() < 1e-9);

        // Setting the basis back must immediately be reflected.
        frame.set_basis(Basis::world()).unwrap();
        let p = frame.world_point(&Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert!((p - Vector4::new(2.0, 1.0, 1.0, 1.0)).norm() < 1e-9);
    }
}
