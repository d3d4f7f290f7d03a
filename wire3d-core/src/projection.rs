/// Camera state and world-to-camera conversion
use nalgebra::Vector3;

use crate::linalg::rotate2d;

/// Camera configuration: viewpoint, rotation, near-clip distance, and the
/// projection scale constants derived from field of view and aspect ratio.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Position of the camera in world coordinates.
    pub viewpoint: Vector3<f64>,
    /// (pitch, yaw) in radians: rotation about the camera's horizontal and
    /// vertical axes.
    pub rotation: (f64, f64),
    /// Distance of the near clipping plane. The value is not validated:
    /// zero or negative distances let points at or behind the camera
    /// through clipping, and projection divides by their z. [`Camera::new`]
    /// starts it at 1.
    pub clip_distance: f64,
    /// Horizontal projection scale in pixels.
    pub proj_x: f64,
    /// Vertical projection scale in pixels.
    pub proj_y: f64,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            viewpoint: Vector3::zeros(),
            rotation: (0.0, 0.0),
            clip_distance: 1.0,
            proj_x: 0.0,
            proj_y: 0.0,
        }
    }

    /// Derive the projection scale constants for a viewport and horizontal
    /// field of view.
    pub fn set_viewport(&mut self, width: u32, height: u32, fov: f64) {
        let aspect = width as f64 / height as f64;
        let half_tan = (fov / 2.0).tan();
        self.proj_x = width as f64 / 2.0 / half_tan / aspect;
        self.proj_y = height as f64 / 2.0 / half_tan;
    }

    /// Convert a world-space point into camera space: translate by the
    /// viewpoint, then rotate about the vertical axis (yaw) and the
    /// horizontal axis (pitch).
    pub fn to_camera_space(&self, point: &Vector3<f64>) -> (f64, f64, f64) {
        let d = point - self.viewpoint;
        let (x, z) = rotate2d((d.x, d.z), self.rotation.1);
        let (y, z) = rotate2d((d.y, z), self.rotation.0);
        (x, y, z)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn viewport_scales_match_fov() {
        let mut camera = Camera::new();
        camera.set_viewport(800, 600, FRAC_PI_2);
        // tan(pi/4) = 1, aspect = 4/3.
        assert!((camera.proj_x - 300.0).abs() < 1e-9);
        assert!((camera.proj_y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn new_camera_clips_in_front_of_the_viewpoint() {
        assert!(Camera::new().clip_distance > 0.0);
    }

    #[test]
    fn unrotated_camera_only_translates() {
        let mut camera = Camera::new();
        camera.viewpoint = Vector3::new(1.0, 2.0, 3.0);
        let (x, y, z) = camera.to_camera_space(&Vector3::new(2.0, 2.0, 5.0));
        assert!((x - 1.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!((z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn yaw_swings_points_around_the_vertical_axis() {
        let mut camera = Camera::new();
        camera.rotation = (0.0, FRAC_PI_2);
        let (x, y, z) = camera.to_camera_space(&Vector3::new(0.0, 0.0, 1.0));
        assert!((x - -1.0).abs() < 1e-9);
        assert!(y.abs() < 1e-12);
        assert!(z.abs() < 1e-9);
    }
}
