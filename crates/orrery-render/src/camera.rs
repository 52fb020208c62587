//! Orbit camera: drag to rotate around a focus point, scroll to zoom

use glam::{Mat4, Vec3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Multiplicative zoom per scroll tick
const ZOOM_STEP: f32 = 1.1;
/// Radians of yaw/pitch per pixel of drag
const DRAG_SENSITIVITY: f32 = 0.005;
const PITCH_LIMIT: f32 = 1.553; // ~89°

pub struct OrbitCamera {
    /// Point the camera revolves around (scene units)
    pub focus: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    min_distance: f32,
    max_distance: f32,

    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.6,
            pitch: 0.5,
            distance: 45.0,
            min_distance: 1.5,
            max_distance: 400.0,
            aspect,
            fovy: 45.0_f32.to_radians(),
            znear: 0.1,
            zfar: 5000.0,
        }
    }

    /// Rotate from a mouse drag delta in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * DRAG_SENSITIVITY;
        self.pitch += dy * DRAG_SENSITIVITY;

        // Clamp pitch so you don't flip over
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by scroll ticks; positive ticks move in
    pub fn zoom(&mut self, ticks: f32) {
        self.distance =
            (self.distance * ZOOM_STEP.powf(-ticks)).clamp(self.min_distance, self.max_distance);
    }

    pub fn set_focus(&mut self, focus: Vec3) {
        self.focus = focus;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }

    /// Camera position in scene units
    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let dir = Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw);
        self.focus + dir * self.distance
    }

    /// Camera basis for billboarding: (right, up)
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.focus - self.eye()).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (right, up)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.focus, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped() {
        let mut cam = OrbitCamera::new(1.6);
        cam.rotate(0.0, 1e6);
        assert!(cam.pitch <= PITCH_LIMIT);
        cam.rotate(0.0, -1e7);
        assert!(cam.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut cam = OrbitCamera::new(1.6);
        for _ in 0..500 {
            cam.zoom(1.0);
        }
        assert!((cam.distance() - cam.min_distance).abs() < 1e-3);

        for _ in 0..500 {
            cam.zoom(-1.0);
        }
        assert!((cam.distance() - cam.max_distance).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_in_reduces_distance() {
        let mut cam = OrbitCamera::new(1.6);
        let before = cam.distance();
        cam.zoom(1.0);
        assert!(cam.distance() < before);
    }

    #[test]
    fn test_eye_at_distance_from_focus() {
        let mut cam = OrbitCamera::new(1.6);
        cam.set_focus(Vec3::new(10.0, 2.0, -4.0));
        let d = (cam.eye() - cam.focus).length();
        assert!((d - cam.distance()).abs() < 1e-4);
    }

    #[test]
    fn test_view_projection_finite() {
        let mut cam = OrbitCamera::new(1.6);
        cam.rotate(123.0, -45.0);
        cam.zoom(3.0);
        let m = cam.build_view_projection_matrix();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_basis_orthonormal() {
        let mut cam = OrbitCamera::new(1.6);
        cam.rotate(40.0, 25.0);
        let (right, up) = cam.basis();
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
    }
}
