use glam::{Mat4, Vec3};

use crate::options::CameraOptions;
use crate::scene::Fog;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix, fog and frame
/// metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Seconds since start.
    pub time: f32,
    /// Fog color (linear RGB).
    pub fog_color: [f32; 3],
    /// Exponential-squared fog density.
    pub fog_density: f32,
    /// Render target size in pixels.
    pub viewport: [f32; 2],
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl Camera {
    /// Camera placed per options with the given aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(options.eye),
            target: Vec3::from_array(options.target),
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            time: 0.0,
            fog_color: [0.0; 3],
            fog_density: 0.0,
            viewport: [1.0, 1.0],
            _pad: [0.0; 2],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
    }

    /// Copy fog parameters.
    pub fn set_fog(&mut self, fog: &Fog) {
        self.fog_color = fog.color;
        self.fog_density = fog.density;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_std140_sized() {
        assert_eq!(size_of::<CameraUniform>(), 112);
        assert_eq!(size_of::<CameraUniform>() % 16, 0);
    }

    fn widescreen() -> Camera {
        Camera::from_options(&CameraOptions::default(), 16.0 / 9.0)
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = widescreen();
        let clip = camera.build_matrix() * camera.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn car_is_in_view() {
        let camera = widescreen();
        let car = Vec3::new(0.0, 2.0, 15.0).extend(1.0);
        let clip = camera.build_matrix() * car;
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
