use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;
use crate::scene::Fog;

/// Fixed scene camera plus its GPU uniform buffer and bind group.
pub struct CameraController {
    /// Camera parameters.
    pub camera: Camera,
    /// CPU copy of the uniform.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for group 0.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for group 0.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Camera placed per options, sized to the context's surface.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        options: &CameraOptions,
        fog: &Fog,
    ) -> Self {
        let (width, height) = context.size();
        let camera = Camera::from_options(options, aspect_ratio(width, height));

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        uniform.set_fog(fog);
        uniform.viewport = [width as f32, height as f32];

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Refresh the uniform for this frame and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, fog: &Fog, time: f32) {
        self.uniform.update_view_proj(&self.camera);
        self.uniform.set_fog(fog);
        self.uniform.time = time;
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Update aspect ratio and viewport for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.aspect = aspect_ratio(width, height);
        self.uniform.viewport = [width as f32, height as f32];
    }
}

/// Width over height, treating zero sizes as one pixel.
#[must_use]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ignores_zero_height() {
        assert_eq!(aspect_ratio(1920, 1080), 1920.0 / 1080.0);
        assert_eq!(aspect_ratio(800, 0), 800.0);
    }
}
