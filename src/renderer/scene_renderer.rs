//! Forward renderer for the scene graph.
//!
//! One uniform slot per draw (dynamic offset into a shared buffer), one
//! pipeline per topology and blend mode. Opaque geometry first, then
//! translucent geometry back to front.

use std::collections::HashMap;

use glam::Vec3;
use wgpu::util::DeviceExt;

use super::draw_list::{
    plan_draws, DrawCall, LightsUniform, ObjectUniform, Pass,
};
use super::pipeline_util::{
    align_to, color_targets, depth_stencil_state, uniform_entry,
};
use crate::error::RetrowaveError;
use crate::geometry::{MeshData, Topology, Vertex};
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{
    ShaderComposer, MESH_SHADER, STARS_SHADER,
};
use crate::scene::{MeshId, Scene};

/// Vertices emitted per star sprite.
const SPRITE_VERTICES: u32 = 6;

/// GPU copy of one scene mesh.
struct GpuMesh {
    vertices: DynamicBuffer,
    indices: Option<wgpu::Buffer>,
    index_count: u32,
    vertex_count: u32,
    version: u64,
}

impl GpuMesh {
    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: MeshId,
        data: &MeshData,
        version: u64,
    ) -> Self {
        let mut vertices = DynamicBuffer::new(
            device,
            &format!("Mesh {} Vertices", id.index()),
            size_of_val(data.vertices.as_slice()),
            wgpu::BufferUsages::VERTEX,
        );
        let _ = vertices.write(device, queue, &data.vertices);
        let indices = (!data.indices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Mesh {} Indices", id.index())),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        Self {
            vertices,
            indices,
            index_count: data.indices.len() as u32,
            vertex_count: data.vertices.len() as u32,
            version,
        }
    }

    /// Re-upload vertex positions after an animation rewrote them.
    fn refresh(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &MeshData,
        version: u64,
    ) {
        let _ = self.vertices.write(device, queue, &data.vertices);
        self.vertex_count = data.vertices.len() as u32;
        self.version = version;
    }
}

/// The six pipelines: triangles, lines and sprites, each opaque and
/// blended.
struct Pipelines {
    triangles: [wgpu::RenderPipeline; 2],
    lines: [wgpu::RenderPipeline; 2],
    points: [wgpu::RenderPipeline; 2],
}

impl Pipelines {
    fn get(&self, topology: Topology, pass: Pass) -> &wgpu::RenderPipeline {
        let set = match topology {
            Topology::Triangles => &self.triangles,
            Topology::Lines => &self.lines,
            Topology::Points => &self.points,
        };
        match pass {
            Pass::Opaque => &set[0],
            Pass::Transparent => &set[1],
        }
    }
}

/// Sprite instances read one position per star.
fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

/// Renders a [`Scene`] into the surface of a [`RenderContext`].
pub struct SceneRenderer {
    pipelines: Pipelines,
    meshes: HashMap<MeshId, GpuMesh>,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: DynamicBuffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    lights_buffer: wgpu::Buffer,
    lights_bind_group: wgpu::BindGroup,
    draws: Vec<DrawCall>,
}

impl SceneRenderer {
    /// Compose shaders and build every pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError::Shader`] if a shader fails to compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, RetrowaveError> {
        let device = &context.device;
        let mut composer = ShaderComposer::new()?;
        let (mesh_source, mesh_path) = MESH_SHADER;
        let mesh_shader =
            composer.compose(device, "Mesh Shader", mesh_source, mesh_path)?;
        let (stars_source, stars_path) = STARS_SHADER;
        let stars_shader = composer.compose(
            device,
            "Stars Shader",
            stars_source,
            stars_path,
        )?;

        let object_size = size_of::<ObjectUniform>() as u64;
        let object_stride = align_to(
            object_size,
            u64::from(device.limits().min_uniform_buffer_offset_alignment),
        );
        let object_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[uniform_entry(
                    0,
                    true,
                    wgpu::BufferSize::new(object_size),
                )],
            });
        let lights_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lights Bind Group Layout"),
                entries: &[uniform_entry(0, false, None)],
            });

        let object_buffer = DynamicBuffer::new(
            device,
            "Object Uniforms",
            (object_stride * 64) as usize,
            wgpu::BufferUsages::UNIFORM,
        );
        let object_bind_group =
            Self::object_bind_group(device, &object_layout, &object_buffer);

        let lights_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lights Buffer"),
                contents: bytemuck::cast_slice(&[LightsUniform::from_lights(
                    &[],
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let lights_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Lights Bind Group"),
                layout: &lights_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: lights_buffer.as_entire_binding(),
                }],
            });

        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    &object_layout,
                    &lights_layout,
                ],
                push_constant_ranges: &[],
            });

        let format = context.format();
        let build = |label: &str,
                     shader: &wgpu::ShaderModule,
                     buffer: wgpu::VertexBufferLayout<'static>,
                     topology: wgpu::PrimitiveTopology,
                     blended: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[buffer],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &color_targets(format, blended),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(depth_stencil_state(!blended)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let tri = wgpu::PrimitiveTopology::TriangleList;
        let line = wgpu::PrimitiveTopology::LineList;
        let mesh = |label: &str, topology, blended| {
            build(label, &mesh_shader, Vertex::layout(), topology, blended)
        };
        let stars = |label: &str, blended| {
            build(label, &stars_shader, instance_layout(), tri, blended)
        };
        let pipelines = Pipelines {
            triangles: [
                mesh("Triangles Opaque", tri, false),
                mesh("Triangles Blended", tri, true),
            ],
            lines: [
                mesh("Lines Opaque", line, false),
                mesh("Lines Blended", line, true),
            ],
            points: [
                stars("Stars Opaque", false),
                stars("Stars Blended", true),
            ],
        };

        log::debug!(
            "scene renderer ready, object stride {object_stride} bytes"
        );

        Ok(Self {
            pipelines,
            meshes: HashMap::new(),
            object_layout,
            object_buffer,
            object_bind_group,
            object_stride,
            lights_buffer,
            lights_bind_group,
            draws: Vec::new(),
        })
    }

    fn object_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &DynamicBuffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: buffer.buffer(),
                    offset: 0,
                    size: wgpu::BufferSize::new(
                        size_of::<ObjectUniform>() as u64,
                    ),
                }),
            }],
        })
    }

    /// Upload new or changed meshes, lights and per-draw uniforms.
    pub fn prepare(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        eye: Vec3,
    ) {
        let (device, queue) = (&context.device, &context.queue);

        for (id, data) in scene.meshes() {
            let version = scene.mesh_version(id);
            match self.meshes.get_mut(&id) {
                Some(gpu) if gpu.version == version => {}
                Some(gpu) => gpu.refresh(device, queue, data, version),
                None => {
                    let mesh =
                        GpuMesh::upload(device, queue, id, data, version);
                    let _ = self.meshes.insert(id, mesh);
                }
            }
        }

        let lights = LightsUniform::from_lights(&scene.lights());
        queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::cast_slice(&[lights]),
        );

        self.draws = plan_draws(scene, eye);
        let stride = self.object_stride as usize;
        let mut bytes = vec![0u8; self.draws.len() * stride];
        let uniform_size = size_of::<ObjectUniform>();
        for (slot, draw) in bytes.chunks_exact_mut(stride).zip(&self.draws) {
            slot[..uniform_size]
                .copy_from_slice(bytemuck::bytes_of(&draw.uniform));
        }
        if self.object_buffer.write_bytes(device, queue, &bytes) {
            self.object_bind_group = Self::object_bind_group(
                device,
                &self.object_layout,
                &self.object_buffer,
            );
        }
    }

    /// Record the prepared draws into a render pass cleared to `clear`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        camera_bind_group: &wgpu::BindGroup,
        clear: [f32; 3],
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(clear[0]),
                        g: f64::from(clear[1]),
                        b: f64::from(clear[2]),
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_bind_group(2, &self.lights_bind_group, &[]);

        for (slot, draw) in self.draws.iter().enumerate() {
            let Some(mesh) = self.meshes.get(&draw.mesh) else {
                continue;
            };
            let offset = (slot as u64 * self.object_stride) as u32;
            pass.set_pipeline(self.pipelines.get(draw.topology, draw.pass));
            pass.set_bind_group(1, &self.object_bind_group, &[offset]);
            pass.set_vertex_buffer(0, mesh.vertices.buffer().slice(..));
            match (draw.topology, &mesh.indices) {
                (Topology::Points, _) => {
                    pass.draw(0..SPRITE_VERTICES, 0..mesh.vertex_count);
                }
                (_, Some(indices)) => {
                    pass.set_index_buffer(
                        indices.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
                (_, None) => pass.draw(0..mesh.vertex_count, 0..1),
            }
        }
    }

    /// Draws recorded by the last [`prepare`](Self::prepare).
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}
