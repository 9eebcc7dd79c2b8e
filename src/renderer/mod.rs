//! Scene rendering: frame planning on the CPU and the wgpu forward pass.

pub mod draw_list;
pub(crate) mod pipeline_util;
mod scene_renderer;

pub use scene_renderer::SceneRenderer;
