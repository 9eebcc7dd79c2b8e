//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, dynamic buffer management
//! and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
