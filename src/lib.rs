// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural synthwave drive rendered with wgpu.
//!
//! A car cruises down an endless neon road: palms, arches and city towers
//! drift past and wrap around, a wireframe grid pulses to a beat, and a
//! station on the horizon fires a beam every so often. Music and sound
//! effects can be toggled.
//!
//! # Key entry points
//!
//! - [`engine::RetrowaveEngine`] - owns the GPU context and the frame loop
//! - [`scene::builder::build_scene`] - procedural world construction
//! - [`animation::SceneAnimator`] - per-frame motion
//! - [`options::Options`] - TOML presets for every tweakable value
//!
//! # Architecture
//!
//! The scene is a plain node tree built once at startup. Each frame the
//! animator moves nodes and rewrites the grid mesh, then the
//! [`renderer::SceneRenderer`] uploads what changed and draws opaque
//! geometry followed by translucent geometry back to front. Audio clips
//! load on background threads and attach whenever they arrive.

pub mod animation;
pub mod audio;
pub mod camera;
pub mod controls;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::RetrowaveEngine;
pub use error::RetrowaveError;
pub use input::{InputEvent, KeyAction};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
