//! Fixed perspective camera looking down the road.

/// Camera GPU resources and resize handling.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
