//! Shared utilities: animation clock, frame timing, easing curves and
//! simplex noise.

/// Real-time clock producing elapsed time and frame deltas.
pub mod clock;
pub mod easing;
/// Smoothed FPS tracking and frame capping.
pub mod frame_timing;
pub mod noise;
