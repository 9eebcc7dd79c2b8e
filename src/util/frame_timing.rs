use web_time::Duration;

/// Smoothed FPS tracking with an optional frame cap.
///
/// Fed with the per-frame delta from [`Clock`](super::clock::Clock) rather
/// than reading the time itself, so both stay in agreement.
pub struct FrameTiming {
    /// Minimum frame duration (zero = uncapped).
    min_frame_duration: Duration,
    /// Time accumulated since the last rendered frame.
    pending: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames rendered since creation.
    frames: u64,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            pending: Duration::ZERO,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Accumulate `delta` seconds; returns `true` once enough time has
    /// passed to render under the cap.
    pub fn should_render(&mut self, delta: f32) -> bool {
        self.pending += Duration::from_secs_f32(delta.max(0.0));
        self.pending >= self.min_frame_duration
    }

    /// Record a rendered frame.
    pub fn end_frame(&mut self) {
        let frame_time = self.pending.as_secs_f32();
        self.pending = Duration::ZERO;
        self.frames += 1;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Current smoothed FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
