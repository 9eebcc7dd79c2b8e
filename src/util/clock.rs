use web_time::Instant;

/// Real-time animation clock: elapsed seconds since start plus the delta
/// since the previous tick.
///
/// Deltas are clamped so a stalled window (minimized, debugger break) does
/// not teleport every drifting object in one frame.
pub struct Clock {
    start: Instant,
    last: Instant,
    max_delta: f32,
}

/// One clock reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped to the clock's maximum.
    pub delta: f32,
}

impl Clock {
    /// Start a clock now.
    #[must_use]
    pub fn new(max_delta: f32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Advance to the current instant.
    pub fn tick(&mut self) -> Tick {
        self.tick_at(Instant::now())
    }

    /// Advance to an explicit instant (earlier instants yield a zero delta).
    pub fn tick_at(&mut self, now: Instant) -> Tick {
        let raw = now.saturating_duration_since(self.last).as_secs_f32();
        if now > self.last {
            self.last = now;
        }
        Tick {
            elapsed: self.last.duration_since(self.start).as_secs_f32(),
            delta: clamp_delta(raw, self.max_delta),
        }
    }
}

/// Clamp a raw frame delta to `[0, max]` (`max <= 0` disables the cap).
#[must_use]
pub fn clamp_delta(raw: f32, max: f32) -> f32 {
    let raw = raw.max(0.0);
    if max > 0.0 {
        raw.min(max)
    } else {
        raw
    }
}
