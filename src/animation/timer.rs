/// Repeating timer driven by frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    period: f32,
    accumulated: f32,
}

impl IntervalTimer {
    /// Fire every `period` seconds; a non-positive period never fires.
    #[must_use]
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulated: 0.0,
        }
    }

    /// Advance by `delta` seconds and return how many periods completed.
    pub fn tick(&mut self, delta: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        self.accumulated += delta.max(0.0);
        let fired = (self.accumulated / self.period).floor();
        self.accumulated -= fired * self.period;
        fired as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut timer = IntervalTimer::new(30.0);
        let fired: u32 = (0..1770).map(|_| timer.tick(1.0 / 60.0)).sum();
        assert_eq!(fired, 0);
        assert_eq!(timer.tick(1.0), 1);
        assert_eq!(timer.tick(1.0), 0);
    }

    #[test]
    fn long_frames_fire_per_period() {
        let mut timer = IntervalTimer::new(1.0);
        assert_eq!(timer.tick(3.5), 3);
        assert_eq!(timer.tick(0.4), 0);
        assert_eq!(timer.tick(0.2), 1);
    }

    #[test]
    fn disabled_timer_never_fires() {
        let mut timer = IntervalTimer::new(0.0);
        assert_eq!(timer.tick(1000.0), 0);
    }
}
