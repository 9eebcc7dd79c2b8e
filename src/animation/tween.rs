use crate::util::easing::EasingFunction;

/// Eased interpolation of a scalar over a fixed duration (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: EasingFunction,
}

impl Tween {
    /// Start a tween at `from`.
    #[must_use]
    pub fn new(
        from: f32,
        to: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `delta` seconds. Returns the portion of `delta` left over
    /// after the tween finished (zero while it is still running).
    pub fn advance(&mut self, delta: f32) -> f32 {
        let remaining = self.duration - self.elapsed;
        let delta = delta.max(0.0);
        if delta >= remaining {
            self.elapsed = self.duration;
            delta - remaining
        } else {
            self.elapsed += delta;
            0.0
        }
    }

    /// Current eased value.
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = self.easing.evaluate(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint() {
        let mut tween = Tween::new(1.0, 0.0, 2.0, EasingFunction::Linear);
        assert_eq!(tween.advance(1.0), 0.0);
        assert!((tween.value() - 0.5).abs() < 1e-6);
        assert!(!tween.is_finished());
    }

    #[test]
    fn overshoot_is_returned() {
        let mut tween = Tween::new(0.0, 1.0, 0.5, EasingFunction::CircularOut);
        let left = tween.advance(0.75);
        assert!((left - 0.25).abs() < 1e-6);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let tween = Tween::new(0.3, 1.0, 0.0, EasingFunction::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 1.0);
    }
}
