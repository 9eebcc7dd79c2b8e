/// Wrap-around looping along the depth axis.
///
/// Objects drift towards the camera (+Z). Once an object passes
/// `threshold` it jumps back to `reset`, far down the road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapRange {
    /// Depth past which an object is recycled.
    pub threshold: f32,
    /// Depth an object is recycled to.
    pub reset: f32,
}

impl WrapRange {
    /// Palms: recycled just behind the camera.
    pub const PALMS: Self = Self::new(20.0, -700.0);
    /// Arches: recycled further out than palms so they never bunch up.
    pub const ARCHES: Self = Self::new(20.0, -1200.0);
    /// City towers: slow parallax layer.
    pub const CITY: Self = Self::new(50.0, -800.0);

    /// New range. `reset` is expected to be below `threshold`.
    #[must_use]
    pub const fn new(threshold: f32, reset: f32) -> Self {
        Self { threshold, reset }
    }

    /// Move `z` forward by `step`, recycling it when it crosses the
    /// threshold.
    #[must_use]
    pub fn advance(&self, z: f32, step: f32) -> f32 {
        let next = z + step;
        if next > self.threshold {
            self.reset
        } else {
            next
        }
    }

    /// Whether `z` lies in the band an object starting at `initial` can
    /// ever occupy.
    #[must_use]
    pub fn contains(&self, z: f32, initial: f32) -> bool {
        z <= self.threshold.max(initial) && z >= self.reset.min(initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_forward() {
        assert_eq!(WrapRange::PALMS.advance(-100.0, 1.0), -99.0);
    }

    #[test]
    fn crossing_threshold_resets() {
        assert_eq!(WrapRange::PALMS.advance(19.5, 1.0), -700.0);
        assert_eq!(WrapRange::CITY.advance(49.9, 0.2), -800.0);
        // Landing exactly on the threshold is still in range.
        assert_eq!(WrapRange::ARCHES.advance(19.0, 1.0), 20.0);
    }

    #[test]
    fn stays_in_bounds_over_many_steps() {
        for range in [WrapRange::PALMS, WrapRange::ARCHES, WrapRange::CITY] {
            for initial in [0.0, -300.0, -1380.0] {
                let mut z = initial;
                for step in 0..20_000 {
                    // Mix small and frame-spike sized steps.
                    let dt = if step % 97 == 0 { 0.1 } else { 1.0 / 60.0 };
                    z = range.advance(z, 60.0 * dt);
                    assert!(
                        range.contains(z, initial),
                        "{z} escaped {range:?}"
                    );
                }
            }
        }
    }
}
