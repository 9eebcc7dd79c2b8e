use super::tween::Tween;
use crate::options::EffectsOptions;
use crate::util::easing::EasingFunction;

/// Durations (seconds) of the three beam phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamTimings {
    /// Fade in to full opacity.
    pub fade_in: f32,
    /// Time held at full opacity.
    pub hold: f32,
    /// Fade back out to transparent.
    pub fade_out: f32,
}

impl Default for BeamTimings {
    fn default() -> Self {
        Self {
            fade_in: 0.5,
            hold: 2.0,
            fade_out: 2.0,
        }
    }
}

impl From<&EffectsOptions> for BeamTimings {
    fn from(effects: &EffectsOptions) -> Self {
        Self {
            fade_in: effects.beam_fade_in,
            hold: effects.beam_hold,
            fade_out: effects.beam_fade_out,
        }
    }
}

/// Where the beam is in its fade/hold/fade cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeamPhase {
    /// Invisible, waiting for a trigger.
    Idle,
    /// Circular-out fade towards full opacity.
    FadingIn(Tween),
    /// Full opacity; seconds left to hold.
    Holding(f32),
    /// Linear fade back to zero.
    FadingOut(Tween),
}

/// Opacity state machine for the station beam.
///
/// `Idle -> FadingIn -> Holding -> FadingOut -> Idle`. Triggering while a
/// cycle is running restarts the fade in from the current opacity, so the
/// beam never jumps.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamSequence {
    phase: BeamPhase,
    opacity: f32,
    timings: BeamTimings,
}

impl BeamSequence {
    /// Idle, fully transparent beam.
    #[must_use]
    pub fn new(timings: BeamTimings) -> Self {
        Self {
            phase: BeamPhase::Idle,
            opacity: 0.0,
            timings,
        }
    }

    /// Start (or restart) a beam cycle.
    pub fn trigger(&mut self) {
        log::debug!("beam triggered at opacity {:.2}", self.opacity);
        self.phase = BeamPhase::FadingIn(Tween::new(
            self.opacity,
            1.0,
            self.timings.fade_in,
            EasingFunction::CircularOut,
        ));
    }

    /// Advance by `delta` seconds and return the new opacity.
    ///
    /// Time left over at a phase boundary flows into the next phase.
    pub fn update(&mut self, delta: f32) -> f32 {
        let mut left = delta.max(0.0);
        loop {
            match &mut self.phase {
                BeamPhase::Idle => {
                    self.opacity = 0.0;
                    break;
                }
                BeamPhase::FadingIn(tween) => {
                    left = tween.advance(left);
                    self.opacity = tween.value();
                    if !tween.is_finished() {
                        break;
                    }
                    self.phase = BeamPhase::Holding(self.timings.hold);
                }
                BeamPhase::Holding(remaining) => {
                    self.opacity = 1.0;
                    if left < *remaining {
                        *remaining -= left;
                        break;
                    }
                    left -= *remaining;
                    self.phase = BeamPhase::FadingOut(Tween::new(
                        1.0,
                        0.0,
                        self.timings.fade_out,
                        EasingFunction::Linear,
                    ));
                }
                BeamPhase::FadingOut(tween) => {
                    left = tween.advance(left);
                    self.opacity = tween.value();
                    if !tween.is_finished() {
                        break;
                    }
                    self.phase = BeamPhase::Idle;
                }
            }
        }
        self.opacity = self.opacity.clamp(0.0, 1.0);
        self.opacity
    }

    /// Current opacity in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &BeamPhase {
        &self.phase
    }

    /// Whether a cycle is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, BeamPhase::Idle)
    }
}
