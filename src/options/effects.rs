use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
/// Fog, grid wave and beam timing parameters.
pub struct EffectsOptions {
    /// Exponential-squared fog density.
    #[schemars(title = "Fog Density", range(min = 0.0, max = 0.02), extend("step" = 0.001))]
    pub fog_density: f32,
    /// Seconds between station beam firings (0 disables the timer).
    #[schemars(title = "Beam Interval", range(min = 0.0, max = 120.0), extend("step" = 1.0))]
    pub beam_interval: f32,
    /// Beam fade-in duration in seconds.
    #[schemars(skip)]
    pub beam_fade_in: f32,
    /// Seconds the beam stays fully lit.
    #[schemars(skip)]
    pub beam_hold: f32,
    /// Beam fade-out duration in seconds.
    #[schemars(skip)]
    pub beam_fade_out: f32,
    /// Extra flat margin either side of the road on the grid.
    #[schemars(skip)]
    pub grid_flat_margin: f32,
    /// Peak height of the grid sound-wave displacement.
    #[schemars(title = "Wave Amplitude", range(min = 0.0, max = 40.0), extend("step" = 0.5))]
    pub wave_amplitude: f32,
    /// Angular frequency of the beat envelope.
    #[schemars(title = "Beat Frequency", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub beat_frequency: f32,
}

impl Default for EffectsOptions {
    fn default() -> Self {
        Self {
            fog_density: 0.006,
            beam_interval: 30.0,
            beam_fade_in: 0.5,
            beam_hold: 2.0,
            beam_fade_out: 2.0,
            grid_flat_margin: 5.0,
            wave_amplitude: 15.0,
            beat_frequency: 8.0,
        }
    }
}
