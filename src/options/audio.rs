use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Audio", inline)]
#[serde(default)]
/// Audio asset locations, volumes and initial toggle state.
pub struct AudioOptions {
    /// Background music, relative to the asset root.
    #[schemars(skip)]
    pub music_path: String,
    /// Station beam sound effect.
    #[schemars(skip)]
    pub beam_path: String,
    /// UI hover/click blip.
    #[schemars(skip)]
    pub hover_path: String,
    /// Background music volume.
    #[schemars(title = "Music Volume", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub music_volume: f32,
    /// Beam effect volume.
    #[schemars(title = "Beam Volume", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub beam_volume: f32,
    /// Default hover blip volume.
    #[schemars(title = "Hover Volume", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub hover_volume: f32,
    /// Whether music starts enabled.
    #[schemars(title = "Music")]
    pub music_enabled: bool,
    /// Whether sound effects start enabled.
    #[schemars(title = "Sound Effects")]
    pub sound_enabled: bool,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            music_path: "music/RETRO1.m4a".into(),
            beam_path: "sounds/science-fiction-effect-020-305484.mp3".into(),
            hover_path: "sounds/pulse_sound_try1-89547.mp3".into(),
            music_volume: 0.6,
            beam_volume: 1.0,
            hover_volume: 0.4,
            music_enabled: true,
            sound_enabled: true,
        }
    }
}
