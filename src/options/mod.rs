//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (world population, palette, camera, effects,
//! audio, keybindings) are consolidated here. Options serialize to/from TOML
//! so a scene variant can be described by a small preset file.

mod audio;
mod camera;
mod effects;
mod keybindings;
mod palette;
mod world;

use std::path::Path;

pub use audio::AudioOptions;
pub use camera::CameraOptions;
pub use effects::EffectsOptions;
pub use keybindings::KeybindingOptions;
pub use palette::{rgb, PaletteOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use world::WorldOptions;

use crate::error::RetrowaveError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[world]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Scene population and travel speed.
    pub world: WorldOptions,
    /// Neon color palette.
    #[schemars(skip)]
    pub palette: PaletteOptions,
    /// Camera placement and projection.
    pub camera: CameraOptions,
    /// Fog, grid wave and beam timing.
    pub effects: EffectsOptions,
    /// Audio assets and toggles.
    pub audio: AudioOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, RetrowaveError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| RetrowaveError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, RetrowaveError> {
        let content =
            std::fs::read_to_string(path).map_err(RetrowaveError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), RetrowaveError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RetrowaveError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RetrowaveError::Io)?;
        }
        std::fs::write(path, content).map_err(RetrowaveError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[world]
palm_count = 4
seed = 7
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.world.palm_count, 4);
        assert_eq!(opts.world.seed, Some(7));
        // Everything else should be default
        assert_eq!(opts.world.arch_count, 8);
        assert_eq!(opts.world.speed, 60.0);
        assert_eq!(opts.effects.beam_interval, 30.0);
        assert!(opts.audio.music_enabled);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[world\nspeed = ").unwrap_err();
        assert!(matches!(err, RetrowaveError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let keys = Options::default().keybindings;
        assert_eq!(keys.lookup("KeyM"), Some(KeyAction::ToggleMusic));
        assert_eq!(keys.lookup("KeyN"), Some(KeyAction::ToggleSound));
        assert_eq!(keys.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(keys.lookup("KeyZ"), None);
    }

    #[test]
    fn loaded_keybindings_rebuild_reverse_map() {
        use crate::input::KeyAction;
        let toml_str = r#"
[keybindings.bindings]
fire_beam = "Space"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Space"), Some(KeyAction::FireBeam));
        assert_eq!(opts.keybindings.lookup("KeyB"), None);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir().join(format!(
            "retrowave-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.world.city_block_count = 12;
        opts.audio.sound_enabled = false;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("world"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("effects"));
        assert!(props.contains_key("audio"));

        // Skipped sections should be absent
        assert!(!props.contains_key("palette"));
        assert!(!props.contains_key("keybindings"));

        let world = &props["world"]["properties"];
        assert!(world.get("speed").is_some());
        assert!(world.get("seed").is_none());
    }
}
