use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_music = "KeyM"
/// fire_beam = "Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Flip background music on/off.
    ToggleMusic,
    /// Flip sound effects on/off.
    ToggleSound,
    /// Fire the station beam immediately.
    FireBeam,
    /// Close the viewer.
    Quit,
}
