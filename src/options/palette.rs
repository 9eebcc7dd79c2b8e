use serde::{Deserialize, Serialize};

/// Neon color palette, stored as `0xRRGGBB` hex values so TOML presets stay
/// readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaletteOptions {
    /// Fog and background color.
    pub fog: u32,
    /// Wireframe grid color.
    pub grid: u32,
    /// Road surface color.
    pub road: u32,
    /// Neon cyan accent (road edges, arches, car glow).
    pub neon_cyan: u32,
    /// Neon blue accent (city edges, station core).
    pub neon_blue: u32,
    /// Neon purple accent (city edges, palm trunks).
    pub neon_purple: u32,
    /// Sun gradient top color.
    pub sun_top: u32,
    /// Sun gradient bottom color.
    pub sun_bottom: u32,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            fog: 0x05_05_10,
            grid: 0xff_00_ff,
            road: 0x08_08_08,
            neon_cyan: 0x00_ff_ff,
            neon_blue: 0x00_55_ff,
            neon_purple: 0xbc_13_fe,
            sun_top: 0xff_bd_00,
            sun_bottom: 0xff_00_ff,
        }
    }
}

/// Convert a `0xRRGGBB` hex color to linear-ish `[r, g, b]` in `0.0..=1.0`.
#[must_use]
pub fn rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(rgb(0xff_00_ff), [1.0, 0.0, 1.0]);
        assert_eq!(rgb(0x00_00_00), [0.0, 0.0, 0.0]);
        let blue = rgb(0x00_55_ff);
        assert!((blue[1] - 0x55 as f32 / 255.0).abs() < 1e-6);
    }
}
