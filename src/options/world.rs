use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "World", inline)]
#[serde(default)]
/// Scene population counts and travel speed.
pub struct WorldOptions {
    /// Forward travel speed in world units per second.
    #[schemars(title = "Speed", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub speed: f32,
    /// Width of the road surface.
    #[schemars(title = "Road Width", range(min = 5.0, max = 60.0), extend("step" = 1.0))]
    pub road_width: f32,
    /// Palms per road side.
    #[schemars(title = "Palms", range(min = 0, max = 64))]
    pub palm_count: usize,
    /// Number of arches spanning the road.
    #[schemars(title = "Arches", range(min = 0, max = 32))]
    pub arch_count: usize,
    /// Number of city towers.
    #[schemars(title = "City Blocks", range(min = 0, max = 400))]
    pub city_block_count: usize,
    /// Number of starfield particles.
    #[schemars(skip)]
    pub star_count: usize,
    /// Fixed RNG seed for reproducible layouts (`None` = random).
    #[schemars(skip)]
    pub seed: Option<u64>,
    /// Upper bound on a single frame's delta, in seconds.
    #[schemars(skip)]
    pub max_frame_delta: f32,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            speed: 60.0,
            road_width: 25.0,
            palm_count: 12,
            arch_count: 8,
            city_block_count: 80,
            star_count: 2000,
            seed: None,
            max_frame_delta: 0.1,
        }
    }
}
