/// Light sources attached to scene nodes. Position and direction come from
/// the owning node's world transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light from every direction.
    Ambient {
        /// Linear RGB color.
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Parallel light shining from the node position towards the origin.
    Directional {
        /// Linear RGB color.
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Omni light with linear falloff to zero at `range`.
    Point {
        /// Linear RGB color.
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
        /// Distance at which the contribution reaches zero (0 = infinite).
        range: f32,
    },
}
