use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Fixed chase-camera placement and projection parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position in world space.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Look-at target in world space.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Upper bound on the device pixel ratio used for the surface.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 3.0), extend("step" = 0.5))]
    pub max_pixel_ratio: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 2000.0,
            eye: [0.0, 5.0, 22.0],
            target: [0.0, 3.0, -50.0],
            max_pixel_ratio: 2.0,
        }
    }
}
