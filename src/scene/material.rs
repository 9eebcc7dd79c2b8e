/// Shading model selected per object in the mesh shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Unlit flat color.
    Basic,
    /// Metal/roughness lit surface (Blinn-Phong approximation).
    Standard,
    /// Classic Phong with a fixed specular color.
    Phong,
    /// Vertical gradient with scanline cuts on the lower half (sun disc).
    SunGradient,
    /// Screen-facing point sprites.
    Points,
}

impl Shading {
    /// Numeric id consumed by the shaders.
    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::Basic => 0,
            Self::Standard => 1,
            Self::Phong => 2,
            Self::SunGradient => 3,
            Self::Points => 4,
        }
    }
}

/// Surface appearance of a mesh node.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Shading model.
    pub shading: Shading,
    /// Base color (linear RGB).
    pub color: [f32; 3],
    /// Secondary color; the gradient top for [`Shading::SunGradient`].
    pub color_b: [f32; 3],
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Whether the object is alpha-blended (drawn after opaque geometry).
    pub transparent: bool,
    /// Metalness for [`Shading::Standard`].
    pub metalness: f32,
    /// Roughness for [`Shading::Standard`].
    pub roughness: f32,
    /// Specular exponent for [`Shading::Phong`].
    pub shininess: f32,
    /// Sprite size in pixels for [`Shading::Points`].
    pub point_size: f32,
}

impl Material {
    fn with_shading(shading: Shading, color: [f32; 3]) -> Self {
        Self {
            shading,
            color,
            color_b: color,
            opacity: 1.0,
            transparent: false,
            metalness: 0.0,
            roughness: 1.0,
            shininess: 30.0,
            point_size: 1.0,
        }
    }

    /// Unlit flat color.
    #[must_use]
    pub fn basic(color: [f32; 3]) -> Self {
        Self::with_shading(Shading::Basic, color)
    }

    /// Lit metal/roughness surface.
    #[must_use]
    pub fn standard(color: [f32; 3], metalness: f32, roughness: f32) -> Self {
        Self {
            metalness,
            roughness,
            ..Self::with_shading(Shading::Standard, color)
        }
    }

    /// Glossy Phong surface.
    #[must_use]
    pub fn phong(color: [f32; 3], shininess: f32) -> Self {
        Self {
            shininess,
            ..Self::with_shading(Shading::Phong, color)
        }
    }

    /// Sun disc gradient from `bottom` (uv.y = 0) to `top` (uv.y = 1).
    #[must_use]
    pub fn sun_gradient(bottom: [f32; 3], top: [f32; 3]) -> Self {
        Self {
            color_b: top,
            ..Self::with_shading(Shading::SunGradient, bottom)
        }
    }

    /// Point sprites of a fixed pixel size.
    #[must_use]
    pub fn points(color: [f32; 3], size: f32) -> Self {
        Self {
            point_size: size,
            ..Self::with_shading(Shading::Points, color)
        }
    }

    /// Mark as alpha-blended with the given opacity.
    #[must_use]
    pub fn translucent(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Whether drawing this material can be skipped entirely.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        self.transparent && self.opacity <= 0.0
    }
}
