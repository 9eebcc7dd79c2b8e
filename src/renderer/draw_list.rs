//! CPU-side frame preparation: draw ordering and uniform packing.

use glam::{Mat4, Vec3};

use crate::geometry::Topology;
use crate::scene::{Light, Material, MaterialId, MeshId, Scene, WorldLight};

/// Maximum point lights passed to the shaders.
pub const MAX_POINT_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Per-draw uniform, bound with a dynamic offset.
pub struct ObjectUniform {
    /// Object-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Base color and opacity.
    pub color: [f32; 4],
    /// Secondary color; alpha holds the point sprite size.
    pub color_b: [f32; 4],
    /// Metalness, roughness, shininess, shading id.
    pub params: [f32; 4],
}

impl ObjectUniform {
    /// Pack a world matrix and material.
    #[must_use]
    pub fn new(world: &Mat4, material: &Material) -> Self {
        let [r, g, b] = material.color;
        let [r2, g2, b2] = material.color_b;
        Self {
            model: world.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            color_b: [r2, g2, b2, material.point_size],
            params: [
                material.metalness,
                material.roughness,
                material.shininess,
                material.shading.id() as f32,
            ],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// One point light as laid out in the lights uniform.
pub struct PointLightUniform {
    /// World position (xyz) and range (w, 0 = infinite).
    pub position_range: [f32; 4],
    /// Color premultiplied by intensity.
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Scene lights uniform (group 2).
pub struct LightsUniform {
    /// Summed ambient color.
    pub ambient: [f32; 4],
    /// Directional light color premultiplied by intensity.
    pub directional_color: [f32; 4],
    /// Direction towards the directional light.
    pub directional_dir: [f32; 4],
    /// `x` = number of active point lights.
    pub counts: [u32; 4],
    /// Point lights, first `counts[0]` valid.
    pub points: [PointLightUniform; MAX_POINT_LIGHTS],
}

fn scaled(color: [f32; 3], intensity: f32) -> [f32; 4] {
    [color[0] * intensity, color[1] * intensity, color[2] * intensity, 1.0]
}

impl LightsUniform {
    /// Pack scene lights. Ambient lights add up, the first directional
    /// light wins, extra point lights beyond the limit are dropped.
    #[must_use]
    pub fn from_lights(lights: &[WorldLight]) -> Self {
        let mut uniform = Self::zeroed_default();
        let mut has_directional = false;
        let mut points = 0usize;
        for world in lights {
            match world.light {
                Light::Ambient { color, intensity } => {
                    for (acc, c) in uniform.ambient.iter_mut().zip(color) {
                        *acc += c * intensity;
                    }
                }
                Light::Directional { color, intensity } if !has_directional => {
                    has_directional = true;
                    uniform.directional_color = scaled(color, intensity);
                    let dir = world.position.normalize_or(Vec3::Y);
                    uniform.directional_dir = dir.extend(0.0).to_array();
                }
                Light::Directional { .. } => {}
                Light::Point {
                    color,
                    intensity,
                    range,
                } => {
                    if points < MAX_POINT_LIGHTS {
                        let position_range =
                            world.position.extend(range).to_array();
                        uniform.points[points] = PointLightUniform {
                            position_range,
                            color: scaled(color, intensity),
                        };
                        points += 1;
                    }
                }
            }
        }
        uniform.counts[0] = points as u32;
        uniform
    }

    fn zeroed_default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

/// Render bucket, drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pass {
    /// Depth-writing geometry.
    Opaque,
    /// Alpha-blended geometry, back to front.
    Transparent,
}

/// One draw resolved for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    /// Geometry to draw.
    pub mesh: MeshId,
    /// Material to shade with.
    pub material: MaterialId,
    /// Primitive topology of the mesh.
    pub topology: Topology,
    /// Bucket.
    pub pass: Pass,
    /// Squared distance from the eye to the object origin.
    pub depth: f32,
    /// Packed uniform.
    pub uniform: ObjectUniform,
}

/// Collect visible draws: opaque first in scene order, then transparent
/// sorted far to near. Fully transparent materials are skipped.
#[must_use]
pub fn plan_draws(scene: &Scene, eye: Vec3) -> Vec<DrawCall> {
    let mut calls: Vec<DrawCall> = scene
        .draw_items()
        .into_iter()
        .filter_map(|item| {
            let material = scene.material(item.material)?;
            let mesh = scene.mesh(item.mesh)?;
            if material.is_invisible() || mesh.primitive_count() == 0 {
                return None;
            }
            let origin = item.world.transform_point3(Vec3::ZERO);
            Some(DrawCall {
                mesh: item.mesh,
                material: item.material,
                topology: mesh.topology,
                pass: if material.transparent {
                    Pass::Transparent
                } else {
                    Pass::Opaque
                },
                depth: origin.distance_squared(eye),
                uniform: ObjectUniform::new(&item.world, material),
            })
        })
        .collect();
    // Stable: opaque keeps scene order, transparent goes far to near.
    calls.sort_by(|a, b| {
        a.pass.cmp(&b.pass).then_with(|| match a.pass {
            Pass::Opaque => std::cmp::Ordering::Equal,
            Pass::Transparent => b.depth.total_cmp(&a.depth),
        })
    });
    calls
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::primitives::cuboid;
    use crate::options::Options;
    use crate::scene::builder::build_scene;
    use crate::scene::{Fog, Transform};

    #[test]
    fn uniforms_match_wgsl_layout() {
        assert_eq!(size_of::<ObjectUniform>(), 112);
        assert_eq!(size_of::<PointLightUniform>(), 32);
        assert_eq!(size_of::<LightsUniform>(), 64 + 32 * MAX_POINT_LIGHTS);
    }

    #[test]
    fn transparent_draws_sort_back_to_front() {
        let mut scene = Scene::new(Fog {
            color: [0.0; 3],
            density: 0.0,
        });
        let mesh = scene.add_mesh(cuboid(1.0, 1.0, 1.0));
        let glass =
            scene.add_material(Material::basic([1.0; 3]).translucent(0.5));
        let solid = scene.add_material(Material::basic([1.0; 3]));
        for z in [-10.0, -50.0, -5.0] {
            let at = Transform::at(Vec3::Z * z);
            let _ = scene.spawn_mesh(None, at, mesh, glass);
        }
        let _ = scene.spawn_mesh(None, Transform::default(), mesh, solid);

        let calls = plan_draws(&scene, Vec3::ZERO);
        assert_eq!(calls[0].pass, Pass::Opaque);
        let depths: Vec<f32> = calls[1..].iter().map(|c| c.depth).collect();
        assert_eq!(depths, vec![2500.0, 100.0, 25.0]);
    }

    #[test]
    fn invisible_beam_is_skipped() {
        let options = Options::default();
        let mut rng = StdRng::seed_from_u64(1);
        let (mut scene, handles) = build_scene(&options, &mut rng);
        let hidden = plan_draws(&scene, Vec3::ZERO);
        assert!(hidden.iter().all(|c| c.material != handles.beam_material));
        scene.material_mut(handles.beam_material).unwrap().opacity = 0.5;
        let shown = plan_draws(&scene, Vec3::ZERO);
        assert_eq!(shown.len(), hidden.len() + 1);
    }

    #[test]
    fn lights_pack_in_order() {
        let options = Options::default();
        let (scene, _) = build_scene(&options, &mut StdRng::seed_from_u64(1));
        let uniform = LightsUniform::from_lights(&scene.lights());
        assert!((uniform.ambient[0] - 0.3).abs() < 1e-6);
        assert!((uniform.directional_color[1] - 0.8).abs() < 1e-6);
        assert_eq!(uniform.counts[0], 2);
        // Cyan car light at full range 40, intensity 2.
        assert_eq!(uniform.points[0].position_range, [0.0, 2.0, 15.0, 40.0]);
        assert_eq!(uniform.points[0].color, [0.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn point_lights_are_capped() {
        let lights: Vec<WorldLight> = (0..6)
            .map(|i| WorldLight {
                light: Light::Point {
                    color: [1.0; 3],
                    intensity: 1.0,
                    range: 5.0,
                },
                position: Vec3::X * i as f32,
            })
            .collect();
        let uniform = LightsUniform::from_lights(&lights);
        assert_eq!(uniform.counts[0], MAX_POINT_LIGHTS as u32);
    }
}
