//! Procedural construction of the synthwave world.
//!
//! Everything is placed once here; [`crate::animation::SceneAnimator`]
//! later moves the nodes recorded in [`SceneHandles`].

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};
use rand::Rng;

use super::car::spawn_car;
use super::{
    Fog, Light, Material, MaterialId, MeshId, NodeId, NodeKind, Scene,
    Transform,
};
use crate::geometry::curve::quadratic_bezier;
use crate::geometry::primitives::{
    circle, cuboid, cuboid_edges, cylinder, plane, plane_wireframe, points,
    polyline, torus,
};
use crate::options::{rgb, Options, PaletteOptions, WorldOptions};

/// Grid extent (width along X, length along Z) and subdivisions.
pub const GRID_SIZE: Vec2 = Vec2::new(800.0, 1000.0);
/// Grid subdivisions per axis.
pub const GRID_SEGMENTS: u32 = 100;
/// Resting height of the grid plane.
pub const GRID_Y: f32 = -4.0;

/// Spacing between consecutive palms along the road.
pub const PALM_SPACING: f32 = 60.0;
/// Spacing between consecutive arches.
pub const ARCH_SPACING: f32 = 150.0;

/// Where the car sits; the camera looks past it.
pub const CAR_POSITION: Vec3 = Vec3::new(0.0, 0.0, 15.0);

/// Nodes and resources the animator needs to reach after construction.
#[derive(Debug, Clone)]
pub struct SceneHandles {
    /// Car root group.
    pub car: NodeId,
    /// Palm groups, alternating right/left of the road.
    pub palms: Vec<NodeId>,
    /// Half-ring arches over the road.
    pub arches: Vec<NodeId>,
    /// City towers.
    pub city_blocks: Vec<NodeId>,
    /// Wireframe grid node.
    pub grid: NodeId,
    /// Wireframe grid mesh, rewritten every frame.
    pub grid_mesh: MeshId,
    /// Station root group.
    pub station: NodeId,
    /// Station beam node.
    pub beam: NodeId,
    /// Beam material whose opacity is animated.
    pub beam_material: MaterialId,
    /// Sun disc.
    pub sun: NodeId,
    /// Starfield point cloud.
    pub stars: NodeId,
}

/// Build the full scene from options, drawing randomness from `rng`.
pub fn build_scene<R: Rng + ?Sized>(
    options: &Options,
    rng: &mut R,
) -> (Scene, SceneHandles) {
    let palette = &options.palette;
    let world = &options.world;
    let mut scene = Scene::new(Fog {
        color: rgb(palette.fog),
        density: options.effects.fog_density,
    });

    spawn_lights(&mut scene, palette);
    let sun = spawn_sun(&mut scene, palette);
    let (grid, grid_mesh) = spawn_grid(&mut scene, palette);
    spawn_road(&mut scene, palette, world.road_width);
    let city_blocks =
        spawn_city(&mut scene, palette, world.city_block_count, rng);
    let palms = spawn_palms(&mut scene, palette, world);
    let arches = spawn_arches(&mut scene, palette, world.arch_count);
    let (station, beam, beam_material) = spawn_station(&mut scene, palette);
    let car = spawn_car(&mut scene, palette, CAR_POSITION);
    let stars = spawn_stars(&mut scene, world.star_count, rng);

    log::info!(
        "scene built: {} nodes, {} palms, {} arches, {} city blocks",
        scene.node_count(),
        palms.len(),
        arches.len(),
        city_blocks.len()
    );

    let handles = SceneHandles {
        car,
        palms,
        arches,
        city_blocks,
        grid,
        grid_mesh,
        station,
        beam,
        beam_material,
        sun,
        stars,
    };
    (scene, handles)
}

// ---------------------------------------------------------------------------
// Pieces
// ---------------------------------------------------------------------------

fn spawn_lights(scene: &mut Scene, palette: &PaletteOptions) {
    let white = [1.0; 3];
    let _ = scene.spawn(
        None,
        Transform::default(),
        NodeKind::Light(Light::Ambient {
            color: white,
            intensity: 0.3,
        }),
    );
    let _ = scene.spawn(
        None,
        Transform::at(Vec3::new(0.0, 50.0, -100.0)),
        NodeKind::Light(Light::Directional {
            color: white,
            intensity: 0.8,
        }),
    );
    let _ = scene.spawn(
        None,
        Transform::at(Vec3::new(0.0, 2.0, 15.0)),
        NodeKind::Light(Light::Point {
            color: rgb(palette.neon_cyan),
            intensity: 2.0,
            range: 40.0,
        }),
    );
}

fn spawn_sun(scene: &mut Scene, palette: &PaletteOptions) -> NodeId {
    let mesh = scene.add_mesh(circle(200.0, 64));
    let material = scene.add_material(Material::sun_gradient(
        rgb(palette.sun_bottom),
        rgb(palette.sun_top),
    ));
    scene.spawn_mesh(
        None,
        Transform::at(Vec3::new(0.0, 60.0, -800.0)),
        mesh,
        material,
    )
}

fn spawn_grid(scene: &mut Scene, palette: &PaletteOptions) -> (NodeId, MeshId) {
    let mesh = scene.add_mesh(
        plane_wireframe(GRID_SIZE.x, GRID_SIZE.y, GRID_SEGMENTS, GRID_SEGMENTS)
            .rotated_x(-FRAC_PI_2),
    );
    let material = scene
        .add_material(Material::basic(rgb(palette.grid)).translucent(0.25));
    let node = scene.spawn_mesh(
        None,
        Transform::at(Vec3::new(0.0, GRID_Y, 0.0)),
        mesh,
        material,
    );
    (node, mesh)
}

fn spawn_road(scene: &mut Scene, palette: &PaletteOptions, road_width: f32) {
    let road =
        scene.add_mesh(plane(road_width, 1000.0, 1, 1).rotated_x(-FRAC_PI_2));
    let asphalt =
        scene.add_material(Material::standard(rgb(palette.road), 0.9, 0.05));
    let _ = scene.spawn_mesh(
        None,
        Transform::at(Vec3::new(0.0, -2.0, -100.0)),
        road,
        asphalt,
    );

    let strip = scene.add_mesh(cuboid(0.8, 0.5, 1000.0));
    let neon = scene.add_material(
        Material::basic(rgb(palette.neon_cyan)).translucent(0.8),
    );
    let offset = road_width * 0.5 + 0.4;
    for x in [-offset, offset] {
        let _ = scene.spawn_mesh(
            None,
            Transform::at(Vec3::new(x, -1.8, -100.0)),
            strip,
            neon,
        );
    }
}

/// Tower x position: uniform across the horizon, pushed out of the road
/// corridor.
fn city_x<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let x: f32 = rng.random_range(-300.0..300.0);
    if x.abs() < 40.0 {
        if x < 0.0 {
            -50.0
        } else {
            50.0
        }
    } else {
        x
    }
}

fn spawn_city<R: Rng + ?Sized>(
    scene: &mut Scene,
    palette: &PaletteOptions,
    count: usize,
    rng: &mut R,
) -> Vec<NodeId> {
    // Unit box with its pivot at the base so scale.y grows upwards.
    let base = Vec3::Y * 0.5;
    let block = scene.add_mesh(cuboid(1.0, 1.0, 1.0).translated(base));
    let edges = scene.add_mesh(cuboid_edges(1.0, 1.0, 1.0).translated(base));
    let body = scene.add_material(Material::basic([0.0; 3]).translucent(0.9));
    let purple = scene.add_material(Material::basic(rgb(palette.neon_purple)));
    let blue = scene.add_material(Material::basic(rgb(palette.neon_blue)));

    (0..count)
        .map(|_| {
            let size = Vec3::new(
                rng.random_range(10.0..25.0),
                rng.random_range(20.0..80.0),
                rng.random_range(10.0..25.0),
            );
            let x = city_x(rng);
            let z = -rng.random::<f32>() * 800.0 - 100.0;
            let node = scene.spawn_mesh(
                None,
                Transform::at(Vec3::new(x, -5.0, z)).scaled(size),
                block,
                body,
            );
            let outline = if rng.random_bool(0.5) { purple } else { blue };
            let _ = scene.spawn_mesh(
                Some(node),
                Transform::default(),
                edges,
                outline,
            );
            node
        })
        .collect()
}

fn spawn_palms(
    scene: &mut Scene,
    palette: &PaletteOptions,
    world: &WorldOptions,
) -> Vec<NodeId> {
    let trunk = scene.add_mesh(cylinder(0.3, 0.5, 1.5, 6));
    let bark = scene.add_material(Material::basic(rgb(palette.neon_purple)));
    let leaves: Vec<MeshId> = (0..6)
        .map(|k| {
            let (sin, cos) = (k as f32).sin_cos();
            let curve = quadratic_bezier(
                Vec3::new(0.0, 9.0, 0.0),
                Vec3::new(cos * 3.0, 11.0, sin * 3.0),
                Vec3::new(cos * 6.0, 6.0, sin * 6.0),
                10,
            );
            scene.add_mesh(polyline(&curve))
        })
        .collect();
    let frond = scene.add_material(Material::basic(rgb(palette.neon_cyan)));

    let x = world.road_width * 0.5 + 8.0;
    (0..world.palm_count * 2)
        .map(|i| {
            let side = if i % 2 == 0 { 1.0 } else { -1.0 };
            let z = -(i as f32) * PALM_SPACING;
            let palm = scene
                .spawn_group(None, Transform::at(Vec3::new(side * x, -2.0, z)));
            for j in 0..8 {
                let _ = scene.spawn_mesh(
                    Some(palm),
                    Transform::at(Vec3::Y * (j as f32 * 1.2))
                        .rotated(Vec3::new(0.0, 0.0, (j as f32).sin() * 0.1)),
                    trunk,
                    bark,
                );
            }
            for &leaf in &leaves {
                let _ = scene.spawn_mesh(
                    Some(palm),
                    Transform::default(),
                    leaf,
                    frond,
                );
            }
            palm
        })
        .collect()
}

fn spawn_arches(
    scene: &mut Scene,
    palette: &PaletteOptions,
    count: usize,
) -> Vec<NodeId> {
    let ring = scene.add_mesh(torus(55.0, 0.8, 8, 50, PI));
    let neon = scene.add_material(Material::basic(rgb(palette.neon_cyan)));
    (0..count)
        .map(|i| {
            scene.spawn_mesh(
                None,
                Transform::at(Vec3::new(0.0, -5.0, -(i as f32) * ARCH_SPACING)),
                ring,
                neon,
            )
        })
        .collect()
}

fn spawn_station(
    scene: &mut Scene,
    palette: &PaletteOptions,
) -> (NodeId, NodeId, MaterialId) {
    let station =
        scene.spawn_group(None, Transform::at(Vec3::new(0.0, -5.0, -900.0)));

    let monolith = scene.add_mesh(cuboid(60.0, 100.0, 20.0));
    let stone = scene.add_material(Material::basic(rgb(0x05_05_05)));
    let _ = scene.spawn_mesh(
        Some(station),
        Transform::at(Vec3::new(0.0, 50.0, 0.0)),
        monolith,
        stone,
    );

    let core = scene.add_mesh(cuboid(10.0, 120.0, 5.0));
    let glow = scene.add_material(Material::basic(rgb(palette.neon_blue)));
    let _ = scene.spawn_mesh(
        Some(station),
        Transform::at(Vec3::new(0.0, 50.0, 10.0)),
        core,
        glow,
    );

    let shaft = scene.add_mesh(cylinder(4.0, 4.0, 1000.0, 16));
    let beam_material =
        scene.add_material(Material::basic([1.0; 3]).translucent(0.0));
    let beam = scene.spawn_mesh(
        Some(station),
        Transform::at(Vec3::new(0.0, 500.0, 0.0)),
        shaft,
        beam_material,
    );
    (station, beam, beam_material)
}

fn spawn_stars<R: Rng + ?Sized>(
    scene: &mut Scene,
    count: usize,
    rng: &mut R,
) -> NodeId {
    let positions: Vec<Vec3> = (0..count)
        .map(|_| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * 2000.0,
                rng.random::<f32>() * 1000.0 + 200.0,
                -rng.random::<f32>() * 2000.0,
            )
        })
        .collect();
    let cloud = scene.add_mesh(points(&positions));
    let material =
        scene.add_material(Material::points([1.0; 3], 2.0).translucent(0.8));
    scene.spawn_mesh(None, Transform::default(), cloud, material)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn build(options: &Options) -> (Scene, SceneHandles) {
        build_scene(options, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn decorative_counts_follow_options() {
        let options = Options::default();
        let (_, handles) = build(&options);
        assert_eq!(handles.palms.len(), options.world.palm_count * 2);
        assert_eq!(handles.arches.len(), options.world.arch_count);
        assert_eq!(handles.city_blocks.len(), options.world.city_block_count);
    }

    #[test]
    fn custom_counts_are_respected() {
        let mut options = Options::default();
        options.world.palm_count = 3;
        options.world.arch_count = 0;
        options.world.city_block_count = 5;
        let (_, handles) = build(&options);
        assert_eq!(handles.palms.len(), 6);
        assert!(handles.arches.is_empty());
        assert_eq!(handles.city_blocks.len(), 5);
    }

    #[test]
    fn city_blocks_avoid_the_road() {
        let (scene, handles) = build(&Options::default());
        for &block in &handles.city_blocks {
            let t = scene.node(block).unwrap().transform;
            assert!(t.position.x.abs() >= 40.0);
            assert!(t.position.z <= -100.0 && t.position.z > -900.0);
            assert!((10.0..25.0).contains(&t.scale.x));
            assert!((20.0..80.0).contains(&t.scale.y));
            assert_eq!(scene.count_meshes(block), 2);
        }
    }

    #[test]
    fn palms_alternate_sides() {
        let options = Options::default();
        let (scene, handles) = build(&options);
        let expected = options.world.road_width * 0.5 + 8.0;
        for (i, &palm) in handles.palms.iter().enumerate() {
            let p = scene.node(palm).unwrap().transform.position;
            let side = if i % 2 == 0 { 1.0 } else { -1.0 };
            assert_eq!(p.x, side * expected);
            assert_eq!(p.z, -(i as f32) * PALM_SPACING);
            // 8 trunk segments + 6 leaves
            assert_eq!(scene.children(palm).len(), 14);
        }
    }

    #[test]
    fn beam_starts_invisible() {
        let (scene, handles) = build(&Options::default());
        let beam = scene.material(handles.beam_material).unwrap();
        assert_eq!(beam.opacity, 0.0);
        assert!(beam.is_invisible());
        let top = scene.world_matrix(handles.beam).transform_point3(Vec3::ZERO);
        assert_eq!(top, Vec3::new(0.0, 495.0, -900.0));
    }

    #[test]
    fn stars_fill_the_sky() {
        let (scene, handles) = build(&Options::default());
        let kind = scene.node(handles.stars).unwrap().kind;
        let NodeKind::Mesh { mesh, .. } = kind else {
            return;
        };
        let cloud = scene.mesh(mesh).unwrap();
        assert_eq!(cloud.vertex_count(), 2000);
        for v in &cloud.vertices {
            let p = v.pos();
            assert!((-1000.0..1000.0).contains(&p.x));
            assert!((200.0..1200.0).contains(&p.y));
            assert!(p.z <= 0.0 && p.z > -2000.0);
        }
    }

    #[test]
    fn same_seed_same_city() {
        let options = Options::default();
        let (a, ha) = build(&options);
        let (b, hb) = build(&options);
        for (x, y) in ha.city_blocks.iter().zip(&hb.city_blocks) {
            assert_eq!(
                a.node(*x).unwrap().transform,
                b.node(*y).unwrap().transform
            );
        }
    }

    #[test]
    fn lights_are_in_place() {
        let (scene, _) = build(&Options::default());
        // ambient, directional, cyan car light, red tail light
        assert_eq!(scene.lights().len(), 4);
    }
}
