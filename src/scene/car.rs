use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Vec2, Vec3};

use super::{Light, Material, NodeId, NodeKind, Scene, Transform};
use crate::geometry::extrude::extrude;
use crate::geometry::primitives::{cuboid, cylinder, quad, torus};
use crate::options::{rgb, PaletteOptions};

/// Side profile of the car body: X is length (nose at +X), Y is height.
const BODY_PROFILE: [(f32, f32); 15] = [
    (0.0, 0.5),
    (0.0, 1.8),
    (1.5, 2.6),
    (4.5, 2.6),
    (7.5, 1.4),
    (9.0, 1.0),
    (9.0, 0.5),
    (8.0, 0.2),
    (6.5, 0.2),
    (6.5, 0.5),
    (2.5, 0.5),
    (2.5, 0.2),
    (1.0, 0.2),
    (1.0, 0.5),
    (0.0, 0.5),
];

const BODY_WIDTH: f32 = 3.8;

/// Wheel hub positions relative to the car origin (nose towards -Z).
const WHEELS: [Vec3; 4] = [
    Vec3::new(-2.2, 0.8, 2.0),
    Vec3::new(2.2, 0.8, 2.0),
    Vec3::new(-2.2, 0.8, -2.0),
    Vec3::new(2.2, 0.8, -2.0),
];

/// Build the car group at `position` and return its root node.
pub(super) fn spawn_car(
    scene: &mut Scene,
    palette: &PaletteOptions,
    position: Vec3,
) -> NodeId {
    let cyan = rgb(palette.neon_cyan);
    let car = scene.spawn_group(None, Transform::at(position));

    // Body: extruded wedge, centered, turned so the nose faces -Z.
    let profile: Vec<Vec2> = BODY_PROFILE
        .iter()
        .map(|&(x, y)| Vec2::new(x, y))
        .collect();
    let body_mesh = scene.add_mesh(extrude(&profile, BODY_WIDTH).centered());
    let body_mat =
        scene.add_material(Material::standard(rgb(0x88_88_88), 1.0, 0.2));
    let _ = scene.spawn_mesh(
        Some(car),
        Transform::default().rotated(Vec3::new(0.0, FRAC_PI_2, 0.0)),
        body_mesh,
        body_mat,
    );

    let glass_mesh = scene.add_mesh(cuboid(3.2, 1.0, 2.5));
    let glass_mat = scene.add_material(Material::phong([0.0; 3], 150.0));
    let _ = scene.spawn_mesh(
        Some(car),
        Transform::at(Vec3::new(0.0, 2.1, 0.5)),
        glass_mesh,
        glass_mat,
    );

    // Wheels with neon rims on the outer faces.
    let wheel_mesh =
        scene.add_mesh(cylinder(0.8, 0.8, 0.6, 32).rotated_z(FRAC_PI_2));
    let wheel_mat =
        scene.add_material(Material::standard(rgb(0x11_11_11), 0.0, 1.0));
    let rim_mesh = scene.add_mesh(torus(0.5, 0.05, 8, 32, TAU));
    let rim_mat = scene.add_material(Material::basic(cyan));
    for hub in WHEELS {
        let _ = scene.spawn_mesh(
            Some(car),
            Transform::at(hub),
            wheel_mesh,
            wheel_mat,
        );
        let outward = if hub.x > 0.0 { 0.31 } else { -0.31 };
        let _ = scene.spawn_mesh(
            Some(car),
            Transform::at(hub + Vec3::X * outward)
                .rotated(Vec3::new(0.0, FRAC_PI_2, 0.0)),
            rim_mesh,
            rim_mat,
        );
    }

    let tail_mesh = scene.add_mesh(cuboid(3.6, 0.4, 0.1));
    let tail_mat = scene.add_material(Material::basic([1.0, 0.0, 0.0]));
    let _ = scene.spawn_mesh(
        Some(car),
        Transform::at(Vec3::new(0.0, 1.5, 4.5)),
        tail_mesh,
        tail_mat,
    );
    let _ = scene.spawn(
        Some(car),
        Transform::at(Vec3::new(0.0, 1.5, 5.0)),
        NodeKind::Light(Light::Point {
            color: [1.0, 0.0, 0.0],
            intensity: 1.0,
            range: 10.0,
        }),
    );

    let glow_mesh = scene.add_mesh(quad(Vec2::new(3.5, 8.5)));
    let glow_mat = scene.add_material(Material::basic(cyan).translucent(0.4));
    let _ = scene.spawn_mesh(
        Some(car),
        Transform::at(Vec3::new(0.0, 0.2, 0.0))
            .rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
        glow_mesh,
        glow_mat,
    );

    car
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Fog;

    fn built() -> (Scene, NodeId) {
        let mut scene = Scene::new(Fog {
            color: [0.0; 3],
            density: 0.0,
        });
        let car = spawn_car(
            &mut scene,
            &PaletteOptions::default(),
            Vec3::new(0.0, 0.0, 15.0),
        );
        (scene, car)
    }

    #[test]
    fn car_has_every_part() {
        let (scene, car) = built();
        // body + glass + 4 wheels + 4 rims + tail strip + underglow
        assert_eq!(scene.count_meshes(car), 12);
        assert_eq!(scene.lights().len(), 1);
    }

    #[test]
    fn body_is_centered_with_nose_forward() {
        let (scene, car) = built();
        let body = scene.children(car)[0];
        let world = scene.world_matrix(body);
        let mesh = match scene.node(body).unwrap().kind {
            NodeKind::Mesh { mesh, .. } => Some(mesh),
            _ => None,
        }
        .unwrap();
        let (lo, hi) = scene.mesh(mesh).unwrap().bounds().unwrap();
        let a = world.transform_point3(lo);
        let b = world.transform_point3(hi);
        // Length (9) now runs along Z, width (3.8) along X, around z = 15.
        assert!(((a.z - b.z).abs() - 9.0).abs() < 1e-4);
        assert!(((a.x - b.x).abs() - BODY_WIDTH).abs() < 1e-4);
        assert!(((a.z + b.z) * 0.5 - 15.0).abs() < 1e-4);
    }
}
