//! Per-frame animation of the synthwave scene.
//!
//! Everything here is closed-form on `(time, delta)`: wrap-around drift of
//! palms, arches and towers, the ground wave, the car bob, and the beam
//! fade cycle.

mod beam;
mod grid;
mod timer;
mod tween;
mod wrap;

use std::f32::consts::TAU;

pub use beam::{BeamPhase, BeamSequence, BeamTimings};
pub use grid::{beat, grid_height, GridWave, WaveParams};
pub use timer::IntervalTimer;
pub use tween::Tween;
pub use wrap::WrapRange;

use crate::geometry::{MeshData, Topology};
use crate::options::Options;
use crate::scene::builder::{SceneHandles, CAR_POSITION};
use crate::scene::Scene;
use crate::util::noise::Simplex2;

/// Parallax factor of the city layer relative to the road.
const CITY_PARALLAX: f32 = 0.2;
/// Palm yaw rate (rad/s).
const PALM_SPIN: f32 = 0.1;

/// Car bob: vertical offset and roll at `time`.
#[must_use]
pub fn car_bob(time: f32) -> (f32, f32) {
    ((time * 15.0).sin() * 0.03, (time * 2.0).sin() * 0.02)
}

/// Drives every moving part of the scene from the frame clock.
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    speed: f32,
    grid: GridWave,
    beam: BeamSequence,
}

impl SceneAnimator {
    /// Capture the grid rest pose and configure speeds from options.
    #[must_use]
    pub fn new(
        options: &Options,
        scene: &Scene,
        handles: &SceneHandles,
        noise: Simplex2,
    ) -> Self {
        let params = WaveParams::from(options);
        let grid = match scene.mesh(handles.grid_mesh) {
            Some(mesh) => GridWave::new(mesh, noise, params),
            None => {
                log::warn!("grid mesh missing, ground wave disabled");
                GridWave::new(&MeshData::new(Topology::Lines), noise, params)
            }
        };
        Self {
            speed: options.world.speed,
            grid,
            beam: BeamSequence::new(BeamTimings::from(&options.effects)),
        }
    }

    /// Start a beam cycle (safe to call at any time).
    pub fn fire_beam(&mut self) {
        self.beam.trigger();
    }

    /// Beam state machine.
    #[must_use]
    pub fn beam(&self) -> &BeamSequence {
        &self.beam
    }

    /// Apply one frame: `time` is seconds since start, `delta` the frame
    /// step.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        handles: &SceneHandles,
        time: f32,
        delta: f32,
    ) {
        let step = self.speed * delta;

        for &palm in &handles.palms {
            if let Some(t) = scene.transform_mut(palm) {
                t.position.z = WrapRange::PALMS.advance(t.position.z, step);
                t.rotation.y =
                    (t.rotation.y + delta * PALM_SPIN).rem_euclid(TAU);
            }
        }
        for &arch in &handles.arches {
            if let Some(t) = scene.transform_mut(arch) {
                t.position.z = WrapRange::ARCHES.advance(t.position.z, step);
            }
        }
        for &block in &handles.city_blocks {
            if let Some(t) = scene.transform_mut(block) {
                t.position.z = WrapRange::CITY
                    .advance(t.position.z, step * CITY_PARALLAX);
            }
        }

        if let Some(mesh) = scene.mesh_mut(handles.grid_mesh) {
            self.grid.apply(mesh, time);
        }

        if let Some(t) = scene.transform_mut(handles.car) {
            let (bob, roll) = car_bob(time);
            t.position.y = CAR_POSITION.y + bob;
            t.rotation.z = roll;
        }

        let opacity = self.beam.update(delta);
        if let Some(material) = scene.material_mut(handles.beam_material) {
            material.opacity = opacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::scene::builder::build_scene;

    fn setup() -> (Scene, SceneHandles, SceneAnimator) {
        let options = Options::default();
        let mut rng = StdRng::seed_from_u64(11);
        let (scene, handles) = build_scene(&options, &mut rng);
        let noise = Simplex2::new(&mut rng);
        let animator = SceneAnimator::new(&options, &scene, &handles, noise);
        (scene, handles, animator)
    }

    fn depths(scene: &Scene, nodes: &[crate::scene::NodeId]) -> Vec<f32> {
        nodes
            .iter()
            .map(|&n| scene.node(n).unwrap().transform.position.z)
            .collect()
    }

    #[test]
    fn depths_stay_within_wrap_bounds() {
        let (mut scene, handles, mut animator) = setup();
        let palms0 = depths(&scene, &handles.palms);
        let arches0 = depths(&scene, &handles.arches);
        let city0 = depths(&scene, &handles.city_blocks);
        let dt = 1.0 / 30.0;
        for frame in 0..3_000 {
            animator.update(&mut scene, &handles, frame as f32 * dt, dt);
            let groups = [
                (WrapRange::PALMS, &handles.palms, &palms0),
                (WrapRange::ARCHES, &handles.arches, &arches0),
                (WrapRange::CITY, &handles.city_blocks, &city0),
            ];
            for (range, nodes, initial) in groups {
                for (z, z0) in depths(&scene, nodes).iter().zip(initial) {
                    assert!(range.contains(*z, *z0));
                }
            }
        }
    }

    #[test]
    fn objects_drift_towards_camera() {
        let (mut scene, handles, mut animator) = setup();
        let before = depths(&scene, &handles.arches);
        animator.update(&mut scene, &handles, 0.1, 0.1);
        let after = depths(&scene, &handles.arches);
        // Arch 0 starts at z = 0 and moves 6 units.
        assert!((after[0] - before[0] - 6.0).abs() < 1e-4);
    }

    #[test]
    fn car_bobs_around_its_rest_height() {
        let (mut scene, handles, mut animator) = setup();
        for frame in 0..120 {
            let t = frame as f32 / 60.0;
            animator.update(&mut scene, &handles, t, 1.0 / 60.0);
            let car = scene.node(handles.car).unwrap().transform;
            assert!(car.position.y.abs() <= 0.03 + 1e-6);
            assert!(car.rotation.z.abs() <= 0.02 + 1e-6);
            assert_eq!(car.position.z, CAR_POSITION.z);
        }
    }

    #[test]
    fn firing_beam_reaches_material() {
        let (mut scene, handles, mut animator) = setup();
        animator.fire_beam();
        animator.fire_beam();
        animator.update(&mut scene, &handles, 1.0, 1.0);
        let beam = scene.material(handles.beam_material).unwrap();
        assert_eq!(beam.opacity, 1.0);
        assert!(!beam.is_invisible());
    }

    #[test]
    fn grid_is_rewritten_each_frame() {
        let (mut scene, handles, mut animator) = setup();
        let v0 = scene.mesh_version(handles.grid_mesh);
        animator.update(&mut scene, &handles, 0.5, 0.016);
        assert_eq!(scene.mesh_version(handles.grid_mesh), v0 + 1);
    }
}
