use glam::Vec2;

use crate::geometry::MeshData;
use crate::options::Options;
use crate::util::noise::Simplex2;

/// Shape of the equalizer-style ground wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Half width of the flat band kept under the road.
    pub flat_half_width: f32,
    /// Peak height multiplier.
    pub amplitude: f32,
    /// Angular frequency of the beat pulse (rad/s).
    pub beat_frequency: f32,
}

impl From<&Options> for WaveParams {
    fn from(options: &Options) -> Self {
        Self {
            flat_half_width: options.world.road_width * 0.5
                + options.effects.grid_flat_margin,
            amplitude: options.effects.wave_amplitude,
            beat_frequency: options.effects.beat_frequency,
        }
    }
}

/// Beat envelope in `0.0..=1.0`.
#[must_use]
pub fn beat(time: f32, frequency: f32) -> f32 {
    (time * frequency).sin() * 0.5 + 0.5
}

/// Height of the ground grid at lateral offset `x` and plane depth `depth`.
///
/// `depth` is the plane's own length coordinate, growing away from the
/// camera, so adding time to it scrolls the noise towards the viewer.
/// The band `|x| < flat_half_width` is always exactly zero. Outside it the
/// wave grows linearly with distance from the road and pulses with the beat.
#[must_use]
pub fn grid_height(
    noise: &Simplex2,
    wave: &WaveParams,
    x: f32,
    depth: f32,
    time: f32,
) -> f32 {
    if x.abs() < wave.flat_half_width {
        return 0.0;
    }
    let spread = x.abs() / 50.0;
    let sample = noise.sample(x * 0.02, depth * 0.01 + time * 0.5);
    let pulse = 0.8 + beat(time, wave.beat_frequency) * 0.4;
    sample * wave.amplitude * spread * pulse
}

/// Per-frame displacement of the wireframe grid mesh.
///
/// Keeps the undisplaced `(x, depth)` of every vertex so heights are always
/// computed from the rest pose, never accumulated.
#[derive(Debug, Clone)]
pub struct GridWave {
    rest: Vec<Vec2>,
    noise: Simplex2,
    params: WaveParams,
}

impl GridWave {
    /// Capture the rest pose of a horizontal grid mesh (Y up, length along
    /// -Z).
    #[must_use]
    pub fn new(mesh: &MeshData, noise: Simplex2, params: WaveParams) -> Self {
        let rest = mesh
            .vertices
            .iter()
            .map(|v| Vec2::new(v.position[0], -v.position[2]))
            .collect();
        Self {
            rest,
            noise,
            params,
        }
    }

    /// Write heights for `time` into the mesh's Y coordinates.
    pub fn apply(&self, mesh: &mut MeshData, time: f32) {
        for (vertex, rest) in mesh.vertices.iter_mut().zip(&self.rest) {
            vertex.position[1] =
                grid_height(&self.noise, &self.params, rest.x, rest.y, time);
        }
    }

    /// Number of vertices in the captured rest pose.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len()
    }

    /// Whether the captured rest pose is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::primitives::plane_wireframe;

    fn noise() -> Simplex2 {
        Simplex2::new(&mut StdRng::seed_from_u64(3))
    }

    fn params() -> WaveParams {
        WaveParams::from(&Options::default())
    }

    #[test]
    fn road_band_is_flat() {
        let noise = noise();
        let wave = params();
        assert_eq!(wave.flat_half_width, 17.5);
        for i in 0..200 {
            let t = i as f32 * 0.37;
            for x in [-17.4, -8.0, 0.0, 8.0, 17.4] {
                assert_eq!(grid_height(&noise, &wave, x, t * 13.0, t), 0.0);
            }
        }
    }

    #[test]
    fn height_is_bounded_by_amplitude() {
        let noise = noise();
        let wave = params();
        for i in 0..500 {
            let x = 20.0 + i as f32 * 0.75;
            let h = grid_height(&noise, &wave, x, i as f32, i as f32 * 0.01);
            let bound = wave.amplitude * (x / 50.0) * 1.2;
            assert!(h.abs() <= bound + 1e-3);
        }
    }

    #[test]
    fn waves_appear_off_road() {
        let noise = noise();
        let wave = params();
        let any = (0..100).any(|i| {
            grid_height(&noise, &wave, 200.0, i as f32 * 7.0, 0.3) != 0.0
        });
        assert!(any);
    }

    #[test]
    fn beat_stays_in_unit_range() {
        for i in 0..1000 {
            let b = beat(i as f32 * 0.013, 8.0);
            assert!((0.0..=1.0).contains(&b));
        }
    }

    #[test]
    fn apply_writes_rest_relative_heights() {
        let mut mesh =
            plane_wireframe(800.0, 1000.0, 20, 20).rotated_x(-FRAC_PI_2);
        let wave = GridWave::new(&mesh, noise(), params());
        assert_eq!(wave.len(), mesh.vertex_count());
        wave.apply(&mut mesh, 1.0);
        let heights = |mesh: &MeshData| -> Vec<f32> {
            mesh.vertices.iter().map(|v| v.position[1]).collect()
        };
        let first = heights(&mesh);
        // Applying twice at the same time must not accumulate.
        wave.apply(&mut mesh, 1.0);
        let second = heights(&mesh);
        assert_eq!(first, second);
        for v in &mesh.vertices {
            if v.position[0].abs() < 17.5 {
                assert_eq!(v.position[1], 0.0);
            }
        }
    }
}
