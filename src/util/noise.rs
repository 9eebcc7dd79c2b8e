//! Seeded 2D simplex noise.
//!
//! Drives the grid's equalizer displacement. Output is roughly in
//! `[-1, 1]` and continuous, so neighbouring grid vertices move together.

use rand::{seq::SliceRandom, Rng};

/// Simplex gradient directions (edges of a square plus diagonals).
const GRADIENTS: [[f32; 2]; 8] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Skew factor `(sqrt(3) - 1) / 2`.
const F2: f32 = 0.366_025_42;
/// Unskew factor `(3 - sqrt(3)) / 6`.
const G2: f32 = 0.211_324_87;

/// 2D simplex noise over a shuffled permutation table.
#[derive(Debug, Clone)]
pub struct Simplex2 {
    perm: [u8; 512],
}

impl Simplex2 {
    /// Build a noise field from the given RNG.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(rng);
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    fn gradient_index(&self, i: i32, j: i32) -> usize {
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let inner = usize::from(self.perm[jj]);
        usize::from(self.perm[ii + inner]) % GRADIENTS.len()
    }

    fn corner(&self, i: i32, j: i32, x: f32, y: f32) -> f32 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            return 0.0;
        }
        let g = GRADIENTS[self.gradient_index(i, j)];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y)
    }

    /// Sample the field at `(x, y)`.
    #[must_use]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Which of the two triangles of the skewed cell we are in.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = i as i32;
        let jj = j as i32;
        let n0 = self.corner(ii, jj, x0, y0);
        let n1 = self.corner(ii + i1, jj + j1, x1, y1);
        let n2 = self.corner(ii + 1, jj + 1, x2, y2);

        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn field(seed: u64) -> Simplex2 {
        Simplex2::new(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn output_stays_in_unit_range() {
        let noise = field(1);
        for ix in -50..50 {
            for iy in -50..50 {
                let v = noise.sample(ix as f32 * 0.37, iy as f32 * 0.53);
                assert!((-1.0..=1.0).contains(&v), "out of range: {v}");
            }
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = field(42);
        let b = field(42);
        for k in 0..20 {
            let p = k as f32 * 1.3;
            assert_eq!(a.sample(p, -p), b.sample(p, -p));
        }
    }

    #[test]
    fn lattice_origin_is_zero() {
        // Every corner contribution vanishes at integer lattice points of
        // the skewed grid's origin.
        assert_eq!(field(3).sample(0.0, 0.0), 0.0);
    }

    #[test]
    fn field_is_continuous() {
        let noise = field(9);
        let a = noise.sample(10.0, 4.0);
        let b = noise.sample(10.001, 4.0);
        assert!((a - b).abs() < 0.01);
    }

    #[test]
    fn field_is_not_constant() {
        let noise = field(5);
        let samples: Vec<f32> =
            (0..64).map(|k| noise.sample(k as f32 * 0.71, 0.3)).collect();
        let min = samples.iter().copied().fold(f32::INFINITY, f32::min);
        let max = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.2);
    }
}
