//! One-dimensional Perlin noise.

use rand::Rng;
use rand::seq::SliceRandom;

/// Seeded 1-D gradient noise field
///
/// Samples are smooth in the coordinate, zero at integer coordinates and
/// bounded to [-0.5, 0.5].
#[derive(Clone)]
pub struct PerlinField {
    /// Permutation table (256 values, doubled for wrapping).
    perm: [u8; 512],
}

impl PerlinField {
    /// Build a field with a permutation table shuffled by `rng`
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut source: Vec<u8> = (0..=255).collect();
        source.shuffle(rng);

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&source);
        perm[256..].copy_from_slice(&source);

        Self { perm }
    }

    #[inline]
    fn grad(&self, cell: i64, offset: f32) -> f32 {
        let hash = self.perm[(cell & 255) as usize];
        if hash & 1 == 0 { offset } else { -offset }
    }

    pub fn sample(&self, x: f32) -> f32 {
        if !x.is_finite() {
            return 0.0;
        }

        let x0 = x.floor();
        // only the low 8 bits select a gradient
        let cell = x0.rem_euclid(256.0) as i64;
        let fx = x - x0;

        let n0 = self.grad(cell, fx);
        let n1 = self.grad(cell + 1, fx - 1.0);

        lerp(n0, n1, quintic(fx))
    }
}

/// Quintic interpolation (smoother than smoothstep).
#[inline]
fn quintic(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
