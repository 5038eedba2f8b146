//! Spatially coherent noise for the sea-state field.
//!
//! Classic 2-D gradient (Perlin) noise over a shuffled permutation table,
//! layered as fractal Brownian motion.  A fresh permutation is drawn from the
//! simulation RNG for every field, so consecutive ticks see independent but
//! spatially smooth samples.

use ps_core::SimRng;

/// Shape of a sampled field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// Lattice cells spanned across the unit square.
    pub frequency:   f64,
    /// Number of fBm layers.
    pub octaves:     u32,
    /// Amplitude ratio between successive layers.
    pub persistence: f64,
    /// Frequency ratio between successive layers.
    pub lacunarity:  f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self { frequency: 8.0, octaves: 3, persistence: 0.5, lacunarity: 2.0 }
    }
}

/// Seeded 2-D gradient noise.  Output lies roughly in `[-1, 1]`.
pub struct GradientNoise {
    perm: [u8; 512],
}

impl GradientNoise {
    pub fn new(rng: &mut SimRng) -> Self {
        let mut p: Vec<u8> = (0..=255u8).collect();
        rng.shuffle(&mut p);
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }
        Self { perm }
    }

    /// Single-layer noise at `(x, y)`.  Zero on every lattice point.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let (dx, dy) = (x - xf, y - yf);
        let (u, v) = (fade(dx), fade(dy));

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        let x1 = lerp(grad(aa, dx, dy), grad(ba, dx - 1.0, dy), u);
        let x2 = lerp(grad(ab, dx, dy - 1.0), grad(bb, dx - 1.0, dy - 1.0), u);
        lerp(x1, x2, v)
    }

    /// Fractal sum of `params.octaves` layers, normalized by total amplitude.
    pub fn fbm(&self, x: f64, y: f64, params: &NoiseParams) -> f64 {
        let mut freq = 1.0;
        let mut amp = 1.0;
        let mut total = 0.0;
        let mut norm = 0.0;
        for _ in 0..params.octaves.max(1) {
            total += amp * self.sample(x * freq, y * freq);
            norm += amp;
            freq *= params.lacunarity;
            amp *= params.persistence;
        }
        total / norm
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

/// Sample a `rows × cols` field (row-major) at `(row / rows, col / cols)`
/// scaled by `params.frequency`, then min-max normalize to `[0, 1]`.
///
/// A flat field (every sample equal) normalizes to 0.5 everywhere.
pub fn sample_unit_field(rows: usize, cols: usize, params: &NoiseParams, rng: &mut SimRng) -> Vec<f64> {
    let noise = GradientNoise::new(rng);
    // Random offset keeps the lattice zeros from always landing on the
    // same receptors.
    let ox = rng.uniform(0.0, 256.0);
    let oy = rng.uniform(0.0, 256.0);

    let mut field = Vec::with_capacity(rows * cols);
    for j in 0..rows {
        for i in 0..cols {
            let y = oy + params.frequency * j as f64 / rows as f64;
            let x = ox + params.frequency * i as f64 / cols as f64;
            field.push(noise.fbm(x, y, params));
        }
    }
    normalize(&mut field);
    field
}

/// In-place min-max normalization to `[0, 1]`.
pub fn normalize(values: &mut [f64]) {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if !(span > f64::EPSILON) {
        values.iter_mut().for_each(|v| *v = 0.5);
        return;
    }
    values.iter_mut().for_each(|v| *v = (*v - lo) / span);
}
