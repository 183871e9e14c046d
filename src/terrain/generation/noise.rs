// ============================================
// Noise Functions - Шумовые функции для генерации
// ============================================
// Value noise на целочисленной решётке с сидом мира.
// Используется для мелких неровностей (extra noise) поверх карты высот.

use crate::terrain::world::NoiseFunction;

use super::interpolate::bilinear;

/// Hash3D точки решётки, значение в диапазоне 0.0..1.0
#[inline(always)]
pub fn hash3d(x: i32, y: i32, z: i32) -> f32 {
    let n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(z.wrapping_mul(1274126177));
    let n = (n ^ (n >> 13)).wrapping_mul(1911520717);
    ((n as u32) as f32) / (u32::MAX as f32)
}

/// Плоский срез решётки: сид мира стоит на оси z
#[inline(always)]
pub fn hash2d(x: i32, y: i32, seed: i32) -> f32 {
    hash3d(x, y, seed)
}

#[inline(always)]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Целая часть и сглаженная дробная
#[inline(always)]
fn lattice(v: f32) -> (i32, f32) {
    let floor = v.floor();
    (floor as i32, smoothstep(v - floor))
}

/// 2D Value Noise на срезе сида, 0.0..1.0
#[inline]
pub fn noise2d(x: f32, y: f32, seed: i32) -> f32 {
    let (xi, xf) = lattice(x);
    let (yi, yf) = lattice(y);
    let corner = |dx: i32, dy: i32| hash2d(xi + dx, yi + dy, seed);
    bilinear(corner(0, 0), corner(1, 0), corner(0, 1), corner(1, 1), xf, yf)
}

/// Когерентный шум мира с октавами
#[derive(Clone, Copy, Debug, Default)]
pub struct LatticeNoise {
    seed: i32,
}

impl LatticeNoise {
    pub fn new(seed: u32) -> Self {
        Self { seed: seed as i32 }
    }

    pub fn seed(&self) -> u32 {
        self.seed as u32
    }
}

impl NoiseFunction for LatticeNoise {
    /// Сумма октав в диапазоне [-1, 1]
    fn noise(
        &self,
        x: i32,
        y: i32,
        frequency: f32,
        amplitude: f32,
        persistence: f32,
        octaves: u32,
    ) -> f32 {
        let mut value = 0.0;
        let mut amp = amplitude;
        let mut freq = frequency;

        for _ in 0..octaves.max(1) {
            let n = noise2d(x as f32 * freq, y as f32 * freq, self.seed);
            value += (n * 2.0 - 1.0) * amp;
            amp *= persistence;
            freq *= 2.0;
        }

        value.clamp(-1.0, 1.0)
    }
}
