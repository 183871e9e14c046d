// ============================================
// World Height Sampler - Синтез высот по карте мира
// ============================================
//
// Чистая функция: пиксель карты -> нормализованные высоты [0, 1].
// Для каждого сэмпла тайла:
// 1. Окрестность 4×4 пикселей вокруг тайла (база, шум, маска суши,
//    климат, нарастание от берега)
// 2. Бикубическая интерполяция окрестности
// 3. Сумма базы, карты шума и extra noise
// 4. Прижатие к уровню океана и нормализация

use ndshape::{RuntimeShape, Shape};

use crate::terrain::error::TerrainError;
use crate::terrain::world::{ClimateTable, MapPixel, WorldExtent, WorldServices};

use super::interpolate::bicubic;
use super::params::SamplerParams;

// Параметры extra noise: две октавы разной частоты перемножаются
const EXTRA_LOW_FREQUENCY: f32 = 0.3;
const EXTRA_HIGH_FREQUENCY: f32 = 0.9;
const EXTRA_AMPLITUDE: f32 = 0.5;
const EXTRA_PERSISTENCE: f32 = 0.5;
const EXTRA_OCTAVES: u32 = 1;

/// Окрестность 4×4 вокруг пикселя тайла. Ячейка (i, j) - пиксель (mx-1+i, my-1+j).
#[derive(Clone, Debug, Default)]
pub struct Neighborhood {
    pub base: [[f32; 4]; 4],
    pub noise: [[f32; 4]; 4],
    pub land_mask: [[f32; 4]; 4],
    pub climate_scale: [[f32; 4]; 4],
    pub coast_ramp: [[f32; 4]; 4],
}

/// Результат интерполяции окрестности в одной точке
#[derive(Clone, Copy, Debug)]
pub struct InterpolatedInputs {
    pub base: f32,
    pub noise: f32,
    pub land_mask: f32,
    pub climate_scale: f32,
    pub coast_ramp: f32,
}

impl Neighborhood {
    /// Множители идут в сумму как есть, выброс кубики гасит только уровень океана
    pub fn interpolate(&self, fx: f32, fy: f32) -> InterpolatedInputs {
        InterpolatedInputs {
            base: bicubic(&self.base, fx, fy),
            noise: bicubic(&self.noise, fx, fy),
            land_mask: bicubic(&self.land_mask, fx, fy),
            climate_scale: bicubic(&self.climate_scale, fx, fy),
            coast_ramp: bicubic(&self.coast_ramp, fx, fy),
        }
    }
}

/// Подготовленные данные одного тайла (общие для всех потоков)
#[derive(Clone, Debug)]
pub struct TileSampleContext {
    pub pixel: MapPixel,
    pub dimension: usize,
    pub neighborhood: Neighborhood,
    /// Амплитуда extra noise внутри тайла (по климату пикселя тайла)
    pub extra_noise_scale: f32,
    /// Абсолютная координата шума сэмпла (0, 0)
    pub noise_origin: (i32, i32),
}

impl TileSampleContext {
    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        let last = self.dimension - 1;
        x == 0 || y == 0 || x == last || y == last
    }
}

/// Высоты тайла D×D
#[derive(Clone, Debug)]
pub struct TileHeights {
    pub dimension: usize,
    /// Строка за строкой: индекс y * D + x
    pub samples: Vec<f32>,
    pub average_height: f32,
    pub max_height: f32,
}

impl TileHeights {
    /// Собрать высоты и посчитать среднее и максимум
    pub fn from_samples(dimension: usize, samples: Vec<f32>) -> Self {
        let mut sum = 0.0f64;
        let mut max_height = 0.0f32;
        for &h in &samples {
            sum += h as f64;
            max_height = max_height.max(h);
        }
        let average_height = if samples.is_empty() { 0.0 } else { (sum / samples.len() as f64) as f32 };
        Self { dimension, samples, average_height, max_height }
    }

    #[inline]
    pub fn shape(&self) -> RuntimeShape<u32, 2> {
        RuntimeShape::<u32, 2>::new([self.dimension as u32, self.dimension as u32])
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.samples[self.shape().linearize([x as u32, y as u32]) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.shape().linearize([x as u32, y as u32]) as usize;
        self.samples[idx] = value;
    }

    pub fn row(&self, y: usize) -> &[f32] {
        &self.samples[y * self.dimension..(y + 1) * self.dimension]
    }
}

/// Сэмплер высот мира
pub struct WorldHeightSampler {
    services: WorldServices,
    params: SamplerParams,
    climates: ClimateTable,
}

impl WorldHeightSampler {
    /// Данные мира обязаны быть загружены
    pub fn new(
        services: WorldServices,
        params: SamplerParams,
        climates: ClimateTable,
    ) -> Result<Self, TerrainError> {
        if !services.is_ready() {
            return Err(TerrainError::WorldDataNotReady);
        }
        if params.heightmap_dimension < 2 {
            return Err(TerrainError::InvalidDimension(params.heightmap_dimension));
        }
        Ok(Self { services, params, climates })
    }

    pub fn params(&self) -> &SamplerParams {
        &self.params
    }

    pub fn climate_table(&self) -> &ClimateTable {
        &self.climates
    }

    pub fn services(&self) -> &WorldServices {
        &self.services
    }

    pub fn extent(&self) -> WorldExtent {
        self.services.extent()
    }

    /// Размер тайла по умолчанию
    pub fn dimension(&self) -> usize {
        self.params.heightmap_dimension
    }

    /// Собрать окрестность 4×4 (координаты прижимаются к миру)
    pub fn gather_neighborhood(&self, pixel: MapPixel) -> Neighborhood {
        let heights = &self.services.heights;
        let climate = &self.services.climate;
        let water = &self.services.water;
        let ramp_distance = self.params.coast_ramp_distance.max(f32::EPSILON);

        let mut n = Neighborhood::default();
        for j in 0..4 {
            for i in 0..4 {
                let p = pixel.offset(i as i32 - 1, j as i32 - 1);
                let height = heights.height(p);

                n.base[j][i] = height as f32 * heights.height_multiplier(p);
                n.noise[j][i] = heights.noise_map_height(p) as f32;
                n.land_mask[j][i] = if height <= self.params.water_threshold { 0.0 } else { 1.0 };
                n.climate_scale[j][i] = self.climates.noise_map_scale(climate.climate(p));
                n.coast_ramp[j][i] = (water.water_distance(p) / ramp_distance).clamp(0.0, 1.0);
            }
        }
        n
    }

    /// Подготовить контекст тайла
    pub fn tile_context(&self, pixel: MapPixel, dimension: usize) -> Result<TileSampleContext, TerrainError> {
        if dimension < 2 {
            return Err(TerrainError::InvalidDimension(dimension));
        }
        Ok(self.context(pixel, dimension))
    }

    fn context(&self, pixel: MapPixel, dimension: usize) -> TileSampleContext {
        let tile_climate = self.services.climate.climate(pixel);
        let step = dimension as i32 - 1;
        TileSampleContext {
            pixel,
            dimension,
            neighborhood: self.gather_neighborhood(pixel),
            extra_noise_scale: self.climates.extra_noise_scale(tile_climate),
            noise_origin: (pixel.x * step, pixel.y * step),
        }
    }

    /// Высота одного сэмпла тайла, нормализованная
    pub fn sample_at(&self, ctx: &TileSampleContext, x: usize, y: usize) -> f32 {
        let extra_scale = if ctx.is_edge(x, y) {
            self.params.default_extra_noise_scale
        } else {
            ctx.extra_noise_scale
        };
        self.evaluate(ctx, x, y, extra_scale)
    }

    fn evaluate(&self, ctx: &TileSampleContext, x: usize, y: usize, extra_scale: f32) -> f32 {
        let last = (ctx.dimension - 1) as f32;
        let fx = x as f32 / last;
        let fy = y as f32 / last;
        let inputs = ctx.neighborhood.interpolate(fx, fy);

        let nx = ctx.noise_origin.0 + x as i32;
        let ny = ctx.noise_origin.1 + y as i32;
        let noise = &self.services.noise;
        let low = noise.noise(nx, ny, EXTRA_LOW_FREQUENCY, EXTRA_AMPLITUDE, EXTRA_PERSISTENCE, EXTRA_OCTAVES);
        let high = noise.noise(nx, ny, EXTRA_HIGH_FREQUENCY, EXTRA_AMPLITUDE, EXTRA_PERSISTENCE, EXTRA_OCTAVES);

        let scaled = inputs.base * self.params.base_height_scale
            + inputs.noise * inputs.land_mask * inputs.climate_scale * inputs.coast_ramp
            + low * high * extra_scale;

        self.normalize(scaled)
    }

    /// Прижатие к уровню океана и нормализация в [0, 1]
    #[inline]
    pub fn normalize(&self, scaled: f32) -> f32 {
        let clamped = scaled.max(self.params.ocean_elevation);
        (clamped / self.params.max_terrain_height()).clamp(0.0, 1.0)
    }

    /// Заполнить одну строку тайла
    pub fn sample_row(&self, ctx: &TileSampleContext, y: usize, out: &mut [f32]) {
        for (x, value) in out.iter_mut().enumerate().take(ctx.dimension) {
            *value = self.sample_at(ctx, x, y);
        }
    }

    /// Плотный режим: все D×D сэмплы тайла в одном потоке
    pub fn sample_tile(&self, pixel: MapPixel, dimension: usize) -> Result<TileHeights, TerrainError> {
        let ctx = self.tile_context(pixel, dimension)?;
        let mut samples = vec![0.0; dimension * dimension];
        for (y, row) in samples.chunks_mut(dimension).enumerate() {
            self.sample_row(&ctx, y, row);
        }
        Ok(TileHeights::from_samples(dimension, samples))
    }

    /// Одиночный режим: сэмпл (0, 0) тайла пикселя, всегда с extra noise по умолчанию
    pub fn sample_point(&self, pixel: MapPixel) -> f32 {
        let ctx = self.context(pixel, self.params.heightmap_dimension);
        self.evaluate(&ctx, 0, 0, self.params.default_extra_noise_scale)
    }
}
