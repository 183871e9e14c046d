// ============================================
// Sampler Params - Параметры генерации высот
// ============================================

use serde::{Deserialize, Serialize};

/// Параметры сэмплера высот
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerParams {
    /// Масштаб базовой высоты карты
    pub base_height_scale: f32,
    pub max_noise_map_scale: f32,
    pub default_noise_map_scale: f32,
    /// Амплитуда extra noise на краях тайла (не зависит от климата)
    pub default_extra_noise_scale: f32,
    pub max_height_exaggeration: f32,
    pub ocean_elevation: f32,
    pub beach_elevation: f32,
    /// Пиксели с высотой <= порога считаются водой
    pub water_threshold: u8,
    /// Расстояние (в пикселях карты), на котором шум нарастает от берега
    pub coast_ramp_distance: f32,
    /// Размер стороны карты высот тайла
    pub heightmap_dimension: usize,
}

impl SamplerParams {
    /// Максимальная высота terrain, делитель нормализации
    pub fn max_terrain_height(&self) -> f32 {
        self.max_height_exaggeration * self.base_height_scale * 128.0
            + self.max_noise_map_scale * 128.0
            + 128.0
    }

    /// Нижняя граница нормализованной высоты
    pub fn min_normalized_height(&self) -> f32 {
        (self.ocean_elevation / self.max_terrain_height()).clamp(0.0, 1.0)
    }
}

impl Default for SamplerParams {
    fn default() -> Self {
        let base_height_scale = 8.0;
        Self {
            base_height_scale,
            max_noise_map_scale: 15.0,
            default_noise_map_scale: 15.0,
            default_extra_noise_scale: 3.0,
            max_height_exaggeration: 25.0,
            ocean_elevation: 3.4 * base_height_scale,
            beach_elevation: 5.0 * base_height_scale,
            water_threshold: 2,
            coast_ramp_distance: 5.0,
            heightmap_dimension: 129,
        }
    }
}
