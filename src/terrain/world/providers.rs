// ============================================
// World Providers - Интерфейсы данных мира
// ============================================
//
// Все данные мира приходят через эти трейты и внедряются при создании
// сэмплера и менеджера кольца. Реализации обязаны прижимать координаты
// к границам мира.

use std::sync::Arc;

use super::climate::ClimateIndex;
use super::coords::{MapPixel, WorldExtent};

/// Грубая карта высот мира (байт на пиксель)
pub trait WorldHeightProvider: Send + Sync {
    fn extent(&self) -> WorldExtent;

    /// Готовы ли данные (до загрузки мира - false)
    fn is_ready(&self) -> bool {
        true
    }

    /// Высота пикселя карты
    fn height(&self, p: MapPixel) -> u8;

    /// Значение крупномасштабной карты шума
    fn noise_map_height(&self, p: MapPixel) -> u8;

    /// Множитель высоты пикселя (усиление рельефа)
    fn height_multiplier(&self, _p: MapPixel) -> f32 {
        1.0
    }
}

/// Климатическая классификация пикселей
pub trait ClimateProvider: Send + Sync {
    fn climate(&self, p: MapPixel) -> ClimateIndex;
}

/// Расстояние до ближайшей воды в пикселях карты
pub trait WaterDistanceProvider: Send + Sync {
    fn water_distance(&self, p: MapPixel) -> f32;
}

/// Детерминированный когерентный шум на целочисленной решётке
pub trait NoiseFunction: Send + Sync {
    fn noise(
        &self,
        x: i32,
        y: i32,
        frequency: f32,
        amplitude: f32,
        persistence: f32,
        octaves: u32,
    ) -> f32;
}

/// Данные для info-буфера шейдера (растительность, метки локаций)
pub trait WorldFeatureProvider: Send + Sync {
    fn tree_coverage(&self, _p: MapPixel) -> u8 {
        0
    }

    /// Диапазон локации по x и y
    fn location_range(&self, _p: MapPixel) -> [u8; 2] {
        [0, 0]
    }
}

/// Провайдер без растительности и локаций
pub struct NoFeatures;

impl WorldFeatureProvider for NoFeatures {}

/// Набор внедряемых сервисов мира
#[derive(Clone)]
pub struct WorldServices {
    pub heights: Arc<dyn WorldHeightProvider>,
    pub climate: Arc<dyn ClimateProvider>,
    pub water: Arc<dyn WaterDistanceProvider>,
    pub noise: Arc<dyn NoiseFunction>,
    pub features: Arc<dyn WorldFeatureProvider>,
}

impl WorldServices {
    pub fn new(
        heights: Arc<dyn WorldHeightProvider>,
        climate: Arc<dyn ClimateProvider>,
        water: Arc<dyn WaterDistanceProvider>,
        noise: Arc<dyn NoiseFunction>,
    ) -> Self {
        Self {
            heights,
            climate,
            water,
            noise,
            features: Arc::new(NoFeatures),
        }
    }

    pub fn with_features(mut self, features: Arc<dyn WorldFeatureProvider>) -> Self {
        self.features = features;
        self
    }

    #[inline]
    pub fn extent(&self) -> WorldExtent {
        self.heights.extent()
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.heights.is_ready()
    }
}
