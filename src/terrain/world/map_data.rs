// ============================================
// World Map Data - Данные карты мира в памяти
// ============================================
// Плотные массивы пикселей карты: высоты, карта шума, климат,
// растительность и метки локаций. Реализует все провайдеры мира.

use std::sync::atomic::{AtomicBool, Ordering};

use super::climate::ClimateIndex;
use super::coords::{MapPixel, WorldExtent};
use super::providers::{ClimateProvider, WorldFeatureProvider, WorldHeightProvider};

/// Карта мира в памяти
pub struct WorldMapData {
    extent: WorldExtent,
    heights: Vec<u8>,
    noise_map: Vec<u8>,
    multipliers: Vec<f32>,
    climates: Vec<ClimateIndex>,
    tree_coverage: Vec<u8>,
    location_ranges: Vec<[u8; 2]>,
    ready: AtomicBool,
}

impl WorldMapData {
    /// Пустой мир: нулевые высоты (вода), климат по умолчанию
    pub fn new(extent: WorldExtent) -> Self {
        let count = extent.pixel_count();
        Self {
            extent,
            heights: vec![0; count],
            noise_map: vec![0; count],
            multipliers: vec![1.0; count],
            climates: vec![ClimateIndex::default(); count],
            tree_coverage: vec![0; count],
            location_ranges: vec![[0, 0]; count],
            ready: AtomicBool::new(true),
        }
    }

    /// Мир с высотами и картой шума из функций
    pub fn from_fn<H, N>(extent: WorldExtent, height: H, noise_map: N) -> Self
    where
        H: Fn(MapPixel) -> u8,
        N: Fn(MapPixel) -> u8,
    {
        let mut data = Self::new(extent);
        for p in extent.pixels() {
            let idx = extent.index(p);
            data.heights[idx] = height(p);
            data.noise_map[idx] = noise_map(p);
        }
        data
    }

    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    /// Пометить данные как (не)готовые - до загрузки мира провайдер не готов
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }

    pub fn set_height(&mut self, p: MapPixel, value: u8) {
        let idx = self.extent.index(p);
        self.heights[idx] = value;
    }

    pub fn set_noise_map_height(&mut self, p: MapPixel, value: u8) {
        let idx = self.extent.index(p);
        self.noise_map[idx] = value;
    }

    pub fn set_height_multiplier(&mut self, p: MapPixel, value: f32) {
        let idx = self.extent.index(p);
        self.multipliers[idx] = value;
    }

    pub fn set_climate(&mut self, p: MapPixel, climate: ClimateIndex) {
        let idx = self.extent.index(p);
        self.climates[idx] = climate;
    }

    /// Залить весь мир одним климатом
    pub fn fill_climate(&mut self, climate: ClimateIndex) {
        self.climates.fill(climate);
    }

    pub fn set_tree_coverage(&mut self, p: MapPixel, value: u8) {
        let idx = self.extent.index(p);
        self.tree_coverage[idx] = value;
    }

    pub fn set_location_range(&mut self, p: MapPixel, range: [u8; 2]) {
        let idx = self.extent.index(p);
        self.location_ranges[idx] = range;
    }
}

impl WorldHeightProvider for WorldMapData {
    fn extent(&self) -> WorldExtent {
        self.extent
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    #[inline]
    fn height(&self, p: MapPixel) -> u8 {
        self.heights[self.extent.index(p)]
    }

    #[inline]
    fn noise_map_height(&self, p: MapPixel) -> u8 {
        self.noise_map[self.extent.index(p)]
    }

    #[inline]
    fn height_multiplier(&self, p: MapPixel) -> f32 {
        self.multipliers[self.extent.index(p)]
    }
}

impl ClimateProvider for WorldMapData {
    #[inline]
    fn climate(&self, p: MapPixel) -> ClimateIndex {
        self.climates[self.extent.index(p)]
    }
}

impl WorldFeatureProvider for WorldMapData {
    fn tree_coverage(&self, p: MapPixel) -> u8 {
        self.tree_coverage[self.extent.index(p)]
    }

    fn location_range(&self, p: MapPixel) -> [u8; 2] {
        self.location_ranges[self.extent.index(p)]
    }
}
