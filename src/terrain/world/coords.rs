// ============================================
// Map Pixel - Координаты карты мира
// ============================================

use serde::{Deserialize, Serialize};

/// Координата пикселя карты мира
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct MapPixel {
    pub x: i32,
    pub y: i32,
}

impl MapPixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Chebyshev-расстояние до другого пикселя
    #[inline]
    pub fn chebyshev(&self, other: MapPixel) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Ключ terrain: (y << 16) + x
    #[inline]
    pub fn key(&self) -> TerrainKey {
        TerrainKey::new(self.x, self.y)
    }
}

/// Ключ тайла terrain, также сид для детерминированного ГПСЧ тайла
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TerrainKey(pub i32);

impl TerrainKey {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self((y << 16) + x)
    }

    /// Сид для расстановки растительности
    #[inline]
    pub fn seed(&self) -> u64 {
        self.0 as u32 as u64
    }
}

/// Размер карты мира в пикселях
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WorldExtent {
    pub width: i32,
    pub height: i32,
}

impl WorldExtent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, p: MapPixel) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Прижать координату к ближайшему валидному пикселю (без заворачивания)
    #[inline]
    pub fn clamp(&self, p: MapPixel) -> MapPixel {
        MapPixel {
            x: p.x.clamp(0, (self.width - 1).max(0)),
            y: p.y.clamp(0, (self.height - 1).max(0)),
        }
    }

    /// Линейный индекс (строка за строкой), координата прижимается
    #[inline]
    pub fn index(&self, p: MapPixel) -> usize {
        let p = self.clamp(p);
        p.y as usize * self.width as usize + p.x as usize
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Все пиксели мира, строка за строкой
    pub fn pixels(&self) -> impl Iterator<Item = MapPixel> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| MapPixel::new(x, y)))
    }
}

impl Default for WorldExtent {
    fn default() -> Self {
        // Размер карты мира по умолчанию
        Self::new(1000, 500)
    }
}
