// ============================================
// Water Distance - Поле расстояния до воды
// ============================================
//
// Предрасчитанное поле: для каждого пикселя карты расстояние (в пикселях,
// 8-связность) до ближайшего пикселя воды. Используется для плавного
// нарастания шума от береговой линии.

use std::collections::VecDeque;

use super::coords::{MapPixel, WorldExtent};
use super::providers::{WaterDistanceProvider, WorldHeightProvider};

/// Поле расстояний до воды
pub struct WaterDistanceField {
    extent: WorldExtent,
    distances: Vec<f32>,
}

impl WaterDistanceField {
    /// Multi-source BFS от всех пикселей воды
    pub fn compute<F>(extent: WorldExtent, is_water: F) -> Self
    where
        F: Fn(MapPixel) -> bool,
    {
        let mut distances = vec![f32::MAX; extent.pixel_count()];
        let mut queue: VecDeque<(MapPixel, f32)> = VecDeque::new();

        for p in extent.pixels() {
            if is_water(p) {
                distances[extent.index(p)] = 0.0;
                queue.push_back((p, 0.0));
            }
        }

        while let Some((p, dist)) = queue.pop_front() {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let n = p.offset(dx, dy);
                    if !extent.contains(n) {
                        continue;
                    }
                    let new_dist = dist + 1.0;
                    let idx = extent.index(n);
                    if new_dist < distances[idx] {
                        distances[idx] = new_dist;
                        queue.push_back((n, new_dist));
                    }
                }
            }
        }

        Self { extent, distances }
    }

    /// Поле по карте высот: вода там, где высота <= порога
    pub fn from_heights(heights: &dyn WorldHeightProvider, water_threshold: u8) -> Self {
        Self::compute(heights.extent(), |p| heights.height(p) <= water_threshold)
    }

    pub fn extent(&self) -> WorldExtent {
        self.extent
    }
}

impl WaterDistanceProvider for WaterDistanceField {
    #[inline]
    fn water_distance(&self, p: MapPixel) -> f32 {
        self.distances[self.extent.index(p)]
    }
}
