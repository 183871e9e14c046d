// ============================================
// Parallel Heightfield - Параллельный расчёт тайла
// ============================================
//
// Поток k считает строки k, k+N, k+2N, ... Входные данные общие и только
// для чтения, записи в выходной буфер не пересекаются. Конец rayon::scope
// служит барьером перед подсчётом среднего и максимума.

use crate::terrain::error::TerrainError;
use crate::terrain::world::MapPixel;

use super::sampler::{TileHeights, WorldHeightSampler};

/// Расчёт высот тайла в N потоках
#[derive(Clone, Copy, Debug)]
pub struct ParallelHeightfield {
    /// 0 - по размеру пула rayon
    workers: usize,
}

impl ParallelHeightfield {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Фактическое число потоков для тайла D×D, в пределах [1, D]
    pub fn worker_count(&self, dimension: usize) -> usize {
        let requested = if self.workers == 0 {
            rayon::current_num_threads()
        } else {
            self.workers
        };
        requested.clamp(1, dimension.max(1))
    }

    /// Поток, которому принадлежит строка
    #[inline]
    pub fn worker_for_row(row: usize, workers: usize) -> usize {
        row % workers.max(1)
    }

    /// Блокирующий расчёт всех D×D сэмплов
    pub fn compute(
        &self,
        sampler: &WorldHeightSampler,
        pixel: MapPixel,
        dimension: usize,
    ) -> Result<TileHeights, TerrainError> {
        let ctx = sampler.tile_context(pixel, dimension)?;
        let workers = self.worker_count(dimension);
        let mut samples = vec![0.0f32; dimension * dimension];

        // Раздаём строки по потокам
        let mut buckets: Vec<Vec<(usize, &mut [f32])>> = (0..workers).map(|_| Vec::new()).collect();
        for (y, row) in samples.chunks_mut(dimension).enumerate() {
            buckets[Self::worker_for_row(y, workers)].push((y, row));
        }

        let ctx = &ctx;
        rayon::scope(|s| {
            for bucket in buckets {
                s.spawn(move |_| {
                    for (y, row) in bucket {
                        sampler.sample_row(ctx, y, row);
                    }
                });
            }
        });

        Ok(TileHeights::from_samples(dimension, samples))
    }
}

impl Default for ParallelHeightfield {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::test_support::test_sampler;
    use crate::terrain::world::ClimateIndex;

    #[test]
    fn test_worker_count_clamped() {
        assert_eq!(ParallelHeightfield::new(4).worker_count(129), 4);
        assert_eq!(ParallelHeightfield::new(500).worker_count(17), 17);
        assert!(ParallelHeightfield::new(0).worker_count(129) >= 1);
        assert_eq!(ParallelHeightfield::new(3).worker_count(0), 1);
    }

    #[test]
    fn test_rows_interleaved() {
        let owners: Vec<_> = (0..7).map(|row| ParallelHeightfield::worker_for_row(row, 3)).collect();
        assert_eq!(owners, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_same_result_for_any_worker_count() {
        let sampler = test_sampler(33, ClimateIndex::MountainWoods);
        let pixel = MapPixel::new(9, 14);
        let reference = sampler.sample_tile(pixel, 33).unwrap();

        for workers in [0, 1, 2, 3, 7, 33, 100] {
            let tile = ParallelHeightfield::new(workers).compute(&sampler, pixel, 33).unwrap();
            assert_eq!(tile.samples, reference.samples, "workers = {}", workers);
            assert_eq!(tile.average_height, reference.average_height);
            assert_eq!(tile.max_height, reference.max_height);
        }
    }

    #[test]
    fn test_invalid_dimension() {
        let sampler = test_sampler(17, ClimateIndex::Desert);
        let result = ParallelHeightfield::new(2).compute(&sampler, MapPixel::new(1, 1), 1);
        assert!(matches!(result, Err(TerrainError::InvalidDimension(1))));
    }
}
