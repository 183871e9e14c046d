// ============================================
// Transition Ring Manager - Переходное кольцо тайлов
// ============================================
//
// Кольцо детальных тайлов по периметру квадрата вокруг наблюдателя.
// Проход сверки:
// 1. Сбросить флаги keep
// 2. Оставить слоты с тем же пикселем и теми же границами
// 3. Удалить остальные
// 4. Назначить новые ячейки в первые свободные слоты
// 5. Посчитать высоты и сшивку (параллельно по тайлам)
// Визуал строится по одному тяжёлому шагу за тик, затем пересчёт соседей.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use rayon::prelude::*;

use crate::terrain::distant::{Season, WorldHeights};
use crate::terrain::error::TerrainError;
use crate::terrain::generation::{ParallelHeightfield, WorldHeightSampler};
use crate::terrain::world::{MapPixel, TerrainKey};

use super::blend::blend_tile;
use super::border::{ring_capacity, ring_footprint, RingCell};
use super::materializer::TileMaterializer;
use super::slot::{RingSlot, SlotState, VisualStage};
use super::tile::{TerrainTile, TileNeighbors};

/// Итог прохода сверки
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReconcileReport {
    pub center: MapPixel,
    /// Ячеек в желаемом периметре
    pub desired: usize,
    pub kept: usize,
    pub created: usize,
    pub retired: usize,
}

/// Что сделал один тик менеджера
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RingTick {
    Idle,
    Reconciled(ReconcileReport),
    Materialized { pixel: MapPixel, stage: VisualStage },
    BatchReady { tiles: usize },
    SeasonRefreshed { season: Season, tiles: usize },
}

/// Менеджер переходного кольца
pub struct TransitionRingManager {
    sampler: Arc<WorldHeightSampler>,
    coarse: Arc<WorldHeights>,
    heightfield: ParallelHeightfield,
    render_distance: usize,
    slots: Vec<RingSlot>,
    index: HashMap<TerrainKey, usize>,
    update_running: bool,
    requested: Option<MapPixel>,
    center: Option<MapPixel>,
    visual_queue: VecDeque<usize>,
    season: Season,
    pending_season: Option<Season>,
    last_report: Option<ReconcileReport>,
}

impl TransitionRingManager {
    pub fn new(
        sampler: Arc<WorldHeightSampler>,
        coarse: Arc<WorldHeights>,
        render_distance: usize,
        worker_count: usize,
    ) -> Self {
        let capacity = ring_capacity(render_distance);
        Self::with_capacity(sampler, coarse, render_distance, worker_count, capacity)
    }

    pub(crate) fn with_capacity(
        sampler: Arc<WorldHeightSampler>,
        coarse: Arc<WorldHeights>,
        render_distance: usize,
        worker_count: usize,
        capacity: usize,
    ) -> Self {
        Self {
            sampler,
            coarse,
            heightfield: ParallelHeightfield::new(worker_count),
            render_distance,
            slots: (0..capacity).map(|_| RingSlot::default()).collect(),
            index: HashMap::with_capacity(capacity),
            update_running: false,
            requested: None,
            center: None,
            visual_queue: VecDeque::with_capacity(capacity),
            season: Season::default(),
            pending_season: None,
            last_report: None,
        }
    }

    /// Радиус кольца в пикселях карты
    pub fn radius(&self) -> i32 {
        self.render_distance as i32 + 1
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn render_distance(&self) -> usize {
        self.render_distance
    }

    pub fn is_update_running(&self) -> bool {
        self.update_running
    }

    pub fn center(&self) -> Option<MapPixel> {
        self.center
    }

    pub fn pending_request(&self) -> Option<MapPixel> {
        self.requested
    }

    pub fn last_report(&self) -> Option<ReconcileReport> {
        self.last_report
    }

    /// Текущий сезон, с которым строятся новые тайлы
    pub fn season(&self) -> Season {
        self.season
    }

    /// Дальность грубого меша: на время прохода сжимается на 2
    pub fn coarse_render_distance(&self) -> usize {
        if self.update_running {
            self.render_distance.saturating_sub(2)
        } else {
            self.render_distance
        }
    }

    /// Все активные слоты готовы и прохода нет
    pub fn is_all_ready(&self) -> bool {
        !self.update_running && self.slots.iter().all(|s| s.is_empty() || s.is_ready())
    }

    pub fn slots(&self) -> &[RingSlot] {
        &self.slots
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TerrainTile> {
        self.slots.iter().filter_map(|s| s.tile())
    }

    pub fn tile_at(&self, pixel: MapPixel) -> Option<&TerrainTile> {
        self.index.get(&pixel.key()).and_then(|&idx| self.slots[idx].tile())
    }

    pub fn slot_state(&self, pixel: MapPixel) -> Option<SlotState> {
        self.index.get(&pixel.key()).map(|&idx| self.slots[idx].state())
    }

    /// Пиксели занятых слотов
    pub fn occupied_pixels(&self) -> Vec<MapPixel> {
        self.slots.iter().filter_map(|s| s.pixel()).collect()
    }

    /// Запросить сверку вокруг center. Во время прохода запрос откладывается,
    /// последний запрос побеждает.
    pub fn request_update(&mut self, center: MapPixel) {
        if self.update_running {
            log::debug!("Ring update to {:?} deferred, pass in flight", center);
        }
        self.requested = Some(center);
    }

    /// Сменить сезон. Новые тайлы получают его при загрузке terrain,
    /// уже построенные обновляются отдельным шагом.
    pub fn request_seasonal_refresh(&mut self, season: Season) {
        self.season = season;
        if self.slots.iter().any(|s| s.is_active()) {
            self.pending_season = Some(season);
        }
    }

    /// Один шаг планировщика
    pub fn tick(&mut self, materializer: &mut dyn TileMaterializer) -> Result<RingTick, TerrainError> {
        if self.update_running {
            return Ok(self.advance_visual(materializer));
        }
        if let Some(center) = self.requested.take() {
            return self.begin_pass(center, materializer).map(RingTick::Reconciled);
        }
        if let Some(season) = self.pending_season.take() {
            let tiles = self.apply_seasonal_refresh(season, materializer);
            return Ok(RingTick::SeasonRefreshed { season, tiles });
        }
        Ok(RingTick::Idle)
    }

    /// Сверка вокруг center. Если проход уже идёт, запрос откладывается и
    /// возвращается None.
    pub fn reconcile(
        &mut self,
        center: MapPixel,
        materializer: &mut dyn TileMaterializer,
    ) -> Result<Option<ReconcileReport>, TerrainError> {
        if self.update_running {
            self.request_update(center);
            return Ok(None);
        }
        self.begin_pass(center, materializer).map(Some)
    }

    /// Тикать до полной готовности, вернуть отчёт последней сверки
    pub fn run_to_completion(
        &mut self,
        materializer: &mut dyn TileMaterializer,
    ) -> Result<Option<ReconcileReport>, TerrainError> {
        let mut last = None;
        loop {
            match self.tick(materializer)? {
                RingTick::Idle => return Ok(last),
                RingTick::Reconciled(report) => last = Some(report),
                _ => {}
            }
        }
    }

    fn begin_pass(
        &mut self,
        center: MapPixel,
        materializer: &mut dyn TileMaterializer,
    ) -> Result<ReconcileReport, TerrainError> {
        let footprint = ring_footprint(center, self.radius(), self.sampler.extent());
        let desired: HashMap<TerrainKey, RingCell> =
            footprint.iter().map(|cell| (cell.pixel.key(), *cell)).collect();

        // 1-2. Флаги keep
        let mut kept = 0;
        for slot in &mut self.slots {
            let keep = slot
                .cell()
                .map(|cell| desired.get(&cell.pixel.key()) == Some(&cell))
                .unwrap_or(false);
            slot.set_keep(keep);
            if keep {
                kept += 1;
            }
        }

        // 3. Удаление
        let mut retired = 0;
        for slot in &mut self.slots {
            if slot.is_empty() || slot.keep_for_reuse() {
                continue;
            }
            slot.begin_retire();
            if let Some(key) = slot.key() {
                self.index.remove(&key);
            }
            if let Some(tile) = slot.reset() {
                if let Err(e) = materializer.retire_tile(&tile) {
                    log::error!("Failed to retire ring tile {:?}: {}", tile.pixel, e);
                }
            }
            retired += 1;
        }

        // 4. Назначение слотов
        let mut created: Vec<usize> = Vec::new();
        for cell in &footprint {
            let key = cell.pixel.key();
            if self.index.contains_key(&key) {
                continue;
            }
            let idx = match self.slots.iter().position(|s| s.is_empty()) {
                Some(idx) => idx,
                None => {
                    self.release_slots(&created);
                    log::error!(
                        "Transition ring exhausted: capacity {}, desired {}",
                        self.slots.len(),
                        footprint.len()
                    );
                    return Err(TerrainError::RingCapacityExhausted {
                        capacity: self.slots.len(),
                        desired: footprint.len(),
                    });
                }
            };
            self.slots[idx].assign(*cell);
            self.index.insert(key, idx);
            created.push(idx);
        }

        // 5. Высоты и сшивка, параллельно по тайлам
        let mut jobs = Vec::with_capacity(created.len());
        for &idx in &created {
            self.slots[idx].begin_heights();
            if let Some(cell) = self.slots[idx].cell() {
                jobs.push((idx, cell));
            }
        }

        let sampler = &self.sampler;
        let coarse = &self.coarse;
        let heightfield = self.heightfield;
        let dimension = sampler.dimension();
        let results: Vec<(usize, Result<TerrainTile, TerrainError>)> = jobs
            .par_iter()
            .map(|&(idx, cell)| {
                let tile = heightfield.compute(sampler, cell.pixel, dimension).map(|mut heights| {
                    blend_tile(&mut heights, cell.pixel, cell.border, coarse);
                    TerrainTile::new(cell, heights)
                });
                (idx, tile)
            })
            .collect();

        // Слоты меняются только если все тайлы посчитаны
        let tiles: Result<Vec<(usize, TerrainTile)>, TerrainError> =
            results.into_iter().map(|(idx, tile)| tile.map(|tile| (idx, tile))).collect();
        let tiles = match tiles {
            Ok(tiles) => tiles,
            Err(e) => {
                self.release_slots(&created);
                log::error!("Transition ring pass at {:?} failed: {}", center, e);
                return Err(e);
            }
        };
        for (idx, tile) in tiles {
            self.slots[idx].finish_heights(tile);
            self.visual_queue.push_back(idx);
        }

        self.update_running = true;
        self.center = Some(center);

        let report = ReconcileReport {
            center,
            desired: footprint.len(),
            kept,
            created: created.len(),
            retired,
        };
        log::info!(
            "Transition ring pass at {:?}: kept {}, created {}, retired {}",
            center,
            report.kept,
            report.created,
            report.retired
        );
        self.last_report = Some(report);

        if self.visual_queue.is_empty() {
            self.finish_batch(materializer);
        }
        Ok(report)
    }

    /// Освободить слоты, назначенные в незавершённом проходе
    fn release_slots(&mut self, assigned: &[usize]) {
        for &idx in assigned {
            if let Some(key) = self.slots[idx].key() {
                self.index.remove(&key);
            }
            self.slots[idx].reset();
        }
    }

    /// Один тяжёлый шаг визуала первого тайла в очереди
    fn advance_visual(&mut self, materializer: &mut dyn TileMaterializer) -> RingTick {
        let idx = match self.visual_queue.front() {
            Some(&idx) => idx,
            None => return self.finish_batch(materializer),
        };

        let season = self.season;
        let slot = &mut self.slots[idx];
        let (pixel, stage) = match (slot.tile(), slot.state()) {
            (Some(tile), SlotState::MaterializingVisual(stage)) => {
                let result = match stage {
                    VisualStage::Terrain => materializer.promote_terrain(tile, season),
                    VisualStage::Nature => materializer.place_nature(tile, tile.nature_seed()),
                };
                if let Err(e) = result {
                    log::error!("Failed to build {:?} for ring tile {:?}: {}", stage, tile.pixel, e);
                }
                (tile.pixel, stage)
            }
            _ => {
                self.visual_queue.pop_front();
                return RingTick::Idle;
            }
        };
        slot.advance_visual();
        log::debug!("Ring tile {:?}: {:?} done", pixel, stage);

        if slot.is_ready() {
            self.visual_queue.pop_front();
            if self.visual_queue.is_empty() {
                return self.finish_batch(materializer);
            }
        }
        RingTick::Materialized { pixel, stage }
    }

    /// Пакет готов: соседи, снятие флага прохода
    fn finish_batch(&mut self, materializer: &mut dyn TileMaterializer) -> RingTick {
        self.relink_neighbors(materializer);
        self.update_running = false;
        let tiles = self.slots.iter().filter(|s| s.is_ready()).count();
        log::info!("Transition ring ready: {} tiles around {:?}", tiles, self.center);
        RingTick::BatchReady { tiles }
    }

    fn relink_neighbors(&mut self, materializer: &mut dyn TileMaterializer) {
        let links: Vec<(usize, TileNeighbors)> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.tile().is_some())
            .filter_map(|(idx, slot)| {
                let p = slot.pixel()?;
                let lookup = |dx: i32, dy: i32| {
                    let key = p.offset(dx, dy).key();
                    self.index
                        .get(&key)
                        .filter(|&&i| self.slots[i].tile().is_some())
                        .map(|_| key)
                };
                Some((
                    idx,
                    TileNeighbors {
                        left: lookup(-1, 0),
                        right: lookup(1, 0),
                        top: lookup(0, -1),
                        bottom: lookup(0, 1),
                    },
                ))
            })
            .collect();

        for (idx, neighbors) in links {
            if let Some(tile) = self.slots[idx].tile_mut() {
                tile.neighbors = neighbors;
                if let Err(e) = materializer.update_neighbors(tile) {
                    log::error!("Failed to update neighbours of ring tile {:?}: {}", tile.pixel, e);
                }
            }
        }
    }

    fn apply_seasonal_refresh(&mut self, season: Season, materializer: &mut dyn TileMaterializer) -> usize {
        let mut count = 0;
        for slot in self.slots.iter().filter(|s| s.is_ready()) {
            if let Some(tile) = slot.tile() {
                if let Err(e) = materializer.refresh_seasonal(tile, season) {
                    log::error!("Failed to refresh season of ring tile {:?}: {}", tile.pixel, e);
                }
                count += 1;
            }
        }
        log::debug!("Seasonal refresh {:?} applied to {} ring tiles", season, count);
        count
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::terrain::ring::blend::coarse_target;
    use crate::terrain::ring::materializer::NullMaterializer;
    use crate::terrain::test_support::{init_logger, ring_fixture};

    /// Запоминает все вызовы, может падать на заданном тайле
    #[derive(Default)]
    struct RecordingMaterializer {
        calls: Vec<(&'static str, MapPixel)>,
        seasons: Vec<Season>,
        fail_on: Option<MapPixel>,
    }

    impl TileMaterializer for RecordingMaterializer {
        fn promote_terrain(&mut self, tile: &TerrainTile, season: Season) -> Result<(), String> {
            self.calls.push(("terrain", tile.pixel));
            self.seasons.push(season);
            if self.fail_on == Some(tile.pixel) {
                return Err("terrain object missing".into());
            }
            Ok(())
        }

        fn place_nature(&mut self, tile: &TerrainTile, seed: u64) -> Result<(), String> {
            assert_eq!(seed, tile.key.seed());
            self.calls.push(("nature", tile.pixel));
            Ok(())
        }

        fn retire_tile(&mut self, tile: &TerrainTile) -> Result<(), String> {
            self.calls.push(("retire", tile.pixel));
            Ok(())
        }

        fn update_neighbors(&mut self, tile: &TerrainTile) -> Result<(), String> {
            self.calls.push(("neighbors", tile.pixel));
            Ok(())
        }

        fn refresh_seasonal(&mut self, tile: &TerrainTile, _season: Season) -> Result<(), String> {
            self.calls.push(("season", tile.pixel));
            Ok(())
        }
    }

    impl RecordingMaterializer {
        fn count(&self, name: &str) -> usize {
            self.calls.iter().filter(|(n, _)| *n == name).count()
        }
    }

    fn manager(render_distance: usize) -> TransitionRingManager {
        let (sampler, coarse) = ring_fixture();
        TransitionRingManager::new(sampler, coarse, render_distance, 2)
    }

    fn footprint_set(center: MapPixel, radius: i32) -> HashSet<MapPixel> {
        let (sampler, _) = ring_fixture();
        ring_footprint(center, radius, sampler.extent()).iter().map(|c| c.pixel).collect()
    }

    #[test]
    fn test_initial_pass_around_observer() {
        init_logger();
        let mut ring = manager(2);
        assert_eq!(ring.capacity(), 24);

        ring.request_update(MapPixel::new(500, 500));
        let report = ring.run_to_completion(&mut NullMaterializer).unwrap().unwrap();
        assert_eq!(report, ReconcileReport {
            center: MapPixel::new(500, 500),
            desired: 24,
            kept: 0,
            created: 24,
            retired: 0,
        });

        assert!(ring.is_all_ready());
        // Ни одного пустого слота
        assert!(ring.slots().iter().all(|s| s.is_ready()));
        let occupied: Vec<_> = ring.occupied_pixels();
        let unique: HashSet<_> = occupied.iter().copied().collect();
        assert_eq!(occupied.len(), unique.len());
        assert_eq!(unique, footprint_set(MapPixel::new(500, 500), 3));
        for p in &occupied {
            assert_eq!(ring.slot_state(*p), Some(SlotState::Ready));
            assert!(p.x >= 497 && p.x <= 503 && p.y >= 497 && p.y <= 503);
        }
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mut ring = manager(2);
        let mut materializer = RecordingMaterializer::default();
        ring.request_update(MapPixel::new(500, 500));
        ring.run_to_completion(&mut materializer).unwrap();
        let calls_before = materializer.count("terrain");

        let report = ring.reconcile(MapPixel::new(500, 500), &mut materializer).unwrap().unwrap();
        assert_eq!((report.kept, report.created, report.retired), (24, 0, 0));
        assert!(!ring.is_update_running());
        assert_eq!(materializer.count("terrain"), calls_before);
        assert_eq!(materializer.count("retire"), 0);
    }

    #[test]
    fn test_one_step_east() {
        let mut ring = manager(2);
        ring.request_update(MapPixel::new(500, 500));
        ring.run_to_completion(&mut NullMaterializer).unwrap();
        let old_top = ring.tile_at(MapPixel::new(500, 497)).unwrap().heights.samples.clone();

        let mut materializer = RecordingMaterializer::default();
        ring.request_update(MapPixel::new(501, 500));
        let report = ring.run_to_completion(&mut materializer).unwrap().unwrap();

        // Верх и низ x=499..502 не меняют границы
        assert_eq!((report.kept, report.created, report.retired), (8, 16, 16));
        assert_eq!(materializer.count("retire"), 16);
        assert_eq!(materializer.count("terrain"), 16);
        assert_eq!(materializer.count("nature"), 16);
        assert!(materializer.calls.iter().all(|(n, p)| *n != "terrain" || *p != MapPixel::new(500, 497)));

        let occupied: HashSet<_> = ring.occupied_pixels().into_iter().collect();
        assert_eq!(occupied, footprint_set(MapPixel::new(501, 500), 3));
        assert_eq!(ring.tile_at(MapPixel::new(500, 497)).unwrap().heights.samples, old_top);
    }

    #[test]
    fn test_outward_edges_match_coarse() {
        let (sampler, coarse) = ring_fixture();
        let mut ring = TransitionRingManager::new(sampler.clone(), coarse.clone(), 2, 0);
        ring.request_update(MapPixel::new(300, 200));
        ring.run_to_completion(&mut NullMaterializer).unwrap();

        let dim = sampler.dimension();
        let last = (dim - 1) as f32;
        for tile in ring.tiles() {
            for i in 0..dim {
                let f = i as f32 / last;
                if tile.border.left {
                    assert_eq!(tile.heights.get(0, i), coarse_target(&coarse, tile.pixel, 0.0, f));
                }
                if tile.border.right {
                    assert_eq!(tile.heights.get(dim - 1, i), coarse_target(&coarse, tile.pixel, 1.0, f));
                }
                if tile.border.top {
                    assert_eq!(tile.heights.get(i, 0), coarse_target(&coarse, tile.pixel, f, 0.0));
                }
                if tile.border.bottom {
                    assert_eq!(tile.heights.get(i, dim - 1), coarse_target(&coarse, tile.pixel, f, 1.0));
                }
            }
        }
    }

    #[test]
    fn test_one_heavy_step_per_tick() {
        let mut ring = manager(0);
        let mut materializer = RecordingMaterializer::default();
        ring.request_update(MapPixel::new(50, 50));

        let tick = ring.tick(&mut materializer).unwrap();
        assert!(matches!(tick, RingTick::Reconciled(ReconcileReport { created: 8, .. })));
        assert!(ring.is_update_running());
        assert!(materializer.calls.is_empty());

        // 8 тайлов × (terrain + nature)
        let mut steps = 0;
        while ring.is_update_running() {
            ring.tick(&mut materializer).unwrap();
            steps += 1;
        }
        assert_eq!(steps, 16);

        // Для каждого тайла terrain раньше nature
        for pixel in ring.occupied_pixels() {
            let terrain = materializer.calls.iter().position(|c| *c == ("terrain", pixel)).unwrap();
            let nature = materializer.calls.iter().position(|c| *c == ("nature", pixel)).unwrap();
            assert!(terrain < nature);
        }
        assert_eq!(materializer.count("neighbors"), 8);
    }

    #[test]
    fn test_callback_failure_does_not_stop_batch() {
        init_logger();
        let mut ring = manager(2);
        let mut materializer = RecordingMaterializer { fail_on: Some(MapPixel::new(497, 497)), ..Default::default() };
        ring.request_update(MapPixel::new(500, 500));
        ring.run_to_completion(&mut materializer).unwrap();

        assert!(ring.is_all_ready());
        assert_eq!(ring.slot_state(MapPixel::new(497, 497)), Some(SlotState::Ready));
        assert_eq!(materializer.count("nature"), 24);
    }

    #[test]
    fn test_request_during_pass_is_deferred() {
        let mut ring = manager(2);
        ring.request_update(MapPixel::new(500, 500));
        ring.tick(&mut NullMaterializer).unwrap();
        assert!(ring.is_update_running());
        assert_eq!(ring.coarse_render_distance(), 0);

        assert_eq!(ring.reconcile(MapPixel::new(510, 500), &mut NullMaterializer).unwrap(), None);
        ring.request_update(MapPixel::new(520, 500));
        assert_eq!(ring.pending_request(), Some(MapPixel::new(520, 500)));

        // Текущий проход завершается без учёта нового запроса
        while ring.is_update_running() {
            ring.tick(&mut NullMaterializer).unwrap();
        }
        assert_eq!(ring.center(), Some(MapPixel::new(500, 500)));
        assert_eq!(ring.coarse_render_distance(), 2);

        let report = ring.run_to_completion(&mut NullMaterializer).unwrap().unwrap();
        assert_eq!(report.center, MapPixel::new(520, 500));
        let occupied: HashSet<_> = ring.occupied_pixels().into_iter().collect();
        assert_eq!(occupied, footprint_set(MapPixel::new(520, 500), 3));
    }

    #[test]
    fn test_capacity_exhausted() {
        let (sampler, coarse) = ring_fixture();
        let mut ring = TransitionRingManager::with_capacity(sampler, coarse, 2, 1, 10);
        let result = ring.reconcile(MapPixel::new(500, 500), &mut NullMaterializer);
        assert!(matches!(
            result,
            Err(TerrainError::RingCapacityExhausted { capacity: 10, desired: 24 })
        ));

        // Неудачный проход ничего не оставляет в слотах
        assert!(!ring.is_update_running());
        assert!(ring.slots().iter().all(|s| s.is_empty()));
        assert!(ring.occupied_pixels().is_empty());
        assert!(ring.tile_at(MapPixel::new(497, 497)).is_none());
        assert_eq!(ring.slot_state(MapPixel::new(497, 497)), None);

        // У края мира 9 ячеек помещаются в 10 слотов
        let report = ring.reconcile(MapPixel::new(1, 1), &mut NullMaterializer).unwrap().unwrap();
        assert_eq!(report.created, 9);
        ring.run_to_completion(&mut NullMaterializer).unwrap();
        assert!(ring.is_all_ready());
        assert_eq!(ring.occupied_pixels().len(), 9);
    }

    #[test]
    fn test_neighbor_links() {
        let mut ring = manager(2);
        ring.request_update(MapPixel::new(500, 500));
        ring.run_to_completion(&mut NullMaterializer).unwrap();

        let top = ring.tile_at(MapPixel::new(500, 497)).unwrap();
        assert_eq!(top.neighbors.left, Some(MapPixel::new(499, 497).key()));
        assert_eq!(top.neighbors.right, Some(MapPixel::new(501, 497).key()));
        assert_eq!(top.neighbors.top, None);
        assert_eq!(top.neighbors.bottom, None);

        let corner = ring.tile_at(MapPixel::new(497, 497)).unwrap();
        assert_eq!(corner.neighbors.count(), 2);
        assert_eq!(corner.neighbors.bottom, Some(MapPixel::new(497, 498).key()));
    }

    #[test]
    fn test_seasonal_refresh_after_ready() {
        let mut ring = manager(2);
        let mut materializer = RecordingMaterializer::default();

        // Без тайлов обновлять нечего, но сезон запоминается
        ring.request_seasonal_refresh(Season::Winter);
        assert_eq!(ring.tick(&mut materializer).unwrap(), RingTick::Idle);
        assert_eq!(ring.season(), Season::Winter);

        ring.request_update(MapPixel::new(500, 500));
        ring.tick(&mut materializer).unwrap();
        ring.request_seasonal_refresh(Season::Rain);
        ring.run_to_completion(&mut materializer).unwrap();
        assert_eq!(materializer.count("season"), 24);
        assert_eq!(materializer.seasons.len(), 24);
        assert!(materializer.seasons.iter().all(|&s| s == Season::Rain));
    }

    #[test]
    fn test_new_tiles_built_with_current_season() {
        let mut ring = manager(2);
        let mut materializer = RecordingMaterializer::default();
        ring.request_seasonal_refresh(Season::Winter);

        ring.request_update(MapPixel::new(500, 500));
        ring.run_to_completion(&mut materializer).unwrap();
        assert_eq!(materializer.seasons, vec![Season::Winter; 24]);
        assert_eq!(materializer.count("season"), 0);

        ring.request_update(MapPixel::new(501, 500));
        ring.run_to_completion(&mut materializer).unwrap();
        assert_eq!(materializer.seasons.len(), 40);
        assert!(materializer.seasons.iter().all(|&s| s == Season::Winter));
    }

    #[test]
    fn test_ring_clipped_at_world_edge() {
        let mut ring = manager(2);
        ring.request_update(MapPixel::new(1, 1));
        let report = ring.run_to_completion(&mut NullMaterializer).unwrap().unwrap();
        assert_eq!(report.created, 9);
        assert!(ring.occupied_pixels().iter().all(|p| p.x >= 0 && p.y >= 0));
    }
}
