// ============================================
// Test Support - Синтетические миры для тестов
// ============================================

use std::sync::{Arc, OnceLock};

use super::distant::WorldHeights;
use super::generation::{LatticeNoise, SamplerParams, WorldHeightSampler};
use super::world::{
    ClimateIndex, ClimateTable, MapPixel, WaterDistanceField, WorldExtent, WorldMapData, WorldServices,
};

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Холмистая суша с морем по левому краю
pub(crate) fn hilly_world(extent: WorldExtent, climate: ClimateIndex) -> WorldMapData {
    let mut data = WorldMapData::from_fn(
        extent,
        |p| if p.x < 2 { 0 } else { (20 + (p.x * 7 + p.y * 13) % 90) as u8 },
        |p| ((p.x * 31 + p.y * 17) % 128) as u8,
    );
    data.fill_climate(climate);
    data
}

pub(crate) fn services_for(data: WorldMapData, seed: u32) -> WorldServices {
    let data = Arc::new(data);
    let water = Arc::new(WaterDistanceField::from_heights(data.as_ref(), 2));
    WorldServices::new(data.clone(), data.clone(), water, Arc::new(LatticeNoise::new(seed))).with_features(data)
}

pub(crate) fn hilly_services(extent: WorldExtent, climate: ClimateIndex) -> WorldServices {
    services_for(hilly_world(extent, climate), 1234)
}

pub(crate) fn test_sampler(dimension: usize, climate: ClimateIndex) -> WorldHeightSampler {
    let params = SamplerParams { heightmap_dimension: dimension, ..SamplerParams::default() };
    let services = hilly_services(WorldExtent::new(32, 32), climate);
    match WorldHeightSampler::new(services, params, ClimateTable::default()) {
        Ok(sampler) => sampler,
        Err(e) => panic!("test sampler: {}", e),
    }
}

/// Мир 1000×1000 с тайлами 9×9 и наклонным грубым мешем, общий для тестов кольца
pub(crate) fn ring_fixture() -> (Arc<WorldHeightSampler>, Arc<WorldHeights>) {
    static FIXTURE: OnceLock<(Arc<WorldHeightSampler>, Arc<WorldHeights>)> = OnceLock::new();
    let (sampler, coarse) = FIXTURE.get_or_init(|| {
        let extent = WorldExtent::new(1000, 1000);
        let params = SamplerParams { heightmap_dimension: 9, ..SamplerParams::default() };
        let services = hilly_services(extent, ClimateIndex::Woodlands);
        let sampler = match WorldHeightSampler::new(services, params, ClimateTable::default()) {
            Ok(sampler) => sampler,
            Err(e) => panic!("ring fixture: {}", e),
        };
        let heights = extent
            .pixels()
            .map(|p: MapPixel| 0.05 + p.x as f32 * 1e-4 + p.y as f32 * 2e-4)
            .collect();
        (Arc::new(sampler), Arc::new(WorldHeights::new(extent, heights)))
    });
    (sampler.clone(), coarse.clone())
}
