// ============================================
// Distant Terrain Demo - Прогон кольца по синтетическому миру
// ============================================
// Использование: distant_terrain [config.json] [шагов]

use distant_terrain::{
    ClimateIndex, DistantTerrain, DistantTerrainConfig, FrameInput, MapPixel, Season, TerrainError,
    TerrainTile, TileMaterializer, WorldMapData,
};

/// Считает тайлы, которые прошли через сцену
#[derive(Default)]
struct CountingMaterializer {
    promoted: usize,
    retired: usize,
}

impl TileMaterializer for CountingMaterializer {
    fn promote_terrain(&mut self, _tile: &TerrainTile, _season: Season) -> Result<(), String> {
        self.promoted += 1;
        Ok(())
    }

    fn retire_tile(&mut self, _tile: &TerrainTile) -> Result<(), String> {
        self.retired += 1;
        Ok(())
    }
}

fn synthetic_world(config: &DistantTerrainConfig) -> WorldMapData {
    let extent = config.world;
    let mut data = WorldMapData::from_fn(
        extent,
        |p| {
            // Материк посередине, море по краям
            let dx = (p.x - extent.width / 2) as f32 / extent.width as f32;
            let dy = (p.y - extent.height / 2) as f32 / extent.height as f32;
            let d = (dx * dx + dy * dy).sqrt();
            (120.0 * (1.0 - d * 2.5)).clamp(0.0, 255.0) as u8
        },
        |p| ((p.x * 13 + p.y * 7) % 128) as u8,
    );
    for p in extent.pixels() {
        let climate = match (p.y * 4 / extent.height.max(1), p.x % 3) {
            (0, _) => ClimateIndex::Mountain,
            (1, 0) => ClimateIndex::Woodlands,
            (1, _) => ClimateIndex::HauntedWoodlands,
            (2, _) => ClimateIndex::Rainforest,
            _ => ClimateIndex::Desert,
        };
        data.set_climate(p, climate);
    }
    data
}

fn main() -> Result<(), TerrainError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => DistantTerrainConfig::load_from_file(path)?,
        None => DistantTerrainConfig::default(),
    };
    let steps: i32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);

    let data = synthetic_world(&config);
    let mut terrain = DistantTerrain::from_map_data(config.clone(), data);
    let mut materializer = CountingMaterializer::default();

    let start = MapPixel::new(config.world.width / 2, config.world.height / 2);
    for step in 0..steps {
        let input = FrameInput::at(start.offset(step, 0));
        // Тикаем до готовности кольца
        loop {
            terrain.tick(&input, &mut materializer)?;
            match terrain.ring() {
                Some(ring) if !ring.is_all_ready() || ring.pending_request().is_some() => continue,
                _ => break,
            }
        }
        if let Some(report) = terrain.ring().and_then(|r| r.last_report()) {
            log::info!(
                "Step {}: observer {:?}, kept {}, created {}, retired {}",
                step,
                report.center,
                report.kept,
                report.created,
                report.retired
            );
        }
    }

    log::info!(
        "Done: {} tiles promoted, {} retired",
        materializer.promoted,
        materializer.retired
    );
    Ok(())
}
