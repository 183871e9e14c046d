// ============================================
// Distant Terrain System - Координатор за тик
// ============================================
//
// Каждый тик:
// 1. Ждём загрузки данных мира
// 2. Лениво строим сэмплер, грубый меш и кольцо
// 3. Смещаем меш к наблюдателю, при смене пикселя запрашиваем кольцо
// 4. Проверяем сезон
// 5. Двигаем кольцо на шаг и отдаём его дальность грубому мешу

use std::sync::Arc;

use ultraviolet::Vec3;

use super::config::DistantTerrainConfig;
use super::distant::{DistantTerrainMesh, Season, WeatherState};
use super::error::TerrainError;
use super::generation::{LatticeNoise, WorldHeightSampler};
use super::ring::{RingTick, TileMaterializer, TransitionRingManager};
use super::world::{MapPixel, WaterDistanceField, WorldMapData, WorldServices};

/// Данные хоста за кадр
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub observer: MapPixel,
    pub world_compensation: Vec3,
    pub weather: WeatherState,
}

impl FrameInput {
    pub fn at(observer: MapPixel) -> Self {
        Self { observer, world_compensation: Vec3::zero(), weather: WeatherState::default() }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TickStatus {
    /// Данные мира не готовы, повторить на следующем тике
    WaitingForWorld,
    Active { ring: Option<RingTick> },
}

/// Дальний terrain: грубый меш и переходное кольцо
pub struct DistantTerrain {
    config: DistantTerrainConfig,
    services: WorldServices,
    sampler: Option<Arc<WorldHeightSampler>>,
    mesh: Option<DistantTerrainMesh>,
    ring: Option<TransitionRingManager>,
}

impl DistantTerrain {
    pub fn new(config: DistantTerrainConfig, services: WorldServices) -> Self {
        Self { config, services, sampler: None, mesh: None, ring: None }
    }

    /// Сервисы из карты в памяти: поле воды по порогу и шум с сидом из конфига
    pub fn from_map_data(config: DistantTerrainConfig, data: WorldMapData) -> Self {
        let data = Arc::new(data);
        let water = Arc::new(WaterDistanceField::from_heights(data.as_ref(), config.sampler.water_threshold));
        let noise = Arc::new(LatticeNoise::new(config.noise_seed));
        let services = WorldServices::new(data.clone(), data.clone(), water, noise).with_features(data);
        Self::new(config, services)
    }

    pub fn config(&self) -> &DistantTerrainConfig {
        &self.config
    }

    pub fn is_built(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn sampler(&self) -> Option<&Arc<WorldHeightSampler>> {
        self.sampler.as_ref()
    }

    pub fn mesh(&self) -> Option<&DistantTerrainMesh> {
        self.mesh.as_ref()
    }

    pub fn ring(&self) -> Option<&TransitionRingManager> {
        self.ring.as_ref()
    }

    /// Построить сэмплер, грубый меш и кольцо
    pub fn build(&mut self) -> Result<(), TerrainError> {
        if !self.services.is_ready() {
            return Err(TerrainError::WorldDataNotReady);
        }
        let extent = self.services.extent();
        if extent != self.config.world {
            log::warn!(
                "World extent {}x{} differs from configured {}x{}, using world data",
                extent.width,
                extent.height,
                self.config.world.width,
                self.config.world.height
            );
        }

        let sampler = Arc::new(WorldHeightSampler::new(
            self.services.clone(),
            self.config.sampler.clone(),
            self.config.climates.clone(),
        )?);
        let ring_enabled = self.config.ring.enabled;
        let mesh = DistantTerrainMesh::build(
            &sampler,
            &self.config.mesh,
            ring_enabled,
            self.config.coarse_render_distance(),
        );

        self.ring = if ring_enabled {
            Some(TransitionRingManager::new(
                sampler.clone(),
                mesh.heights().clone(),
                self.config.ring.render_distance,
                self.config.worker_count,
            ))
        } else {
            log::info!("Transition ring disabled");
            None
        };
        self.mesh = Some(mesh);
        self.sampler = Some(sampler);
        Ok(())
    }

    /// Один тик хоста
    pub fn tick(
        &mut self,
        input: &FrameInput,
        materializer: &mut dyn TileMaterializer,
    ) -> Result<TickStatus, TerrainError> {
        if !self.services.is_ready() {
            log::debug!("Distant terrain waiting for world data");
            return Ok(TickStatus::WaitingForWorld);
        }
        if self.mesh.is_none() {
            self.build()?;
        }
        let mesh = self.mesh.as_mut().ok_or(TerrainError::MeshNotBuilt)?;

        let moved = mesh.update_position(input.observer, input.world_compensation);
        let season = Season::from_weather(input.weather);
        let season_changed = mesh.update_seasonal_textures(season);

        let ring_tick = match self.ring.as_mut() {
            Some(ring) => {
                if moved {
                    ring.request_update(input.observer);
                }
                if season_changed {
                    ring.request_seasonal_refresh(season);
                }
                let tick = ring.tick(materializer)?;
                mesh.set_render_distance(ring.coarse_render_distance());
                Some(tick)
            }
            None => None,
        };

        Ok(TickStatus::Active { ring: ring_tick })
    }
}
