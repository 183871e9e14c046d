// ============================================
// Distant Terrain Config - Настройки дальнего terrain
// ============================================
// Все поля имеют значения по умолчанию, JSON может быть частичным.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::TerrainError;
use super::generation::SamplerParams;
use super::world::{ClimateTable, WorldExtent};

/// Настройки переходного кольца
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub enabled: bool,
    /// Дальность детального terrain (в тайлах); радиус кольца на 1 больше
    pub render_distance: usize,
}

impl RingConfig {
    /// Радиус кольца в пикселях карты
    pub fn ring_radius(&self) -> i32 {
        self.render_distance as i32 + 1
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self { enabled: true, render_distance: 2 }
    }
}

/// Настройки размещения дальнего меша
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Размер одного пикселя карты в мировых единицах
    pub terrain_block_size: f32,
    /// Смещение по y при включённом кольце
    pub extra_translation_y: f32,
    /// Смещение по y без кольца (больше, чтобы скрыть швы)
    pub extra_translation_y_without_ring: f32,
    pub extra_water_translation_y: f32,
    /// Масштаб высот для уровня воды
    pub terrain_height_scale: f32,
    /// Метки локаций в info-буфере
    pub indicate_locations: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            terrain_block_size: 819.2,
            extra_translation_y: -5.0,
            extra_translation_y_without_ring: -60.0,
            extra_water_translation_y: -55.0,
            terrain_height_scale: 1.0,
            indicate_locations: true,
        }
    }
}

/// Полная конфигурация
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistantTerrainConfig {
    pub sampler: SamplerParams,
    pub climates: ClimateTable,
    pub ring: RingConfig,
    pub mesh: MeshConfig,
    /// Потоков на тайл, 0 - по размеру пула rayon
    pub worker_count: usize,
    pub noise_seed: u32,
    pub world: WorldExtent,
}

impl Default for DistantTerrainConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerParams::default(),
            climates: ClimateTable::default(),
            ring: RingConfig::default(),
            mesh: MeshConfig::default(),
            worker_count: 0,
            noise_seed: 0,
            world: WorldExtent::default(),
        }
    }
}

impl DistantTerrainConfig {
    /// Загрузить из JSON строки
    pub fn from_json(json: &str) -> Result<Self, TerrainError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить из файла
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded distant terrain config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, TerrainError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.sampler.heightmap_dimension < 2 {
            return Err(TerrainError::InvalidDimension(self.sampler.heightmap_dimension));
        }
        if self.world.width <= 0 || self.world.height <= 0 {
            return Err(TerrainError::Config(format!(
                "world extent must be positive, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.sampler.coast_ramp_distance <= 0.0 {
            return Err(TerrainError::Config("coast_ramp_distance must be positive".into()));
        }
        Ok(())
    }

    /// Дальность грубого меша в установившемся состоянии
    pub fn coarse_render_distance(&self) -> usize {
        if self.ring.enabled {
            self.ring.render_distance
        } else {
            self.ring.render_distance.saturating_sub(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::world::ClimateIndex;

    #[test]
    fn test_empty_json_is_default() {
        let config = DistantTerrainConfig::from_json("{}").unwrap();
        assert_eq!(config, DistantTerrainConfig::default());
        assert_eq!(config.ring.ring_radius(), 3);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "ring": { "render_distance": 4 },
            "mesh": { "indicate_locations": false },
            "noise_seed": 77
        }"#;
        let config = DistantTerrainConfig::from_json(json).unwrap();
        assert!(config.ring.enabled);
        assert_eq!(config.ring.render_distance, 4);
        assert!(!config.mesh.indicate_locations);
        assert_eq!(config.mesh.extra_translation_y, -5.0);
        assert_eq!(config.noise_seed, 77);
        assert_eq!(config.climates.extra_noise_scale(ClimateIndex::Mountain), 62.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = DistantTerrainConfig::from_json(r#"{ "sampler": { "heightmap_dimension": 1 } }"#);
        assert!(matches!(result, Err(TerrainError::InvalidDimension(1))));

        let result = DistantTerrainConfig::from_json(r#"{ "world": { "width": 0, "height": 10 } }"#);
        assert!(matches!(result, Err(TerrainError::Config(_))));

        let result = DistantTerrainConfig::from_json("not json");
        assert!(matches!(result, Err(TerrainError::Config(_))));
    }

    #[test]
    fn test_coarse_distance_without_ring() {
        let mut config = DistantTerrainConfig::default();
        assert_eq!(config.coarse_render_distance(), 2);
        config.ring.enabled = false;
        assert_eq!(config.coarse_render_distance(), 1);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = DistantTerrainConfig::default();
        config.worker_count = 3;
        let parsed = DistantTerrainConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = DistantTerrainConfig::load_from_file("/nonexistent/distant_terrain.json");
        assert!(matches!(result, Err(TerrainError::Io(_))));
    }
}
