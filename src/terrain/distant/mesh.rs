// ============================================
// Distant Terrain Mesh - Грубый меш всего мира
// ============================================
//
// Одна поверхность на весь мир: вершина на пиксель карты.
// Высоты считаются один раз при построении и больше не меняются.
// При движении наблюдателя меняется только смещение меша.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;
use ultraviolet::Vec3;

use crate::terrain::config::MeshConfig;
use crate::terrain::generation::WorldHeightSampler;
use crate::terrain::world::{MapPixel, WorldExtent};

use super::info::TerrainInfoMap;
use super::season::Season;

/// Высоты грубого меша, общие для меша и кольца
#[derive(Debug)]
pub struct WorldHeights {
    extent: WorldExtent,
    heights: Vec<f32>,
    average: f32,
    max: f32,
}

impl WorldHeights {
    pub fn new(extent: WorldExtent, heights: Vec<f32>) -> Self {
        let mut sum = 0.0f64;
        let mut max = 0.0f32;
        for &h in &heights {
            sum += h as f64;
            max = max.max(h);
        }
        let average = if heights.is_empty() { 0.0 } else { (sum / heights.len() as f64) as f32 };
        Self { extent, heights, average, max }
    }

    /// Одиночный сэмпл на каждый пиксель, строки параллельно
    pub fn from_sampler(sampler: &WorldHeightSampler) -> Self {
        let extent = sampler.extent();
        let width = extent.width.max(1) as usize;
        let mut heights = vec![0.0f32; extent.pixel_count()];

        heights.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            for (x, h) in row.iter_mut().enumerate() {
                *h = sampler.sample_point(MapPixel::new(x as i32, y as i32));
            }
        });

        Self::new(extent, heights)
    }

    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    /// Высота пикселя (координата прижимается)
    #[inline]
    pub fn height(&self, p: MapPixel) -> f32 {
        self.heights.get(self.extent.index(p)).copied().unwrap_or(0.0)
    }

    pub fn average_height(&self) -> f32 {
        self.average
    }

    pub fn max_height(&self) -> f32 {
        self.max
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }
}

/// Uniform данные для шейдера дальнего terrain
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DistantTerrainUniforms {
    pub placement: [f32; 4],   // xyz + уровень воды
    pub observer: [i32; 4],    // пиксель наблюдателя x, y + дальность + код сезона
    pub tilemap_dim: [u32; 4], // размер info-карты + pad
}

/// Грубый меш мира
pub struct DistantTerrainMesh {
    heights: Arc<WorldHeights>,
    info: TerrainInfoMap,
    config: MeshConfig,
    ring_enabled: bool,
    ocean_elevation: f32,
    observer: Option<MapPixel>,
    placement: Vec3,
    water_height: f32,
    season: Season,
    render_distance: usize,
}

impl DistantTerrainMesh {
    /// Построить меш: высоты всех пикселей и info-буфер
    pub fn build(
        sampler: &WorldHeightSampler,
        config: &MeshConfig,
        ring_enabled: bool,
        render_distance: usize,
    ) -> Self {
        let heights = Arc::new(WorldHeights::from_sampler(sampler));
        let services = sampler.services();
        let info = TerrainInfoMap::build(
            sampler.extent(),
            services.climate.as_ref(),
            services.features.as_ref(),
            config.indicate_locations,
        );

        log::info!(
            "Distant terrain built: {}x{} pixels, average height {:.4}, max {:.4}",
            heights.extent().width,
            heights.extent().height,
            heights.average_height(),
            heights.max_height()
        );

        Self {
            heights,
            info,
            config: config.clone(),
            ring_enabled,
            ocean_elevation: sampler.params().ocean_elevation,
            observer: None,
            placement: Vec3::zero(),
            water_height: 0.0,
            season: Season::default(),
            render_distance,
        }
    }

    pub fn heights(&self) -> &Arc<WorldHeights> {
        &self.heights
    }

    pub fn info(&self) -> &TerrainInfoMap {
        &self.info
    }

    pub fn info_bytes(&self) -> &[u8] {
        self.info.as_bytes()
    }

    /// Пересчитать смещение меша. Возвращает true, если пиксель наблюдателя сменился.
    pub fn update_position(&mut self, observer: MapPixel, world_compensation: Vec3) -> bool {
        let extent = self.heights.extent();
        let scale = self.config.terrain_block_size;
        let extra_y = if self.ring_enabled {
            self.config.extra_translation_y
        } else {
            self.config.extra_translation_y_without_ring
        };

        let map_level = Vec3::new(
            (1 - observer.x) as f32 * scale,
            extra_y,
            -((extent.height - 1 - observer.y) as f32) * scale,
        );
        self.placement = map_level + world_compensation;
        self.water_height = self.placement.y
            + (self.ocean_elevation + 1.0) * self.config.terrain_height_scale
            - self.config.extra_water_translation_y;

        let changed = self.observer != Some(observer);
        self.observer = Some(observer);
        changed
    }

    pub fn observer_map_pixel(&self) -> Option<MapPixel> {
        self.observer
    }

    pub fn placement(&self) -> Vec3 {
        self.placement
    }

    pub fn water_height(&self) -> f32 {
        self.water_height
    }

    /// Сменить сезонный набор текстур (высоты не пересчитываются)
    pub fn update_seasonal_textures(&mut self, season: Season) -> bool {
        if self.season == season {
            return false;
        }
        log::debug!("Distant terrain season {:?} -> {:?}", self.season, season);
        self.season = season;
        true
    }

    pub fn season(&self) -> Season {
        self.season
    }

    /// Дальность, внутри которой грубый меш не рисуется
    pub fn set_render_distance(&mut self, distance: usize) {
        self.render_distance = distance;
    }

    pub fn render_distance(&self) -> usize {
        self.render_distance
    }

    pub fn uniforms(&self) -> DistantTerrainUniforms {
        let observer = self.observer.unwrap_or_default();
        DistantTerrainUniforms {
            placement: [self.placement.x, self.placement.y, self.placement.z, self.water_height],
            observer: [
                observer.x,
                observer.y,
                self.render_distance as i32,
                self.season.texture_set_code() as i32,
            ],
            tilemap_dim: [self.info.dimension() as u32, 0, 0, 0],
        }
    }
}
