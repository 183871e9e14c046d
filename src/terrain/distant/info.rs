// ============================================
// Terrain Info - Info-буфер для шейдера
// ============================================
// Один тексель RGBA на пиксель карты:
// r - климат, g - растительность, b/a - диапазон локации по x/y

use bytemuck::{Pod, Zeroable};

use crate::terrain::world::{ClimateProvider, MapPixel, WorldExtent, WorldFeatureProvider};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TerrainInfoTexel {
    pub climate: u8,
    pub tree_coverage: u8,
    pub location_range_x: u8,
    pub location_range_y: u8,
}

/// Квадратная карта info размером max(width, height)
pub struct TerrainInfoMap {
    dimension: usize,
    texels: Vec<TerrainInfoTexel>,
}

impl TerrainInfoMap {
    pub fn build(
        extent: WorldExtent,
        climate: &dyn ClimateProvider,
        features: &dyn WorldFeatureProvider,
        indicate_locations: bool,
    ) -> Self {
        let dimension = extent.width.max(extent.height).max(0) as usize;
        let mut texels = vec![TerrainInfoTexel::default(); dimension * dimension];

        for p in extent.pixels() {
            // Метка локации берётся из соседа справа
            let [range_x, range_y] = if indicate_locations && p.x < extent.width - 1 {
                features.location_range(p.offset(1, 0))
            } else {
                [0, 0]
            };
            texels[p.y as usize * dimension + p.x as usize] = TerrainInfoTexel {
                climate: climate.climate(p).raw(),
                tree_coverage: features.tree_coverage(p),
                location_range_x: range_x,
                location_range_y: range_y,
            };
        }

        Self { dimension, texels }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn texel(&self, p: MapPixel) -> Option<TerrainInfoTexel> {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.dimension || p.y as usize >= self.dimension {
            return None;
        }
        self.texels.get(p.y as usize * self.dimension + p.x as usize).copied()
    }

    pub fn texels(&self) -> &[TerrainInfoTexel] {
        &self.texels
    }

    /// Сырые байты RGBA для загрузки в текстуру
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::world::{ClimateIndex, WorldMapData};

    fn world() -> WorldMapData {
        let mut data = WorldMapData::new(WorldExtent::new(4, 2));
        data.set_climate(MapPixel::new(1, 0), ClimateIndex::Desert);
        data.set_tree_coverage(MapPixel::new(1, 0), 40);
        data.set_location_range(MapPixel::new(2, 0), [3, 5]);
        data.set_location_range(MapPixel::new(0, 1), [9, 9]);
        data
    }

    #[test]
    fn test_texels_from_world() {
        let data = world();
        let map = TerrainInfoMap::build(data.extent(), &data, &data, true);
        assert_eq!(map.dimension(), 4);

        let texel = map.texel(MapPixel::new(1, 0)).unwrap();
        assert_eq!(texel.climate, ClimateIndex::Desert.raw());
        assert_eq!(texel.tree_coverage, 40);
        assert_eq!((texel.location_range_x, texel.location_range_y), (3, 5));

        // Последний столбец без метки
        assert_eq!(map.texel(MapPixel::new(3, 0)).unwrap().location_range_x, 0);
        // Строки за пределами мира нулевые
        assert_eq!(map.texel(MapPixel::new(0, 3)), Some(TerrainInfoTexel::default()));
        assert_eq!(map.texel(MapPixel::new(4, 0)), None);
    }

    #[test]
    fn test_locations_gated() {
        let data = world();
        let map = TerrainInfoMap::build(data.extent(), &data, &data, false);
        assert!(map.texels().iter().all(|t| t.location_range_x == 0 && t.location_range_y == 0));
        assert_eq!(map.as_bytes().len(), 4 * 4 * 4);
    }
}
