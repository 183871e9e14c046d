// ============================================
// World Module - Данные карты мира
// ============================================

mod coords;
mod climate;
mod providers;
mod map_data;
mod water;

pub use coords::{MapPixel, TerrainKey, WorldExtent};
pub use climate::{ClimateIndex, ClimateScales, ClimateTable, CLIMATE_COUNT};
pub use providers::{
    ClimateProvider, NoFeatures, NoiseFunction, WaterDistanceProvider, WorldFeatureProvider,
    WorldHeightProvider, WorldServices,
};
pub use map_data::WorldMapData;
pub use water::WaterDistanceField;
