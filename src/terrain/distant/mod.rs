// ============================================
// Distant Module - Дальний terrain всего мира
// ============================================

mod info;
mod mesh;
mod season;

pub use info::{TerrainInfoMap, TerrainInfoTexel};
pub use mesh::{DistantTerrainMesh, DistantTerrainUniforms, WorldHeights};
pub use season::{Season, WeatherState};
