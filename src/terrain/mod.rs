// ============================================
// Terrain Module - Дальний terrain и переходное кольцо
// ============================================

pub mod config;
pub mod distant;
pub mod error;
pub mod generation;
pub mod ring;
pub mod system;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use config::{DistantTerrainConfig, MeshConfig, RingConfig};
pub use distant::{DistantTerrainMesh, Season, WeatherState, WorldHeights};
pub use error::TerrainError;
pub use generation::{LatticeNoise, ParallelHeightfield, SamplerParams, TileHeights, WorldHeightSampler};
pub use ring::{ReconcileReport, TerrainTile, TileMaterializer, TransitionRingManager};
pub use system::{DistantTerrain, FrameInput, TickStatus};
pub use world::{ClimateIndex, ClimateTable, MapPixel, TerrainKey, WorldExtent, WorldMapData, WorldServices};
