// ============================================
// Ring Module - Переходное кольцо детальных тайлов
// ============================================

mod blend;
mod border;
mod manager;
mod materializer;
mod slot;
mod tile;

pub use blend::{blend_tile, blend_weight, coarse_target};
pub use border::{ring_capacity, ring_footprint, BorderDescriptor, RingCell};
pub use manager::{ReconcileReport, RingTick, TransitionRingManager};
pub use materializer::{NullMaterializer, TileMaterializer};
pub use slot::{RingSlot, SlotState, VisualStage};
pub use tile::{TerrainTile, TileNeighbors};
