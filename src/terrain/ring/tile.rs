// ============================================
// Terrain Tile - Детальный тайл кольца
// ============================================

use crate::terrain::generation::TileHeights;
use crate::terrain::world::{MapPixel, TerrainKey};

use super::border::{BorderDescriptor, RingCell};

/// Соседние тайлы кольца (по ключу)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TileNeighbors {
    pub left: Option<TerrainKey>,
    pub right: Option<TerrainKey>,
    pub top: Option<TerrainKey>,
    pub bottom: Option<TerrainKey>,
}

impl TileNeighbors {
    pub fn count(&self) -> usize {
        [self.left, self.right, self.top, self.bottom].iter().filter(|n| n.is_some()).count()
    }
}

/// Тайл с готовыми (уже сшитыми) высотами
#[derive(Clone, Debug)]
pub struct TerrainTile {
    pub pixel: MapPixel,
    pub key: TerrainKey,
    pub heights: TileHeights,
    pub border: BorderDescriptor,
    pub neighbors: TileNeighbors,
}

impl TerrainTile {
    pub fn new(cell: RingCell, heights: TileHeights) -> Self {
        Self {
            pixel: cell.pixel,
            key: cell.pixel.key(),
            heights,
            border: cell.border,
            neighbors: TileNeighbors::default(),
        }
    }

    /// Сид растительности тайла
    pub fn nature_seed(&self) -> u64 {
        self.key.seed()
    }
}
