// ============================================
// Ring Slot - Слот кольца и его состояния
// ============================================
//
// Empty -> PendingCreate -> HeightsComputing -> MaterializingVisual(Terrain)
//       -> MaterializingVisual(Nature) -> Ready -> (Retiring) -> Empty

use super::border::{BorderDescriptor, RingCell};
use super::tile::TerrainTile;
use crate::terrain::world::{MapPixel, TerrainKey};

/// Этап построения визуала тайла
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VisualStage {
    Terrain,
    Nature,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SlotState {
    #[default]
    Empty,
    PendingCreate,
    HeightsComputing,
    MaterializingVisual(VisualStage),
    Ready,
    Retiring,
}

/// Слот фиксированного массива кольца
#[derive(Debug, Default)]
pub struct RingSlot {
    state: SlotState,
    cell: Option<RingCell>,
    tile: Option<TerrainTile>,
    keep: bool,
}

impl RingSlot {
    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.state == SlotState::Empty
    }

    pub fn is_active(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.state == SlotState::Ready
    }

    pub fn needs_height_update(&self) -> bool {
        matches!(self.state, SlotState::PendingCreate | SlotState::HeightsComputing)
    }

    pub fn needs_visual_update(&self) -> bool {
        matches!(self.state, SlotState::MaterializingVisual(_))
    }

    pub fn keep_for_reuse(&self) -> bool {
        self.keep
    }

    pub fn set_keep(&mut self, keep: bool) {
        self.keep = keep;
    }

    pub fn cell(&self) -> Option<RingCell> {
        self.cell
    }

    pub fn pixel(&self) -> Option<MapPixel> {
        self.cell.map(|c| c.pixel)
    }

    pub fn key(&self) -> Option<TerrainKey> {
        self.cell.map(|c| c.pixel.key())
    }

    pub fn border(&self) -> Option<BorderDescriptor> {
        self.cell.map(|c| c.border)
    }

    pub fn tile(&self) -> Option<&TerrainTile> {
        self.tile.as_ref()
    }

    pub fn tile_mut(&mut self) -> Option<&mut TerrainTile> {
        self.tile.as_mut()
    }

    /// Empty -> PendingCreate
    pub fn assign(&mut self, cell: RingCell) {
        debug_assert!(self.is_empty());
        self.cell = Some(cell);
        self.tile = None;
        self.keep = false;
        self.state = SlotState::PendingCreate;
    }

    /// PendingCreate -> HeightsComputing
    pub fn begin_heights(&mut self) {
        debug_assert_eq!(self.state, SlotState::PendingCreate);
        self.state = SlotState::HeightsComputing;
    }

    /// HeightsComputing -> MaterializingVisual(Terrain)
    pub fn finish_heights(&mut self, tile: TerrainTile) {
        debug_assert_eq!(self.state, SlotState::HeightsComputing);
        self.tile = Some(tile);
        self.state = SlotState::MaterializingVisual(VisualStage::Terrain);
    }

    /// Следующий этап визуала: Terrain -> Nature -> Ready
    pub fn advance_visual(&mut self) {
        self.state = match self.state {
            SlotState::MaterializingVisual(VisualStage::Terrain) => {
                SlotState::MaterializingVisual(VisualStage::Nature)
            }
            SlotState::MaterializingVisual(VisualStage::Nature) => SlotState::Ready,
            other => other,
        };
    }

    /// Начать удаление
    pub fn begin_retire(&mut self) {
        self.state = SlotState::Retiring;
    }

    /// Retiring -> Empty, возвращает тайл
    pub fn reset(&mut self) -> Option<TerrainTile> {
        self.state = SlotState::Empty;
        self.cell = None;
        self.keep = false;
        self.tile.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::generation::TileHeights;

    fn cell() -> RingCell {
        RingCell { pixel: MapPixel::new(4, 5), border: BorderDescriptor { left: true, ..Default::default() } }
    }

    #[test]
    fn test_full_lifecycle() {
        let mut slot = RingSlot::default();
        assert!(slot.is_empty());

        slot.assign(cell());
        assert_eq!(slot.state(), SlotState::PendingCreate);
        assert!(slot.needs_height_update());
        assert_eq!(slot.key(), Some(MapPixel::new(4, 5).key()));

        slot.begin_heights();
        assert!(slot.needs_height_update());

        let tile = TerrainTile::new(cell(), TileHeights::from_samples(2, vec![0.0; 4]));
        slot.finish_heights(tile);
        assert_eq!(slot.state(), SlotState::MaterializingVisual(VisualStage::Terrain));
        assert!(slot.needs_visual_update());

        slot.advance_visual();
        assert_eq!(slot.state(), SlotState::MaterializingVisual(VisualStage::Nature));
        slot.advance_visual();
        assert!(slot.is_ready());
        // Ready не меняется
        slot.advance_visual();
        assert!(slot.is_ready());

        slot.set_keep(true);
        slot.begin_retire();
        assert_eq!(slot.state(), SlotState::Retiring);
        let tile = slot.reset().unwrap();
        assert_eq!(tile.pixel, MapPixel::new(4, 5));
        assert!(slot.is_empty());
        assert!(!slot.keep_for_reuse());
        assert!(slot.tile().is_none());
    }
}
