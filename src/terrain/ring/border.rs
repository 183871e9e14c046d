// ============================================
// Ring Footprint - Периметр кольца и границы тайлов
// ============================================

use crate::terrain::world::{MapPixel, WorldExtent};

/// Какие края тайла смотрят наружу (к грубому мешу)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct BorderDescriptor {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl BorderDescriptor {
    pub const NONE: BorderDescriptor = BorderDescriptor { left: false, right: false, top: false, bottom: false };

    /// Границы ячейки со смещением (dx, dy) от центра кольца радиуса radius
    pub fn for_offset(dx: i32, dy: i32, radius: i32) -> Self {
        Self {
            left: dx == -radius,
            right: dx == radius,
            top: dy == -radius,
            bottom: dy == radius,
        }
    }

    #[inline]
    pub fn has_outward_edge(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Ячейка периметра кольца
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RingCell {
    pub pixel: MapPixel,
    pub border: BorderDescriptor,
}

/// Число слотов кольца для дальности render_distance
pub fn ring_capacity(render_distance: usize) -> usize {
    let side = 2 * render_distance + 1;
    2 * (side + 2) + 2 * side
}

/// Периметр квадрата Чебышёва радиуса radius вокруг center.
/// Ячейки вне мира пропускаются.
pub fn ring_footprint(center: MapPixel, radius: i32, extent: WorldExtent) -> Vec<RingCell> {
    let mut cells = Vec::with_capacity(8 * radius.max(1) as usize);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx.abs().max(dy.abs()) != radius {
                continue;
            }
            let pixel = center.offset(dx, dy);
            if !extent.contains(pixel) {
                continue;
            }
            cells.push(RingCell {
                pixel,
                border: BorderDescriptor::for_offset(dx, dy, radius),
            });
        }
    }
    cells
}
