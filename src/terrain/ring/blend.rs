// ============================================
// Border Blend - Сшивка краёв тайла с грубым мешем
// ============================================
//
// wx = left(1-fx) + right*fx, wy = top(1-fy) + bottom*fy, w = max(wx, wy)
// h = local(1-w) + target*w, target - билинейная высота грубого меша

use crate::terrain::distant::WorldHeights;
use crate::terrain::generation::{bilinear, TileHeights};
use crate::terrain::world::MapPixel;

use super::border::BorderDescriptor;

#[inline]
fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

/// Вес грубого меша в точке (fx, fy) тайла
#[inline]
pub fn blend_weight(border: BorderDescriptor, fx: f32, fy: f32) -> f32 {
    let wx = flag(border.left) * (1.0 - fx) + flag(border.right) * fx;
    let wy = flag(border.top) * (1.0 - fy) + flag(border.bottom) * fy;
    wx.max(wy)
}

/// Высота грубого меша внутри тайла пикселя
#[inline]
pub fn coarse_target(coarse: &WorldHeights, pixel: MapPixel, fx: f32, fy: f32) -> f32 {
    bilinear(
        coarse.height(pixel),
        coarse.height(pixel.offset(1, 0)),
        coarse.height(pixel.offset(0, 1)),
        coarse.height(pixel.offset(1, 1)),
        fx,
        fy,
    )
}

/// Подтянуть внешние края тайла к грубому мешу
pub fn blend_tile(heights: &mut TileHeights, pixel: MapPixel, border: BorderDescriptor, coarse: &WorldHeights) {
    if !border.has_outward_edge() {
        return;
    }
    let dim = heights.dimension;
    let last = (dim - 1) as f32;

    for y in 0..dim {
        let fy = y as f32 / last;
        for x in 0..dim {
            let fx = x as f32 / last;
            let w = blend_weight(border, fx, fy);
            if w <= 0.0 {
                continue;
            }
            let local = heights.get(x, y);
            let target = coarse_target(coarse, pixel, fx, fy);
            heights.set(x, y, local * (1.0 - w) + target * w);
        }
    }
}
