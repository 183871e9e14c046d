// ============================================
// Interpolation - Кубическая и билинейная интерполяция
// ============================================

/// Четырёхточечная кубическая интерполяция между v1 и v2
#[inline]
pub fn cubic(v0: f32, v1: f32, v2: f32, v3: f32, t: f32) -> f32 {
    let a = (v3 - v2) - (v0 - v1);
    let b = (v0 - v1) - a;
    let c = v2 - v0;
    let d = v1;
    a * t * t * t + b * t * t + c * t + d
}

/// Двухпроходная (x, затем y) кубическая интерполяция окрестности 4×4.
/// grid[j][i] - строка j, столбец i.
#[inline]
pub fn bicubic(grid: &[[f32; 4]; 4], tx: f32, ty: f32) -> f32 {
    let r0 = cubic(grid[0][0], grid[0][1], grid[0][2], grid[0][3], tx);
    let r1 = cubic(grid[1][0], grid[1][1], grid[1][2], grid[1][3], tx);
    let r2 = cubic(grid[2][0], grid[2][1], grid[2][2], grid[2][3], tx);
    let r3 = cubic(grid[3][0], grid[3][1], grid[3][2], grid[3][3], tx);
    cubic(r0, r1, r2, r3, ty)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Билинейная интерполяция четырёх углов
#[inline]
pub fn bilinear(top_left: f32, top_right: f32, bottom_left: f32, bottom_right: f32, fx: f32, fy: f32) -> f32 {
    lerp(lerp(top_left, top_right, fx), lerp(bottom_left, bottom_right, fx), fy)
}
