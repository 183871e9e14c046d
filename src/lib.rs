// ============================================
// Distant Terrain - Дальний terrain открытого мира
// ============================================
// Грубый меш всего мира по карте высот и кольцо детальных тайлов
// вокруг наблюдателя, сшитых с грубым мешем.

pub mod terrain;

pub use terrain::*;
