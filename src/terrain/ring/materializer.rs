// ============================================
// Tile Materializer - Колбэки потребителя тайлов
// ============================================
// Потребитель превращает готовые высоты в объекты сцены.
// Ошибки колбэков логируются менеджером, пакет продолжается.

use crate::terrain::distant::Season;

use super::tile::TerrainTile;

pub trait TileMaterializer {
    /// Загрузить высоты тайла в объект terrain с текстурами текущего сезона
    fn promote_terrain(&mut self, tile: &TerrainTile, season: Season) -> Result<(), String>;

    /// Расставить растительность (сид детерминирован по ключу тайла)
    fn place_nature(&mut self, _tile: &TerrainTile, _seed: u64) -> Result<(), String> {
        Ok(())
    }

    /// Удалить объекты тайла
    fn retire_tile(&mut self, _tile: &TerrainTile) -> Result<(), String> {
        Ok(())
    }

    /// Связи с соседями пересчитаны
    fn update_neighbors(&mut self, _tile: &TerrainTile) -> Result<(), String> {
        Ok(())
    }

    /// Обновить сезонные текстуры готового тайла
    fn refresh_seasonal(&mut self, _tile: &TerrainTile, _season: Season) -> Result<(), String> {
        Ok(())
    }
}

/// Потребитель без сцены
pub struct NullMaterializer;

impl TileMaterializer for NullMaterializer {
    fn promote_terrain(&mut self, _tile: &TerrainTile, _season: Season) -> Result<(), String> {
        Ok(())
    }
}
