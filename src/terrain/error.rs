// ============================================
// Terrain Errors - Ошибки дальнего terrain
// ============================================

use std::fmt;

/// Ошибки построения и обновления дальнего terrain
#[derive(Debug)]
pub enum TerrainError {
    /// Данные мира не загружены (фатальное предусловие)
    WorldDataNotReady,
    /// Недопустимый размер карты высот тайла
    InvalidDimension(usize),
    /// В кольце не осталось свободных слотов
    RingCapacityExhausted { capacity: usize, desired: usize },
    /// Дальний меш ещё не построен
    MeshNotBuilt,
    /// Ошибка разбора конфигурации
    Config(String),
    Io(std::io::Error),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::WorldDataNotReady => write!(f, "world data is not ready"),
            TerrainError::InvalidDimension(dim) => {
                write!(f, "invalid heightmap dimension {} (must be >= 2)", dim)
            }
            TerrainError::RingCapacityExhausted { capacity, desired } => write!(
                f,
                "transition ring has no free slot: capacity {}, desired {}",
                capacity, desired
            ),
            TerrainError::MeshNotBuilt => write!(f, "distant terrain mesh is not built"),
            TerrainError::Config(msg) => write!(f, "config error: {}", msg),
            TerrainError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Config(e.to_string())
    }
}
