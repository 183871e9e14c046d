// ============================================
// Season - Сезонный набор текстур
// ============================================

use serde::{Deserialize, Serialize};

/// Набор текстур дальнего terrain
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Summer,
    Winter,
    Rain,
}

/// Состояние календаря и погоды хоста
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WeatherState {
    pub is_winter: bool,
    pub is_raining: bool,
    pub is_snowing: bool,
}

impl Season {
    /// Зимой всегда Winter, иначе дождь -> Rain, снег -> Winter
    pub fn from_weather(weather: WeatherState) -> Self {
        if weather.is_winter {
            Season::Winter
        } else if weather.is_raining {
            Season::Rain
        } else if weather.is_snowing {
            Season::Winter
        } else {
            Season::Summer
        }
    }

    /// Код набора текстур для шейдера
    pub fn texture_set_code(self) -> u32 {
        match self {
            Season::Summer => 0,
            Season::Winter => 1,
            Season::Rain => 2,
        }
    }
}
