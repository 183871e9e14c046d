// ============================================
// Climate Tables - Климат и масштабы шума
// ============================================
//
// Климат пикселя карты определяет два параметра генерации:
// - noise_map_scale: вес крупномасштабной карты шума
// - extra_noise_scale: амплитуда мелких неровностей у земли

use serde::{Deserialize, Serialize};

/// Количество климатов мира
pub const CLIMATE_COUNT: usize = 10;

/// Климат пикселя карты мира
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ClimateIndex {
    Ocean,
    Desert,
    Desert2,
    Mountain,
    Rainforest,
    Swamp,
    Subtropical,
    MountainWoods,
    Woodlands,
    HauntedWoodlands,
}

impl ClimateIndex {
    pub const ALL: [ClimateIndex; CLIMATE_COUNT] = [
        ClimateIndex::Ocean,
        ClimateIndex::Desert,
        ClimateIndex::Desert2,
        ClimateIndex::Mountain,
        ClimateIndex::Rainforest,
        ClimateIndex::Swamp,
        ClimateIndex::Subtropical,
        ClimateIndex::MountainWoods,
        ClimateIndex::Woodlands,
        ClimateIndex::HauntedWoodlands,
    ];

    /// Первый сырой индекс климата в файлах карты
    pub const RAW_BASE: u8 = 223;

    /// Порядковый номер (индекс в таблицах)
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Сырой индекс климата (223..=232), пишется в info-буфер шейдера
    #[inline]
    pub fn raw(self) -> u8 {
        Self::RAW_BASE + self as u8
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        raw.checked_sub(Self::RAW_BASE)
            .and_then(|i| Self::ALL.get(i as usize).copied())
    }
}

impl Default for ClimateIndex {
    fn default() -> Self {
        ClimateIndex::Woodlands
    }
}

/// Масштабы шума для одного климата
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ClimateScales {
    pub noise_map_scale: f32,
    pub extra_noise_scale: f32,
}

impl ClimateScales {
    pub const fn new(noise_map_scale: f32, extra_noise_scale: f32) -> Self {
        Self { noise_map_scale, extra_noise_scale }
    }
}

/// Таблица масштабов шума по климату
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateTable {
    pub entries: [ClimateScales; CLIMATE_COUNT],
}

impl ClimateTable {
    pub const DEFAULT_ENTRIES: [ClimateScales; CLIMATE_COUNT] = [
        ClimateScales::new(0.0, 0.0),    // Ocean
        ClimateScales::new(1.25, 7.0),   // Desert
        ClimateScales::new(10.0, 19.0),  // Desert2
        ClimateScales::new(15.0, 62.0),  // Mountain
        ClimateScales::new(7.5, 16.0),   // Rainforest
        ClimateScales::new(2.5, 9.0),    // Swamp
        ClimateScales::new(3.25, 17.0),  // Subtropical
        ClimateScales::new(12.5, 32.0),  // MountainWoods
        ClimateScales::new(10.0, 24.0),  // Woodlands
        ClimateScales::new(8.0, 22.0),   // HauntedWoodlands
    ];

    #[inline]
    pub fn get(&self, climate: ClimateIndex) -> ClimateScales {
        self.entries[climate.ordinal()]
    }

    #[inline]
    pub fn noise_map_scale(&self, climate: ClimateIndex) -> f32 {
        self.get(climate).noise_map_scale
    }

    #[inline]
    pub fn extra_noise_scale(&self, climate: ClimateIndex) -> f32 {
        self.get(climate).extra_noise_scale
    }

    pub fn set(&mut self, climate: ClimateIndex, scales: ClimateScales) {
        self.entries[climate.ordinal()] = scales;
    }
}

impl Default for ClimateTable {
    fn default() -> Self {
        Self { entries: Self::DEFAULT_ENTRIES }
    }
}
