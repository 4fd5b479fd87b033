// ============================================
// World Metadata - Запись мира и настройки
// ============================================
//
// Запись мира это один самоописываемый документ: паспорт мира,
// позиция игрока и карта снимков чанков. JSON-представление
// записи и есть формат экспорта.

use serde::{Serialize, Deserialize};

use crate::biomes::BiomeKind;
use crate::save::epoch_ms;
use crate::terrain::ChunkRecords;

/// Версия схемы документа мира.
pub const WORLD_VERSION: &str = "0.4.0";

/// Точка появления игрока в новом мире.
pub const DEFAULT_SPAWN: Vec3 = Vec3::new(0.0, 20.0, 0.0);

/// Позиция или вращение игрока.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Настройки мира, фиксируются при создании.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSettings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i32,
    /// Радиус загрузки в чанках; радиус выгрузки на один больше.
    #[serde(default = "default_view_distance")]
    pub view_distance: i32,
    #[serde(default)]
    pub biome: BiomeKind,
    #[serde(default = "default_base_height")]
    pub base_height: i32,
    #[serde(default = "default_true")]
    pub caves: bool,
    #[serde(default = "default_true")]
    pub structures: bool,
}

fn default_chunk_size() -> i32 {
    16
}

fn default_view_distance() -> i32 {
    1
}

fn default_base_height() -> i32 {
    4
}

fn default_true() -> bool {
    true
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            view_distance: default_view_distance(),
            biome: BiomeKind::default(),
            base_height: default_base_height(),
            caves: true,
            structures: true,
        }
    }
}

/// Полная запись одного мира. Имя и сид обязательны, остальные
/// поля при разборе заполняются значениями по умолчанию, поэтому
/// частичные документы из импорта тоже проходят.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRecord {
    pub name: String,
    pub seed: i64,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub settings: WorldSettings,
    #[serde(default = "default_spawn")]
    pub player_position: Vec3,
    #[serde(default)]
    pub player_rotation: Vec3,
    #[serde(default = "epoch_ms")]
    pub created_at: u64,
    #[serde(default)]
    pub last_played: u64,
    #[serde(default)]
    pub chunks: ChunkRecords,
}

fn default_version() -> String {
    WORLD_VERSION.to_string()
}

fn default_spawn() -> Vec3 {
    DEFAULT_SPAWN
}

impl WorldRecord {
    pub fn new(name: &str, seed: i64, settings: WorldSettings) -> Self {
        let now = epoch_ms();
        Self {
            name: name.to_string(),
            seed,
            version: WORLD_VERSION.to_string(),
            settings,
            player_position: DEFAULT_SPAWN,
            player_rotation: Vec3::ZERO,
            created_at: now,
            last_played: now,
            chunks: ChunkRecords::new(),
        }
    }

    /// Отметка "в мир заходили только что".
    pub fn touch(&mut self) {
        self.last_played = epoch_ms();
    }

    /// Суммарное число вокселей во всех снимках чанков.
    pub fn block_count(&self) -> usize {
        self.chunks.values().map(|record| record.blocks.len()).sum()
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            name: self.name.clone(),
            seed: self.seed,
            version: self.version.clone(),
            created_at: self.created_at,
            last_played: self.last_played,
        }
    }
}

/// Короткая сводка мира для списков в меню.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSummary {
    pub name: String,
    pub seed: i64,
    pub version: String,
    pub created_at: u64,
    pub last_played: u64,
}

/// Сид из имени мира: детерминированный 32-битный хеш строки.
/// Пустое имя получает случайный сид.
pub fn seed_from_name(name: &str) -> i64 {
    if name.is_empty() {
        return random_seed();
    }
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    hash.unsigned_abs() as i64
}

/// Случайный сид 0..1000000 из системных часов.
pub fn random_seed() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mixed = nanos.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    (mixed % 1_000_000) as i64
}
