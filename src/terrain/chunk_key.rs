// ============================================
// Chunk Key - Координаты чанка
// ============================================

use std::fmt;

use serde::{Serialize, Deserialize};

/// Координаты чанка в сетке чанков (не в блоках).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Чанк, содержащий блочную координату. Деление с округлением
    /// вниз, поэтому отрицательные координаты попадают в свой чанк,
    /// а не в нулевой.
    #[inline]
    pub fn from_block(x: i32, z: i32, chunk_size: i32) -> Self {
        Self::new(x.div_euclid(chunk_size), z.div_euclid(chunk_size))
    }

    /// Чанк, содержащий непрерывную позицию игрока.
    #[inline]
    pub fn from_world(x: f32, z: f32, chunk_size: i32) -> Self {
        Self::new(
            (x / chunk_size as f32).floor() as i32,
            (z / chunk_size as f32).floor() as i32,
        )
    }

    /// Расстояние Чебышёва: максимум из разниц по осям.
    #[inline]
    pub fn chebyshev(self, other: ChunkKey) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// Текстовый ключ "cx,cz" для карты записей мира.
    pub fn storage_key(self) -> String {
        self.to_string()
    }

    /// Разбор текстового ключа "cx,cz".
    pub fn parse(key: &str) -> Option<ChunkKey> {
        let (x, z) = key.split_once(',')?;
        Some(ChunkKey::new(x.parse().ok()?, z.parse().ok()?))
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}
