// ============================================
// Save Header - Заголовок файла мира
// ============================================

use serde::{Serialize, Deserialize};

/// Магическое число формата: "BCWD".
pub const MAGIC_NUMBER: [u8; 4] = *b"BCWD";

/// Версия бинарного формата.
pub const SAVE_VERSION: u32 = 1;

/// Несжатый заголовок в начале файла. Тело после него
/// сжато zstd.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SaveHeader {
    pub magic: [u8; 4],
    pub version: u32,
    /// Сид мира, дублируется из тела для быстрой диагностики.
    pub seed: i64,
}

impl SaveHeader {
    pub fn new(seed: i64) -> Self {
        Self {
            magic: MAGIC_NUMBER,
            version: SAVE_VERSION,
            seed,
        }
    }

    pub fn is_magic_valid(&self) -> bool {
        self.magic == MAGIC_NUMBER
    }

    pub fn is_version_supported(&self) -> bool {
        self.version == SAVE_VERSION
    }
}

impl Default for SaveHeader {
    fn default() -> Self {
        Self::new(0)
    }
}
