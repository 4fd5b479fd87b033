// ============================================
// Save Module - Бинарный формат файлов мира
// ============================================

pub mod header;
pub mod world_file;

pub use header::{SaveHeader, MAGIC_NUMBER, SAVE_VERSION};
pub use world_file::{SaveError, WorldFile};

/// Текущее время в миллисекундах эпохи для полей записей
/// (lastSaved, lastPlayed, createdAt).
pub fn epoch_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
