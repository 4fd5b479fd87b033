// ============================================
// World Module - Записи, пресеты, хранилище, сессии
// ============================================

pub mod metadata;
pub mod presets;
pub mod session;
pub mod snapshot;
pub mod store;

pub use metadata::{
    random_seed, seed_from_name, Vec3, WorldRecord, WorldSettings, WorldSummary, DEFAULT_SPAWN,
    WORLD_VERSION,
};
pub use presets::{preset_by_id, WorldPreset, WORLD_PRESETS};
pub use session::{SessionConfig, WorldSession};
pub use store::{StoreLimits, WorldStats, WorldStore, WORLD_FILE_EXT};
