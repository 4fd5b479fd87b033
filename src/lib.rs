// ============================================
// Blockworld - Воксельный мир с потоковой загрузкой чанков
// ============================================
//
// Библиотека без рендера: разреженное хранение вокселей,
// детерминированная генерация террейна от целочисленного хеша,
// колоночное освещение, стриминг чанков вокруг игрока и файловое
// хранилище миров с экспортом и импортом через JSON.

pub mod biomes;
pub mod blocks;
pub mod save;
pub mod terrain;
pub mod world;

pub use biomes::{biome_registry, BiomeGenerator, BiomeKind};
pub use blocks::{BlockKind, Hotbar, HotbarSelection};
pub use save::SaveError;
pub use terrain::{
    BlockPos, Chunk, ChunkKey, ChunkManager, Face, StreamingBudget, StreamingReport, WORLD_CEILING,
};
pub use world::{
    preset_by_id, seed_from_name, SessionConfig, Vec3, WorldPreset, WorldRecord, WorldSession,
    WorldSettings, WorldStore, WorldSummary, WORLD_PRESETS,
};
