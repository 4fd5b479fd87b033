// ============================================
// Terrain Module - Чанки, воксели, свет, стриминг
// ============================================

pub mod chunk;
pub mod chunk_key;
pub mod light;
pub mod manager;
pub mod voxel_store;

pub use chunk::{Chunk, ChunkRecords, Face, PersistedChunkRecord, SavedBlock, VoxelView};
pub use chunk_key::ChunkKey;
pub use light::{LightGrid, LIGHT_CEILING, LIGHT_MAX};
pub use manager::{ChunkManager, StreamingBudget, StreamingReport};
pub use voxel_store::{BlockPos, ChunkVoxels};

/// Потолок мира: выше блоков не бывает.
pub const WORLD_CEILING: i32 = 64;
