// ============================================
// Biomes Module - Биомы и генерация террейна
// ============================================

pub mod features;
pub mod generator;
pub mod registry;
pub mod types;

pub use features::TreeParams;
pub use generator::BiomeGenerator;
pub use registry::{biome_registry, BiomeRegistry};
pub use types::{BiomeDefinition, BiomeKind, Octave};
