// ============================================
// Biome Registry - Реестр биомов
// ============================================
//
// Глобальный неизменяемый реестр, инициализируется при первом
// обращении. Таблицы октав статические: генератор держит только
// ссылки и остаётся Copy-дешёвым.

use std::sync::OnceLock;

use super::types::{BiomeDefinition, BiomeKind, Octave};
use crate::blocks::BlockKind;

static BIOME_REGISTRY: OnceLock<BiomeRegistry> = OnceLock::new();

const FOREST_OCTAVES: &[Octave] = &[Octave::new(8, 4.0, 0), Octave::new(16, 2.0, 100)];
const DESERT_OCTAVES: &[Octave] = &[Octave::new(12, 3.0, 0), Octave::new(6, 2.0, 200)];
const MOUNTAIN_OCTAVES: &[Octave] = &[Octave::new(20, 8.0, 0), Octave::new(10, 4.0, 300)];
const PLAINS_OCTAVES: &[Octave] = &[Octave::new(16, 2.0, 0)];
const MIXED_OCTAVES: &[Octave] = &[Octave::new(10, 3.0, 0), Octave::new(20, 2.0, 400)];

/// Реестр всех известных биомов, индексирован BiomeKind::index().
pub struct BiomeRegistry {
    biomes: Vec<BiomeDefinition>,
}

impl BiomeRegistry {
    fn new() -> Self {
        Self { biomes: Vec::new() }
    }

    fn register(&mut self, definition: BiomeDefinition) {
        debug_assert_eq!(self.biomes.len(), definition.kind.index());
        self.biomes.push(definition);
    }

    #[inline]
    pub fn get(&self, kind: BiomeKind) -> &BiomeDefinition {
        &self.biomes[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BiomeDefinition> {
        self.biomes.iter()
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

fn register_default_biomes(registry: &mut BiomeRegistry) {
    registry.register(
        BiomeDefinition::new(BiomeKind::Forest, "forest")
            .with_octaves(FOREST_OCTAVES)
            .with_trees(0.12),
    );

    registry.register(
        BiomeDefinition::new(BiomeKind::Desert, "desert")
            .with_layers(BlockKind::Sand, BlockKind::Sand)
            .with_octaves(DESERT_OCTAVES)
            .with_trees(0.001),
    );

    registry.register(
        BiomeDefinition::new(BiomeKind::Mountain, "mountain")
            .with_layers(BlockKind::Grass, BlockKind::Stone)
            .with_rocky_peaks(8)
            .with_octaves(MOUNTAIN_OCTAVES)
            .with_trees(0.06),
    );

    registry.register(
        BiomeDefinition::new(BiomeKind::Plains, "plains")
            .with_octaves(PLAINS_OCTAVES)
            .with_trees(0.03),
    );

    registry.register(
        BiomeDefinition::new(BiomeKind::Mixed, "mixed")
            .with_octaves(MIXED_OCTAVES)
            .with_trees(0.08),
    );
}

/// Глобальный реестр биомов.
pub fn biome_registry() -> &'static BiomeRegistry {
    BIOME_REGISTRY.get_or_init(|| {
        let mut registry = BiomeRegistry::new();
        register_default_biomes(&mut registry);
        registry
    })
}
