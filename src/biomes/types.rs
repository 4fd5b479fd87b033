// ============================================
// Biome Types - Типы биомов
// ============================================

use serde::{Serialize, Deserialize};

use crate::blocks::BlockKind;

/// Вид биома. Мир целиком генерируется одним биомом,
/// выбранным в настройках при создании.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomeKind {
    Forest = 0,
    Desert = 1,
    Mountain = 2,
    Plains = 3,
    Mixed = 4,
}

impl BiomeKind {
    /// Все биомы в порядке индексов реестра.
    pub const ALL: [BiomeKind; 5] = [
        BiomeKind::Forest,
        BiomeKind::Desert,
        BiomeKind::Mountain,
        BiomeKind::Plains,
        BiomeKind::Mixed,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Default for BiomeKind {
    fn default() -> Self {
        BiomeKind::Mixed
    }
}

/// Октава высотного шума. Координаты столбца делятся на scale,
/// хеш-значение 0..1 умножается на amplitude и округляется вниз.
/// offset разводит октавы по независимым последовательностям хеша.
#[derive(Debug, Clone, Copy)]
pub struct Octave {
    pub scale: i32,
    pub amplitude: f32,
    pub offset: i64,
}

impl Octave {
    pub const fn new(scale: i32, amplitude: f32, offset: i64) -> Self {
        Self {
            scale,
            amplitude,
            offset,
        }
    }
}

/// Полное описание биома: слои грунта, октавы рельефа, деревья.
#[derive(Debug, Clone, Copy)]
pub struct BiomeDefinition {
    pub kind: BiomeKind,
    pub name: &'static str,
    /// Блок поверхности столбца.
    pub surface: BlockKind,
    /// Три блока сразу под поверхностью.
    pub subsurface: BlockKind,
    /// Всё, что глубже.
    pub deep: BlockKind,
    /// Выше этой высоты поверхность сменяется камнем (голые вершины).
    pub rocky_above: Option<i32>,
    /// Октавы рельефа поверх базовой высоты мира.
    pub octaves: &'static [Octave],
    /// Вероятность дерева на столбце, 0..1.
    pub tree_chance: f32,
}

impl BiomeDefinition {
    pub const fn new(kind: BiomeKind, name: &'static str) -> Self {
        Self {
            kind,
            name,
            surface: BlockKind::Grass,
            subsurface: BlockKind::Dirt,
            deep: BlockKind::Stone,
            rocky_above: None,
            octaves: &[],
            tree_chance: 0.0,
        }
    }

    pub const fn with_layers(mut self, surface: BlockKind, subsurface: BlockKind) -> Self {
        self.surface = surface;
        self.subsurface = subsurface;
        self
    }

    pub const fn with_rocky_peaks(mut self, above: i32) -> Self {
        self.rocky_above = Some(above);
        self
    }

    pub const fn with_octaves(mut self, octaves: &'static [Octave]) -> Self {
        self.octaves = octaves;
        self
    }

    pub const fn with_trees(mut self, chance: f32) -> Self {
        self.tree_chance = chance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biome_serde_tags() {
        assert_eq!(serde_json::to_string(&BiomeKind::Mixed).unwrap(), "\"mixed\"");
        assert_eq!(serde_json::to_string(&BiomeKind::Forest).unwrap(), "\"forest\"");
        let parsed: BiomeKind = serde_json::from_str("\"mountain\"").unwrap();
        assert_eq!(parsed, BiomeKind::Mountain);
    }

    #[test]
    fn test_builder_chain() {
        const DEF: BiomeDefinition = BiomeDefinition::new(BiomeKind::Desert, "desert")
            .with_layers(BlockKind::Sand, BlockKind::Sand)
            .with_trees(0.001);
        assert_eq!(DEF.surface, BlockKind::Sand);
        assert_eq!(DEF.deep, BlockKind::Stone);
        assert!(DEF.rocky_above.is_none());
    }
}
