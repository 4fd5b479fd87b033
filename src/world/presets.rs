// ============================================
// World Presets - Пресеты миров
// ============================================

use super::metadata::WorldSettings;
use crate::biomes::BiomeKind;

/// Готовый набор настроек для меню создания мира.
#[derive(Debug, Clone, Copy)]
pub struct WorldPreset {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub settings: WorldSettings,
}

const fn settings(biome: BiomeKind, base_height: i32, caves: bool, structures: bool) -> WorldSettings {
    WorldSettings {
        chunk_size: 16,
        view_distance: 1,
        biome,
        base_height,
        caves,
        structures,
    }
}

/// Все пресеты в порядке показа в меню.
pub const WORLD_PRESETS: [WorldPreset; 8] = [
    WorldPreset {
        id: "default",
        title: "Default",
        description: "Classic mixed terrain with caves and trees",
        settings: settings(BiomeKind::Mixed, 4, true, true),
    },
    WorldPreset {
        id: "infiniteForest",
        title: "Infinite Forest",
        description: "Dense woodland as far as the eye can see",
        settings: settings(BiomeKind::Forest, 5, true, true),
    },
    WorldPreset {
        id: "endlessDesert",
        title: "Endless Desert",
        description: "Rolling dunes of bare sand",
        settings: settings(BiomeKind::Desert, 3, true, false),
    },
    WorldPreset {
        id: "mountainous",
        title: "Mountainous",
        description: "Towering stone peaks and deep valleys",
        settings: settings(BiomeKind::Mountain, 6, true, true),
    },
    WorldPreset {
        id: "flatlands",
        title: "Flatlands",
        description: "Low flat plains, easy to build on",
        settings: settings(BiomeKind::Plains, 4, false, false),
    },
    WorldPreset {
        id: "archipelago",
        title: "Archipelago",
        description: "Scattered low islands of mixed terrain",
        settings: settings(BiomeKind::Mixed, 2, true, true),
    },
    WorldPreset {
        id: "underground",
        title: "Underground",
        description: "Thick rock riddled with caves",
        settings: settings(BiomeKind::Mixed, 8, true, false),
    },
    WorldPreset {
        id: "skylands",
        title: "Skylands",
        description: "High terrain without caves",
        settings: settings(BiomeKind::Mixed, 20, false, true),
    },
];

/// Пресет по идентификатору.
pub fn preset_by_id(id: &str) -> Option<&'static WorldPreset> {
    WORLD_PRESETS.iter().find(|preset| preset.id == id)
}
