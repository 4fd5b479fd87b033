// ============================================
// Light Grid - Колоночное освещение сверху вниз
// ============================================
//
// Простая модель без распространения в стороны: по каждому
// столбцу луч идёт от потолка освещения вниз, занятые клетки
// гасят его сильнее, чем воздух.

use std::collections::HashMap;

use super::voxel_store::{BlockPos, ChunkVoxels};

/// Максимальный уровень света.
pub const LIGHT_MAX: u8 = 15;
/// Потолок освещения. Сканирование столбца начинается отсюда;
/// воксели выше не освещаются и на столбец не влияют.
pub const LIGHT_CEILING: i32 = 32;
/// Ослабление луча занятой клеткой. Гасят все блоки,
/// включая стекло.
const SOLID_FALLOFF: u8 = 3;
/// Ослабление луча воздухом.
const AIR_FALLOFF: u8 = 1;

/// Карта уровней света одного чанка.
#[derive(Debug, Clone, Default)]
pub struct LightGrid {
    levels: HashMap<BlockPos, u8>,
}

impl LightGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Уровень света клетки; вне просчитанной области темно.
    #[inline]
    pub fn level(&self, pos: BlockPos) -> u8 {
        self.levels.get(&pos).copied().unwrap_or(0)
    }

    /// Полный пересчёт освещения чанка.
    pub fn recompute(&mut self, voxels: &ChunkVoxels) {
        self.levels.clear();
        for x in voxels.start_x()..voxels.end_x() {
            for z in voxels.start_z()..voxels.end_z() {
                self.scan_column(voxels, x, z);
            }
        }
    }

    /// Пересчёт одного столбца после правки блока. Скан столбца
    /// перезаписывает все его клетки, чистить отдельно не нужно.
    pub fn recompute_column(&mut self, voxels: &ChunkVoxels, x: i32, z: i32) {
        self.scan_column(voxels, x, z);
    }

    fn scan_column(&mut self, voxels: &ChunkVoxels, x: i32, z: i32) {
        let mut level = LIGHT_MAX;
        for y in (0..=LIGHT_CEILING).rev() {
            let pos = BlockPos::new(x, y, z);
            if voxels.has(pos) {
                self.levels.insert(pos, 0);
                level = level.saturating_sub(SOLID_FALLOFF);
            } else {
                self.levels.insert(pos, level);
                level = level.saturating_sub(AIR_FALLOFF);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
