// ============================================
// Biome Features - Генерация деревьев
// ============================================
//
// Проход по столбцам уже насыпанного чанка: на подходящих
// столбцах вырастает дерево. Решение принимает тот же хеш,
// что и террейн, поэтому лес одинаков при каждой генерации.

use super::generator::BiomeGenerator;
use crate::blocks::BlockKind;
use crate::terrain::voxel_store::{BlockPos, ChunkVoxels};

/// Смещение хеша для решения "расти ли дереву".
const TREE_GATE_SALT: i64 = 5000;
/// Смещение хеша для высоты ствола.
const TREE_TRUNK_SALT: i64 = 6000;
/// На столбцах ниже этой высоты деревья не растут.
const MIN_TREE_SURFACE: i32 = 2;

/// Диапазон высоты ствола.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub min_trunk: i32,
    pub max_trunk: i32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            min_trunk: 2,
            max_trunk: 5,
        }
    }
}

/// Вырастет ли дерево на столбце с данной поверхностью.
#[inline]
pub fn should_plant_tree(generator: &BiomeGenerator, x: i32, z: i32, surface: i32) -> bool {
    surface > MIN_TREE_SURFACE
        && generator.seeded_random(x, z, TREE_GATE_SALT) < generator.tree_chance()
}

/// Высота ствола для столбца, в диапазоне параметров.
#[inline]
pub fn trunk_height(generator: &BiomeGenerator, x: i32, z: i32, params: TreeParams) -> i32 {
    let spread = (params.max_trunk - params.min_trunk + 1) as f32;
    params.min_trunk + (generator.seeded_random(x, z, TREE_TRUNK_SALT) * spread).floor() as i32
}

/// Проход деревьев по чанку. Возвращает число посаженных деревьев.
pub fn plant_trees(
    voxels: &mut ChunkVoxels,
    generator: &BiomeGenerator,
    params: TreeParams,
) -> usize {
    let mut planted = 0;
    for x in voxels.start_x()..voxels.end_x() {
        for z in voxels.start_z()..voxels.end_z() {
            let surface = generator.height_at(x, z);
            if !should_plant_tree(generator, x, z, surface) {
                continue;
            }
            place_tree(voxels, x, surface, z, trunk_height(generator, x, z, params));
            planted += 1;
        }
    }
    planted
}

/// Одно дерево: ствол из брёвен и трёхслойная крона.
/// Крона у края чанка обрезается его окном.
fn place_tree(voxels: &mut ChunkVoxels, x: i32, surface: i32, z: i32, trunk: i32) {
    let base = surface + 1;
    for i in 0..trunk {
        voxels.set(BlockPos::new(x, base + i, z), BlockKind::OakLog);
    }

    let canopy = base + trunk;
    // Кольцо вокруг пустого центра
    for dx in -1..=1 {
        for dz in -1..=1 {
            if dx == 0 && dz == 0 {
                continue;
            }
            try_leaf(voxels, BlockPos::new(x + dx, canopy, z + dz));
        }
    }
    // Полный слой 3x3
    for dx in -1..=1 {
        for dz in -1..=1 {
            try_leaf(voxels, BlockPos::new(x + dx, canopy + 1, z + dz));
        }
    }
    // Верхушка
    try_leaf(voxels, BlockPos::new(x, canopy + 2, z));
}

/// Листва не затирает уже занятые клетки: соседний ствол важнее.
fn try_leaf(voxels: &mut ChunkVoxels, pos: BlockPos) {
    if !voxels.has(pos) {
        voxels.set(pos, BlockKind::Leaves);
    }
}
