// ============================================
// Voxel Store - Разреженное хранилище вокселей
// ============================================
//
// Хранятся только занятые клетки, воздух - отсутствие записи.
// Ключи в мировых координатах: чанк знает своё окно по x/z и
// отбрасывает всё, что в него не попадает.

use std::collections::HashMap;

use super::chunk_key::ChunkKey;
use super::WORLD_CEILING;
use crate::blocks::BlockKind;

/// Позиция блока в мировых координатах.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Чанк, которому принадлежит блок.
    #[inline]
    pub fn chunk_key(self, chunk_size: i32) -> ChunkKey {
        ChunkKey::from_block(self.x, self.z, chunk_size)
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> BlockPos {
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Воксели одного чанка.
#[derive(Debug, Clone)]
pub struct ChunkVoxels {
    key: ChunkKey,
    chunk_size: i32,
    voxels: HashMap<BlockPos, BlockKind>,
}

impl ChunkVoxels {
    pub fn new(key: ChunkKey, chunk_size: i32) -> Self {
        Self {
            key,
            chunk_size,
            voxels: HashMap::new(),
        }
    }

    #[inline]
    pub fn key(&self) -> ChunkKey {
        self.key
    }

    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Первый столбец чанка по x.
    #[inline]
    pub fn start_x(&self) -> i32 {
        self.key.x * self.chunk_size
    }

    /// Столбец за последним по x (эксклюзивно).
    #[inline]
    pub fn end_x(&self) -> i32 {
        self.start_x() + self.chunk_size
    }

    #[inline]
    pub fn start_z(&self) -> i32 {
        self.key.z * self.chunk_size
    }

    #[inline]
    pub fn end_z(&self) -> i32 {
        self.start_z() + self.chunk_size
    }

    /// Лежит ли столбец в окне чанка.
    #[inline]
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        x >= self.start_x() && x < self.end_x() && z >= self.start_z() && z < self.end_z()
    }

    /// Лежит ли позиция в чанке, включая диапазон по высоте.
    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.y >= 0 && pos.y <= WORLD_CEILING && self.contains_column(pos.x, pos.z)
    }

    #[inline]
    pub fn get(&self, pos: BlockPos) -> Option<BlockKind> {
        self.voxels.get(&pos).copied()
    }

    #[inline]
    pub fn has(&self, pos: BlockPos) -> bool {
        self.voxels.contains_key(&pos)
    }

    /// Запись вокселя. Позиция мимо окна чанка или выше потолка
    /// мира отбрасывается, занятая клетка перезаписывается.
    pub fn set(&mut self, pos: BlockPos, kind: BlockKind) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.voxels.insert(pos, kind);
        true
    }

    pub fn remove(&mut self, pos: BlockPos) -> Option<BlockKind> {
        self.voxels.remove(&pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, BlockKind)> + '_ {
        self.voxels.iter().map(|(pos, kind)| (*pos, *kind))
    }
}
