// ============================================
// Chunk - Воксели, свет, правки, снимки
// ============================================

use std::collections::{BTreeMap, HashSet};

use serde::{Serialize, Deserialize};

use super::chunk_key::ChunkKey;
use super::light::LightGrid;
use super::voxel_store::{BlockPos, ChunkVoxels};
use super::WORLD_CEILING;
use crate::biomes::features::{self, TreeParams};
use crate::biomes::generator::BiomeGenerator;
use crate::blocks::BlockKind;

/// Грань вокселя.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Top,
    Bottom,
    North,
    South,
    East,
    West,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::North,
        Face::South,
        Face::East,
        Face::West,
    ];

    /// Смещение к соседу за гранью.
    #[inline]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::East => (1, 0, 0),
            Face::West => (-1, 0, 0),
        }
    }

    #[inline]
    pub const fn neighbor(self, pos: BlockPos) -> BlockPos {
        let (dx, dy, dz) = self.offset();
        pos.offset(dx, dy, dz)
    }
}

/// Один воксель в снимке чанка.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBlock {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub kind: BlockKind,
}

/// Снимок чанка для записи мира: полный список занятых клеток.
/// Пустой список тоже значим: выкопанный дочиста чанк не должен
/// сгенерироваться заново при следующем визите.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedChunkRecord {
    pub blocks: Vec<SavedBlock>,
    pub last_saved: u64,
    #[serde(default)]
    pub player_modified: bool,
}

/// Карта снимков чанков мира, ключ "cx,cz".
/// BTreeMap ради стабильного порядка в экспортируемом документе.
pub type ChunkRecords = BTreeMap<String, PersistedChunkRecord>;

/// Воксель чанка, как его видит рендер.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelView {
    pub pos: BlockPos,
    pub kind: BlockKind,
    pub light: u8,
}

/// Активный чанк мира.
#[derive(Debug, Clone)]
pub struct Chunk {
    voxels: ChunkVoxels,
    light: LightGrid,
    emitters: HashSet<BlockPos>,
    modified: bool,
}

impl Chunk {
    /// Генерация чанка с нуля: террейн по столбцам, затем деревья,
    /// затем освещение.
    pub fn generate(
        key: ChunkKey,
        chunk_size: i32,
        generator: &BiomeGenerator,
        structures: bool,
    ) -> Chunk {
        let mut voxels = ChunkVoxels::new(key, chunk_size);
        for x in voxels.start_x()..voxels.end_x() {
            for z in voxels.start_z()..voxels.end_z() {
                let surface = generator.height_at(x, z);
                for y in 0..=surface {
                    if let Some(kind) = generator.block_kind_at(x, y, z) {
                        voxels.set(BlockPos::new(x, y, z), kind);
                    }
                }
            }
        }
        if structures {
            features::plant_trees(&mut voxels, generator, TreeParams::default());
        }
        Self::finish(voxels, false)
    }

    /// Восстановление чанка из снимка. Клетки мимо окна чанка или
    /// диапазона высот отбрасываются: снимок мог прийти из импорта.
    pub fn from_record(key: ChunkKey, chunk_size: i32, record: &PersistedChunkRecord) -> Chunk {
        let mut voxels = ChunkVoxels::new(key, chunk_size);
        let mut dropped = 0usize;
        for block in &record.blocks {
            if !voxels.set(BlockPos::new(block.x, block.y, block.z), block.kind) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!(
                "[CHUNK] Чанк {}: отброшено {} вокселей вне границ",
                key,
                dropped
            );
        }
        Self::finish(voxels, record.player_modified)
    }

    fn finish(voxels: ChunkVoxels, modified: bool) -> Chunk {
        let emitters = voxels
            .iter()
            .filter(|(_, kind)| kind.is_emitter())
            .map(|(pos, _)| pos)
            .collect();
        let mut light = LightGrid::new();
        light.recompute(&voxels);
        Chunk {
            voxels,
            light,
            emitters,
            modified,
        }
    }

    /// Снимок чанка. Воксели отсортированы по (x, z, y), чтобы
    /// документ был стабилен от сохранения к сохранению.
    pub fn to_record(&self, last_saved: u64) -> PersistedChunkRecord {
        let mut blocks: Vec<SavedBlock> = self
            .voxels
            .iter()
            .map(|(pos, kind)| SavedBlock {
                x: pos.x,
                y: pos.y,
                z: pos.z,
                kind,
            })
            .collect();
        blocks.sort_unstable_by_key(|b| (b.x, b.z, b.y));
        PersistedChunkRecord {
            blocks,
            last_saved,
            player_modified: self.modified,
        }
    }

    /// Установка блока игроком. Занятая клетка, чужое окно или
    /// выход за диапазон высот - молчаливый отказ.
    pub fn place(&mut self, pos: BlockPos, kind: BlockKind) -> bool {
        if self.voxels.has(pos) || !self.voxels.contains(pos) {
            return false;
        }
        self.voxels.set(pos, kind);
        if kind.is_emitter() {
            self.emitters.insert(pos);
        }
        self.light.recompute_column(&self.voxels, pos.x, pos.z);
        self.modified = true;
        true
    }

    /// Снятие блока игроком. Пустая клетка - молчаливый отказ.
    pub fn break_block(&mut self, pos: BlockPos) -> bool {
        if self.voxels.remove(pos).is_none() {
            return false;
        }
        self.emitters.remove(&pos);
        self.light.recompute_column(&self.voxels, pos.x, pos.z);
        self.modified = true;
        true
    }

    /// Видна ли грань вокселя. Грань рисуется, если сосед за ней
    /// не способен её закрыть: за пределами диапазона высот, в
    /// другом чанке, отсутствует или прозрачен.
    pub fn face_visible(&self, pos: BlockPos, face: Face) -> bool {
        let neighbor = face.neighbor(pos);
        if neighbor.y < 0 || neighbor.y > WORLD_CEILING {
            return true;
        }
        if !self.voxels.contains_column(neighbor.x, neighbor.z) {
            return true;
        }
        match self.voxels.get(neighbor) {
            None => true,
            Some(kind) => !kind.occludes(),
        }
    }

    /// Видимые грани вокселя.
    pub fn visible_faces(&self, pos: BlockPos) -> Vec<Face> {
        Face::ALL
            .into_iter()
            .filter(|face| self.face_visible(pos, *face))
            .collect()
    }

    /// Все воксели чанка с уровнями света.
    pub fn views(&self) -> impl Iterator<Item = VoxelView> + '_ {
        self.voxels.iter().map(|(pos, kind)| VoxelView {
            pos,
            kind,
            light: self.light.level(pos),
        })
    }

    #[inline]
    pub fn key(&self) -> ChunkKey {
        self.voxels.key()
    }

    #[inline]
    pub fn get(&self, pos: BlockPos) -> Option<BlockKind> {
        self.voxels.get(pos)
    }

    #[inline]
    pub fn has(&self, pos: BlockPos) -> bool {
        self.voxels.has(pos)
    }

    #[inline]
    pub fn light_at(&self, pos: BlockPos) -> u8 {
        self.light.level(pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Правил ли игрок этот чанк (переживает выгрузку и загрузку).
    #[inline]
    pub fn modified(&self) -> bool {
        self.modified
    }

    pub fn emitters(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.emitters.iter().copied()
    }

    pub fn voxels(&self) -> &ChunkVoxels {
        &self.voxels
    }
}
