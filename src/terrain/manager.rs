// ============================================
// Chunk Manager - Стриминг чанков вокруг игрока
// ============================================
//
// Активное окно чанков следует за игроком. Загрузка идёт кольцами
// от ближних к дальним, выгрузка только за расширенной границей:
// радиус выгрузки на единицу больше радиуса загрузки, чтобы чанки
// не дрожали туда-сюда на границе окна.

use std::collections::HashMap;

use super::chunk::{Chunk, ChunkRecords};
use super::chunk_key::ChunkKey;
use super::voxel_store::BlockPos;
use crate::biomes::generator::BiomeGenerator;
use crate::blocks::{BlockKind, HotbarSelection};
use crate::save::epoch_ms;

/// Лимиты одного вызова стриминга. По умолчанию без лимитов;
/// режим производительности ограничивает вызов одной загрузкой
/// и одной выгрузкой, размазывая работу по кадрам.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingBudget {
    pub max_loads: usize,
    pub max_evicts: usize,
}

impl StreamingBudget {
    pub const fn unlimited() -> Self {
        Self {
            max_loads: usize::MAX,
            max_evicts: usize::MAX,
        }
    }

    /// Бюджет режима производительности: по одному чанку за кадр.
    pub const fn per_frame() -> Self {
        Self {
            max_loads: 1,
            max_evicts: 1,
        }
    }
}

impl Default for StreamingBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Итог одного вызова стриминга.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamingReport {
    pub loaded: usize,
    pub evicted: usize,
}

/// Менеджер активных чанков одного мира.
pub struct ChunkManager {
    generator: BiomeGenerator,
    chunk_size: i32,
    view_distance: i32,
    structures: bool,
    budget: StreamingBudget,
    active: HashMap<ChunkKey, Chunk>,
}

impl ChunkManager {
    pub fn new(
        generator: BiomeGenerator,
        chunk_size: i32,
        view_distance: i32,
        structures: bool,
    ) -> Self {
        Self {
            generator,
            chunk_size,
            view_distance,
            structures,
            budget: StreamingBudget::default(),
            active: HashMap::new(),
        }
    }

    /// Шаг стриминга вокруг позиции игрока. Недостающие чанки окна
    /// поднимаются из записей мира или генерируются, лишние
    /// выгружаются в записи. records - карта снимков текущего мира.
    pub fn update_streaming(
        &mut self,
        records: &mut ChunkRecords,
        player_x: f32,
        player_z: f32,
    ) -> StreamingReport {
        let player_chunk = ChunkKey::from_world(player_x, player_z, self.chunk_size);
        let mut report = StreamingReport::default();

        // Загрузка кольцами: сперва чанк игрока, потом всё дальше
        'rings: for radius in 0..=self.view_distance {
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    if dx.abs().max(dz.abs()) != radius {
                        continue;
                    }
                    let key = ChunkKey::new(player_chunk.x + dx, player_chunk.z + dz);
                    if self.active.contains_key(&key) {
                        continue;
                    }
                    if report.loaded >= self.budget.max_loads {
                        break 'rings;
                    }
                    self.load_chunk(key, records);
                    report.loaded += 1;
                }
            }
        }

        // Выгрузка с гистерезисом: дальние чанки первыми
        let mut stale: Vec<ChunkKey> = self
            .active
            .keys()
            .filter(|key| key.chebyshev(player_chunk) > self.view_distance + 1)
            .copied()
            .collect();
        stale.sort_unstable_by_key(|key| (-key.chebyshev(player_chunk), key.x, key.z));
        for key in stale.into_iter().take(self.budget.max_evicts) {
            self.evict_chunk(key, records);
            report.evicted += 1;
        }

        if report.loaded > 0 || report.evicted > 0 {
            log::debug!(
                "[CHUNK] Стриминг у {}: +{} -{}, активно {}",
                player_chunk,
                report.loaded,
                report.evicted,
                self.active.len()
            );
        }
        report
    }

    fn load_chunk(&mut self, key: ChunkKey, records: &ChunkRecords) {
        let chunk = match records.get(&key.storage_key()) {
            Some(record) => Chunk::from_record(key, self.chunk_size, record),
            None => Chunk::generate(key, self.chunk_size, &self.generator, self.structures),
        };
        self.active.insert(key, chunk);
    }

    /// Выгрузка чанка со снимком в записи мира. Снимок пишется
    /// всегда, даже пустой: выкопанный чанк не должен вернуться
    /// к сгенерированному виду.
    fn evict_chunk(&mut self, key: ChunkKey, records: &mut ChunkRecords) {
        if let Some(chunk) = self.active.remove(&key) {
            records.insert(key.storage_key(), chunk.to_record(epoch_ms()));
        }
    }

    /// Выгрузка всех активных чанков (закрытие мира).
    pub fn evict_all(&mut self, records: &mut ChunkRecords) -> usize {
        let keys: Vec<ChunkKey> = self.active.keys().copied().collect();
        let count = keys.len();
        for key in keys {
            self.evict_chunk(key, records);
        }
        count
    }

    /// Снимок всех активных чанков в записи мира без выгрузки
    /// (обычное сохранение по ходу игры).
    pub fn snapshot_into(&self, records: &mut ChunkRecords) {
        let now = epoch_ms();
        for (key, chunk) in &self.active {
            records.insert(key.storage_key(), chunk.to_record(now));
        }
    }

    /// Установка блока из выбора хотбара. Правки ложатся только в
    /// активные чанки; любой отказ молчалив.
    pub fn place_block(&mut self, pos: BlockPos, selection: HotbarSelection) -> bool {
        let key = pos.chunk_key(self.chunk_size);
        match self.active.get_mut(&key) {
            Some(chunk) => chunk.place(pos, selection.kind()),
            None => false,
        }
    }

    /// Снятие блока. Отказ молчалив, как и у установки.
    pub fn break_block(&mut self, pos: BlockPos) -> bool {
        let key = pos.chunk_key(self.chunk_size);
        match self.active.get_mut(&key) {
            Some(chunk) => chunk.break_block(pos),
            None => false,
        }
    }

    pub fn block_at(&self, pos: BlockPos) -> Option<BlockKind> {
        self.active
            .get(&pos.chunk_key(self.chunk_size))
            .and_then(|chunk| chunk.get(pos))
    }

    pub fn has_block_at(&self, pos: BlockPos) -> bool {
        self.block_at(pos).is_some()
    }

    /// Уровень света в точке; вне активных чанков темно.
    pub fn light_at(&self, pos: BlockPos) -> u8 {
        self.active
            .get(&pos.chunk_key(self.chunk_size))
            .map(|chunk| chunk.light_at(pos))
            .unwrap_or(0)
    }

    #[inline]
    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.active.get(&key)
    }

    #[inline]
    pub fn is_active(&self, key: ChunkKey) -> bool {
        self.active.contains_key(&key)
    }

    pub fn active_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.active.values()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn set_budget(&mut self, budget: StreamingBudget) {
        self.budget = budget;
    }

    #[inline]
    pub fn budget(&self) -> StreamingBudget {
        self.budget
    }

    #[inline]
    pub fn view_distance(&self) -> i32 {
        self.view_distance
    }

    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    #[inline]
    pub fn generator(&self) -> &BiomeGenerator {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::types::BiomeKind;
    use crate::blocks::BlockKind;

    fn manager(view_distance: i32) -> ChunkManager {
        let gen = BiomeGenerator::new(42, BiomeKind::Plains, 4, false);
        ChunkManager::new(gen, 16, view_distance, false)
    }

    #[test]
    fn test_initial_window_load() {
        let mut mgr = manager(1);
        let mut records = ChunkRecords::new();
        let report = mgr.update_streaming(&mut records, 8.0, 8.0);
        // Радиус 1 вокруг чанка (0, 0): квадрат 3x3
        assert_eq!(report.loaded, 9);
        assert_eq!(report.evicted, 0);
        assert_eq!(mgr.active_count(), 9);
        for dx in -1..=1 {
            for dz in -1..=1 {
                assert!(mgr.is_active(ChunkKey::new(dx, dz)));
            }
        }
    }

    #[test]
    fn test_move_loads_and_evicts_with_hysteresis() {
        let mut mgr = manager(1);
        let mut records = ChunkRecords::new();
        mgr.update_streaming(&mut records, 8.0, 8.0);

        // Игрок шагнул в чанк (2, 0)
        let report = mgr.update_streaming(&mut records, 40.0, 8.0);
        // Новое окно x 1..3: столбцы x = 2 и x = 3 новые
        assert_eq!(report.loaded, 6);
        // Выгружен только столбец x = -1 (дистанция 3 > 2),
        // столбец x = 0 на дистанции 2 остаётся из-за гистерезиса
        assert_eq!(report.evicted, 3);
        assert_eq!(mgr.active_count(), 12);
        assert!(mgr.is_active(ChunkKey::new(0, 0)));
        assert!(!mgr.is_active(ChunkKey::new(-1, 0)));
        assert!(records.contains_key("-1,0"));
        assert!(records.contains_key("-1,-1"));
        assert!(records.contains_key("-1,1"));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_idle_update_is_noop() {
        let mut mgr = manager(1);
        let mut records = ChunkRecords::new();
        mgr.update_streaming(&mut records, 8.0, 8.0);
        let report = mgr.update_streaming(&mut records, 9.0, 7.0);
        assert_eq!(report, StreamingReport::default());
    }

    #[test]
    fn test_budget_limits_loads_per_call() {
        let mut mgr = manager(1);
        mgr.set_budget(StreamingBudget::per_frame());
        let mut records = ChunkRecords::new();

        // Первый вызов поднимает только чанк игрока
        let report = mgr.update_streaming(&mut records, 8.0, 8.0);
        assert_eq!(report.loaded, 1);
        assert!(mgr.is_active(ChunkKey::new(0, 0)));
        assert_eq!(mgr.active_count(), 1);

        // Девять вызовов закрывают всё окно
        for _ in 0..8 {
            mgr.update_streaming(&mut records, 8.0, 8.0);
        }
        assert_eq!(mgr.active_count(), 9);
        let report = mgr.update_streaming(&mut records, 8.0, 8.0);
        assert_eq!(report.loaded, 0);
    }

    #[test]
    fn test_budget_limits_evicts_per_call() {
        let mut mgr = manager(1);
        let mut records = ChunkRecords::new();
        mgr.update_streaming(&mut records, 8.0, 8.0);

        // Телепорт далеко: всё старое окно за границей выгрузки
        mgr.set_budget(StreamingBudget {
            max_loads: 0,
            max_evicts: 1,
        });
        let report = mgr.update_streaming(&mut records, 1000.0, 1000.0);
        assert_eq!(report.loaded, 0);
        assert_eq!(report.evicted, 1);
        assert_eq!(mgr.active_count(), 8);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_eviction_roundtrip_keeps_edits() {
        let mut mgr = manager(1);
        let mut records = ChunkRecords::new();
        mgr.update_streaming(&mut records, 8.0, 8.0);

        // Правим чанк (0, 0): стекло сверху, снятый блок поверхности
        let placed = BlockPos::new(5, 10, 5);
        let mined = BlockPos::new(5, 4, 5);
        assert!(mgr.place_block(placed, HotbarSelection::new(BlockKind::Glass)));
        assert!(mgr.break_block(mined));

        // Уходим за границу выгрузки и возвращаемся
        mgr.update_streaming(&mut records, 100.0, 100.0);
        assert!(!mgr.is_active(ChunkKey::new(0, 0)));
        assert!(records.get("0,0").map(|r| r.player_modified).unwrap_or(false));

        mgr.update_streaming(&mut records, 8.0, 8.0);
        assert_eq!(mgr.block_at(placed), Some(BlockKind::Glass));
        assert_eq!(mgr.block_at(mined), None);
    }

    #[test]
    fn test_mined_out_chunk_stays_empty() {
        let gen = BiomeGenerator::new(42, BiomeKind::Plains, 4, false);
        let mut mgr = ChunkManager::new(gen, 16, 0, false);
        let mut records = ChunkRecords::new();
        mgr.update_streaming(&mut records, 8.0, 8.0);

        // Выкапываем чанк полностью
        let positions: Vec<BlockPos> = mgr
            .chunk(ChunkKey::new(0, 0))
            .map(|c| c.views().map(|v| v.pos).collect())
            .unwrap_or_default();
        assert!(!positions.is_empty());
        for pos in positions {
            assert!(mgr.break_block(pos));
        }

        // Выгрузка и возврат: пустой снимок победил генерацию
        mgr.update_streaming(&mut records, 1000.0, 1000.0);
        assert!(records.get("0,0").map(|r| r.blocks.is_empty()).unwrap_or(false));
        mgr.update_streaming(&mut records, 8.0, 8.0);
        assert_eq!(mgr.chunk(ChunkKey::new(0, 0)).map(|c| c.len()), Some(0));
    }

    #[test]
    fn test_edits_outside_active_window_fail() {
        let mut mgr = manager(1);
        let mut records = ChunkRecords::new();
        mgr.update_streaming(&mut records, 8.0, 8.0);
        let far = BlockPos::new(500, 10, 500);
        assert!(!mgr.place_block(far, HotbarSelection::new(BlockKind::Stone)));
        assert!(!mgr.break_block(far));
        assert_eq!(mgr.block_at(far), None);
        assert_eq!(mgr.light_at(far), 0);
    }

    #[test]
    fn test_structures_flag_gates_trees() {
        let forest = BiomeGenerator::new(42, BiomeKind::Forest, 5, false);
        let mut records = ChunkRecords::new();

        let mut bare = ChunkManager::new(forest, 16, 0, false);
        bare.update_streaming(&mut records, 24.0, 8.0); // чанк (1, 0)
        let logs = |mgr: &ChunkManager| {
            mgr.chunk(ChunkKey::new(1, 0))
                .map(|c| c.views().filter(|v| v.kind == BlockKind::OakLog).count())
                .unwrap_or(0)
        };
        assert_eq!(logs(&bare), 0);

        let mut records = ChunkRecords::new();
        let mut wooded = ChunkManager::new(forest, 16, 0, true);
        wooded.update_streaming(&mut records, 24.0, 8.0);
        assert!(logs(&wooded) > 0);
    }

    #[test]
    fn test_generation_is_stable_across_managers() {
        let gen = BiomeGenerator::new(777, BiomeKind::Mixed, 4, true);
        let mut a = ChunkManager::new(gen, 16, 1, true);
        let mut b = ChunkManager::new(gen, 16, 1, true);
        let mut records_a = ChunkRecords::new();
        let mut records_b = ChunkRecords::new();
        a.update_streaming(&mut records_a, 8.0, 8.0);
        b.update_streaming(&mut records_b, 8.0, 8.0);
        a.evict_all(&mut records_a);
        b.evict_all(&mut records_b);
        for (key, record) in &records_a {
            assert_eq!(&records_b[key].blocks, &record.blocks);
        }
    }

    #[test]
    fn test_snapshot_does_not_evict() {
        let mut mgr = manager(1);
        let mut records = ChunkRecords::new();
        mgr.update_streaming(&mut records, 8.0, 8.0);
        mgr.place_block(BlockPos::new(0, 10, 0), HotbarSelection::new(BlockKind::Sand));

        mgr.snapshot_into(&mut records);
        assert_eq!(records.len(), 9);
        assert_eq!(mgr.active_count(), 9);
        let saved = &records["0,0"];
        assert!(saved.player_modified);
        assert!(saved.blocks.iter().any(|b| b.kind == BlockKind::Sand));
    }
}
