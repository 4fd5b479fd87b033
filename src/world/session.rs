// ============================================
// World Session - Игровая сессия одного мира
// ============================================
//
// Сессия дёргается каждый кадр с позицией игрока и сама решает,
// когда гонять стриминг чанков и когда сохраняться. Всё
// однопоточно: никакой работы между кадрами не происходит.

use std::time::{Duration, Instant};

use super::metadata::{Vec3, WorldRecord, WorldSettings};
use super::store::WorldStore;
use crate::biomes::BiomeGenerator;
use crate::blocks::{BlockKind, HotbarSelection};
use crate::save::SaveError;
use crate::terrain::{BlockPos, ChunkKey, ChunkManager, StreamingBudget, StreamingReport};

/// Интервал стриминга, когда игрок остаётся в своём чанке.
pub const STREAM_INTERVAL_MS: u64 = 500;
/// Задержка автосейва после последней правки.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 2_000;
/// Период фонового автосейва.
pub const AUTOSAVE_INTERVAL_MS: u64 = 300_000;

/// Тайминги и бюджет сессии. Значения по умолчанию боевые,
/// тесты подставляют короткие.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub stream_interval: Duration,
    pub autosave_debounce: Duration,
    pub autosave_interval: Duration,
    pub budget: StreamingBudget,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stream_interval: Duration::from_millis(STREAM_INTERVAL_MS),
            autosave_debounce: Duration::from_millis(AUTOSAVE_DEBOUNCE_MS),
            autosave_interval: Duration::from_millis(AUTOSAVE_INTERVAL_MS),
            budget: StreamingBudget::unlimited(),
        }
    }
}

/// Открытый мир: запись, менеджер чанков и таймеры.
pub struct WorldSession {
    record: WorldRecord,
    manager: ChunkManager,
    config: SessionConfig,
    last_stream: Option<Instant>,
    last_player_chunk: Option<ChunkKey>,
    edited_at: Option<Instant>,
    autosaved_at: Instant,
}

impl WorldSession {
    /// Новый мир в хранилище и сессия поверх него.
    pub fn create(
        store: &WorldStore,
        name: &str,
        settings: WorldSettings,
        seed: Option<i64>,
    ) -> Result<Self, SaveError> {
        Self::create_with(store, name, settings, seed, SessionConfig::default())
    }

    pub fn create_with(
        store: &WorldStore,
        name: &str,
        settings: WorldSettings,
        seed: Option<i64>,
        config: SessionConfig,
    ) -> Result<Self, SaveError> {
        let record = store.create_world(name, settings, seed)?;
        Ok(Self::from_record(record, config))
    }

    /// Сессия поверх сохранённого мира.
    pub fn open(store: &WorldStore, name: &str) -> Result<Self, SaveError> {
        Self::open_with(store, name, SessionConfig::default())
    }

    pub fn open_with(
        store: &WorldStore,
        name: &str,
        config: SessionConfig,
    ) -> Result<Self, SaveError> {
        let record = store.load_world(name)?;
        log::info!(
            "[WORLD] Сессия '{}' открыта ({} чанков в записи)",
            record.name,
            record.chunks.len()
        );
        Ok(Self::from_record(record, config))
    }

    fn from_record(record: WorldRecord, config: SessionConfig) -> Self {
        let settings = &record.settings;
        let generator = BiomeGenerator::new(
            record.seed,
            settings.biome,
            settings.base_height,
            settings.caves,
        );
        let mut manager = ChunkManager::new(
            generator,
            settings.chunk_size,
            settings.view_distance,
            settings.structures,
        );
        manager.set_budget(config.budget);
        Self {
            record,
            manager,
            config,
            last_stream: None,
            last_player_chunk: None,
            edited_at: None,
            autosaved_at: Instant::now(),
        }
    }

    /// Кадр сессии. Стриминг гоняется при смене чанка игрока либо
    /// по таймеру; между делом срабатывают автосейвы. None - кадр
    /// обошёлся без стриминга.
    pub fn update(
        &mut self,
        store: &WorldStore,
        position: Vec3,
        rotation: Vec3,
    ) -> Option<StreamingReport> {
        self.record.player_position = position;
        self.record.player_rotation = rotation;

        let player_chunk =
            ChunkKey::from_world(position.x, position.z, self.record.settings.chunk_size);
        let moved = self.last_player_chunk != Some(player_chunk);
        let due = self
            .last_stream
            .map_or(true, |at| at.elapsed() >= self.config.stream_interval);

        let report = if moved || due {
            self.last_stream = Some(Instant::now());
            self.last_player_chunk = Some(player_chunk);
            Some(
                self.manager
                    .update_streaming(&mut self.record.chunks, position.x, position.z),
            )
        } else {
            None
        };

        self.maybe_autosave(store);
        report
    }

    fn maybe_autosave(&mut self, store: &WorldStore) {
        let debounced = self
            .edited_at
            .map_or(false, |at| at.elapsed() >= self.config.autosave_debounce);
        let periodic = self.autosaved_at.elapsed() >= self.config.autosave_interval;
        if debounced || periodic {
            log::debug!("[SAVE] Автосейв мира '{}'", self.record.name);
            self.save(store);
        }
    }

    /// Установка выбранного блока. Успешная правка взводит
    /// отложенный автосейв.
    pub fn place_block(&mut self, pos: BlockPos, selection: HotbarSelection) -> bool {
        let placed = self.manager.place_block(pos, selection);
        if placed {
            self.edited_at = Some(Instant::now());
        }
        placed
    }

    /// Снятие блока. Успешная правка взводит отложенный автосейв.
    pub fn break_block(&mut self, pos: BlockPos) -> bool {
        let broken = self.manager.break_block(pos);
        if broken {
            self.edited_at = Some(Instant::now());
        }
        broken
    }

    /// Полное сохранение: снимки всех активных чанков ложатся в
    /// запись, запись в хранилище. Таймеры автосейва сбрасываются
    /// в любом случае, чтобы неудача не долбила лог каждый кадр.
    pub fn save(&mut self, store: &WorldStore) -> bool {
        self.manager.snapshot_into(&mut self.record.chunks);
        let saved = store.save_world(&mut self.record);
        self.edited_at = None;
        self.autosaved_at = Instant::now();
        saved
    }

    /// Закрытие мира: выгрузка всех чанков и финальное сохранение.
    pub fn close(mut self, store: &WorldStore) -> bool {
        let evicted = self.manager.evict_all(&mut self.record.chunks);
        log::info!(
            "[WORLD] Сессия '{}' закрывается, выгружено чанков: {}",
            self.record.name,
            evicted
        );
        store.save_world(&mut self.record)
    }

    #[inline]
    pub fn block_at(&self, pos: BlockPos) -> Option<BlockKind> {
        self.manager.block_at(pos)
    }

    #[inline]
    pub fn has_block_at(&self, pos: BlockPos) -> bool {
        self.manager.has_block_at(pos)
    }

    #[inline]
    pub fn light_at(&self, pos: BlockPos) -> u8 {
        self.manager.light_at(pos)
    }

    #[inline]
    pub fn active_chunk_count(&self) -> usize {
        self.manager.active_count()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.record.seed
    }

    #[inline]
    pub fn record(&self) -> &WorldRecord {
        &self.record
    }

    #[inline]
    pub fn manager(&self) -> &ChunkManager {
        &self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockKind, Hotbar};
    use crate::world::metadata::DEFAULT_SPAWN;

    fn temp_store(tag: &str) -> WorldStore {
        let dir = std::env::temp_dir().join(format!(
            "blockworld_session_{}_{}",
            tag,
            std::process::id()
        ));
        std::fs::remove_dir_all(&dir).ok();
        WorldStore::open(dir).unwrap()
    }

    fn drop_store(store: WorldStore) {
        std::fs::remove_dir_all(store.root()).ok();
    }

    fn quiet_config() -> SessionConfig {
        // Автосейвы в тестах не срабатывают сами
        SessionConfig {
            stream_interval: Duration::from_millis(0),
            autosave_debounce: Duration::from_secs(3600),
            autosave_interval: Duration::from_secs(3600),
            budget: StreamingBudget::unlimited(),
        }
    }

    #[test]
    fn test_create_stream_edit_save() {
        let store = temp_store("basic");
        let mut session = WorldSession::create_with(
            &store,
            "Basic",
            WorldSettings::default(),
            Some(42),
            quiet_config(),
        )
        .unwrap();

        let report = session.update(&store, DEFAULT_SPAWN, Vec3::ZERO).unwrap();
        assert_eq!(report.loaded, 9);
        assert_eq!(session.active_chunk_count(), 9);

        // Правка через выбор хотбара
        let mut hotbar = Hotbar::new();
        hotbar.select(6);
        let pos = BlockPos::new(2, 30, 2);
        assert!(session.place_block(pos, hotbar.selection()));
        assert_eq!(session.block_at(pos), Some(BlockKind::Glass));

        assert!(session.save(&store));
        let saved = store.load_world("Basic").unwrap();
        assert_eq!(saved.chunks.len(), 9);
        assert!(saved
            .chunks
            .values()
            .flat_map(|c| c.blocks.iter())
            .any(|b| b.kind == BlockKind::Glass));
        drop_store(store);
    }

    #[test]
    fn test_session_roundtrip_through_store() {
        let store = temp_store("reopen");
        let pos = BlockPos::new(4, 25, 4);
        {
            let mut session = WorldSession::create_with(
                &store,
                "Reopen",
                WorldSettings::default(),
                Some(7),
                quiet_config(),
            )
            .unwrap();
            session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);
            assert!(session.place_block(pos, HotbarSelection::new(BlockKind::Light)));
            assert!(session.close(&store));
        }

        let mut session = WorldSession::open_with(&store, "Reopen", quiet_config()).unwrap();
        assert_eq!(session.active_chunk_count(), 0);
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);
        assert_eq!(session.block_at(pos), Some(BlockKind::Light));
        // Позиция игрока пережила перезапуск
        assert_eq!(session.record().player_position, DEFAULT_SPAWN);
        drop_store(store);
    }

    #[test]
    fn test_stream_throttled_inside_same_chunk() {
        let store = temp_store("throttle");
        let config = SessionConfig {
            stream_interval: Duration::from_secs(3600),
            ..quiet_config()
        };
        let mut session =
            WorldSession::create_with(&store, "Throttle", WorldSettings::default(), Some(1), config)
                .unwrap();

        // Первый кадр стримит всегда
        assert!(session.update(&store, DEFAULT_SPAWN, Vec3::ZERO).is_some());
        // Шаг внутри того же чанка до таймера - пропуск
        let inside = Vec3::new(3.0, 20.0, 3.0);
        assert!(session.update(&store, inside, Vec3::ZERO).is_none());
        // Переход в соседний чанк стримит немедленно
        let next_chunk = Vec3::new(17.0, 20.0, 3.0);
        let report = session.update(&store, next_chunk, Vec3::ZERO).unwrap();
        assert!(report.loaded > 0);
        drop_store(store);
    }

    #[test]
    fn test_debounced_autosave_after_edit() {
        let store = temp_store("debounce");
        let config = SessionConfig {
            autosave_debounce: Duration::from_millis(1),
            ..quiet_config()
        };
        let mut session =
            WorldSession::create_with(&store, "Debounce", WorldSettings::default(), Some(1), config)
                .unwrap();
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);

        let pos = BlockPos::new(1, 30, 1);
        assert!(session.place_block(pos, HotbarSelection::new(BlockKind::Sand)));
        // До истечения задержки на диске пусто
        assert!(store.load_world("Debounce").unwrap().chunks.is_empty());

        std::thread::sleep(Duration::from_millis(5));
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);
        let saved = store.load_world("Debounce").unwrap();
        assert!(!saved.chunks.is_empty());
        assert!(saved
            .chunks
            .values()
            .flat_map(|c| c.blocks.iter())
            .any(|b| b.kind == BlockKind::Sand));
        drop_store(store);
    }

    #[test]
    fn test_periodic_autosave_without_edits() {
        let store = temp_store("periodic");
        let config = SessionConfig {
            autosave_interval: Duration::from_millis(1),
            ..quiet_config()
        };
        let mut session =
            WorldSession::create_with(&store, "Periodic", WorldSettings::default(), Some(1), config)
                .unwrap();
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);
        assert!(!store.load_world("Periodic").unwrap().chunks.is_empty());
        drop_store(store);
    }

    #[test]
    fn test_failed_edits_do_not_arm_autosave() {
        let store = temp_store("failed_edit");
        let config = SessionConfig {
            autosave_debounce: Duration::from_millis(1),
            ..quiet_config()
        };
        let mut session = WorldSession::create_with(
            &store,
            "FailedEdit",
            WorldSettings::default(),
            Some(1),
            config,
        )
        .unwrap();
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);

        // Правка вне активного окна отклонена и автосейв не взводит
        assert!(!session.place_block(
            BlockPos::new(900, 10, 900),
            HotbarSelection::new(BlockKind::Stone)
        ));
        std::thread::sleep(Duration::from_millis(5));
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);
        assert!(store.load_world("FailedEdit").unwrap().chunks.is_empty());
        drop_store(store);
    }

    #[test]
    fn test_close_persists_everything() {
        let store = temp_store("close");
        let mut session = WorldSession::create_with(
            &store,
            "Closing",
            WorldSettings::default(),
            Some(9),
            quiet_config(),
        )
        .unwrap();
        session.update(&store, DEFAULT_SPAWN, Vec3::ZERO);
        let walk = Vec3::new(40.0, 20.0, -20.0);
        session.update(&store, walk, Vec3::ZERO);
        assert!(session.close(&store));

        let record = store.load_world("Closing").unwrap();
        // Все побывавшие в памяти чанки легли в запись
        assert!(record.chunks.len() >= 9);
        assert_eq!(record.player_position, walk);
        drop_store(store);
    }
}
