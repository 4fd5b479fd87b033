// ============================================
// World Snapshot - Экспорт и импорт миров
// ============================================
//
// Мир переезжает между машинами одним JSON-документом: та же
// запись мира, что лежит в файле, только в читаемом виде.

use super::store::WorldStore;
use crate::save::SaveError;
use crate::world::metadata::WorldRecord;

impl WorldStore {
    /// Экспорт мира в JSON. lastPlayed в документе обновляется,
    /// файл на диске не трогается.
    pub fn export_world(&self, name: &str) -> Result<String, SaveError> {
        let mut record = self.load_world(name)?;
        record.touch();
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| SaveError::Serialize(e.to_string()))?;
        log::info!(
            "[WORLD] Экспорт '{}': {} чанков, {} байт",
            name,
            record.chunks.len(),
            json.len()
        );
        Ok(json)
    }

    /// Импорт мира из JSON-документа.
    ///
    /// Документ разбирается и проверяется целиком до первой записи
    /// на диск: при любой ошибке хранилище остаётся как было. Если
    /// имя занято, мир получает свободное имя со счётчиком.
    /// Возвращает имя, под которым мир лёг в хранилище.
    pub fn import_world(&self, json: &str) -> Result<String, SaveError> {
        let mut record: WorldRecord =
            serde_json::from_str(json).map_err(|e| SaveError::InvalidWorld(e.to_string()))?;
        if record.name.trim().is_empty() {
            return Err(SaveError::InvalidWorld("пустое имя мира".to_string()));
        }

        record.name = self.vacant_name(&record.name);
        record.touch();
        self.write_world(&record)?;
        log::info!(
            "[WORLD] Импортирован мир '{}' ({} чанков)",
            record.name,
            record.chunks.len()
        );
        Ok(record.name)
    }

    /// Свободное имя: к занятому приписывается " (2)", " (3)" и
    /// так далее до первого свободного.
    fn vacant_name(&self, base: &str) -> String {
        if !self.world_exists(base) {
            return base.to_string();
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{} ({})", base, counter);
            if !self.world_exists(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockKind, HotbarSelection};
    use crate::terrain::{BlockPos, ChunkKey};
    use crate::world::metadata::WorldSettings;
    use crate::world::session::{SessionConfig, WorldSession};

    fn temp_store(tag: &str) -> WorldStore {
        let dir = std::env::temp_dir().join(format!(
            "blockworld_snapshot_{}_{}",
            tag,
            std::process::id()
        ));
        std::fs::remove_dir_all(&dir).ok();
        WorldStore::open(dir).unwrap()
    }

    fn drop_store(store: WorldStore) {
        std::fs::remove_dir_all(store.root()).ok();
    }

    #[test]
    fn test_export_import_roundtrip() {
        let store = temp_store("roundtrip");
        let mut session = WorldSession::create_with(
            &store,
            "Voyager",
            WorldSettings::default(),
            Some(42),
            SessionConfig::default(),
        )
        .unwrap();
        session.update(&store, crate::world::metadata::DEFAULT_SPAWN, Default::default());
        let placed = BlockPos::new(3, 30, 3);
        assert!(session.place_block(placed, HotbarSelection::new(BlockKind::Glass)));
        assert!(session.save(&store));

        let json = store.export_world("Voyager").unwrap();
        assert!(json.contains("\"voyager\"") || json.contains("\"Voyager\""));
        assert!(json.contains("\"oakLog\"") || json.contains("\"glass\""));

        // Импорт в то же хранилище: имя занято, берётся со счётчиком
        let imported = store.import_world(&json).unwrap();
        assert_eq!(imported, "Voyager (2)");
        let record = store.load_world("Voyager (2)").unwrap();
        assert_eq!(record.seed, 42);
        assert!(record
            .chunks
            .values()
            .flat_map(|c| c.blocks.iter())
            .any(|b| b.kind == BlockKind::Glass));
        drop_store(store);
    }

    #[test]
    fn test_import_into_empty_store_keeps_name() {
        let source = temp_store("source");
        source
            .create_world("Nomad", WorldSettings::default(), Some(7))
            .unwrap();
        let json = source.export_world("Nomad").unwrap();

        let target = temp_store("target");
        assert_eq!(target.import_world(&json).unwrap(), "Nomad");
        assert_eq!(target.load_world("Nomad").unwrap().seed, 7);
        drop_store(source);
        drop_store(target);
    }

    #[test]
    fn test_import_counter_walks_forward() {
        let store = temp_store("counter");
        store
            .create_world("Twin", WorldSettings::default(), Some(1))
            .unwrap();
        let json = store.export_world("Twin").unwrap();
        assert_eq!(store.import_world(&json).unwrap(), "Twin (2)");
        assert_eq!(store.import_world(&json).unwrap(), "Twin (3)");
        drop_store(store);
    }

    #[test]
    fn test_import_rejects_broken_documents() {
        let store = temp_store("reject");
        // Не JSON
        assert!(matches!(
            store.import_world("not json at all"),
            Err(SaveError::InvalidWorld(_))
        ));
        // Без сида
        assert!(matches!(
            store.import_world(r#"{"name":"NoSeed"}"#),
            Err(SaveError::InvalidWorld(_))
        ));
        // Пустое имя
        assert!(matches!(
            store.import_world(r#"{"name":"  ","seed":1}"#),
            Err(SaveError::InvalidWorld(_))
        ));
        // Хранилище не тронуто
        assert!(store.list_worlds().is_empty());
        drop_store(store);
    }

    #[test]
    fn test_import_fills_partial_document() {
        let store = temp_store("partial");
        let name = store
            .import_world(r#"{"name":"Bare","seed":123}"#)
            .unwrap();
        let record = store.load_world(&name).unwrap();
        assert_eq!(record.settings, WorldSettings::default());
        assert!(record.chunks.is_empty());
        assert!(record.last_played > 0);
        drop_store(store);
    }

    #[test]
    fn test_imported_world_is_playable() {
        let store = temp_store("playable");
        let name = store
            .import_world(r#"{"name":"Fresh","seed":42}"#)
            .unwrap();
        let mut session = WorldSession::open(&store, &name).unwrap();
        let report = session
            .update(&store, crate::world::metadata::DEFAULT_SPAWN, Default::default())
            .unwrap();
        assert_eq!(report.loaded, 9);
        // Детерминированный террейн от сида 42
        assert!(session.block_at(BlockPos::new(5, 4, 5)).is_some());
        assert!(session.manager().is_active(ChunkKey::new(0, 0)));
        drop_store(store);
    }
}
