// ============================================
// World Store - Хранилище миров
// ============================================
//
// Каталог файлов *.world, по файлу на мир. Файл именуется
// очищенным именем мира, каждое сохранение перезаписывает
// документ целиком.

use std::fs;
use std::path::{Path, PathBuf};

use super::metadata::{seed_from_name, WorldRecord, WorldSettings, WorldSummary};
use crate::save::{SaveError, WorldFile};
use crate::terrain::{ChunkKey, PersistedChunkRecord};

/// Расширение файлов мира.
pub const WORLD_FILE_EXT: &str = "world";

/// Лимиты хранилища.
#[derive(Debug, Clone, Copy)]
pub struct StoreLimits {
    /// Сколько недавних миров переживает чистку места.
    pub keep_recent: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self { keep_recent: 5 }
    }
}

/// Статистика одного мира.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldStats {
    pub name: String,
    pub seed: i64,
    pub chunk_count: usize,
    pub block_count: usize,
    pub size_bytes: u64,
    pub last_played: u64,
}

/// Каталог сохранённых миров.
pub struct WorldStore {
    root: PathBuf,
    limits: StoreLimits,
}

impl WorldStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SaveError> {
        Self::with_limits(root, StoreLimits::default())
    }

    pub fn with_limits(root: impl Into<PathBuf>, limits: StoreLimits) -> Result<Self, SaveError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, limits })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn world_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", sanitize_file_name(name), WORLD_FILE_EXT))
    }

    pub fn world_exists(&self, name: &str) -> bool {
        self.world_path(name).exists()
    }

    pub(crate) fn write_world(&self, record: &WorldRecord) -> Result<(), SaveError> {
        WorldFile::save(&self.world_path(&record.name), record)
    }

    /// Новый мир: сид явный либо выводится из имени. Запись сразу
    /// ложится на диск; одноимённый мир перезаписывается.
    pub fn create_world(
        &self,
        name: &str,
        settings: WorldSettings,
        seed: Option<i64>,
    ) -> Result<WorldRecord, SaveError> {
        if name.trim().is_empty() {
            return Err(SaveError::InvalidWorld("пустое имя мира".to_string()));
        }
        let seed = seed.unwrap_or_else(|| seed_from_name(name));
        let record = WorldRecord::new(name, seed, settings);
        self.write_world(&record)?;
        log::info!("[WORLD] Создан мир '{}' (сид {})", name, seed);
        Ok(record)
    }

    /// Сохранение мира с обновлением lastPlayed.
    ///
    /// Если запись не удалась, хранилище чистит самые старые миры
    /// и повторяет попытку один раз. Возвращает false с одним
    /// предупреждением в логе, когда не помогло и это.
    pub fn save_world(&self, record: &mut WorldRecord) -> bool {
        record.touch();
        match self.write_world(record) {
            Ok(()) => {
                log::info!(
                    "[SAVE] Мир '{}' сохранён ({} чанков)",
                    record.name,
                    record.chunks.len()
                );
                true
            }
            Err(first) => {
                log::debug!(
                    "[SAVE] Запись '{}' не удалась ({}), чищу старые миры",
                    record.name,
                    first
                );
                self.cleanup_old_worlds(&record.name);
                match self.write_world(record) {
                    Ok(()) => {
                        log::info!("[SAVE] Мир '{}' сохранён со второй попытки", record.name);
                        true
                    }
                    Err(second) => {
                        log::warn!("[SAVE] Мир '{}' не сохранён: {}", record.name, second);
                        false
                    }
                }
            }
        }
    }

    pub fn load_world(&self, name: &str) -> Result<WorldRecord, SaveError> {
        WorldFile::load(&self.world_path(name))
    }

    /// Загрузка мира, а при его отсутствии или порче - создание
    /// нового с теми же именем и настройками.
    pub fn load_or_create(
        &self,
        name: &str,
        settings: WorldSettings,
        seed: Option<i64>,
    ) -> WorldRecord {
        match self.load_world(name) {
            Ok(record) => {
                log::info!("[WORLD] Мир '{}' загружен", name);
                record
            }
            Err(err) => {
                if self.world_exists(name) {
                    log::warn!("[WORLD] Мир '{}' повреждён ({}), пересоздаю", name, err);
                }
                let seed = seed.unwrap_or_else(|| seed_from_name(name));
                let mut record = WorldRecord::new(name, seed, settings);
                self.save_world(&mut record);
                record
            }
        }
    }

    /// Сводки всех миров, свежие первыми. Повреждённые файлы
    /// пропускаются с записью в лог.
    pub fn list_worlds(&self) -> Vec<WorldSummary> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut worlds = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(WORLD_FILE_EXT) {
                continue;
            }
            match WorldFile::load(&path) {
                Ok(record) => worlds.push(record.summary()),
                Err(err) => {
                    log::error!("[WORLD] Пропускаю '{}': {}", path.display(), err);
                }
            }
        }
        worlds.sort_by(|a, b| b.last_played.cmp(&a.last_played));
        worlds
    }

    pub fn delete_world(&self, name: &str) -> bool {
        match fs::remove_file(self.world_path(name)) {
            Ok(()) => {
                log::info!("[WORLD] Мир '{}' удалён", name);
                true
            }
            Err(_) => false,
        }
    }

    pub fn delete_all_worlds(&self) -> usize {
        let mut removed = 0;
        if let Ok(entries) = fs::read_dir(&self.root) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some(WORLD_FILE_EXT) {
                    continue;
                }
                if fs::remove_file(&path).is_ok() {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            log::info!("[WORLD] Удалено миров: {}", removed);
        }
        removed
    }

    /// Чистка места: из миров, кроме текущего, остаются только
    /// keep_recent самых недавних, остальные удаляются.
    pub fn cleanup_old_worlds(&self, current: &str) -> usize {
        let mut others: Vec<WorldSummary> = self
            .list_worlds()
            .into_iter()
            .filter(|world| world.name != current)
            .collect();
        if others.len() <= self.limits.keep_recent {
            return 0;
        }
        let mut removed = 0;
        for world in others.split_off(self.limits.keep_recent) {
            if self.delete_world(&world.name) {
                removed += 1;
            }
        }
        if removed > 0 {
            log::info!("[WORLD] Чистка места: удалено старых миров {}", removed);
        }
        removed
    }

    pub fn world_stats(&self, name: &str) -> Result<WorldStats, SaveError> {
        let record = self.load_world(name)?;
        let size_bytes = fs::metadata(self.world_path(name))
            .map(|meta| meta.len())
            .unwrap_or(0);
        Ok(WorldStats {
            name: record.name.clone(),
            seed: record.seed,
            chunk_count: record.chunks.len(),
            block_count: record.block_count(),
            size_bytes,
            last_played: record.last_played,
        })
    }

    /// Один снимок чанка из записи мира на диске.
    pub fn load_chunk_record(
        &self,
        world: &str,
        key: ChunkKey,
    ) -> Result<Option<PersistedChunkRecord>, SaveError> {
        let mut record = self.load_world(world)?;
        Ok(record.chunks.remove(&key.storage_key()))
    }

    /// Замена одного снимка чанка в записи мира на диске.
    pub fn save_chunk_record(
        &self,
        world: &str,
        key: ChunkKey,
        chunk: PersistedChunkRecord,
    ) -> Result<(), SaveError> {
        let mut record = self.load_world(world)?;
        record.chunks.insert(key.storage_key(), chunk);
        self.write_world(&record)
    }
}

/// Имя файла из имени мира: всё враждебное файловой системе
/// заменяется подчёркиванием.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '(' || c == ')' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}
