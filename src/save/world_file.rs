// ============================================
// World File - Чтение/запись файла мира
// ============================================
//
// Формат: несжатый bincode-заголовок, затем тело записи мира
// (bincode), сжатое zstd.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::header::SaveHeader;
use crate::world::metadata::WorldRecord;

/// Уровень сжатия zstd: баланс скорости и размера.
const COMPRESSION_LEVEL: i32 = 3;

/// Ошибки сохранения и загрузки мира.
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Serialize(String),
    Deserialize(String),
    InvalidMagic,
    UnsupportedVersion(u32),
    Compression(String),
    /// Документ мира не прошёл проверку (импорт, повреждённые поля).
    InvalidWorld(String),
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::Io(err)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(err) => write!(f, "ошибка ввода-вывода: {}", err),
            SaveError::Serialize(msg) => write!(f, "ошибка сериализации: {}", msg),
            SaveError::Deserialize(msg) => write!(f, "ошибка разбора: {}", msg),
            SaveError::InvalidMagic => write!(f, "не файл мира (неверная магия)"),
            SaveError::UnsupportedVersion(v) => {
                write!(f, "неподдерживаемая версия формата: {}", v)
            }
            SaveError::Compression(msg) => write!(f, "ошибка сжатия: {}", msg),
            SaveError::InvalidWorld(msg) => write!(f, "некорректный мир: {}", msg),
        }
    }
}

impl std::error::Error for SaveError {}

/// Файловые операции над записью мира.
pub struct WorldFile;

impl WorldFile {
    pub fn save(path: &Path, record: &WorldRecord) -> Result<(), SaveError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header = SaveHeader::new(record.seed);
        let header_bytes =
            bincode::serialize(&header).map_err(|e| SaveError::Serialize(e.to_string()))?;
        writer.write_all(&header_bytes)?;

        let body = bincode::serialize(record).map_err(|e| SaveError::Serialize(e.to_string()))?;
        let compressed = zstd::encode_all(&body[..], COMPRESSION_LEVEL)
            .map_err(|e| SaveError::Compression(e.to_string()))?;
        writer.write_all(&compressed)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<WorldRecord, SaveError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let header_size = bincode::serialized_size(&SaveHeader::default()).unwrap_or(16) as usize;
        let mut header_bytes = vec![0u8; header_size];
        reader.read_exact(&mut header_bytes)?;
        let header: SaveHeader = bincode::deserialize(&header_bytes)
            .map_err(|e| SaveError::Deserialize(e.to_string()))?;
        if !header.is_magic_valid() {
            return Err(SaveError::InvalidMagic);
        }
        if !header.is_version_supported() {
            return Err(SaveError::UnsupportedVersion(header.version));
        }

        let mut compressed = Vec::new();
        reader.read_to_end(&mut compressed)?;
        let body =
            zstd::decode_all(&compressed[..]).map_err(|e| SaveError::Compression(e.to_string()))?;
        bincode::deserialize(&body).map_err(|e| SaveError::Deserialize(e.to_string()))
    }
}
