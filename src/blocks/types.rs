// ============================================
// Block Types - Виды блоков
// ============================================
//
// Воздух не является блоком: пустая клетка мира это просто
// отсутствие записи в хранилище чанка, поэтому варианта Air нет.

use serde::{Serialize, Deserialize};

/// Вид блока. Сериализуется текстовым тегом в camelCase,
/// чтобы документы мира оставались самоописываемыми.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Grass,
    Dirt,
    Stone,
    Sand,
    OakLog,
    Leaves,
    Glass,
    Light,
}

impl BlockKind {
    /// Все виды блоков в порядке объявления.
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Grass,
        BlockKind::Dirt,
        BlockKind::Stone,
        BlockKind::Sand,
        BlockKind::OakLog,
        BlockKind::Leaves,
        BlockKind::Glass,
        BlockKind::Light,
    ];

    /// Закрывает ли блок грань соседа. Сквозь стекло грани видны.
    #[inline]
    pub fn occludes(self) -> bool {
        !matches!(self, BlockKind::Glass)
    }

    /// Излучает ли блок свет. Сами уровни света считает колоночный
    /// проход в terrain::light, здесь только признак источника.
    #[inline]
    pub fn is_emitter(self) -> bool {
        matches!(self, BlockKind::Light)
    }
}
