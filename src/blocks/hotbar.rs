// ============================================
// Hotbar - Панель быстрого выбора блоков
// ============================================

use super::types::BlockKind;

/// Количество слотов хотбара (цифры 1-9).
pub const HOTBAR_SLOTS: usize = 9;

/// Раскладка слотов по умолчанию для нового мира.
pub const DEFAULT_LAYOUT: [BlockKind; HOTBAR_SLOTS] = [
    BlockKind::Grass,
    BlockKind::Stone,
    BlockKind::Dirt,
    BlockKind::Sand,
    BlockKind::OakLog,
    BlockKind::Leaves,
    BlockKind::Glass,
    BlockKind::Light,
    BlockKind::Stone,
];

/// Выбранный блок, снятый с хотбара в момент клика.
/// Операции редактирования принимают его явным параметром,
/// а не читают текущее состояние панели.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotbarSelection {
    kind: BlockKind,
}

impl HotbarSelection {
    pub fn new(kind: BlockKind) -> Self {
        Self { kind }
    }

    #[inline]
    pub fn kind(self) -> BlockKind {
        self.kind
    }
}

/// Панель из девяти слотов с одним активным.
#[derive(Debug, Clone)]
pub struct Hotbar {
    slots: [BlockKind; HOTBAR_SLOTS],
    selected: usize,
}

impl Hotbar {
    pub fn new() -> Self {
        Self {
            slots: DEFAULT_LAYOUT,
            selected: 0,
        }
    }

    /// Выбор слота по индексу 0..8. Неверный индекс молча игнорируется.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= HOTBAR_SLOTS {
            return false;
        }
        self.selected = index;
        true
    }

    /// Прокрутка колесом: +1 вперёд, -1 назад, с переходом через край.
    pub fn scroll(&mut self, delta: i32) {
        let len = HOTBAR_SLOTS as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }

    /// Замена блока в слоте. Неверный индекс молча игнорируется.
    pub fn set_slot(&mut self, index: usize, kind: BlockKind) -> bool {
        if index >= HOTBAR_SLOTS {
            return false;
        }
        self.slots[index] = kind;
        true
    }

    #[inline]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<BlockKind> {
        self.slots.get(index).copied()
    }

    #[inline]
    pub fn slots(&self) -> &[BlockKind; HOTBAR_SLOTS] {
        &self.slots
    }

    /// Текущий выбор для передачи в операцию установки блока.
    #[inline]
    pub fn selection(&self) -> HotbarSelection {
        HotbarSelection::new(self.slots[self.selected])
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new()
    }
}
