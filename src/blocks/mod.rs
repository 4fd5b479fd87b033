// ============================================
// Blocks Module - Виды блоков и хотбар
// ============================================

pub mod hotbar;
pub mod types;

pub use hotbar::{Hotbar, HotbarSelection, DEFAULT_LAYOUT, HOTBAR_SLOTS};
pub use types::BlockKind;
