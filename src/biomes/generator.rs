// ============================================
// Biome Generator - Детерминированный генератор террейна
// ============================================
//
// Никакого состояния между вызовами: каждый запрос отвечает
// только от сида и координат. Благодаря этому чанк можно
// сгенерировать заново в любой момент и получить байт в байт
// тот же результат.

use super::registry::biome_registry;
use super::types::BiomeKind;
use crate::blocks::BlockKind;

/// Смещение хеша для пещерного шума.
const CAVE_SALT: i64 = 1000;
/// Порог пещеры: меньше порога - воздух.
const CAVE_THRESHOLD: f32 = 0.15;
/// Пещеры не подходят к поверхности ближе двух блоков.
const CAVE_SURFACE_MARGIN: i32 = 2;

/// Детерминированный генератор одного мира.
/// Дешёвая Copy-структура: сид, биом и пара настроек.
#[derive(Debug, Clone, Copy)]
pub struct BiomeGenerator {
    seed: i64,
    biome: BiomeKind,
    base_height: i32,
    caves: bool,
}

impl BiomeGenerator {
    pub fn new(seed: i64, biome: BiomeKind, base_height: i32, caves: bool) -> Self {
        Self {
            seed,
            biome,
            base_height,
            caves,
        }
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    #[inline]
    pub fn biome(&self) -> BiomeKind {
        self.biome
    }

    #[inline]
    pub fn base_height(&self) -> i32 {
        self.base_height
    }

    /// Целочисленный хеш координат в диапазон [0, 1).
    /// Арифметика с переполнением в 32 битах, поэтому значения
    /// совпадают на любой платформе. Шаг решётки 1/1000.
    #[inline]
    pub fn seeded_random(&self, x: i32, z: i32, offset: i64) -> f32 {
        let mut hash = self.seed.wrapping_add(offset) as i32;
        hash = hash.wrapping_mul(31).wrapping_add(x);
        hash = hash.wrapping_mul(31).wrapping_add(z);
        (hash % 1000).abs() as f32 / 1000.0
    }

    /// Ступенчатый шум: столбцы квантуются ячейками scale x scale,
    /// все столбцы одной ячейки получают одно значение.
    #[inline]
    pub fn noise2d(&self, x: i32, z: i32, scale: i32, offset: i64) -> f32 {
        self.seeded_random(x.div_euclid(scale), z.div_euclid(scale), offset)
    }

    /// Высота поверхности столбца: базовая высота мира плюс вклад
    /// каждой октавы биома, каждый вклад округляется вниз отдельно.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let definition = biome_registry().get(self.biome);
        let mut height = self.base_height;
        for octave in definition.octaves {
            height += (self.noise2d(x, z, octave.scale, octave.offset) * octave.amplitude).floor()
                as i32;
        }
        height.max(1)
    }

    /// Попадает ли воксель в пещеру.
    #[inline]
    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        self.cave_at(x, y, z, self.height_at(x, z))
    }

    #[inline]
    fn cave_at(&self, x: i32, y: i32, z: i32, surface: i32) -> bool {
        self.caves
            && y <= surface - CAVE_SURFACE_MARGIN
            && self.seeded_random(x, z, y as i64 + CAVE_SALT) < CAVE_THRESHOLD
    }

    /// Блок в точке мира или None, если там воздух
    /// (выше поверхности либо пещера).
    pub fn block_kind_at(&self, x: i32, y: i32, z: i32) -> Option<BlockKind> {
        let surface = self.height_at(x, z);
        if y > surface || self.cave_at(x, y, z, surface) {
            return None;
        }

        let definition = biome_registry().get(self.biome);
        if y == surface {
            // Голые вершины: выше границы поверхность из глубинного камня
            let rocky = matches!(definition.rocky_above, Some(limit) if y > limit);
            return Some(if rocky {
                definition.deep
            } else {
                definition.surface
            });
        }
        if y > surface - 3 {
            return Some(definition.subsurface);
        }
        Some(definition.deep)
    }

    /// Вероятность дерева на столбце для биома мира.
    #[inline]
    pub fn tree_chance(&self) -> f32 {
        biome_registry().get(self.biome).tree_chance
    }
}
