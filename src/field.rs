use rand::{rngs::StdRng, SeedableRng};
use unicode_width::UnicodeWidthStr;

use crate::placement::random_position;

/// Items occupy a single terminal row.
pub const ITEM_HEIGHT: u16 = 1;

/// Bounds used until the host reports the real container size
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Random spots tried before falling back to a full scan
const PLACEMENT_ATTEMPTS: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ItemKind {
    Carrot,
    Bug,
}

impl ItemKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            ItemKind::Carrot => "🥕",
            ItemKind::Bug => "🐛",
        }
    }

    /// Display width of the glyph in terminal cells
    pub fn width(&self) -> u16 {
        self.glyph().width() as u16
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

/// Field-local coordinates, in cells
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub position: Position,
}

impl Item {
    /// Top-left cell the item is drawn at
    pub fn cell(&self) -> (u16, u16) {
        (
            self.position.x.max(0.0).floor() as u16,
            self.position.y.max(0.0).floor() as u16,
        )
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        let (x, y) = self.cell();
        col >= x
            && col < x.saturating_add(self.kind.width())
            && row >= y
            && row < y.saturating_add(ITEM_HEIGHT)
    }
}

/// An item the player clicked on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemClick {
    pub id: ItemId,
    pub kind: ItemKind,
}

/// The playing field: a fixed-size container of randomly scattered items
#[derive(Debug)]
pub struct Field {
    carrot_count: u32,
    bug_count: u32,
    width: u16,
    height: u16,
    items: Vec<Item>,
    next_id: u32,
    rng: StdRng,
}

impl Field {
    pub fn new(carrot_count: u32, bug_count: u32) -> Self {
        Self::with_rng(carrot_count, bug_count, StdRng::from_entropy())
    }

    /// Reproducible layouts for a given seed
    pub fn seeded(carrot_count: u32, bug_count: u32, seed: u64) -> Self {
        Self::with_rng(carrot_count, bug_count, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(carrot_count: u32, bug_count: u32, rng: StdRng) -> Self {
        Self {
            carrot_count,
            bug_count,
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            items: Vec::new(),
            next_id: 0,
            rng,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Update the container bounds. Items keep their relative position
    /// inside the new bounds, and carrots buried under other items are
    /// moved somewhere they can be clicked.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        let (old_width, old_height) = (self.width, self.height);
        self.width = width;
        self.height = height;
        for item in &mut self.items {
            let (old_max_x, old_max_y) = bounds_for(item.kind, old_width, old_height);
            let (max_x, max_y) = bounds_for(item.kind, width, height);
            item.position.x = rescale(item.position.x, old_max_x, max_x);
            item.position.y = rescale(item.position.y, old_max_y, max_y);
        }
        self.uncover_carrots();
    }

    /// Clear the field and scatter a fresh batch of carrots and bugs
    pub fn init(&mut self) {
        self.items.clear();
        self.add_items(ItemKind::Carrot, self.carrot_count);
        self.add_items(ItemKind::Bug, self.bug_count);
        self.uncover_carrots();
        tracing::debug!(
            items = self.items.len(),
            width = self.width,
            height = self.height,
            "field populated"
        );
    }

    fn add_items(&mut self, kind: ItemKind, count: u32) {
        let (max_x, max_y) = bounds_for(kind, self.width, self.height);
        for _ in 0..count {
            let x = random_position(&mut self.rng, 0.0, max_x);
            let y = random_position(&mut self.rng, 0.0, max_y);
            let id = ItemId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            self.items.push(Item {
                id,
                kind,
                position: Position { x, y },
            });
        }
    }

    /// Map a click in field-local cells to the item under it.
    /// Later items are drawn on top, so they win overlapping clicks.
    pub fn notify_click(&self, col: u16, row: u16) -> Option<ItemClick> {
        self.items
            .iter()
            .rev()
            .find(|item| item.contains(col, row))
            .map(|item| ItemClick {
                id: item.id,
                kind: item.kind,
            })
    }

    /// True if some cell of the item at `idx` is not covered by an item
    /// drawn above it
    fn is_exposed(&self, idx: usize) -> bool {
        let item = &self.items[idx];
        let (x, y) = item.cell();
        (x..x.saturating_add(item.kind.width())).any(|col| {
            !self.items[idx + 1..]
                .iter()
                .any(|above| above.contains(col, y))
        })
    }

    /// True if no item other than `idx` overlaps the cells of `idx`
    /// placed at `(x, y)`
    fn is_free(&self, idx: usize, x: u16, y: u16) -> bool {
        let width = self.items[idx].kind.width();
        self.items.iter().enumerate().all(|(other, item)| {
            other == idx || (x..x.saturating_add(width)).all(|col| !item.contains(col, y))
        })
    }

    /// Move every fully covered carrot to a spot no other item touches.
    /// On a field too crowded for that the carrot stays where it is.
    fn uncover_carrots(&mut self) {
        for idx in 0..self.items.len() {
            if self.items[idx].kind != ItemKind::Carrot || self.is_exposed(idx) {
                continue;
            }
            match self.free_spot(idx) {
                Some((x, y)) => {
                    tracing::trace!(id = ?self.items[idx].id, x, y, "uncovered carrot");
                    self.items[idx].position = Position {
                        x: x as f64,
                        y: y as f64,
                    };
                }
                None => {
                    tracing::debug!(id = ?self.items[idx].id, "no free spot for buried carrot")
                }
            }
        }
    }

    fn free_spot(&mut self, idx: usize) -> Option<(u16, u16)> {
        let (max_x, max_y) = bounds_for(self.items[idx].kind, self.width, self.height);
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = random_position(&mut self.rng, 0.0, max_x).floor() as u16;
            let y = random_position(&mut self.rng, 0.0, max_y).floor() as u16;
            if self.is_free(idx, x, y) {
                return Some((x, y));
            }
        }
        let (max_x, max_y) = (max_x as u16, max_y as u16);
        (0..=max_y)
            .flat_map(|y| (0..=max_x).map(move |x| (x, y)))
            .find(|&(x, y)| self.is_free(idx, x, y))
    }

    /// Returns false if the item was already gone
    pub fn remove(&mut self, id: ItemId) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn carrots_left(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.kind == ItemKind::Carrot)
            .count()
    }
}

/// Map `value` from `[0, old_max]` onto `[0, new_max]`
fn rescale(value: f64, old_max: f64, new_max: f64) -> f64 {
    if old_max <= 0.0 {
        return value.min(new_max);
    }
    (value * new_max / old_max).clamp(0.0, new_max)
}

fn bounds_for(kind: ItemKind, width: u16, height: u16) -> (f64, f64) {
    (
        width.saturating_sub(kind.width()) as f64,
        height.saturating_sub(ITEM_HEIGHT) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(carrots: u32, bugs: u32) -> Field {
        let mut field = Field::seeded(carrots, bugs, 1);
        field.resize(60, 20);
        field
    }

    #[test]
    fn glyphs_are_two_cells_wide() {
        assert_eq!(ItemKind::Carrot.width(), 2);
        assert_eq!(ItemKind::Bug.width(), 2);
    }

    #[test]
    fn init_spawns_configured_counts() {
        let mut field = field(5, 3);
        field.init();

        assert_eq!(field.len(), 8);
        assert_eq!(field.carrots_left(), 5);
        let bugs = field
            .items()
            .iter()
            .filter(|i| i.kind == ItemKind::Bug)
            .count();
        assert_eq!(bugs, 3);
    }

    #[test]
    fn init_replaces_previous_items() {
        let mut field = field(3, 3);
        field.init();
        let first: Vec<ItemId> = field.items().iter().map(|i| i.id).collect();

        field.init();
        assert_eq!(field.len(), 6);
        assert!(field.items().iter().all(|i| !first.contains(&i.id)));
    }

    #[test]
    fn items_stay_inside_bounds() {
        let mut field = field(50, 50);
        field.init();

        for item in field.items() {
            let (x, y) = item.cell();
            assert!(x + item.kind.width() <= 60, "{item:?} overflows width");
            assert!(y + ITEM_HEIGHT <= 20, "{item:?} overflows height");
        }
    }

    #[test]
    fn tiny_field_puts_everything_at_origin() {
        let mut field = Field::seeded(2, 2, 9);
        field.resize(1, 1);
        field.init();

        assert_eq!(field.len(), 4);
        assert!(field.items().iter().all(|i| i.cell() == (0, 0)));
    }

    #[test]
    fn click_maps_to_item_under_cursor() {
        let mut field = field(1, 0);
        field.init();
        let item = field.items()[0];
        let (x, y) = item.cell();

        let hit = field.notify_click(x + 1, y).expect("hit");
        assert_eq!(hit.id, item.id);
        assert_eq!(hit.kind, ItemKind::Carrot);
    }

    #[test]
    fn click_outside_items_is_ignored() {
        let mut field = Field::seeded(0, 0, 1);
        field.resize(10, 10);
        field.init();
        assert_eq!(field.notify_click(3, 3), None);
    }

    #[test]
    fn overlapping_click_hits_topmost() {
        let mut field = Field::seeded(1, 1, 1);
        field.resize(2, 1);
        field.init();

        let hit = field.notify_click(0, 0).expect("hit");
        assert_eq!(hit.kind, ItemKind::Bug);
    }

    #[test]
    fn remove_only_succeeds_once() {
        let mut field = field(2, 0);
        field.init();
        let id = field.items()[0].id;

        assert!(field.remove(id));
        assert!(!field.remove(id));
        assert_eq!(field.carrots_left(), 1);
    }

    #[test]
    fn resize_clamps_items() {
        let mut field = field(20, 0);
        field.init();
        field.resize(4, 2);

        for item in field.items() {
            let (x, y) = item.cell();
            assert!(x <= 2 && y <= 1, "{item:?} not clamped");
        }
    }

    fn clickable(field: &Field, item: &Item) -> bool {
        let (width, height) = field.size();
        (0..height).any(|row| {
            (0..width).any(|col| {
                field
                    .notify_click(col, row)
                    .is_some_and(|hit| hit.id == item.id)
            })
        })
    }

    #[test]
    fn carrots_stay_clickable_after_shrinking() {
        for seed in 0..50 {
            let mut field = Field::seeded(3, 3, seed);
            field.resize(78, 18);
            field.init();
            field.resize(6, 18);

            for carrot in field.items().iter().filter(|i| i.kind == ItemKind::Carrot) {
                assert!(clickable(&field, carrot), "seed {seed}: {carrot:?} is buried");
            }
        }
    }

    #[test]
    fn freshly_scattered_carrots_are_clickable() {
        for seed in 0..50 {
            let mut field = Field::seeded(5, 10, seed);
            field.resize(20, 6);
            field.init();

            for carrot in field.items().iter().filter(|i| i.kind == ItemKind::Carrot) {
                assert!(clickable(&field, carrot), "seed {seed}: {carrot:?} is buried");
            }
        }
    }

    #[test]
    fn resize_keeps_relative_position() {
        let mut field = Field::seeded(1, 0, 4);
        field.resize(42, 11);
        field.init();
        field.items[0].position = Position { x: 40.0, y: 10.0 };

        field.resize(22, 6);
        assert_eq!(field.items()[0].cell(), (20, 5));

        field.resize(42, 11);
        assert_eq!(field.items()[0].cell(), (40, 10));
    }

    #[test]
    fn unsized_field_uses_default_bounds() {
        let mut field = Field::seeded(4, 4, 2);
        assert_eq!(field.size(), DEFAULT_SIZE);

        field.init();
        for item in field.items() {
            let (x, y) = item.cell();
            assert!(x + item.kind.width() <= DEFAULT_SIZE.0, "{item:?}");
            assert!(y + ITEM_HEIGHT <= DEFAULT_SIZE.1, "{item:?}");
        }
    }

    #[test]
    fn clear_empties_field() {
        let mut field = field(3, 3);
        field.init();
        field.clear();
        assert!(field.is_empty());
    }
}
