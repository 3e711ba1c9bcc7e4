use glam::Vec3;
use std::collections::HashMap;

use super::block::BlockId;

/// Cell coordinate. Float-to-int casts saturate, so far-out positions pile
/// into the boundary cells instead of overflowing.
type Cell = (i64, i64, i64);

/// Uniform hash grid over block positions.
///
/// Answers "earliest-inserted block strictly within `radius` of a point" by
/// scanning the cells that can hold such a block, which gives the same answer
/// as a linear scan over all blocks in insertion order.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f32,
    cells: HashMap<Cell, Vec<(BlockId, Vec3)>>,
    len: usize,
}

impl SpatialIndex {
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0);
        Self {
            cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn cell_of(&self, position: Vec3) -> Cell {
        let scaled = (position / self.cell_size).floor();
        (scaled.x as i64, scaled.y as i64, scaled.z as i64)
    }

    pub fn insert(&mut self, id: BlockId, position: Vec3) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push((id, position));
        self.len += 1;
    }

    pub fn remove(&mut self, id: BlockId, position: Vec3) -> bool {
        let cell = self.cell_of(position);
        let Some(entries) = self.cells.get_mut(&cell) else {
            return false;
        };
        let Some(slot) = entries.iter().position(|(entry_id, _)| *entry_id == id) else {
            return false;
        };
        entries.remove(slot);
        if entries.is_empty() {
            self.cells.remove(&cell);
        }
        self.len -= 1;
        true
    }

    /// Earliest-inserted entry with `distance(point) < radius`.
    pub fn first_within(&self, point: Vec3, radius: f32) -> Option<BlockId> {
        let rings = ((radius / self.cell_size).ceil() as i64).max(1);
        let (cx, cy, cz) = self.cell_of(point);
        let mut best: Option<BlockId> = None;
        let mut visit = |cell: Cell| {
            for (id, position) in self.cells.get(&cell).into_iter().flatten() {
                if position.distance(point) < radius && best.map_or(true, |b| *id < b) {
                    best = Some(*id);
                }
            }
        };

        // Saturated neighbours can repeat a boundary cell; repeats are harmless
        for dx in -rings..=rings {
            for dy in -rings..=rings {
                for dz in -rings..=rings {
                    visit((
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    ));
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut index = SpatialIndex::new(1.0);
        index.insert(BlockId(0), Vec3::new(0.5, 1.0, -5.0));
        index.insert(BlockId(1), Vec3::new(10.0, 1.0, 0.0));
        assert_eq!(index.len(), 2);

        assert!(index.remove(BlockId(0), Vec3::new(0.5, 1.0, -5.0)));
        assert!(!index.remove(BlockId(0), Vec3::new(0.5, 1.0, -5.0)));
        assert_eq!(index.len(), 1);

        assert!(index.remove(BlockId(1), Vec3::new(10.0, 1.0, 0.0)));
        assert!(index.is_empty());
    }

    #[test]
    fn test_first_within_crosses_cell_borders() {
        let mut index = SpatialIndex::new(1.0);
        index.insert(BlockId(4), Vec3::new(0.95, 0.0, 0.0));
        assert_eq!(index.first_within(Vec3::new(1.05, 0.0, 0.0), 1.0), Some(BlockId(4)));
        assert_eq!(index.first_within(Vec3::new(-0.2, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn test_first_within_prefers_earliest_insert() {
        let mut index = SpatialIndex::new(1.0);
        index.insert(BlockId(9), Vec3::new(0.1, 0.0, 0.0));
        index.insert(BlockId(2), Vec3::new(0.8, 0.0, 0.0));
        // id 2 is farther but was inserted first
        assert_eq!(index.first_within(Vec3::ZERO, 1.0), Some(BlockId(2)));
    }

    #[test]
    fn test_first_within_is_strict() {
        let mut index = SpatialIndex::new(1.0);
        index.insert(BlockId(0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(index.first_within(Vec3::ZERO, 1.0), None);
    }

    #[test]
    fn test_radius_wider_than_cell() {
        let mut index = SpatialIndex::new(0.5);
        index.insert(BlockId(0), Vec3::new(1.6, 0.0, 0.0));
        assert_eq!(index.first_within(Vec3::ZERO, 1.7), Some(BlockId(0)));
        assert_eq!(index.first_within(Vec3::ZERO, 1.5), None);
    }

    #[test]
    fn test_far_positions_do_not_overflow() {
        let mut index = SpatialIndex::new(0.001);
        let far = Vec3::new(-3.0e30, 1.0, 3.0e30);
        index.insert(BlockId(0), far);
        assert_eq!(index.first_within(far, 0.001), Some(BlockId(0)));
        assert_eq!(index.first_within(Vec3::new(f32::MAX, 0.0, 0.0), 0.001), None);
        assert!(index.remove(BlockId(0), far));
    }
}
