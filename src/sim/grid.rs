//! Occupancy grid: which static feature claims each cell.
//!
//! A fixed 64×64 array of per-cell tags, written in 4×4 footprint stamps.
//! The step loop keeps it consistent with the actor container: whatever
//! stamps cells on creation has them cleared in the same reap step that
//! frees the actor.

use crate::domain::geometry::{Direction, Point, FIELD_SIZE, FOOTPRINT};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CellTag {
    #[default]
    Empty,
    Ice,
    Boulder,
    /// Cells reserved by a buried oil barrel.
    Barrel,
}

#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    /// Indexed `cells[y][x]`.
    cells: Vec<Vec<CellTag>>,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        OccupancyGrid {
            cells: vec![vec![CellTag::Empty; FIELD_SIZE as usize]; FIELD_SIZE as usize],
        }
    }

    /// Tag at a single cell. Out-of-bounds coordinates read as `Empty`.
    #[inline]
    pub fn tag_at(&self, x: i32, y: i32) -> CellTag {
        if x < 0 || y < 0 || x >= FIELD_SIZE || y >= FIELD_SIZE {
            return CellTag::Empty;
        }
        self.cells[y as usize][x as usize]
    }

    /// Write a single cell. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tag: CellTag) {
        if x >= 0 && y >= 0 && x < FIELD_SIZE && y < FIELD_SIZE {
            self.cells[y as usize][x as usize] = tag;
        }
    }

    /// Write `tag` across the 4×4 footprint anchored at (x, y).
    /// Cells falling outside the field are skipped.
    pub fn stamp(&mut self, x: i32, y: i32, tag: CellTag) {
        for cy in y..y + FOOTPRINT {
            for cx in x..x + FOOTPRINT {
                self.set(cx, cy, tag);
            }
        }
    }

    /// Write the empty tag across the footprint anchored at (x, y).
    pub fn clear(&mut self, x: i32, y: i32) {
        self.stamp(x, y, CellTag::Empty);
    }

    /// The cells a footprint at (x, y) presents on its `dir`-most edge —
    /// the cells newly covered after a one-cell move in `dir`.
    fn edge_cells(x: i32, y: i32, dir: Direction) -> [(i32, i32); FOOTPRINT as usize] {
        let mut out = [(0, 0); FOOTPRINT as usize];
        for (i, slot) in out.iter_mut().enumerate() {
            let i = i as i32;
            *slot = match dir {
                Direction::Up => (x + i, y + FOOTPRINT - 1),
                Direction::Down => (x + i, y),
                Direction::Left => (x, y + i),
                Direction::Right => (x + FOOTPRINT - 1, y + i),
            };
        }
        out
    }

    fn edge_has(&self, x: i32, y: i32, dir: Direction, tag: CellTag) -> bool {
        Self::edge_cells(x, y, dir)
            .iter()
            .any(|&(cx, cy)| self.tag_at(cx, cy) == tag)
    }

    /// Would a footprint anchored at (x, y) carry a boulder on its leading
    /// edge in `dir`? Callers pass the prospective anchor of a move.
    pub fn is_boulder(&self, x: i32, y: i32, dir: Direction) -> bool {
        self.edge_has(x, y, dir, CellTag::Boulder)
    }

    /// Same leading-edge test for ice.
    pub fn is_ice(&self, x: i32, y: i32, dir: Direction) -> bool {
        self.edge_has(x, y, dir, CellTag::Ice)
    }

    /// Can a boulder anchored at (x, y) drop one more cell? False at the
    /// field floor and when any cell of the row beneath the footprint
    /// carries ice or another boulder.
    pub fn can_fall(&self, x: i32, y: i32) -> bool {
        if y <= 0 {
            return false;
        }
        for cx in x..x + FOOTPRINT {
            match self.tag_at(cx, y - 1) {
                CellTag::Ice | CellTag::Boulder => return false,
                _ => {}
            }
        }
        true
    }

    /// Any ice tag inside the 4×4 footprint anchored at (x, y)?
    pub fn has_ice_in_footprint(&self, x: i32, y: i32) -> bool {
        self.region_has(x, y, CellTag::Ice)
    }

    /// Any boulder tag inside the footprint anchored at (x, y)?
    pub fn has_boulder_in_footprint(&self, x: i32, y: i32) -> bool {
        self.region_has(x, y, CellTag::Boulder)
    }

    fn region_has(&self, x: i32, y: i32, tag: CellTag) -> bool {
        for cy in y..y + FOOTPRINT {
            for cx in x..x + FOOTPRINT {
                if self.tag_at(cx, cy) == tag {
                    return true;
                }
            }
        }
        false
    }

    /// Clear every ice tag in the footprint anchored at (x, y).
    /// Returns whether any ice was removed.
    pub fn remove_ice(&mut self, x: i32, y: i32) -> bool {
        let mut removed = false;
        for cy in y..y + FOOTPRINT {
            for cx in x..x + FOOTPRINT {
                if self.tag_at(cx, cy) == CellTag::Ice {
                    self.set(cx, cy, CellTag::Empty);
                    removed = true;
                }
            }
        }
        removed
    }

    /// Is the anchor free of ice and boulders across its whole footprint?
    /// The passability test behind protester wander and path search.
    pub fn anchor_open(&self, p: Point) -> bool {
        p.is_valid_anchor()
            && !self.has_ice_in_footprint(p.x, p.y)
            && !self.has_boulder_in_footprint(p.x, p.y)
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        OccupancyGrid::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_then_clear_round_trips() {
        let mut g = OccupancyGrid::new();
        g.stamp(10, 10, CellTag::Boulder);
        for cy in 10..14 {
            for cx in 10..14 {
                assert_eq!(g.tag_at(cx, cy), CellTag::Boulder);
            }
        }
        g.clear(10, 10);
        for cy in 0..FIELD_SIZE {
            for cx in 0..FIELD_SIZE {
                assert_eq!(g.tag_at(cx, cy), CellTag::Empty);
            }
        }
    }

    #[test]
    fn out_of_bounds_stamp_is_skipped() {
        let mut g = OccupancyGrid::new();
        g.stamp(62, 62, CellTag::Ice);
        assert_eq!(g.tag_at(63, 63), CellTag::Ice);
        // Nothing panicked and no wraparound cell was written.
        assert_eq!(g.tag_at(0, 0), CellTag::Empty);
    }

    #[test]
    fn out_of_bounds_query_is_empty() {
        let g = OccupancyGrid::new();
        assert_eq!(g.tag_at(-1, 5), CellTag::Empty);
        assert_eq!(g.tag_at(5, FIELD_SIZE), CellTag::Empty);
    }

    #[test]
    fn leading_edge_ice_detection() {
        let mut g = OccupancyGrid::new();
        // One ice cell just right of a footprint at (10, 10).
        g.set(14, 12, CellTag::Ice);
        // A move right lands the footprint at (11, 10): leading column x=14.
        assert!(g.is_ice(11, 10, Direction::Right));
        assert!(!g.is_ice(10, 10, Direction::Right));
        assert!(!g.is_ice(11, 10, Direction::Left));
    }

    #[test]
    fn can_fall_blocked_by_ice_boulder_and_floor() {
        let mut g = OccupancyGrid::new();
        assert!(!g.can_fall(10, 0)); // field floor
        assert!(g.can_fall(10, 20));
        g.set(11, 19, CellTag::Ice);
        assert!(!g.can_fall(10, 20)); // ice directly below
        g.set(11, 19, CellTag::Boulder);
        assert!(!g.can_fall(10, 20)); // boulder directly below
        g.set(11, 19, CellTag::Empty);
        assert!(g.can_fall(10, 20));
    }

    #[test]
    fn remove_ice_reports_and_clears() {
        let mut g = OccupancyGrid::new();
        g.stamp(20, 20, CellTag::Ice);
        assert!(g.has_ice_in_footprint(20, 20));
        assert!(g.remove_ice(20, 20));
        assert!(!g.has_ice_in_footprint(20, 20));
        assert!(!g.remove_ice(20, 20));
    }

    #[test]
    fn anchor_open_respects_bounds_and_tags() {
        let mut g = OccupancyGrid::new();
        assert!(g.anchor_open(Point::new(30, 30)));
        assert!(!g.anchor_open(Point::new(-1, 30)));
        assert!(!g.anchor_open(Point::new(61, 30)));
        g.stamp(30, 30, CellTag::Ice);
        assert!(!g.anchor_open(Point::new(30, 30)));
        assert!(!g.anchor_open(Point::new(27, 30))); // footprint clips the ice
    }
}
