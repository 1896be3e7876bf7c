//! Breadth-first path search over footprint anchors.
//!
//! Works on any openness predicate so it stays independent of the grid
//! representation. Neighbors are scanned in `Direction::ALL` order
//! (up, down, left, right), which fixes every tie-break deterministically.

use std::collections::VecDeque;

use crate::domain::geometry::{Direction, Point, MAX_ANCHOR};

const ANCHORS: usize = (MAX_ANCHOR + 1) as usize;

#[inline]
fn idx(p: Point) -> usize {
    p.y as usize * ANCHORS + p.x as usize
}

/// Shortest direction sequence from `from` to the nearest field-boundary
/// anchor, stepping only through anchors `is_open` accepts. Returns an
/// empty path when `from` already sits on the boundary or when no boundary
/// is reachable (the caller treats both as "already out").
pub fn path_out(is_open: impl Fn(Point) -> bool, from: Point) -> VecDeque<Direction> {
    bfs(is_open, from, |p| p.is_boundary_anchor(), usize::MAX).unwrap_or_default()
}

/// Shortest direction sequence from `from` to `goal`, stepping only through
/// open anchors, `None` when unreachable or longer than `max_len`.
pub fn path_to(
    is_open: impl Fn(Point) -> bool,
    from: Point,
    goal: Point,
    max_len: usize,
) -> Option<VecDeque<Direction>> {
    bfs(is_open, from, |p| p == goal, max_len)
}

fn bfs(
    is_open: impl Fn(Point) -> bool,
    from: Point,
    is_goal: impl Fn(Point) -> bool,
    max_len: usize,
) -> Option<VecDeque<Direction>> {
    if !from.is_valid_anchor() {
        return None;
    }
    if is_goal(from) {
        return Some(VecDeque::new());
    }

    // Per-anchor arrival direction, kept for path reconstruction.
    let mut came_by: Vec<Option<Direction>> = vec![None; ANCHORS * ANCHORS];
    let mut dist: Vec<usize> = vec![0; ANCHORS * ANCHORS];
    let mut queue: VecDeque<Point> = VecDeque::with_capacity(256);
    let mut visited = vec![false; ANCHORS * ANCHORS];

    visited[idx(from)] = true;
    queue.push_back(from);

    while let Some(cur) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = cur.adj(dir);
            if !next.is_valid_anchor() || visited[idx(next)] || !is_open(next) {
                continue;
            }
            visited[idx(next)] = true;
            came_by[idx(next)] = Some(dir);
            dist[idx(next)] = dist[idx(cur)] + 1;
            if is_goal(next) {
                if dist[idx(next)] > max_len {
                    return None;
                }
                return Some(reconstruct(&came_by, from, next));
            }
            if dist[idx(next)] < max_len {
                queue.push_back(next);
            }
        }
    }

    None
}

fn reconstruct(came_by: &[Option<Direction>], from: Point, goal: Point) -> VecDeque<Direction> {
    let mut path = VecDeque::new();
    let mut cur = goal;
    while cur != from {
        let dir = came_by[idx(cur)].expect("reconstruct walked off the search tree");
        path.push_front(dir);
        cur = cur.adj(dir.opposite());
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(from: Point, path: &VecDeque<Direction>) -> Point {
        path.iter().fold(from, |p, &d| p.adj(d))
    }

    #[test]
    fn open_field_path_out_reaches_boundary() {
        let path = path_out(|_| true, Point::new(30, 30));
        let end = walk(Point::new(30, 30), &path);
        assert!(end.is_boundary_anchor());
        // Nearest edge is 30 anchors away on every side.
        assert_eq!(path.len(), 30);
    }

    #[test]
    fn path_out_from_boundary_is_empty() {
        assert!(path_out(|_| true, Point::new(0, 15)).is_empty());
    }

    #[test]
    fn path_out_never_enters_blocked_anchors() {
        // Wall every anchor except a corridor along y == 10.
        let is_open = |p: Point| p.y == 10;
        let from = Point::new(20, 10);
        let path = path_out(is_open, from);
        let mut cur = from;
        for &d in &path {
            cur = cur.adj(d);
            assert!(is_open(cur));
        }
        assert!(cur.is_boundary_anchor());
        assert_eq!(cur, Point::new(0, 10)); // left exit is nearest
    }

    #[test]
    fn tie_break_prefers_scan_order() {
        // Equidistant from top and bottom boundary: Up wins the tie.
        let path = path_out(|_| true, Point::new(30, 30));
        assert_eq!(path.front().copied(), Some(Direction::Up));
        assert!(path.iter().all(|&d| d == Direction::Up));
    }

    #[test]
    fn path_to_finds_shortest_route() {
        let from = Point::new(10, 10);
        let goal = Point::new(14, 12);
        let path = path_to(|_| true, from, goal, 100).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(walk(from, &path), goal);
    }

    #[test]
    fn path_to_respects_max_len() {
        let from = Point::new(10, 10);
        let goal = Point::new(30, 10);
        assert!(path_to(|_| true, from, goal, 19).is_none());
        assert!(path_to(|_| true, from, goal, 20).is_some());
    }

    #[test]
    fn path_to_unreachable_goal_is_none() {
        // Goal sealed off by its own predicate.
        let goal = Point::new(40, 40);
        let is_open = move |p: Point| p != goal;
        assert!(path_to(is_open, Point::new(10, 10), goal, 1000).is_none());
    }

    #[test]
    fn walls_force_a_detour() {
        // Vertical wall at x == 20 with a gap at y == 0.
        let is_open = |p: Point| p.x != 20 || p.y == 0;
        let from = Point::new(15, 5);
        let goal = Point::new(25, 5);
        let path = path_to(is_open, from, goal, 1000).unwrap();
        assert_eq!(walk(from, &path), goal);
        // Straight-line distance is 10; the detour through y == 0 is longer.
        assert!(path.len() > 10);
    }
}
