//! Grid geometry: points, directions, bounding boxes.
//!
//! Coordinates are integer grid cells, y grows upward (the surface row is
//! y = 60). Every actor occupies a square footprint anchored at its
//! bottom-left cell; overlap and facing tests are pure functions with no
//! failure modes — malformed coordinates simply yield `false`.

/// Field extent in cells (both axes).
pub const FIELD_SIZE: i32 = 64;
/// Default actor footprint edge, in cells.
pub const FOOTPRINT: i32 = 4;
/// Largest anchor coordinate that keeps a default footprint in the field.
pub const MAX_ANCHOR: i32 = FIELD_SIZE - FOOTPRINT;
/// Row the player stands on at level start; ice fills the rows below it.
pub const SURFACE_Y: i32 = 60;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed scan order used for every directional tie-break.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two directions at right angles to this one.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// The axis-adjacent point one cell away in `dir`.
    pub fn adj(self, dir: Direction) -> Point {
        let (dx, dy) = dir.delta();
        Point { x: self.x + dx, y: self.y + dy }
    }

    /// Is this cell inside the field?
    pub fn is_in_bounds(self) -> bool {
        self.x >= 0 && self.x < FIELD_SIZE && self.y >= 0 && self.y < FIELD_SIZE
    }

    /// Can a default footprint anchored here stay inside the field?
    pub fn is_valid_anchor(self) -> bool {
        self.x >= 0 && self.x <= MAX_ANCHOR && self.y >= 0 && self.y <= MAX_ANCHOR
    }

    /// Does this anchor sit on the field boundary (a leave-field exit)?
    pub fn is_boundary_anchor(self) -> bool {
        self.x == 0 || self.x == MAX_ANCHOR || self.y == 0 || self.y == MAX_ANCHOR
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned square footprint anchored at an actor's origin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BoundingBox {
    pub origin: Point,
    pub size: i32,
}

impl BoundingBox {
    pub fn new(origin: Point, size: i32) -> Self {
        BoundingBox { origin, size }
    }

    /// Closed-interval overlap on both axes. Footprints that merely touch
    /// edge-to-edge (share no cell) do not intersect.
    pub fn intersects(self, other: BoundingBox) -> bool {
        if self.size <= 0 || other.size <= 0 {
            return false;
        }
        let a_max_x = self.origin.x + self.size - 1;
        let a_max_y = self.origin.y + self.size - 1;
        let b_max_x = other.origin.x + other.size - 1;
        let b_max_y = other.origin.y + other.size - 1;
        self.origin.x <= b_max_x
            && other.origin.x <= a_max_x
            && self.origin.y <= b_max_y
            && other.origin.y <= a_max_y
    }
}

/// Does `facing` at `pos` point along the axis toward `target`, with the
/// cross-axis offset inside the footprint tolerance?
pub fn is_facing(pos: Point, facing: Direction, target: Point) -> bool {
    let dx = target.x - pos.x;
    let dy = target.y - pos.y;
    match facing {
        Direction::Up => dy > 0 && dx.abs() < FOOTPRINT,
        Direction::Down => dy < 0 && dx.abs() < FOOTPRINT,
        Direction::Left => dx < 0 && dy.abs() < FOOTPRINT,
        Direction::Right => dx > 0 && dy.abs() < FOOTPRINT,
    }
}
