use std::fmt::{self, Display, Formatter};

/// Labels are stored as `u8` so a board can have at most this many cells.
pub const MAX_TILES: usize = 256;

/// Coordinates are `u8` too.
pub const MAX_SIZE: usize = u8::MAX as usize;

/// The label of the blank cell.
pub const BLANK: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    pub fn dist(self, other: Pos) -> u32 {
        u32::from((i16::from(self.r) - i16::from(other.r)).unsigned_abs())
            + u32::from((i16::from(self.c) - i16::from(other.c)).unsigned_abs())
    }

    /// The neighboring position in `dir` if it's still inside a `rows` x `cols` grid.
    pub fn step(self, dir: Dir, rows: u8, cols: u8) -> Option<Pos> {
        let (r, c) = (i16::from(self.r), i16::from(self.c));
        let (dr, dc) = dir.offset();
        let (nr, nc) = (r + dr, c + dc);
        if nr < 0 || nc < 0 || nr >= i16::from(rows) || nc >= i16::from(cols) {
            None
        } else {
            Some(Pos::new(nr as u8, nc as u8))
        }
    }

    /// Direction of a neighboring cell, `None` if `other` is not orthogonally adjacent.
    pub fn dir_to(self, other: Pos) -> Option<Dir> {
        let dr = i16::from(other.r) - i16::from(self.r);
        let dc = i16::from(other.c) - i16::from(self.c);
        DIRECTIONS.iter().copied().find(|dir| dir.offset() == (dr, dc))
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

/// Direction the blank moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed expansion order - results depend on it.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

impl Dir {
    fn offset(self) -> (i16, i16) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
            Dir::Right => write!(f, "r"),
        }
    }
}
