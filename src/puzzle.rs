use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter;

use rand::Rng;

use crate::data::{Dir, Pos, BLANK, DIRECTIONS, MAX_SIZE, MAX_TILES};
use crate::vec2d::Vec2d;

pub const DEFAULT_SHUFFLE_STEPS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleErr {
    InvalidDimensions(usize, usize),
    NotPermutation,
}

impl Display for PuzzleErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            PuzzleErr::InvalidDimensions(rows, cols) => write!(
                f,
                "Invalid dimensions {}x{} - need at least 1x1, at most {} rows/columns and {} cells",
                rows, cols, MAX_SIZE, MAX_TILES
            ),
            PuzzleErr::NotPermutation => write!(
                f,
                "Tiles must be a permutation of 0..rows*cols with 0 as the blank"
            ),
        }
    }
}

impl Error for PuzzleErr {}

/// One arrangement of the tiles.
///
/// Labels are `1..rows*cols` with `0` (`BLANK`) for the empty cell.
/// The goal has the labels in row-major order and the blank in the last cell.
///
/// States are values - moving the blank produces a new state
/// so a state held by the solver can never alias a board someone else is displaying.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    grid: Vec2d<u8>,
    blank: Pos,
}

impl PuzzleState {
    /// The solved board.
    pub fn new(rows: usize, cols: usize) -> Result<PuzzleState, PuzzleErr> {
        check_dimensions(rows, cols)?;

        let cells = rows * cols;
        let data = (1..cells)
            .map(|label| label as u8)
            .chain(iter::once(BLANK))
            .collect();
        let (rows, cols) = (rows as u8, cols as u8);
        Ok(PuzzleState {
            grid: Vec2d::from_vec(data, rows, cols),
            blank: Pos::new(rows - 1, cols - 1),
        })
    }

    /// Any permutation is accepted, even an unsolvable one - check your input.
    pub fn from_rows(tiles: Vec<Vec<u8>>) -> Result<PuzzleState, PuzzleErr> {
        let rows = tiles.len();
        let cols = tiles.first().map_or(0, |row| row.len());
        check_dimensions(rows, cols)?;
        if let Some(row) = tiles.iter().find(|row| row.len() != cols) {
            return Err(PuzzleErr::InvalidDimensions(rows, row.len()));
        }

        let cells = rows * cols;
        let mut seen = vec![false; cells];
        let data: Vec<u8> = tiles.into_iter().flatten().collect();
        for &label in &data {
            let label = usize::from(label);
            if label >= cells || seen[label] {
                return Err(PuzzleErr::NotPermutation);
            }
            seen[label] = true;
        }

        let grid = Vec2d::from_vec(data, rows as u8, cols as u8);
        // permutation check above guarantees exactly one blank
        let blank = grid
            .iter()
            .find(|&(_, &label)| label == BLANK)
            .map(|(pos, _)| pos)
            .ok_or(PuzzleErr::NotPermutation)?;
        Ok(PuzzleState { grid, blank })
    }

    pub fn rows(&self) -> usize {
        usize::from(self.grid.rows())
    }

    pub fn cols(&self) -> usize {
        usize::from(self.grid.cols())
    }

    pub fn blank(&self) -> Pos {
        self.blank
    }

    pub fn tile(&self, pos: Pos) -> Option<u8> {
        if pos.r < self.grid.rows() && pos.c < self.grid.cols() {
            Some(self.grid[pos])
        } else {
            None
        }
    }

    /// Number of non-blank tiles not on their goal cell.
    pub fn hamming_distance(&self) -> u32 {
        self.grid
            .iter()
            .filter(|&(pos, &label)| label != BLANK && label != self.goal_label(pos))
            .count() as u32
    }

    /// Sum of grid distances of non-blank tiles to their goal cells.
    ///
    /// Admissible - one move shifts one tile by one cell.
    pub fn manhattan_distance(&self) -> u32 {
        self.grid
            .iter()
            .filter(|&(_, &label)| label != BLANK)
            .map(|(pos, &label)| pos.dist(self.goal_pos(label)))
            .sum()
    }

    pub fn is_solved(&self) -> bool {
        self.hamming_distance() == 0
    }

    /// Moves the blank one cell in `dir`, `None` if that would leave the board.
    pub fn moved(&self, dir: Dir) -> Option<PuzzleState> {
        let target = self.blank.step(dir, self.grid.rows(), self.grid.cols())?;
        let mut grid = self.grid.clone();
        grid.swap(self.blank, target);
        Some(PuzzleState {
            grid,
            blank: target,
        })
    }

    /// Slides the tile at `pos` into the blank if they're adjacent.
    pub fn slide(&self, pos: Pos) -> Option<PuzzleState> {
        let dir = self.blank.dir_to(pos)?;
        self.moved(dir)
    }

    /// Makes exactly `steps` random legal moves.
    ///
    /// Directions that would leave the board are drawn again so they don't count as a step.
    /// Starting from a solvable state (e.g. `new`) the result is always solvable.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R, steps: usize) -> PuzzleState {
        let mut state = self.clone();
        if state.rows() == 1 && state.cols() == 1 {
            // no legal moves at all
            return state;
        }

        let mut applied = 0;
        while applied < steps {
            let dir = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
            if let Some(next) = state.moved(dir) {
                state = next;
                applied += 1;
            }
        }
        state
    }

    /// All states one move away, blank moving up, down, left, right in that order.
    pub fn neighbours(&self) -> Vec<PuzzleState> {
        DIRECTIONS.iter().filter_map(|&dir| self.moved(dir)).collect()
    }

    /// The blank move leading to `other`, if it's a neighbour.
    pub fn dir_to(&self, other: &PuzzleState) -> Option<Dir> {
        let dir = self.blank.dir_to(other.blank)?;
        match self.moved(dir) {
            Some(ref next) if next == other => Some(dir),
            _ => None,
        }
    }

    fn goal_label(&self, pos: Pos) -> u8 {
        let index = usize::from(pos.r) * self.cols() + usize::from(pos.c);
        if index + 1 == self.rows() * self.cols() {
            BLANK
        } else {
            (index + 1) as u8
        }
    }

    fn goal_pos(&self, label: u8) -> Pos {
        let index = usize::from(label) - 1;
        Pos::new((index / self.cols()) as u8, (index % self.cols()) as u8)
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), PuzzleErr> {
    if rows == 0 || cols == 0 || rows > MAX_SIZE || cols > MAX_SIZE {
        return Err(PuzzleErr::InvalidDimensions(rows, cols));
    }
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_TILES => Ok(()),
        _ => Err(PuzzleErr::InvalidDimensions(rows, cols)),
    }
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = (self.rows() * self.cols() - 1).to_string().len();
        for r in 0..self.grid.rows() {
            for c in 0..self.grid.cols() {
                if c > 0 {
                    write!(f, " ")?;
                }
                let label = self.grid[Pos::new(r, c)];
                if label == BLANK {
                    write!(f, "{:>width$}", "_", width = width)?;
                } else {
                    write!(f, "{:>width$}", label, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for PuzzleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
