use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::data::BLANK;
use crate::puzzle::{PuzzleErr, PuzzleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Tile(usize, usize),
    Puzzle(PuzzleErr),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Tile(r, c) => write!(f, "Invalid tile at pos: [{}, {}]", r, c),
            ParserErr::Puzzle(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ParserErr {}

impl From<PuzzleErr> for ParserErr {
    fn from(err: PuzzleErr) -> Self {
        ParserErr::Puzzle(err)
    }
}

impl FromStr for PuzzleState {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// One line per row, tiles separated by whitespace, `0` or `_` for the blank.
pub(crate) fn parse(puzzle: &str) -> Result<PuzzleState, ParserErr> {
    // trim so we can specify boards using raw strings more easily
    let puzzle = puzzle.trim_matches('\n').trim_end();

    let mut tiles = Vec::new();
    for (r, line) in puzzle.lines().enumerate() {
        let mut row = Vec::new();
        for (c, token) in line.split_whitespace().enumerate() {
            let label = match token {
                "_" => BLANK,
                _ => token.parse().map_err(|_| ParserErr::Tile(r, c))?,
            };
            row.push(label);
        }
        tiles.push(row);
    }

    Ok(PuzzleState::from_rows(tiles)?)
}
