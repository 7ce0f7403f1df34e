// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]

pub mod config;
pub mod data;
pub mod moves;
pub mod parser;
pub mod puzzle;
pub mod solver;

mod fs;
mod vec2d;

use std::error::Error;
use std::path::Path;

use crate::config::{Heuristic, Method};
use crate::puzzle::PuzzleState;
use crate::solver::{SolverErr, SolverOk};

pub trait LoadPuzzle {
    fn load_puzzle(&self) -> Result<PuzzleState, Box<dyn Error>>;
}

impl<P: AsRef<Path>> LoadPuzzle for P {
    fn load_puzzle(&self) -> Result<PuzzleState, Box<dyn Error>> {
        let puzzle = fs::read_file(self)?;
        Ok(puzzle.parse()?)
    }
}

pub trait Solve {
    fn solve(
        &self,
        method: Method,
        heuristic: Heuristic,
        print_status: bool,
    ) -> Result<SolverOk, SolverErr>;
}
