use std::env;
use std::process;

use clap::{value_t, App, Arg};
use log::debug;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use sliding_puzzle_solver::config::{Heuristic, Method};
use sliding_puzzle_solver::puzzle::{PuzzleState, DEFAULT_SHUFFLE_STEPS};
use sliding_puzzle_solver::{LoadPuzzle, Solve};

fn main() {
    env_logger::init();

    let default_steps = DEFAULT_SHUFFLE_STEPS.to_string();
    let matches = App::new("sliding-puzzle-solver")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .takes_value(true)
                .default_value("3")
                .help("rows of a generated board"),
        )
        .arg(
            Arg::with_name("cols")
                .short("c")
                .long("cols")
                .takes_value(true)
                .default_value("3")
                .help("columns of a generated board"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .takes_value(true)
                .default_value(&default_steps)
                .help("random moves used to shuffle a generated board"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("seed for shuffling (random if not given)"),
        )
        .arg(
            Arg::with_name("closed-set")
                .long("closed-set")
                .help("never expand the same state twice"),
        )
        .arg(
            Arg::with_name("hamming")
                .long("hamming")
                .help("use the hamming distance instead of manhattan"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("print stats whenever a new depth is reached"),
        )
        .arg(Arg::with_name("file").help("board to solve instead of generating one"))
        .get_matches();

    let method = if matches.is_present("closed-set") {
        Method::ClosedSet
    } else {
        Method::ParentCheck
    };
    let heuristic = if matches.is_present("hamming") {
        Heuristic::Hamming
    } else {
        Heuristic::Manhattan
    };
    let print_status = matches.is_present("verbose");

    let initial = match matches.value_of("file") {
        Some(path) => path.load_puzzle().unwrap_or_else(|err| {
            let current_dir = env::current_dir().unwrap_or_default();
            eprintln!(
                "Can't load puzzle {} in {}: {}",
                path,
                current_dir.display(),
                err
            );
            process::exit(1);
        }),
        None => {
            let rows = value_t!(matches, "rows", usize).unwrap_or_else(|e| e.exit());
            let cols = value_t!(matches, "cols", usize).unwrap_or_else(|e| e.exit());
            let steps = value_t!(matches, "steps", usize).unwrap_or_else(|e| e.exit());

            let goal = PuzzleState::new(rows, cols).unwrap_or_else(|err| {
                eprintln!("Can't create puzzle: {}", err);
                process::exit(1);
            });
            if matches.is_present("seed") {
                let seed = value_t!(matches, "seed", u64).unwrap_or_else(|e| e.exit());
                debug!("Shuffling with seed {}", seed);
                goal.shuffled(&mut StdRng::seed_from_u64(seed), steps)
            } else {
                goal.shuffled(&mut thread_rng(), steps)
            }
        }
    };

    println!("Initial board:\n{}", initial);
    println!("Solving...");
    let solver_ok = initial
        .solve(method, heuristic, print_status)
        .unwrap_or_else(|err| {
            eprintln!("Failed to solve: {}", err);
            process::exit(1);
        });
    println!("{}", solver_ok.stats);
    println!("Found solution:");
    for state in solver_ok.solution() {
        println!("{}", state);
    }
    match solver_ok.blank_moves(&initial) {
        Some(moves) => println!("{}", moves),
        None => {
            eprintln!("Solution doesn't start from the initial board");
            process::exit(1);
        }
    }
    println!("Moves: {}", solver_ok.moves());
}
