pub(crate) mod a_star;

use std::collections::BinaryHeap;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use fnv::FnvHashSet;
use log::{debug, trace};

use crate::config::{Heuristic, Method};
use crate::data::Pos;
use crate::moves::Moves;
use crate::puzzle::PuzzleState;
use crate::Solve;

use self::a_star::{QueueEntry, SearchNode};

pub use self::a_star::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    SearchExhausted,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::SearchExhausted => write!(
                f,
                "Search exhausted - no solution found, the puzzle is not solvable"
            ),
        }
    }
}

impl Error for SolverErr {}

pub struct SolverOk {
    /// From the state after the first move to the goal, the initial state is not included.
    pub path_states: Vec<PuzzleState>,
    pub stats: Stats,
    pub method: Method,
}

impl SolverOk {
    fn new(path_states: Vec<PuzzleState>, stats: Stats, method: Method) -> Self {
        Self {
            path_states,
            stats,
            method,
        }
    }

    pub fn moves(&self) -> usize {
        self.path_states.len()
    }

    pub fn solution(&self) -> &[PuzzleState] {
        &self.path_states
    }

    pub fn into_solution(self) -> Vec<PuzzleState> {
        self.path_states
    }

    /// The cells the blank visits - clicking these in order on the initial board replays the solution.
    pub fn blank_positions<'a>(&'a self) -> impl Iterator<Item = Pos> + 'a {
        self.path_states.iter().map(PuzzleState::blank)
    }

    /// Directions of the blank from `initial` through the solution.
    ///
    /// `None` if `initial` isn't the state that was solved.
    pub fn blank_moves(&self, initial: &PuzzleState) -> Option<Moves> {
        let mut moves = Moves::default();
        let mut cur = initial;
        for next in &self.path_states {
            moves.add(cur.dir_to(next)?);
            cur = next;
        }
        Some(moves)
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.method, self.moves())?;
        write!(f, "{}", self.stats)
    }
}

impl Solve for PuzzleState {
    fn solve(
        &self,
        method: Method,
        heuristic: Heuristic,
        print_status: bool,
    ) -> Result<SolverOk, SolverErr> {
        solve(self, method, heuristic, print_status)
    }
}

fn solve(
    initial: &PuzzleState,
    method: Method,
    heuristic: Heuristic,
    print_status: bool,
) -> Result<SolverOk, SolverErr> {
    if initial.is_solved() {
        debug!("Already solved");
        return Ok(SolverOk::new(Vec::new(), Stats::new(), method));
    }

    match heuristic {
        Heuristic::Manhattan => search(initial, method, print_status, heuristic_manhattan),
        Heuristic::Hamming => search(initial, method, print_status, heuristic_hamming),
    }
}

fn search<H>(
    initial: &PuzzleState,
    method: Method,
    print_status: bool,
    heuristic: H,
) -> Result<SolverOk, SolverErr>
where
    H: Fn(&PuzzleState) -> u32,
{
    debug!("Search called with {}", method);

    let mut stats = Stats::new();

    let mut nodes = vec![SearchNode::new(initial.clone(), None, 0)];
    let mut to_visit = BinaryHeap::new();
    let mut closed: Option<FnvHashSet<PuzzleState>> = match method {
        Method::ClosedSet => Some(FnvHashSet::default()),
        Method::ParentCheck => None,
    };
    let mut seq = 0;

    stats.add_created(0);
    to_visit.push(QueueEntry::new(0, heuristic(initial), seq));
    seq += 1;

    while let Some(entry) = to_visit.pop() {
        let cur_index = entry.index;
        let cur_dist = nodes[cur_index].dist;

        if let Some(ref mut closed) = closed {
            if closed.contains(&nodes[cur_index].state) {
                stats.add_reached_duplicate(cur_dist);
                continue;
            }
            closed.insert(nodes[cur_index].state.clone());
        }

        if stats.add_visited(cur_dist) && print_status {
            println!("Visited new depth: {}", cur_dist);
            println!("{:?}", stats);
        }

        if nodes[cur_index].state.is_solved() {
            debug!("Solved, backtracking path");
            return Ok(SolverOk::new(backtrack_path(&nodes, cur_index), stats, method));
        }

        let prev = nodes[cur_index].prev;
        for neighbor_state in nodes[cur_index].state.neighbours() {
            // only the immediate backtrack is caught here, longer cycles get queued again
            if let Some(prev) = prev {
                if nodes[prev].state == neighbor_state {
                    stats.add_skipped(cur_dist + 1);
                    continue;
                }
            }

            let h = heuristic(&neighbor_state);
            trace!("Queueing dist {} h {}", cur_dist + 1, h);
            nodes.push(SearchNode::new(neighbor_state, Some(cur_index), cur_dist + 1));
            stats.add_created(cur_dist + 1);
            to_visit.push(QueueEntry::new(nodes.len() - 1, cur_dist + 1 + h, seq));
            seq += 1;
        }
    }

    debug!("Queue empty without reaching the goal");
    Err(SolverErr::SearchExhausted)
}

fn heuristic_manhattan(state: &PuzzleState) -> u32 {
    state.manhattan_distance()
}

fn heuristic_hamming(state: &PuzzleState) -> u32 {
    state.hamming_distance()
}

/// States from the first move to `final_index`, the initial state is left out.
fn backtrack_path(nodes: &[SearchNode], final_index: usize) -> Vec<PuzzleState> {
    let mut ret = Vec::new();
    let mut index = final_index;
    while let Some(prev) = nodes[index].prev {
        ret.push(nodes[index].state.clone());
        index = prev;
    }
    ret.reverse();
    ret
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::Dir;

    fn solve_default(state: &PuzzleState) -> SolverOk {
        state
            .solve(Method::ParentCheck, Heuristic::Manhattan, false)
            .unwrap()
    }

    fn assert_valid_solution(initial: &PuzzleState, solution: &SolverOk) {
        assert_eq!(solution.moves(), solution.solution().len());

        let mut cur = initial;
        for next in solution.solution() {
            assert!(cur.dir_to(next).is_some(), "{:?} -> {:?}", cur, next);
            cur = next;
        }
        assert!(cur.is_solved());
        assert_eq!(cur.hamming_distance(), 0);
    }

    #[test]
    fn already_solved() {
        let goal = PuzzleState::new(3, 3).unwrap();
        for &method in &[Method::ParentCheck, Method::ClosedSet] {
            let solution = goal.solve(method, Heuristic::Manhattan, false).unwrap();
            assert_eq!(solution.moves(), 0);
            assert!(solution.solution().is_empty());
            assert_eq!(solution.stats.total_created(), 0);
            assert_eq!(solution.blank_moves(&goal).unwrap().move_cnt(), 0);
        }
    }

    #[test]
    fn one_move() {
        let initial: PuzzleState = "1 2 3\n4 5 6\n7 _ 8".parse().unwrap();
        let solution = solve_default(&initial);

        assert_eq!(solution.moves(), 1);
        assert_eq!(solution.solution()[0], PuzzleState::new(3, 3).unwrap());
        assert_eq!(solution.blank_moves(&initial).unwrap().to_string(), "r");
        assert_eq!(
            solution.blank_positions().collect::<Vec<_>>(),
            vec![Pos::new(2, 2)]
        );

        // root + its 3 neighbours, goal popped right after the root
        assert_eq!(solution.stats.total_created(), 4);
        assert_eq!(solution.stats.total_visited(), 2);
        assert_eq!(solution.stats.total_skipped(), 0);
    }

    #[test]
    fn immediate_backtrack_skipped() {
        let goal = PuzzleState::new(3, 3).unwrap();
        let initial = goal
            .moved(Dir::Up)
            .and_then(|s| s.moved(Dir::Left))
            .unwrap();
        let solution = solve_default(&initial);

        assert_eq!(solution.moves(), 2);
        assert_eq!(solution.blank_moves(&initial).unwrap().to_string(), "rd");
        // the one visited child would have regenerated the root
        assert!(solution.stats.total_skipped() >= 1);
        assert_valid_solution(&initial, &solution);
    }

    #[test]
    fn blank_moves_from_wrong_initial() {
        let initial: PuzzleState = "1 2 3\n4 _ 6\n7 5 8".parse().unwrap();
        let solution = solve_default(&initial);
        assert_eq!(solution.blank_moves(&initial).unwrap().to_string(), "dr");

        // a different board, the first solution state isn't one of its neighbours
        let other: PuzzleState = "1 2 3\n_ 4 6\n7 5 8".parse().unwrap();
        assert!(solution.blank_moves(&other).is_none());
    }

    #[test]
    fn parent_check_never_counts_duplicates() {
        // only the closed set records states it already expanded
        let goal = PuzzleState::new(3, 3).unwrap();
        for seed in 30..35 {
            let mut rng = StdRng::seed_from_u64(seed);
            let initial = goal.shuffled(&mut rng, 40);
            let parent = solve_default(&initial);
            assert_eq!(parent.stats.total_reached_duplicates(), 0);
            assert_valid_solution(&initial, &parent);

            let closed = initial
                .solve(Method::ClosedSet, Heuristic::Manhattan, false)
                .unwrap();
            assert_eq!(closed.moves(), parent.moves());
            assert_valid_solution(&initial, &closed);
        }
    }

    #[test]
    fn three_shuffle_moves_solved_in_at_most_three() {
        let goal = PuzzleState::new(3, 3).unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let initial = goal.shuffled(&mut rng, 3);
            for &method in &[Method::ParentCheck, Method::ClosedSet] {
                for &heuristic in &[Heuristic::Manhattan, Heuristic::Hamming] {
                    let solution = initial.solve(method, heuristic, false).unwrap();
                    assert!(solution.moves() <= 3);
                    assert_eq!(solution.moves() % 2, 1); // parity of the blank's position
                    assert_valid_solution(&initial, &solution);
                }
            }
        }
    }

    #[test]
    fn shuffled_boards() {
        let goal = PuzzleState::new(3, 3).unwrap();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let initial = goal.shuffled(&mut rng, 30);
            let solution = solve_default(&initial);
            assert!(solution.moves() <= 30);
            assert_valid_solution(&initial, &solution);
        }
    }

    #[test]
    fn methods_agree_on_length() {
        // both are optimal with an admissible heuristic so only the path may differ
        let goal = PuzzleState::new(3, 3).unwrap();
        for seed in 10..15 {
            let mut rng = StdRng::seed_from_u64(seed);
            let initial = goal.shuffled(&mut rng, 25);
            let parent = initial
                .solve(Method::ParentCheck, Heuristic::Manhattan, false)
                .unwrap();
            let closed = initial
                .solve(Method::ClosedSet, Heuristic::Manhattan, false)
                .unwrap();
            assert_eq!(parent.moves(), closed.moves());
            assert_valid_solution(&initial, &closed);
        }
    }

    #[test]
    fn closed_set_long_shuffle() {
        let goal = PuzzleState::new(3, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let initial = goal.shuffled(&mut rng, 100);
        let solution = initial
            .solve(Method::ClosedSet, Heuristic::Manhattan, false)
            .unwrap();
        // no 8-puzzle needs more than 31 moves
        assert!(solution.moves() <= 31);
        assert_valid_solution(&initial, &solution);
    }

    #[test]
    fn rectangular_board() {
        let goal = PuzzleState::new(2, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let initial = goal.shuffled(&mut rng, 20);
        let solution = solve_default(&initial);
        assert_valid_solution(&initial, &solution);
    }

    #[test]
    fn deterministic() {
        let initial: PuzzleState = "4 1 3\n7 2 6\n_ 5 8".parse().unwrap();
        let a = solve_default(&initial);
        let b = solve_default(&initial);
        assert_eq!(a.solution(), b.solution());
        assert!(a.stats == b.stats);
        assert_eq!(a.moves(), 6);
        assert!(a.blank_moves(&initial).is_some());
        assert_eq!(a.blank_moves(&initial), b.blank_moves(&initial));
        assert_valid_solution(&initial, &a);
    }

    #[test]
    fn unsolvable_input() {
        // two tiles swapped - the goal is not reachable
        // only the closed set is guaranteed to drain the queue here
        let initial: PuzzleState = "2 1\n3 _".parse().unwrap();
        let err = initial
            .solve(Method::ClosedSet, Heuristic::Manhattan, false)
            .unwrap_err();
        assert_eq!(err, SolverErr::SearchExhausted);
    }

    #[test]
    fn independent_threads() {
        let goal = PuzzleState::new(3, 3).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let goal = goal.clone();
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let initial = goal.shuffled(&mut rng, 20);
                    let solution = solve_default(&initial);
                    assert_valid_solution(&initial, &solution);
                    solution.moves()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap() <= 20);
        }
    }
}
